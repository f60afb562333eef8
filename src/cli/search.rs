use anyhow::Result;
use geomemo::config::GeomemoConfig;
use geomemo::search::CityAutocomplete;
use geomemo::services;

pub async fn run(config: &GeomemoConfig, fragment: &str) -> Result<()> {
    let services = services::create_services(&config.services)?;
    let engine = CityAutocomplete::new(services.search);

    if let Some(handle) = engine.set_query(fragment) {
        handle.await?;
    }

    let results = engine.results();
    if results.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }
    for (i, title) in results.iter().enumerate() {
        println!("{:>2}. {title}", i + 1);
    }
    Ok(())
}
