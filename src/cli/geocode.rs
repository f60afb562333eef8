use anyhow::Result;
use geomemo::config::GeomemoConfig;
use geomemo::geocode::Geocoder;
use geomemo::services;

pub async fn run(config: &GeomemoConfig, name: &str) -> Result<()> {
    let services = services::create_services(&config.services)?;
    let geocoder = Geocoder::new(services.geocoding);

    match geocoder.resolve(name).await {
        Some(coordinate) => super::print_json(&coordinate),
        None => anyhow::bail!("no location found for '{name}'"),
    }
}
