use anyhow::Result;
use geomemo::config::GeomemoConfig;
use geomemo::geo::{Coordinate, ViewportFitter};

pub fn run(config: &GeomemoConfig, points: &[Coordinate]) -> Result<()> {
    let fitter = ViewportFitter::new(&config.viewport);
    let region = fitter.fit(points).unwrap_or_else(|| {
        tracing::info!("no points given, using the default region");
        fitter.default_region()
    });
    super::print_json(&region)
}
