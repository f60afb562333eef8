pub mod capture;
pub mod fit;
pub mod geocode;
pub mod search;

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print a value as JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
