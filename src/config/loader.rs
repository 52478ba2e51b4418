//! Load configurations from JSON documents or CSV scenario batches
//!
//! Every loaded configuration is validated before it is returned, so a
//! batch with one bad row is rejected as a whole.

use super::Configuration;
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a single configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    let file = File::open(path.as_ref())?;
    let config: Configuration = serde_json::from_reader(BufReader::new(file))?;
    config.validate()?;
    info!("Loaded configuration from {}", path.as_ref().display());
    Ok(config)
}

/// Load a batch of configurations from a CSV file, one per row
pub fn load_configs<P: AsRef<Path>>(path: P) -> Result<Vec<Configuration>> {
    let file = File::open(path.as_ref())?;
    let configs = load_configs_from_reader(file)?;
    info!("Loaded {} configurations from {}", configs.len(), path.as_ref().display());
    Ok(configs)
}

/// Load a batch of configurations from any CSV reader.
///
/// The header row uses the camelCase field names; `fallbackPartialRate`
/// may be omitted.
pub fn load_configs_from_reader<R: Read>(reader: R) -> Result<Vec<Configuration>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut configs = Vec::new();
    for row in csv_reader.deserialize() {
        let config: Configuration = row?;
        config.validate()?;
        configs.push(config);
    }
    Ok(configs)
}
