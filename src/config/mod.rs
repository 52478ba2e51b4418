//! Projection configuration and loaders

mod data;
pub mod loader;

pub use data::{Configuration, FallbackPartialRate};
pub use loader::{load_config, load_configs, load_configs_from_reader};
