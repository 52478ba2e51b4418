//! Compound Projection - period-by-period growth of an investment under compound interest
//!
//! This library provides:
//! - Frequency tags with rank, periods-per-year and an occurrence table
//! - Configuration loading and upfront validation
//! - A projection engine reconciling deposit and compounding schedules
//! - Result helpers for summaries, year-end series and table filters

pub mod error;
pub mod frequency;
pub mod config;
pub mod projection;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use frequency::Frequency;
pub use config::{Configuration, FallbackPartialRate};
pub use projection::{Algorithm, PeriodRecord, ProjectionEngine, ProjectionResult, RecordFilter};
