//! Projection engine reconciling deposit and compounding schedules

mod state;
mod engine;
mod records;

pub use state::ProjectionState;
pub use engine::{
    annualized_deposits_per_cycle, find_missing_pair, project, Algorithm, ProjectionEngine, StepPlan,
    ANNUALIZED_CYCLES_PER_YEAR,
};
pub use records::{PeriodRecord, ProjectionResult, RecordFilter};
