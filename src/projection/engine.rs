//! Algorithm dispatch, step plans, and the projection engine

use super::records::ProjectionResult;
use super::state::ProjectionState;
use crate::config::{Configuration, FallbackPartialRate};
use crate::error::{ProjectionError, Result};
use crate::frequency::{occurrences_within, Frequency};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Compounding cycles in the annualized fallback's year (13 four-week cycles)
pub const ANNUALIZED_CYCLES_PER_YEAR: u32 = 13;

/// How the deposit and compounding schedules are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Deposits at the same cadence as, or more often than, compounding.
    /// One step per deposit.
    Aligned,
    /// Compounding more often than deposits. One step per compounding period.
    CompoundingFaster,
    /// Daily, weekly or bi-weekly deposits into monthly compounding.
    /// One step per deposit over a year of 13 four-week cycles.
    AnnualizedFallback,
}

impl Algorithm {
    /// Pick the algorithm for a deposit/compounding pair
    pub fn select(deposit: Frequency, compound: Frequency) -> Self {
        if deposit.is_finer_than(Frequency::Monthly) && compound == Frequency::Monthly {
            Algorithm::AnnualizedFallback
        } else if compound.is_finer_than(deposit) {
            Algorithm::CompoundingFaster
        } else {
            Algorithm::Aligned
        }
    }
}

/// Deposits per four-week cycle in the annualized fallback
pub fn annualized_deposits_per_cycle(deposit: Frequency) -> u32 {
    match deposit {
        Frequency::Daily => 28,
        Frequency::Weekly => 4,
        _ => 2,
    }
}

/// Iteration parameters shared by all three algorithms.
///
/// A step is a deposit event every `deposit_spacing` steps and closes a
/// compounding cycle every `cycle_length` steps. One of the two is always 1.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlan {
    pub algorithm: Algorithm,
    pub steps_per_year: u32,
    pub total_steps: u32,
    pub cycle_length: u32,
    pub deposit_spacing: u32,
    /// Periodic rate applied when a cycle closes
    pub boundary_rate: f64,
    /// Periodic rate used for mid-cycle accrual on deposits
    pub partial_rate: f64,
}

impl StepPlan {
    /// Build the plan for a configuration. The configuration is assumed valid.
    pub fn for_config(config: &Configuration) -> Result<Self> {
        let deposit = config.regular_deposit_interval;
        let compound = config.compound_interval;
        let algorithm = Algorithm::select(deposit, compound);
        let general_rate = compound.periodic_rate(config.interest_rate);

        let (steps_per_year, cycle_length, deposit_spacing, boundary_rate, partial_rate) = match algorithm {
            Algorithm::Aligned => {
                let per_cycle = lookup(deposit, compound)?;
                (deposit.periods_per_year(), per_cycle, 1, general_rate, general_rate)
            }
            Algorithm::CompoundingFaster => {
                let per_deposit = lookup(compound, deposit)?;
                (compound.periods_per_year(), 1, per_deposit, general_rate, general_rate)
            }
            Algorithm::AnnualizedFallback => {
                let per_cycle = annualized_deposits_per_cycle(deposit);
                let cycle_rate = config.interest_rate / ANNUALIZED_CYCLES_PER_YEAR as f64 / 100.0;
                let partial_rate = match config.fallback_partial_rate {
                    FallbackPartialRate::General => general_rate,
                    FallbackPartialRate::Annualized => cycle_rate,
                };
                (ANNUALIZED_CYCLES_PER_YEAR * per_cycle, per_cycle, 1, cycle_rate, partial_rate)
            }
        };

        let total_steps = steps_per_year
            .checked_mul(config.timeframe)
            .ok_or(ProjectionError::TimeframeTooLong(config.timeframe))?;

        Ok(Self {
            algorithm,
            steps_per_year,
            total_steps,
            cycle_length,
            deposit_spacing,
            boundary_rate,
            partial_rate,
        })
    }
}

fn lookup(finer: Frequency, coarser: Frequency) -> Result<u32> {
    occurrences_within(finer, coarser).ok_or(ProjectionError::UnsupportedPair { finer, coarser })
}

/// First (finer, coarser) pair the dispatcher can reach that has no
/// occurrence count, if any
pub fn find_missing_pair() -> Option<(Frequency, Frequency)> {
    for deposit in Frequency::ALL {
        for compound in Frequency::ALL {
            let needed = match Algorithm::select(deposit, compound) {
                Algorithm::Aligned => Some((deposit, compound)),
                Algorithm::CompoundingFaster => Some((compound, deposit)),
                Algorithm::AnnualizedFallback => None,
            };
            if let Some((finer, coarser)) = needed {
                if occurrences_within(finer, coarser).is_none() {
                    return Some((finer, coarser));
                }
            }
        }
    }
    None
}

/// Checked once per process
fn check_occurrence_table() -> Result<()> {
    static MISSING: OnceLock<Option<(Frequency, Frequency)>> = OnceLock::new();
    match *MISSING.get_or_init(find_missing_pair) {
        Some((finer, coarser)) => Err(ProjectionError::UnsupportedPair { finer, coarser }),
        None => Ok(()),
    }
}

/// Projection engine for a single validated configuration
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: Configuration,
    plan: StepPlan,
}

impl ProjectionEngine {
    /// Validate the configuration and plan the run.
    ///
    /// All rejection happens here; [`ProjectionEngine::project`] cannot fail.
    pub fn new(config: Configuration) -> Result<Self> {
        check_occurrence_table()?;
        config.validate()?;
        let plan = StepPlan::for_config(&config)?;

        debug!(
            "{} deposits into {} compounding: {:?}, {} steps ({} per year), cycle {} steps, deposit every {} steps",
            config.regular_deposit_interval,
            config.compound_interval,
            plan.algorithm,
            plan.total_steps,
            plan.steps_per_year,
            plan.cycle_length,
            plan.deposit_spacing,
        );
        if plan.algorithm == Algorithm::AnnualizedFallback
            && config.fallback_partial_rate == FallbackPartialRate::General
        {
            warn!(
                "annualized fallback accrues mid-cycle interest at {}/year but closes cycles at {}/year",
                config.compound_interval.periods_per_year(),
                ANNUALIZED_CYCLES_PER_YEAR,
            );
        }

        Ok(Self { config, plan })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn plan(&self) -> &StepPlan {
        &self.plan
    }

    /// Run the projection, one record per step
    pub fn project(&self) -> ProjectionResult {
        let mut state = ProjectionState::new(self.config.initial_investment);
        let records = (0..self.plan.total_steps)
            .map(|_| state.advance(&self.plan, self.config.regular_deposit_amount))
            .collect();

        ProjectionResult {
            algorithm: self.plan.algorithm,
            opening_value: self.config.initial_investment,
            records,
        }
    }

    /// Project independent configurations in parallel, preserving order.
    /// Fails if any configuration is rejected.
    pub fn project_batch(configs: &[Configuration]) -> Result<Vec<ProjectionResult>> {
        configs
            .par_iter()
            .map(|config| project(config.clone()))
            .collect()
    }
}

/// Validate and project a configuration in one call
pub fn project(config: Configuration) -> Result<ProjectionResult> {
    Ok(ProjectionEngine::new(config)?.project())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(deposit: Frequency, compound: Frequency) -> Configuration {
        Configuration {
            initial_investment: 1000.0,
            regular_deposit_amount: 100.0,
            regular_deposit_interval: deposit,
            interest_rate: 6.0,
            compound_interval: compound,
            timeframe: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_dispatch_rules() {
        use Frequency::*;
        assert_eq!(Algorithm::select(Monthly, Monthly), Algorithm::Aligned);
        assert_eq!(Algorithm::select(Weekly, Quarterly), Algorithm::Aligned);
        assert_eq!(Algorithm::select(Yearly, Monthly), Algorithm::CompoundingFaster);
        assert_eq!(Algorithm::select(Monthly, Daily), Algorithm::CompoundingFaster);
        assert_eq!(Algorithm::select(Daily, Monthly), Algorithm::AnnualizedFallback);
        assert_eq!(Algorithm::select(Weekly, Monthly), Algorithm::AnnualizedFallback);
        assert_eq!(Algorithm::select(BiWeekly, Monthly), Algorithm::AnnualizedFallback);
        // Fallback only applies to monthly compounding
        assert_eq!(Algorithm::select(Daily, Weekly), Algorithm::Aligned);
    }

    #[test]
    fn test_table_complete_for_reachable_pairs() {
        assert_eq!(find_missing_pair(), None);
        assert!(check_occurrence_table().is_ok());
    }

    #[test]
    fn test_aligned_plan() {
        let plan = StepPlan::for_config(&config(Frequency::Monthly, Frequency::Quarterly)).unwrap();
        assert_eq!(plan.algorithm, Algorithm::Aligned);
        assert_eq!(plan.steps_per_year, 12);
        assert_eq!(plan.total_steps, 24);
        assert_eq!(plan.cycle_length, 3);
        assert_eq!(plan.deposit_spacing, 1);
        assert!((plan.boundary_rate - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_compounding_faster_plan() {
        let plan = StepPlan::for_config(&config(Frequency::Quarterly, Frequency::Weekly)).unwrap();
        assert_eq!(plan.algorithm, Algorithm::CompoundingFaster);
        assert_eq!(plan.steps_per_year, 52);
        assert_eq!(plan.cycle_length, 1);
        assert_eq!(plan.deposit_spacing, 13);
    }

    #[test]
    fn test_fallback_plan_rates() {
        let mut cfg = config(Frequency::Weekly, Frequency::Monthly);
        cfg.interest_rate = 13.0;

        let plan = StepPlan::for_config(&cfg).unwrap();
        assert_eq!(plan.algorithm, Algorithm::AnnualizedFallback);
        assert_eq!(plan.steps_per_year, 52);
        assert_eq!(plan.cycle_length, 4);
        assert!((plan.boundary_rate - 0.01).abs() < 1e-12);
        assert!((plan.partial_rate - 13.0 / 12.0 / 100.0).abs() < 1e-12);

        cfg.fallback_partial_rate = FallbackPartialRate::Annualized;
        let plan = StepPlan::for_config(&cfg).unwrap();
        assert!((plan.partial_rate - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_deposits_per_cycle() {
        assert_eq!(annualized_deposits_per_cycle(Frequency::Daily), 28);
        assert_eq!(annualized_deposits_per_cycle(Frequency::Weekly), 4);
        assert_eq!(annualized_deposits_per_cycle(Frequency::BiWeekly), 2);
    }

    #[test]
    fn test_engine_rejects_before_running() {
        let mut cfg = config(Frequency::Monthly, Frequency::Monthly);
        cfg.regular_deposit_amount = -10.0;
        assert!(ProjectionEngine::new(cfg).is_err());
    }

    #[test]
    fn test_batch_preserves_order() {
        let configs = vec![
            config(Frequency::Monthly, Frequency::Monthly),
            config(Frequency::Yearly, Frequency::Monthly),
            config(Frequency::Daily, Frequency::Monthly),
        ];
        let results = ProjectionEngine::project_batch(&configs).unwrap();
        let algorithms: Vec<Algorithm> = results.iter().map(|r| r.algorithm).collect();
        assert_eq!(
            algorithms,
            vec![Algorithm::Aligned, Algorithm::CompoundingFaster, Algorithm::AnnualizedFallback]
        );
    }
}
