use crate::error::{ProjectionError, Result};
use crate::frequency::Frequency;
use serde::{Deserialize, Serialize};

/// Partial-interest rate used mid-cycle by the annualized fallback.
///
/// Cycle-closing interest in that branch always uses `rate / 13`. Mid-cycle
/// accrual historically used the compounding tag's rate (`rate / 12` for
/// monthly); `Annualized` uses `rate / 13` for both so the two can be
/// compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPartialRate {
    #[default]
    General,
    Annualized,
}

/// Inputs for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Account value at period 0
    pub initial_investment: f64,

    /// Amount added on every deposit period
    pub regular_deposit_amount: f64,

    /// Deposit cadence
    pub regular_deposit_interval: Frequency,

    /// Annual nominal rate as a percentage (5.0 = 5%)
    pub interest_rate: f64,

    /// Compounding cadence
    pub compound_interval: Frequency,

    /// Whole years to project
    pub timeframe: u32,

    #[serde(default)]
    pub fallback_partial_rate: FallbackPartialRate,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            initial_investment: 0.0,
            regular_deposit_amount: 0.0,
            regular_deposit_interval: Frequency::Monthly,
            interest_rate: 3.0,
            compound_interval: Frequency::Monthly,
            timeframe: 30,
            fallback_partial_rate: FallbackPartialRate::General,
        }
    }
}

impl Configuration {
    /// Reject inputs the engine cannot project.
    ///
    /// Amounts must be finite and non-negative, the rate finite, and the
    /// timeframe at least one year. Negative rates are allowed.
    pub fn validate(&self) -> Result<()> {
        check_amount("initialInvestment", self.initial_investment)?;
        check_amount("regularDepositAmount", self.regular_deposit_amount)?;

        if !self.interest_rate.is_finite() {
            return Err(ProjectionError::InvalidRate(self.interest_rate));
        }
        if self.timeframe == 0 {
            return Err(ProjectionError::ZeroTimeframe);
        }
        Ok(())
    }

    /// Same configuration at a different annual rate
    pub fn with_rate(&self, interest_rate: f64) -> Self {
        Self {
            interest_rate,
            ..self.clone()
        }
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProjectionError::InvalidAmount { field, value })
    }
}
