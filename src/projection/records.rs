//! Period records and whole-projection results

use super::Algorithm;
use serde::{Deserialize, Serialize};

/// State of the account after one simulated step.
///
/// Fields that only apply to some steps are `None` elsewhere: `deposit_num`
/// and `deposit` on steps without a deposit event, `period_num`,
/// `period_deposit` and `period_interest` on steps that do not close a
/// compounding cycle (or close one without any deposit, for
/// `period_deposit`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    /// 1-based step index
    pub step: u32,
    pub deposit_num: Option<u32>,
    pub deposit: Option<f64>,
    pub period_num: Option<u32>,
    pub period_deposit: Option<f64>,
    pub period_interest: Option<f64>,
    /// Interest capitalized from period 0 through this step
    pub total_interest: f64,
    /// Initial investment plus every deposit so far
    pub total_invested: f64,
    pub current_value: f64,
    pub is_year_end: bool,
}

impl PeriodRecord {
    /// Step closes a compounding cycle
    pub fn is_compounding_boundary(&self) -> bool {
        self.period_num.is_some()
    }

    /// Step carries a deposit event
    pub fn has_deposit(&self) -> bool {
        self.deposit_num.is_some()
    }
}

/// Row selection for tabular views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep only steps that are both a deposit event and a compounding boundary
    pub skip_empty_rows: bool,
    /// Keep only year-end steps
    pub year_end_only: bool,
}

impl RecordFilter {
    pub fn accepts(&self, record: &PeriodRecord) -> bool {
        if self.skip_empty_rows && !(record.is_compounding_boundary() && record.has_deposit()) {
            return false;
        }
        if self.year_end_only {
            return record.is_year_end;
        }
        true
    }
}

/// Complete projection output for one configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub algorithm: Algorithm,
    /// Account value at period 0, before any step
    pub opening_value: f64,
    pub records: Vec<PeriodRecord>,
}

impl ProjectionResult {
    /// Account value after the last step (opening value if there are no steps)
    pub fn final_value(&self) -> f64 {
        self.records.last().map(|r| r.current_value).unwrap_or(self.opening_value)
    }

    pub fn total_interest(&self) -> f64 {
        self.records.last().map(|r| r.total_interest).unwrap_or(0.0)
    }

    pub fn total_invested(&self) -> f64 {
        self.records.last().map(|r| r.total_invested).unwrap_or(self.opening_value)
    }

    /// One record per simulated year, the series charts plot
    pub fn year_end_records(&self) -> impl Iterator<Item = &PeriodRecord> {
        self.records.iter().filter(|r| r.is_year_end)
    }

    pub fn filtered<'a>(&'a self, filter: &'a RecordFilter) -> impl Iterator<Item = &'a PeriodRecord> + 'a {
        self.records.iter().filter(move |r| filter.accepts(r))
    }
}
