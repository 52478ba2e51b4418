//! Frequency tags shared by the deposit and compounding schedules

mod table;

pub use table::occurrences_within;

use crate::error::ProjectionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cadence of deposits or of interest capitalization.
///
/// Variants are declared finest first, so the derived ordering matches
/// [`Frequency::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Yearly,
}

impl Frequency {
    /// All tags in rank order
    pub const ALL: [Frequency; 7] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::SemiAnnually,
        Frequency::Yearly,
    ];

    /// Coarseness rank: daily = 0 ... yearly = 6
    pub fn rank(self) -> u8 {
        match self {
            Frequency::Daily => 0,
            Frequency::Weekly => 1,
            Frequency::BiWeekly => 2,
            Frequency::Monthly => 3,
            Frequency::Quarterly => 4,
            Frequency::SemiAnnually => 5,
            Frequency::Yearly => 6,
        }
    }

    /// Number of occurrences in one year
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Daily => 365,
            Frequency::Weekly => 52,
            Frequency::BiWeekly => 26,
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
            Frequency::SemiAnnually => 2,
            Frequency::Yearly => 1,
        }
    }

    /// Periodic rate (as a fraction) for an annual nominal percentage
    /// compounded at this cadence, e.g. 12% monthly -> 0.01
    pub fn periodic_rate(self, annual_rate_pct: f64) -> f64 {
        annual_rate_pct / self.periods_per_year() as f64 / 100.0
    }

    /// Column label for one period of this cadence
    pub fn period_label(self) -> &'static str {
        match self {
            Frequency::Daily => "Day",
            Frequency::Weekly => "Week",
            Frequency::BiWeekly => "Bi-week",
            Frequency::Monthly => "Month",
            Frequency::Quarterly => "Quarter",
            Frequency::SemiAnnually => "Semi-annual",
            Frequency::Yearly => "Year",
        }
    }

    /// The tag as written in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::SemiAnnually => "semi-annually",
            Frequency::Yearly => "yearly",
        }
    }

    /// True if this cadence occurs more often than `other`
    pub fn is_finer_than(self, other: Frequency) -> bool {
        self.rank() < other.rank()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "bi-weekly" | "biweekly" => Ok(Frequency::BiWeekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "semi-annually" | "semiannually" => Ok(Frequency::SemiAnnually),
            "yearly" | "annually" => Ok(Frequency::Yearly),
            _ => Err(ProjectionError::UnknownFrequency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = ProjectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_is_total_order() {
        for pair in Frequency::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert!(pair[0] < pair[1]);
            assert!(pair[0].periods_per_year() > pair[1].periods_per_year());
        }
        assert_eq!(Frequency::Daily.rank(), 0);
        assert_eq!(Frequency::Yearly.rank(), 6);
    }

    #[test]
    fn test_periodic_rate() {
        assert!((Frequency::Monthly.periodic_rate(12.0) - 0.01).abs() < 1e-12);
        assert!((Frequency::Yearly.periodic_rate(5.0) - 0.05).abs() < 1e-12);
        assert!((Frequency::Daily.periodic_rate(3.65) - 0.0001).abs() < 1e-12);
    }

    #[test]
    fn test_parse_tags() {
        for freq in Frequency::ALL {
            assert_eq!(freq.as_str().parse::<Frequency>().unwrap(), freq);
        }
        assert_eq!("annually".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert_eq!(" Monthly ".parse::<Frequency>().unwrap(), Frequency::Monthly);

        let err = "fortnightly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownFrequency(ref tag) if tag == "fortnightly"));
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Frequency::SemiAnnually).unwrap();
        assert_eq!(json, "\"semi-annually\"");

        let parsed: Frequency = serde_json::from_str("\"bi-weekly\"").unwrap();
        assert_eq!(parsed, Frequency::BiWeekly);

        assert!(serde_json::from_str::<Frequency>("\"hourly\"").is_err());
    }
}
