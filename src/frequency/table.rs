//! Occurrence table: how many periods of one cadence fit inside another
//!
//! Calendar conventions are not uniform (a quarter is 91 days, a month is
//! 30 days but 4 weeks), so this is a lookup rather than a ratio of
//! periods-per-year.

use super::Frequency;

/// Rows: the finer cadence. Columns: the coarser cadence. Both in rank order
/// (daily, weekly, bi-weekly, monthly, quarterly, semi-annually, yearly).
/// `None` marks a coarser cadence inside a finer one.
const OCCURRENCES: [[Option<u32>; 7]; 7] = [
    // daily
    [Some(1), Some(7), Some(14), Some(30), Some(91), Some(182), Some(365)],
    // weekly
    [None, Some(1), Some(2), Some(4), Some(13), Some(26), Some(52)],
    // bi-weekly
    [None, None, Some(1), Some(2), Some(6), Some(13), Some(26)],
    // monthly
    [None, None, None, Some(1), Some(3), Some(6), Some(12)],
    // quarterly
    [None, None, None, None, Some(1), Some(2), Some(4)],
    // semi-annually
    [None, None, None, None, None, Some(1), Some(2)],
    // yearly
    [None, None, None, None, None, None, Some(1)],
];

/// Number of `finer` periods in one `coarser` period, e.g. weekly within
/// quarterly is 13. Returns `None` when `finer` is actually coarser.
pub fn occurrences_within(finer: Frequency, coarser: Frequency) -> Option<u32> {
    OCCURRENCES[finer.rank() as usize][coarser.rank() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_conventions() {
        assert_eq!(occurrences_within(Frequency::Daily, Frequency::Quarterly), Some(91));
        assert_eq!(occurrences_within(Frequency::Daily, Frequency::SemiAnnually), Some(182));
        assert_eq!(occurrences_within(Frequency::Weekly, Frequency::Monthly), Some(4));
        assert_eq!(occurrences_within(Frequency::BiWeekly, Frequency::Yearly), Some(26));
        assert_eq!(occurrences_within(Frequency::Monthly, Frequency::Yearly), Some(12));
    }

    #[test]
    fn test_diagonal_is_one() {
        for freq in Frequency::ALL {
            assert_eq!(occurrences_within(freq, freq), Some(1));
        }
    }

    #[test]
    fn test_coarser_inside_finer_is_undefined() {
        for finer in Frequency::ALL {
            for coarser in Frequency::ALL {
                let entry = occurrences_within(finer, coarser);
                assert_eq!(entry.is_some(), finer.rank() <= coarser.rank(), "{finer} within {coarser}");
            }
        }
    }

    #[test]
    fn test_yearly_column_matches_periods_per_year() {
        for finer in Frequency::ALL {
            assert_eq!(occurrences_within(finer, Frequency::Yearly), Some(finer.periods_per_year()));
        }
    }
}
