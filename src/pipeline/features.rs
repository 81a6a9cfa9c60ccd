use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A calendar period of one month. Ordering is chronological (year first),
/// and the rendered label ("2017-11") sorts the same way, so monthly buckets
/// never end up in lexical month-name order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(ts: NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// The calendar month after this one.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Calendar fields derived from an order's purchase timestamp. Pure function
/// of the timestamp; the cleaner guarantees the input is non-null, so there
/// is no null handling here.
#[derive(Serialize, Clone, Debug)]
pub struct CalendarFeatures {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub quarter: u32,
    pub month_year: YearMonth,
}

impl CalendarFeatures {
    pub fn derive(ts: NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
            month_name: ts.format("%B").to_string(),
            quarter: (ts.month() - 1) / 3 + 1,
            month_year: YearMonth::of(ts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn derives_all_five_fields() {
        let c = CalendarFeatures::derive(ts(2017, 11, 3));
        assert_eq!(c.year, 2017);
        assert_eq!(c.month, 11);
        assert_eq!(c.month_name, "November");
        assert_eq!(c.quarter, 4);
        assert_eq!(c.month_year.to_string(), "2017-11");
    }

    #[test]
    fn quarter_boundaries() {
        assert_eq!(CalendarFeatures::derive(ts(2018, 1, 1)).quarter, 1);
        assert_eq!(CalendarFeatures::derive(ts(2018, 3, 31)).quarter, 1);
        assert_eq!(CalendarFeatures::derive(ts(2018, 4, 1)).quarter, 2);
        assert_eq!(CalendarFeatures::derive(ts(2018, 12, 31)).quarter, 4);
    }

    #[test]
    fn periods_sort_chronologically() {
        let oct = YearMonth::of(ts(2017, 10, 1));
        let nov = YearMonth::of(ts(2017, 11, 1));
        let dec = YearMonth::of(ts(2017, 12, 1));
        let jan = YearMonth::of(ts(2018, 1, 1));
        assert!(oct < nov && nov < dec && dec < jan);
        // rendered labels sort the same way
        assert!(nov.to_string() > oct.to_string());
        assert!(nov.to_string() < dec.to_string());
    }

    #[test]
    fn next_rolls_over_at_year_end() {
        let nov = YearMonth::of(ts(2017, 11, 1));
        assert_eq!(nov.next(), YearMonth::of(ts(2017, 12, 1)));
        assert_eq!(nov.next().next(), YearMonth::of(ts(2018, 1, 1)));
    }
}
