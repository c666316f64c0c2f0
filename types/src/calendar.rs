use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Result, err};

/// A calendar month, as shown by a month picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i16,
    month: i8,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i16,
    month: i8,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = crate::Error;

    fn try_from(raw: RawYearMonth) -> Result<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl YearMonth {
    pub fn new(year: i16, month: i8) -> Result<Self> {
        // Validates the year range as well as the month.
        Date::new(year, month, 1)
            .map_err(|e| err!("invalid month {year}-{month:02}: {e}"))?;
        Ok(Self { year, month })
    }

    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i16 {
        self.year
    }

    /// Month number, 1 to 12.
    pub fn month(&self) -> i8 {
        self.month
    }

    pub fn first_day(&self) -> Date {
        Date::constant(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> i8 {
        self.first_day().days_in_month()
    }

    /// The date for `day` in this month, if the month has that many days.
    pub fn day(&self, day: i8) -> Option<Date> {
        Date::new(self.year, self.month, day).ok()
    }

    pub fn days(self) -> impl Iterator<Item = Date> {
        (1..=self.days_in_month()).filter_map(move |d| self.day(d))
    }

    pub fn contains(&self, date: Date) -> bool {
        Self::of(date) == *self
    }

    pub fn previous(&self) -> Option<Self> {
        match self.month {
            1 => Self::new(self.year.checked_sub(1)?, 12).ok(),
            m => Some(Self {
                year: self.year,
                month: m - 1,
            }),
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self.month {
            12 => Self::new(self.year.checked_add(1)?, 1).ok(),
            m => Some(Self {
                year: self.year,
                month: m + 1,
            }),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Saturdays and Sundays are never bookable.
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn rejects_out_of_range_months() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(2024, 12).is_ok());
    }

    #[test]
    fn navigation_wraps_years() {
        let december = YearMonth::new(2023, 12).unwrap();
        let january = YearMonth::new(2024, 1).unwrap();

        assert_eq!(december.next(), Some(january));
        assert_eq!(january.previous(), Some(december));
    }

    #[test]
    fn days_cover_whole_month() {
        let february = YearMonth::new(2024, 2).unwrap();
        let days: Vec<_> = february.days().collect();

        assert_eq!(days.len(), 29);
        assert_eq!(days[0], date(2024, 2, 1));
        assert_eq!(days[28], date(2024, 2, 29));
        assert_eq!(february.day(30), None);
    }

    #[test]
    fn weekend_detection() {
        // 2024-03-02 is a Saturday.
        assert!(is_weekend(date(2024, 3, 2)));
        assert!(is_weekend(date(2024, 3, 3)));
        assert!(!is_weekend(date(2024, 3, 4)));
    }

    #[test]
    fn deserialization_validates() {
        let ok: YearMonth = serde_json::from_str(r#"{"year":2024,"month":3}"#).unwrap();
        assert_eq!(ok, YearMonth::new(2024, 3).unwrap());

        let bad = serde_json::from_str::<YearMonth>(r#"{"year":2024,"month":13}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(YearMonth::new(2024, 3).unwrap().to_string(), "2024-03");
    }
}
