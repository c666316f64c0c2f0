use std::collections::BTreeSet;

use jiff::civil::{Date, Weekday};
use types::{YearMonth, is_weekend};

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: Date,
    pub disabled: bool,
    pub selected: bool,
    pub today: bool,
    /// Monday to Friday, the days the shop opens.
    pub available: bool,
}

impl CalendarDay {
    pub fn class(&self) -> String {
        let mut class = String::from("calendar-day");
        for (on, name) in [
            (self.available, " available"),
            (self.disabled, " disabled"),
            (self.selected, " selected"),
            (self.today, " today"),
        ] {
            if on {
                class.push_str(name);
            }
        }
        class
    }
}

/// Sunday-first weeks of a month, padded with `None` at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub month: YearMonth,
    pub weeks: Vec<[Option<CalendarDay>; 7]>,
}

pub const WEEK: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl CalendarMonth {
    pub fn build(month: YearMonth, disabled: &BTreeSet<Date>, selected: Date, today: Date) -> Self {
        let mut weeks = Vec::new();
        let mut week: [Option<CalendarDay>; 7] = [None; 7];

        for date in month.days() {
            let column = date.weekday().to_sunday_zero_offset() as usize;
            week[column] = Some(CalendarDay {
                date,
                disabled: disabled.contains(&date),
                selected: date == selected,
                today: date == today,
                available: !is_weekend(date),
            });
            if column == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }

        Self { month, weeks }
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten().flatten()
    }
}
