//! Brazilian Portuguese names for dates. Fixed tables, no locale database.

use jiff::{Timestamp, civil::Date, civil::Weekday, tz::TimeZone};
use types::YearMonth;

const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Month name for a 1-based month number.
pub fn month_name(month: i8) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| MONTHS.get(i))
        .copied()
        .unwrap_or_default()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "segunda-feira",
        Weekday::Tuesday => "terça-feira",
        Weekday::Wednesday => "quarta-feira",
        Weekday::Thursday => "quinta-feira",
        Weekday::Friday => "sexta-feira",
        Weekday::Saturday => "sábado",
        Weekday::Sunday => "domingo",
    }
}

/// Column header for the calendar grid.
pub fn weekday_initial(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "D",
        Weekday::Tuesday => "T",
        Weekday::Wednesday | Weekday::Thursday => "Q",
        Weekday::Monday | Weekday::Friday | Weekday::Saturday => "S",
    }
}

/// "Dia 04 de Março"
pub fn date_label(date: Date) -> String {
    format!("Dia {:02} de {}", date.day(), month_name(date.month()))
}

/// "Março 2024"
pub fn month_label(month: YearMonth) -> String {
    format!("{} {}", month_name(month.month()), month.year())
}

/// Wall-clock time of `at` in `tz`, as "HH:mm".
pub fn hour_label(at: Timestamp, tz: &TimeZone) -> String {
    at.to_zoned(tz.clone()).strftime("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn labels_for_a_monday_in_march() {
        let day = date(2024, 3, 4);
        assert_eq!(date_label(day), "Dia 04 de Março");
        assert_eq!(weekday_name(day.weekday()), "segunda-feira");
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), "Janeiro");
        assert_eq!(month_name(12), "Dezembro");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn month_label_includes_year() {
        assert_eq!(month_label(YearMonth::new(2024, 12).unwrap()), "Dezembro 2024");
    }

    #[test]
    fn hour_label_uses_time_zone() {
        let at: Timestamp = "2024-03-04T13:05:00Z".parse().unwrap();
        assert_eq!(hour_label(at, &TimeZone::UTC), "13:05");
        assert_eq!(hour_label(at, &TimeZone::fixed(jiff::tz::offset(-3))), "10:05");
    }
}
