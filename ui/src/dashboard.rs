//! View state behind the dashboard page.
//!
//! The state machine never performs I/O. Every mutation that needs data
//! returns the query to issue, and the caller hands the response back
//! together with that query. A response is applied only while its query
//! still matches what is on screen, so a slow reply for a month or day the
//! user already left can never overwrite newer state.

use std::collections::BTreeSet;
use std::fmt::Display;

use jiff::{Timestamp, Zoned, civil::Date, tz::TimeZone};
use types::{Appointment, MonthAvailabilityEntry, YearMonth, is_weekend};

use crate::calendar::CalendarMonth;
use crate::locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Request for one provider's availability over one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub provider_id: String,
    pub month: YearMonth,
}

/// Request for the signed-in provider's appointments on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentsQuery {
    pub date: Date,
}

#[derive(Debug, Clone)]
struct Fetched<K, T> {
    key: K,
    value: T,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    provider_id: String,
    tz: TimeZone,
    first_month: YearMonth,
    selected: Date,
    displayed: YearMonth,
    availability: Option<Fetched<YearMonth, Vec<MonthAvailabilityEntry>>>,
    availability_status: LoadStatus,
    appointments: Option<Fetched<Date, Vec<Appointment>>>,
    appointments_status: LoadStatus,
}

impl DashboardState {
    /// Start on `now`'s date and month. Both loads are considered in flight;
    /// issue [`Self::availability_query`] and [`Self::appointments_query`].
    pub fn new(provider_id: impl Into<String>, now: &Zoned) -> Self {
        let today = now.date();
        let month = YearMonth::of(today);

        Self {
            provider_id: provider_id.into(),
            tz: now.time_zone().clone(),
            first_month: month,
            selected: today,
            displayed: month,
            availability: None,
            availability_status: LoadStatus::Loading,
            appointments: None,
            appointments_status: LoadStatus::Loading,
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    pub fn selected_date(&self) -> Date {
        self.selected
    }

    pub fn displayed_month(&self) -> YearMonth {
        self.displayed
    }

    pub fn availability_status(&self) -> &LoadStatus {
        &self.availability_status
    }

    pub fn appointments_status(&self) -> &LoadStatus {
        &self.appointments_status
    }

    pub fn availability_query(&self) -> AvailabilityQuery {
        AvailabilityQuery {
            provider_id: self.provider_id.clone(),
            month: self.displayed,
        }
    }

    pub fn appointments_query(&self) -> AppointmentsQuery {
        AppointmentsQuery {
            date: self.selected,
        }
    }

    /// Select `day` if the picker allows it. Returns the appointments query
    /// to issue when the selection changed.
    pub fn select_date(&mut self, day: Date, is_selectable: bool) -> Option<AppointmentsQuery> {
        if !is_selectable {
            tracing::debug!(%day, "ignoring selection of a disabled day");
            return None;
        }
        if day == self.selected {
            return None;
        }

        self.selected = day;
        self.appointments_status = LoadStatus::Loading;
        Some(self.appointments_query())
    }

    /// Like [`Self::select_date`], deciding selectability from the current
    /// calendar.
    pub fn select_day(&mut self, day: Date) -> Option<AppointmentsQuery> {
        let selectable = self.is_selectable(day);
        self.select_date(day, selectable)
    }

    pub fn is_selectable(&self, day: Date) -> bool {
        self.displayed.contains(day) && !self.disabled_days().contains(&day)
    }

    pub fn change_month(&mut self, month: YearMonth) -> AvailabilityQuery {
        self.displayed = month;
        self.availability_status = LoadStatus::Loading;
        self.availability_query()
    }

    /// The picker starts at the month the dashboard was opened in.
    pub fn can_go_to_previous_month(&self) -> bool {
        self.displayed > self.first_month
    }

    pub fn previous_month(&mut self) -> Option<AvailabilityQuery> {
        if !self.can_go_to_previous_month() {
            return None;
        }
        let month = self.displayed.previous()?;
        Some(self.change_month(month))
    }

    pub fn next_month(&mut self) -> Option<AvailabilityQuery> {
        let month = self.displayed.next()?;
        Some(self.change_month(month))
    }

    /// Apply an availability response. Returns `false` when the response
    /// was for a month that is no longer displayed and was dropped.
    pub fn on_availability_loaded<E: Display>(
        &mut self,
        query: &AvailabilityQuery,
        result: Result<Vec<MonthAvailabilityEntry>, E>,
    ) -> bool {
        if query.month != self.displayed || query.provider_id != self.provider_id {
            tracing::debug!(
                requested = %query.month,
                displayed = %self.displayed,
                "dropping stale availability response"
            );
            return false;
        }

        match result {
            Ok(entries) => {
                self.availability = Some(Fetched {
                    key: query.month,
                    value: entries,
                });
                self.availability_status = LoadStatus::Loaded;
            }
            Err(error) => {
                tracing::warn!(month = %query.month, %error, "failed to load availability");
                self.availability_status = LoadStatus::Failed(error.to_string());
            }
        }
        true
    }

    /// Apply an appointments response. Returns `false` when the response
    /// was for a day that is no longer selected and was dropped.
    pub fn on_appointments_loaded<E: Display>(
        &mut self,
        query: &AppointmentsQuery,
        result: Result<Vec<Appointment>, E>,
    ) -> bool {
        if query.date != self.selected {
            tracing::debug!(
                requested = %query.date,
                selected = %self.selected,
                "dropping stale appointments response"
            );
            return false;
        }

        match result {
            Ok(mut appointments) => {
                appointments.sort_by_key(|a| a.date);
                self.appointments = Some(Fetched {
                    key: query.date,
                    value: appointments,
                });
                self.appointments_status = LoadStatus::Loaded;
            }
            Err(error) => {
                tracing::warn!(date = %query.date, %error, "failed to load appointments");
                self.appointments_status = LoadStatus::Failed(error.to_string());
            }
        }
        true
    }

    pub fn retry_availability(&mut self) -> AvailabilityQuery {
        self.availability_status = LoadStatus::Loading;
        self.availability_query()
    }

    pub fn retry_appointments(&mut self) -> AppointmentsQuery {
        self.appointments_status = LoadStatus::Loading;
        self.appointments_query()
    }

    /// Availability entries fetched for the displayed month, if any.
    pub fn availability(&self) -> &[MonthAvailabilityEntry] {
        match &self.availability {
            Some(fetched) if fetched.key == self.displayed => &fetched.value,
            _ => &[],
        }
    }

    pub fn disabled_days(&self) -> BTreeSet<Date> {
        disabled_days(self.displayed, self.availability())
    }

    /// Appointments of the selected day, in time order.
    pub fn appointments(&self) -> &[Appointment] {
        match &self.appointments {
            Some(fetched) if fetched.key == self.selected => &fetched.value,
            _ => &[],
        }
    }

    pub fn morning_appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments()
            .iter()
            .filter(|a| a.date.to_zoned(self.tz.clone()).hour() < 12)
    }

    pub fn afternoon_appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments()
            .iter()
            .filter(|a| a.date.to_zoned(self.tz.clone()).hour() >= 12)
    }

    /// First appointment still ahead of `now`. Only today has one.
    pub fn next_appointment(&self, now: Timestamp) -> Option<&Appointment> {
        if !self.is_today(now.to_zoned(self.tz.clone()).date()) {
            return None;
        }
        self.appointments().iter().find(|a| a.date > now)
    }

    pub fn hour_label(&self, appointment: &Appointment) -> String {
        locale::hour_label(appointment.date, &self.tz)
    }

    pub fn selected_date_label(&self) -> String {
        locale::date_label(self.selected)
    }

    pub fn selected_weekday_label(&self) -> &'static str {
        locale::weekday_name(self.selected.weekday())
    }

    pub fn is_today(&self, today: Date) -> bool {
        self.selected == today
    }

    /// Whether the selection is the real current day, read from the clock.
    pub fn is_selected_today(&self) -> bool {
        self.is_selected_today_at(Timestamp::now())
    }

    /// Whether the selection is the day `now` falls on in the dashboard's time zone.
    pub fn is_selected_today_at(&self, now: Timestamp) -> bool {
        self.is_today(now.to_zoned(self.tz.clone()).date())
    }

    pub fn calendar(&self, today: Date) -> CalendarMonth {
        CalendarMonth::build(self.displayed, &self.disabled_days(), self.selected, today)
    }
}

/// Days of `month` the picker must refuse: every Saturday and Sunday, plus
/// the days the provider reported as unavailable.
pub fn disabled_days(month: YearMonth, entries: &[MonthAvailabilityEntry]) -> BTreeSet<Date> {
    let weekends = month.days().filter(|d| is_weekend(*d));
    let unavailable = entries
        .iter()
        .filter(|e| !e.available)
        .filter_map(|e| month.day(e.day));

    weekends.chain(unavailable).collect()
}
