//! Dashboard view state and the components that render it.

pub mod calendar;
pub mod components;
pub mod dashboard;
pub mod locale;

pub use calendar::{CalendarDay, CalendarMonth};
pub use components::{AppointmentCard, Calendar};
pub use dashboard::{AppointmentsQuery, AvailabilityQuery, DashboardState, LoadStatus, disabled_days};
