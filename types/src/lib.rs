mod appointment;
mod availability;
mod calendar;
mod error;
mod user;

pub use appointment::{Appointment, AppointmentUser};
pub use availability::MonthAvailabilityEntry;
pub use calendar::{YearMonth, is_weekend};
pub use error::{Error, Result};
pub use user::{CurrentUser, SESSION_COOKIE_NAME, UserSession};

#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;
