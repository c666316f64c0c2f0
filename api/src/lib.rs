use dioxus::prelude::*;
use jiff::civil::Date;
use types::{Appointment, CurrentUser, MonthAvailabilityEntry, YearMonth};

/// Session failures surface as 401 so the client can send the user back to
/// the sign-in page.
#[cfg(feature = "server")]
async fn require_session() -> ServerFnResult<types::UserSession> {
    server::require_session()
        .await
        .map_err(|e| ServerFnError::ServerError {
            message: e.message,
            code: 401,
            details: None,
        })
}

#[post("/api/current-user")]
pub async fn get_current_user() -> ServerFnResult<Option<CurrentUser>> {
    match server::get_session_from_cookie().await {
        Ok(session) => Ok(Some(session.user)),
        Err(_) => Ok(None),
    }
}

/// Which days of `month` the provider still has free slots on.
#[post("/api/month-availability")]
pub async fn get_month_availability(
    provider_id: String,
    month: YearMonth,
) -> ServerFnResult<Vec<MonthAvailabilityEntry>> {
    let session = require_session().await?;
    let entries = server::gobarber()?
        .month_availability(&session, &provider_id, month)
        .await
        .inspect_err(|e| tracing::warn!(%provider_id, %month, error = %e, "month availability failed"))?;
    Ok(entries)
}

/// The signed-in provider's appointments on `date`.
#[post("/api/appointments/me")]
pub async fn get_my_appointments(date: Date) -> ServerFnResult<Vec<Appointment>> {
    let session = require_session().await?;
    let appointments = server::gobarber()?
        .my_appointments(&session, date)
        .await
        .inspect_err(|e| tracing::warn!(%date, error = %e, "appointments failed"))?;
    Ok(appointments)
}
