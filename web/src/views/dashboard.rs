use crate::use_error;
use dioxus::prelude::*;
use jiff::{Timestamp, Zoned};
use types::{Appointment, CurrentUser};
use ui::{
    AppointmentCard, AppointmentsQuery, AvailabilityQuery, Calendar, DashboardState,
};

#[component]
pub fn Dashboard() -> Element {
    let user = use_context::<CurrentUser>();
    let error_state = use_error();
    // Built on the client only, so "today" comes from the browser's clock and time zone.
    let mut state = use_signal(|| None::<DashboardState>);

    let load_availability = move |query: AvailabilityQuery| {
        spawn(async move {
            let result = api::get_month_availability(query.provider_id.clone(), query.month).await;
            if let Err(e) = &result {
                error_state.redirect_if_signed_out(e);
            }
            if let Some(state) = state.write().as_mut() {
                state.on_availability_loaded(&query, result);
            }
        });
    };

    let load_appointments = move |query: AppointmentsQuery| {
        spawn(async move {
            let result = api::get_my_appointments(query.date).await;
            if let Err(e) = &result {
                error_state.redirect_if_signed_out(e);
            }
            if let Some(state) = state.write().as_mut() {
                state.on_appointments_loaded(&query, result);
            }
        });
    };

    // Effects never run during server rendering
    use_effect(move || {
        let fresh = DashboardState::new(user.id.clone(), &Zoned::now());
        let availability = fresh.availability_query();
        let appointments = fresh.appointments_query();
        state.set(Some(fresh));
        load_availability(availability);
        load_appointments(appointments);
    });

    let guard = state.read();
    let Some(view) = guard.as_ref() else {
        return rsx! {
            div { class: "loading", "Carregando agenda..." }
        };
    };
    let now = Timestamp::now();
    let today = now.to_zoned(view.time_zone().clone()).date();

    let with_hours = |appointments: Vec<&Appointment>| -> Vec<(Appointment, String)> {
        appointments
            .into_iter()
            .map(|a| (a.clone(), view.hour_label(a)))
            .collect()
    };
    let next = view
        .next_appointment(now)
        .map(|a| (a.clone(), view.hour_label(a)));
    let morning = with_hours(view.morning_appointments().collect());
    let afternoon = with_hours(view.afternoon_appointments().collect());

    let calendar = view.calendar(today);
    let can_go_back = view.can_go_to_previous_month();
    let is_today = view.is_today(today);
    let date_label = view.selected_date_label();
    let weekday_label = view.selected_weekday_label();
    let appointments_loading = view.appointments_status().is_loading();
    let appointments_error = view.appointments_status().error().map(String::from);
    let availability_error = view.availability_status().error().map(String::from);
    drop(guard);

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Horários agendados" }
                p { class: "page-subtitle",
                    if is_today {
                        span { class: "badge", "Hoje" }
                    }
                    span { "{date_label}" }
                    span { class: "text-muted", "{weekday_label}" }
                }
            }
            div { class: "dashboard-grid",
                section { class: "schedule",
                    if let Some(error) = appointments_error {
                        div { class: "alert alert-error",
                            span { "Não foi possível carregar os agendamentos: {error}" }
                            button {
                                class: "btn btn-link",
                                onclick: move |_| {
                                    let query = state.write().as_mut().map(|s| s.retry_appointments());
                                    if let Some(query) = query {
                                        load_appointments(query);
                                    }
                                },
                                "Tentar novamente"
                            }
                        }
                    }
                    if appointments_loading {
                        div { class: "loading", "Carregando agendamentos..." }
                    }
                    if let Some((appointment, hour)) = next {
                        div { class: "next-appointment",
                            strong { class: "section-header", "Atendimento a seguir" }
                            AppointmentCard { appointment, hour, highlight: true }
                        }
                    }
                    AppointmentSection { title: "Manhã".to_string(), appointments: morning }
                    AppointmentSection { title: "Tarde".to_string(), appointments: afternoon }
                }
                aside { class: "calendar-panel",
                    Calendar {
                        calendar,
                        can_go_back,
                        on_select: move |day| {
                            let query = state.write().as_mut().and_then(|s| s.select_day(day));
                            if let Some(query) = query {
                                load_appointments(query);
                            }
                        },
                        on_previous: move |_| {
                            let query = state.write().as_mut().and_then(|s| s.previous_month());
                            if let Some(query) = query {
                                load_availability(query);
                            }
                        },
                        on_next: move |_| {
                            let query = state.write().as_mut().and_then(|s| s.next_month());
                            if let Some(query) = query {
                                load_availability(query);
                            }
                        },
                    }
                    if let Some(error) = availability_error {
                        div { class: "alert alert-error",
                            span { "Não foi possível carregar a disponibilidade: {error}" }
                            button {
                                class: "btn btn-link",
                                onclick: move |_| {
                                    let query = state.write().as_mut().map(|s| s.retry_availability());
                                    if let Some(query) = query {
                                        load_availability(query);
                                    }
                                },
                                "Tentar novamente"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AppointmentSection(title: String, appointments: Vec<(Appointment, String)>) -> Element {
    rsx! {
        section { class: "appointment-section",
            strong { class: "section-header", "{title}" }
            if appointments.is_empty() {
                p { class: "text-muted", "Nenhum agendamento neste período" }
            }
            for (appointment, hour) in appointments {
                AppointmentCard { key: "{appointment.id}", appointment, hour }
            }
        }
    }
}
