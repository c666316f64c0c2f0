use dioxus::prelude::*;
use jiff::civil::Date;
use types::Appointment;

use crate::calendar::{CalendarMonth, WEEK};
use crate::locale;

/// Month picker. Clicks on disabled days never reach `on_select`.
#[component]
pub fn Calendar(
    calendar: CalendarMonth,
    can_go_back: bool,
    on_select: EventHandler<Date>,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    let title = locale::month_label(calendar.month);

    rsx! {
        div { class: "calendar",
            div { class: "calendar-nav",
                button {
                    class: "calendar-nav-btn",
                    disabled: !can_go_back,
                    onclick: move |_| on_previous.call(()),
                    "‹"
                }
                span { class: "calendar-title", "{title}" }
                button {
                    class: "calendar-nav-btn",
                    onclick: move |_| on_next.call(()),
                    "›"
                }
            }
            table { class: "calendar-grid",
                thead {
                    tr {
                        for weekday in WEEK {
                            th { key: "{weekday:?}", {locale::weekday_initial(weekday)} }
                        }
                    }
                }
                tbody {
                    for (i, week) in calendar.weeks.iter().enumerate() {
                        tr { key: "{i}",
                            for (column, cell) in week.iter().enumerate() {
                                {
                                    match cell {
                                        Some(day) => {
                                            let day = *day;
                                            let label = day.date.day().to_string();
                                            rsx! {
                                                td {
                                                    key: "{column}",
                                                    class: day.class(),
                                                    onclick: move |_| {
                                                        if !day.disabled {
                                                            on_select.call(day.date);
                                                        }
                                                    },
                                                    "{label}"
                                                }
                                            }
                                        }
                                        None => rsx! {
                                            td { key: "{column}", class: "calendar-day empty" }
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AppointmentCard(appointment: Appointment, hour: String, #[props(default)] highlight: bool) -> Element {
    let user = &appointment.user;

    rsx! {
        div { class: if highlight { "appointment-card next" } else { "appointment-card" },
            span { class: "appointment-hour", "{hour}" }
            div { class: "appointment-customer",
                if let Some(avatar) = &user.avatar_url {
                    img { class: "appointment-avatar", src: "{avatar}", alt: "{user.name}" }
                } else {
                    div { class: "appointment-avatar placeholder",
                        {user.initial()}
                    }
                }
                strong { "{user.name}" }
            }
        }
    }
}
