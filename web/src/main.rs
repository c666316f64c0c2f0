use dioxus::prelude::*;

mod views;

use types::CurrentUser;
use views::{Dashboard, SignIn};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/?:error")]
    SignIn { error: Option<String> },
    #[layout(AuthenticatedLayout)]
        #[route("/dashboard")]
        Dashboard {},
}

impl Route {
    pub fn sign_in() -> Self {
        Route::SignIn { error: None }
    }
}

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init().await.map_err(types::Error::into_anyhow)?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| ErrorState(Signal::new(None)));

    rsx! {
        document::Title { "GoBarber" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = current_route == to;

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

/// Global error state - use `use_error()` to access
#[derive(Clone, Copy)]
pub struct ErrorState(Signal<Option<String>>);

impl ErrorState {
    /// Show `err` in the banner, or go back to sign-in if the session is gone.
    pub fn set_server_error(&mut self, err: &ServerFnError) {
        if !self.redirect_if_signed_out(err) {
            self.0.set(banner_message(err));
        }
    }

    /// Send the user back to sign-in when the server no longer accepts the
    /// session. Returns whether it did.
    pub fn redirect_if_signed_out(&self, err: &ServerFnError) -> bool {
        if is_signed_out(err) {
            navigator().push(Route::SignIn {
                error: Some("Sua sessão expirou, entre novamente".to_string()),
            });
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.0.set(None);
    }
}

fn is_signed_out(err: &ServerFnError) -> bool {
    matches!(err, ServerFnError::ServerError { code: 401, .. })
}

/// Banner text for `err`. Signed-out errors redirect instead.
fn banner_message(err: &ServerFnError) -> Option<String> {
    match err {
        _ if is_signed_out(err) => None,
        ServerFnError::ServerError { message, .. } => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// Get the global error state for setting/clearing errors
pub fn use_error() -> ErrorState {
    use_context::<ErrorState>()
}

#[component]
fn ErrorBanner() -> Element {
    let mut error_state = use_context::<ErrorState>();
    let error = error_state.0.read();

    if let Some(message) = error.as_ref() {
        rsx! {
            div { class: "error-banner",
                div { class: "error-banner-content",
                    span { class: "error-banner-message", "{message}" }
                    button {
                        class: "error-banner-close",
                        onclick: move |_| error_state.clear(),
                        "×"
                    }
                }
            }
        }
    } else {
        rsx! {}
    }
}

#[component]
fn AuthenticatedLayout() -> Element {
    let mut error_state = use_error();
    let user = use_server_future(api::get_current_user)?;

    use_effect(move || {
        if let Some(Err(err)) = &*user.read() {
            error_state.set_server_error(err);
        }
    });

    match &*user.read() {
        Some(Ok(Some(person))) => {
            let person: CurrentUser = person.clone();
            use_context_provider(|| person.clone());
            let initial = person.initial();

            rsx! {
                div { class: "app-layout",
                    aside { class: "sidebar",
                        div { class: "sidebar-header",
                            span { class: "sidebar-logo", "GoBarber" }
                        }
                        nav { class: "sidebar-nav",
                            NavLink { to: Route::Dashboard {}, "Agendamentos" }
                        }
                        div { class: "sidebar-footer",
                            div { class: "sidebar-user",
                                if let Some(avatar) = &person.avatar_url {
                                    img { class: "sidebar-avatar", src: "{avatar}", alt: "{person.name}" }
                                } else {
                                    div { class: "sidebar-avatar", "{initial}" }
                                }
                                div { class: "sidebar-user-info",
                                    span { class: "sidebar-user-greeting", "Bem-vindo," }
                                    div { class: "sidebar-user-name", "{person.name}" }
                                }
                            }
                            a { href: "/auth/signout", rel: "external", class: "sidebar-logout", "Sair" }
                        }
                    }
                    main { class: "main-content",
                        ErrorBanner {}
                        Outlet::<Route> {}
                    }
                }
            }
        }
        Some(Ok(None)) => {
            navigator().push(Route::sign_in());
            rsx! {
                div { class: "loading", "Redirecionando..." }
            }
        }
        Some(Err(_)) => {
            rsx! {
                main { class: "main-content",
                    ErrorBanner {}
                    Link { to: Route::sign_in(), class: "btn btn-link", "Voltar para o logon" }
                }
            }
        }
        None => {
            rsx! {
                div { class: "loading", "Carregando..." }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(code: u16, message: &str) -> ServerFnError {
        ServerFnError::ServerError {
            message: message.to_string(),
            code,
            details: None,
        }
    }

    #[test]
    fn expired_session_redirects_instead_of_showing_banner() {
        let err = server_error(401, "not signed in");
        assert!(is_signed_out(&err));
        assert_eq!(banner_message(&err), None);
    }

    #[test]
    fn unexpected_errors_reach_the_banner() {
        let err = server_error(500, "scheduling API unreachable");
        assert!(!is_signed_out(&err));
        assert_eq!(
            banner_message(&err).as_deref(),
            Some("scheduling API unreachable")
        );
    }
}
