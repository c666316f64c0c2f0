use crate::{ErrorBanner, Route, use_error};
use dioxus::prelude::*;

#[component]
pub fn SignIn(error: Option<String>) -> Element {
    let mut error_state = use_error();
    let user = use_server_future(api::get_current_user)?;

    use_effect(move || {
        if let Some(Err(err)) = &*user.read() {
            error_state.set_server_error(err);
        }
    });

    // Signed-in users have nothing to do here.
    if let Some(Ok(Some(_))) = &*user.read() {
        navigator().replace(Route::Dashboard {});
    }

    rsx! {
        ErrorBanner {}
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "GoBarber" }
                    p { class: "login-subtitle", "Faça seu logon" }
                }
                if let Some(message) = &error {
                    div { class: "alert alert-error", "{message}" }
                }
                form {
                    action: "/auth/signin",
                    method: "post",
                    div { class: "form-group",
                        input {
                            class: "form-input",
                            name: "email",
                            r#type: "email",
                            placeholder: "E-mail",
                            required: true,
                        }
                    }
                    div { class: "form-group",
                        input {
                            class: "form-input",
                            name: "password",
                            r#type: "password",
                            placeholder: "Senha",
                            required: true,
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary login-btn",
                        "Entrar"
                    }
                }
            }
        }
    }
}
