use common::session::LoginRequest;
use dioxus::{logger::tracing, prelude::*};

use crate::{
    api::{auth_api::login, error_text},
    components::form_fields::TextField,
    data_definitions::session_state::use_session,
    routes::Route,
};

#[component]
pub fn LoginPage() -> Element {
    let mut session = use_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let mut submit = move || {
        if busy() {
            return;
        }
        let request = LoginRequest { email: email.read().trim().to_string(), password: password.read().clone() };
        if request.email.is_empty() || request.password.is_empty() {
            error.set(Some("Email and password are required".to_string()));
            return;
        }
        busy.set(true);
        error.set(None);
        spawn(async move {
            match login(request).await {
                Ok(response) => {
                    session.begin(response);
                    navigator().push(Route::HomePage {});
                }
                Err(e) => {
                    tracing::warn!("sign in failed: {}", e);
                    error.set(Some(error_text(&e)));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        Title { "Autoimmune Atlas - Sign in" }
        div {
            class: "x-card x-form",
            style: "margin: 80px auto; max-width: 420px;",
            onkeydown: move |event: Event<KeyboardData>| {
                if event.key() == Key::Enter {
                    submit();
                }
            },
            h1 { style: "margin-top: 0; font-size: 28px;", "Sign in" }
            TextField {
                label: "Email",
                input_type: "email",
                value: email(),
                error: None,
                oninput: move |v| email.set(v),
            }
            TextField {
                label: "Password",
                input_type: "password",
                value: password(),
                error: None,
                oninput: move |v| password.set(v),
            }
            if let Some(message) = error() {
                div { class: "x-field-error", "{message}" }
            }
            div {
                style: "margin-top: 16px;",
                button {
                    class: "x-button x-button-primary",
                    disabled: busy(),
                    onclick: move |_| submit(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
