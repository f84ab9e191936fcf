use dioxus::prelude::*;

use crate::{data_definitions::session_state::use_session, routes::Route};

/// Renders `children` only for a signed-in user, and only user managers when `managers_only`.
#[component]
pub fn RequireSession(#[props(default)] managers_only: bool, children: Element) -> Element {
    let session = use_session();
    if !session.is_signed_in() {
        return rsx! {
            div {
                class: "x-card",
                style: "margin: 40px auto; max-width: 420px; text-align: center;",
                p { "You need to sign in to see this page." }
                Link { to: Route::LoginPage {}, class: "x-button x-button-primary", "Sign in" }
            }
        };
    }
    if managers_only && !session.can_manage_users() {
        return rsx! {
            div {
                class: "x-card",
                style: "margin: 40px auto; max-width: 420px; text-align: center;",
                p { "Your role cannot manage user accounts." }
            }
        };
    }
    rsx! { {children} }
}
