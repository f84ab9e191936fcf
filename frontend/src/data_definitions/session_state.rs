//! The signed-in session, provided once by the app and read through context.

use common::session::{LoginResponse, SessionContext};
use dioxus::{logger::tracing, prelude::*};

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const STORAGE_KEY: &str = "autoimmune-atlas.session";

#[derive(Clone, Copy, PartialEq)]
pub struct SessionState {
    pub session: Signal<Option<SessionContext>>,
}

impl SessionState {
    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.bearer_token().to_string())
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn can_manage_users(&self) -> bool {
        self.session.read().as_ref().is_some_and(|s| s.can_manage_users())
    }

    pub fn begin(&mut self, login: LoginResponse) {
        let session = SessionContext::begin(login);
        store(Some(&session));
        tracing::info!("session started for {}", session.user.email);
        self.session.set(Some(session));
    }

    pub fn end(&mut self) {
        store(None);
        self.session.set(None);
    }
}

/// Provides the session context, restoring a stored session in the browser.
pub fn use_session_provider() -> SessionState {
    let session = use_signal(|| None);
    let state = use_context_provider(|| SessionState { session });
    use_effect(move || {
        let mut session = session;
        if let Some(restored) = restore() {
            session.set(Some(restored));
        }
    });
    state
}

pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}

/// Token as a reactive read-only signal, for hooks that take one.
pub fn use_session_token() -> ReadSignal<Option<String>> {
    let state = use_session();
    let token = use_memo(move || state.token());
    token.into()
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn store(session: Option<&SessionContext>) {
    let Some(storage) = local_storage() else { return };
    let result: Result<(), wasm_bindgen::JsValue> = match session.map(serde_json::to_string) {
        Some(Ok(json)) => storage.set_item(STORAGE_KEY, &json),
        Some(Err(e)) => {
            tracing::error!("could not serialize session: {}", e);
            Ok(())
        }
        None => storage.remove_item(STORAGE_KEY),
    };
    if let Err(e) = result {
        tracing::warn!("session storage unavailable: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn restore() -> Option<SessionContext> {
    let json = local_storage()?.get_item(STORAGE_KEY).ok()??;
    match serde_json::from_str(&json) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("dropping unreadable stored session: {}", e);
            store(None);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn store(_session: Option<&SessionContext>) {}

#[cfg(not(target_arch = "wasm32"))]
fn restore() -> Option<SessionContext> {
    None
}
