use common::disease_entry::EntryDraft;
use dioxus::{logger::tracing, prelude::*};

use crate::{
    api::{
        disease_api::{create_entry, get_entry, update_entry},
        error_text,
    },
    components::{
        entry_form::EntryForm,
        error_boundary::ComponentErrorDisplay,
        session_guard::RequireSession,
        suspend_boundary::LoadingIndicator,
    },
    data_definitions::session_state::use_session_token,
    routes::Route,
};

#[component]
pub fn EntryCreatePage() -> Element {
    rsx! {
        Title { "Autoimmune Atlas - New entry" }
        RequireSession {
            div {
                class: "x-page",
                h1 { "New entry" }
                SaveEntryForm { id: None, initial: EntryDraft::default() }
            }
        }
    }
}

#[component]
pub fn EntryEditPage(id: String) -> Element {
    rsx! {
        Title { "Autoimmune Atlas - Edit entry" }
        RequireSession {
            div {
                class: "x-page",
                h1 { "Edit entry" }
                LoadEntryForEdit { id }
            }
        }
    }
}

#[component]
fn LoadEntryForEdit(id: ReadSignal<String>) -> Element {
    let token = use_session_token();
    let detail = use_resource(move || {
        let id = id.read().clone();
        let token = token.read().clone();
        get_entry(token, id)
    });
    let detail = detail.read();
    match detail.as_ref() {
        Some(Err(e)) => rsx! { ComponentErrorDisplay { error_txt: error_text(e) } },
        Some(Ok(detail)) => rsx! {
            SaveEntryForm {
                key: "{detail.data.id}",
                id: Some(detail.data.id.clone()),
                initial: EntryDraft::from_entry(&detail.data),
            }
        },
        None => rsx! { LoadingIndicator { label: "Loading entry..." } },
    }
}

/// Creates a new entry when `id` is `None`, updates that entry otherwise.
#[component]
fn SaveEntryForm(id: Option<String>, initial: EntryDraft) -> Element {
    let token = use_session_token();
    let mut busy = use_signal(|| false);
    let mut server_error = use_signal(|| None::<String>);
    let cancel_to = match id.clone() {
        Some(id) => Route::EntryDetailPage { id },
        None => Route::DiseaseBrowsePage {},
    };
    let submit_label = if id.is_some() { "Save changes" } else { "Create entry" };

    let on_submit = move |draft: EntryDraft| {
        let id = id.clone();
        let token = token.peek().clone();
        busy.set(true);
        server_error.set(None);
        spawn(async move {
            let saved = match id {
                Some(id) => update_entry(token, id, draft).await,
                None => create_entry(token, draft).await,
            };
            busy.set(false);
            match saved {
                Ok(entry) => {
                    tracing::info!("saved entry {}", entry.id);
                    navigator().push(Route::EntryDetailPage { id: entry.id });
                }
                Err(e) => server_error.set(Some(error_text(&e))),
            }
        });
    };

    rsx! {
        EntryForm {
            initial,
            submit_label: submit_label.to_string(),
            busy,
            server_error,
            on_submit,
            on_cancel: move |_| { navigator().push(cancel_to.clone()); },
        }
    }
}
