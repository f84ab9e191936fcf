//! Bulk import from pasted CSV.

use common::{
    disease_entry::EntryDraft,
    entry_import::{BulkImportRequest, ImportError, parse_entries_csv},
};
use dioxus::{logger::tracing, prelude::*};

use crate::{
    api::{disease_api::bulk_import, error_text},
    components::{error_boundary::ErrorBanner, session_guard::RequireSession},
    data_definitions::session_state::use_session_token,
    routes::Route,
};

const CSV_EXAMPLE: &str = "disease,autoantibody,autoantigen,epitope,uniprotId,type,source\n\
Myasthenia gravis,Anti-AChR,AChR,MIR,P02708,IgG1,PMID:0000000";

#[component]
pub fn ImportPage() -> Element {
    rsx! {
        Title { "Autoimmune Atlas - Import" }
        RequireSession {
            div {
                class: "x-page",
                h1 { "Import entries" }
                p {
                    "Paste CSV with a header row. "
                    code { "disease" } ", " code { "autoantibody" } " and " code { "autoantigen" }
                    " columns are required; unknown columns become additional fields."
                }
                ImportForm {}
            }
        }
    }
}

#[component]
fn ImportForm() -> Element {
    let token = use_session_token();
    let mut text = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut server_error = use_signal(|| None::<String>);
    let mut imported = use_signal(|| None::<String>);

    let parsed = use_memo(move || {
        let text = text.read();
        if text.trim().is_empty() { None } else { Some(parse_entries_csv(&text)) }
    });

    let mut submit = move |drafts: Vec<EntryDraft>| {
        let token = token.peek().clone();
        let count = drafts.len();
        busy.set(true);
        server_error.set(None);
        spawn(async move {
            match bulk_import(token, BulkImportRequest { entries: drafts }).await {
                Ok(response) => {
                    tracing::info!("imported {} entries", count);
                    let message = if response.message.is_empty() { format!("Imported {count} entries") } else { response.message };
                    imported.set(Some(message));
                    text.set(String::new());
                }
                Err(e) => server_error.set(Some(error_text(&e))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            class: "x-card x-form",
            textarea {
                class: "x-input",
                style: "width: 100%; min-height: 240px; font-family: monospace; box-sizing: border-box;",
                placeholder: "{CSV_EXAMPLE}",
                value: "{text}",
                oninput: move |event: Event<FormData>| {
                    imported.set(None);
                    text.set(event.value());
                },
            }
            {match parsed() {
                None => rsx! {},
                Some(Ok(drafts)) => rsx! {
                    p { "{drafts.len()} valid entries ready to import." }
                    button {
                        class: "x-button x-button-primary",
                        disabled: busy(),
                        onclick: move |_| submit(drafts.clone()),
                        if busy() { "Importing..." } else { "Import" }
                    }
                },
                Some(Err(ImportError::InvalidRows(rows))) => rsx! {
                    div {
                        class: "x-field-error",
                        p { "{rows.len()} row(s) need fixing before anything is imported:" }
                        ul {
                            for row in rows {
                                li { key: "{row.line}", "line {row.line}: {row.errors}" }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! { div { class: "x-field-error", "{e}" } },
            }}
            if let Some(message) = server_error() {
                ErrorBanner { message, on_dismiss: move |_| server_error.set(None) }
            }
            if let Some(message) = imported() {
                div {
                    class: "x-success",
                    "{message} "
                    Link { to: Route::DiseaseBrowsePage {}, "Browse entries" }
                }
            }
        }
    }
}
