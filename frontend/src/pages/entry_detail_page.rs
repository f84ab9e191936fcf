use common::disease_entry::{Entry, EntryDetail};
use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::md_editor_icons::MdInsertLink};

use crate::{
    api::{
        disease_api::{delete_entry, get_entry},
        error_text,
    },
    components::{
        error_boundary::{ComponentErrorDisplay, ErrorBanner},
        suspend_boundary::LoadingIndicator,
    },
    data_definitions::session_state::{use_session, use_session_token},
    routes::Route,
};

#[component]
pub fn EntryDetailPage(id: String) -> Element {
    rsx! {
        Title { "Autoimmune Atlas - Entry" }
        EntryDetailRoot { id }
    }
}

#[component]
fn EntryDetailRoot(id: ReadSignal<String>) -> Element {
    let token = use_session_token();
    let detail = use_resource(move || {
        let id = id.read().clone();
        let token = token.read().clone();
        get_entry(token, id)
    });

    let detail = detail.read();
    let detail: EntryDetail = match detail.as_ref() {
        Some(Err(e)) => return rsx! {
            ComponentErrorDisplay {
                error_txt: error_text(e),
                Link { to: Route::DiseaseBrowsePage {}, class: "x-button", "Back to entries" }
            }
        },
        Some(Ok(d)) => d.clone(),
        None => return rsx! { LoadingIndicator { label: "Loading entry..." } },
    };

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 16px;
                padding: 24px 32px;
                box-sizing: border-box;
                max-width: 960px;
            ",
            EntryActions { entry: detail.data.clone() }
            EntryFields { entry: detail.data.clone() }
            RelatedEntries { entries: detail.related_entries.clone() }
        }
    }
}

#[component]
fn EntryActions(entry: Entry) -> Element {
    let session = use_session();
    let token = use_session_token();
    let mut confirming = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let id = entry.id.clone();

    let copy_link = move |_: MouseEvent| {
        let Some(window) = web_sys::window() else { return };
        let Ok(url) = window.location().href() else { return };
        let _promise = window.navigator().clipboard().write_text(&url);
        tracing::info!("Link copied to clipboard: {}", url);
    };

    let delete = {
        let id = id.clone();
        move |_: MouseEvent| {
            if !confirming() {
                confirming.set(true);
                return;
            }
            confirming.set(false);
            let id = id.clone();
            let token = token.peek().clone();
            spawn(async move {
                match delete_entry(token, id.clone()).await {
                    Ok(_) => {
                        tracing::info!("deleted entry {}", id);
                        navigator().push(Route::DiseaseBrowsePage {});
                    }
                    Err(e) => error.set(Some(error_text(&e))),
                }
            });
        }
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 8px;",
            Link { to: Route::DiseaseBrowsePage {}, class: "x-button", "Back" }
            h1 { style: "font-size: 26px; font-weight: 500; margin: 0 12px; flex-grow: 1;", "{entry.disease}" }
            button {
                class: "x-button",
                title: "Copy link",
                onclick: copy_link,
                Icon { icon: MdInsertLink, style: "width: 16px; height: 16px; vertical-align: middle;" }
            }
            if session.is_signed_in() {
                Link { to: Route::EntryEditPage { id: id.clone() }, class: "x-button", "Edit" }
                button {
                    class: "x-button x-button-danger",
                    onclick: delete,
                    if confirming() { "Confirm delete" } else { "Delete" }
                }
            }
        }
        if let Some(message) = error() {
            ErrorBanner { message, on_dismiss: move |_| error.set(None) }
        }
    }
}

#[component]
fn EntryFields(entry: Entry) -> Element {
    let rows = [
        ("Disease", entry.disease.clone()),
        ("Autoantibody", entry.autoantibody.clone()),
        ("Autoantigen", entry.autoantigen.clone()),
        ("Epitope", entry.epitope.clone().unwrap_or_default()),
        ("Type", entry.entry_type.clone().unwrap_or_default()),
    ];
    rsx! {
        div {
            class: "x-card",
            table {
                class: "x-table x-table-plain",
                tbody {
                    for (label, value) in rows {
                        tr { key: "{label}", th { "{label}" } td { "{value}" } }
                    }
                    tr {
                        th { "UniProt ID" }
                        td {
                            if let Some(url) = entry.uniprot_url() {
                                a { href: "{url}", target: "_blank", rel: "noopener", {entry.uniprot_id.clone().unwrap_or_default()} }
                            }
                        }
                    }
                    for field in entry.additional.iter() {
                        tr { key: "{field.key}", th { "{field.key}" } td { "{field.value}" } }
                    }
                    if let Some(created_at) = entry.created_at.clone() {
                        tr { th { "Created" } td { "{created_at}" } }
                    }
                    if let Some(updated_at) = entry.updated_at.clone() {
                        tr { th { "Updated" } td { "{updated_at}" } }
                    }
                }
            }
        }
    }
}

#[component]
fn RelatedEntries(entries: Vec<Entry>) -> Element {
    if entries.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            class: "x-card",
            h2 { style: "margin-top: 0; font-size: 18px;", "Related entries" }
            ul {
                for entry in entries {
                    li {
                        key: "{entry.id}",
                        Link { to: Route::EntryDetailPage { id: entry.id.clone() }, "{entry.autoantibody} / {entry.autoantigen}" }
                        if let Some(epitope) = entry.epitope.clone().filter(|e| !e.is_empty()) {
                            span { style: "color: #6B7280;", " ({epitope})" }
                        }
                    }
                }
            }
        }
    }
}
