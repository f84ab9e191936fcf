use common::{browse_engine::ResultView, disease_entry::Entry, filter::SortOrder};
use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdArrowDownward, MdArrowForward, MdArrowUpward}};

use crate::{
    api::{browse_engine_host::BrowseEngineHandle, disease_api::delete_entry, error_text},
    components::{
        error_boundary::{ComponentErrorDisplay, ErrorBanner},
        suspend_boundary::LoadingIndicator,
    },
    data_definitions::session_state::use_session,
    routes::Route,
};

const COLUMNS: [(&str, &str); 6] = [
    ("disease", "Disease"),
    ("autoantibody", "Autoantibody"),
    ("autoantigen", "Autoantigen"),
    ("epitope", "Epitope"),
    ("uniprotId", "UniProt ID"),
    ("type", "Type"),
];


#[component]
pub fn ResultsArea() -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;
    let view = use_memo(move || engine.read().result_view());
    let results_error = use_memo(move || engine.read().results_error().map(String::from));
    let mut mutation_error = use_signal(|| None::<String>);

    rsx! {
        if let Some(message) = results_error() {
            if view().shows_rows() {
                ErrorBanner { message, on_dismiss: move |_| handle.update(|engine| engine.dismiss_error()) }
            }
        }
        if let Some(message) = mutation_error() {
            ErrorBanner { message, on_dismiss: move |_| mutation_error.set(None) }
        }
        {match view() {
            ResultView::InitialEmpty => rsx! {
                div {
                    class: "x-empty-state",
                    h3 { "Start exploring" }
                    p { "Pick a disease, type a search term or choose a filter to list matching entries." }
                }
            },
            ResultView::Loading => rsx! { LoadingIndicator { label: "Loading entries..." } },
            ResultView::Error(error_txt) => rsx! {
                ComponentErrorDisplay {
                    error_txt,
                    button {
                        class: "x-button",
                        onclick: move |_| handle.dispatch(|engine| engine.refresh()),
                        "Retry"
                    }
                }
            },
            ResultView::NoResults => rsx! {
                div {
                    class: "x-empty-state",
                    h3 { "No entries found" }
                    p { "Try a different search term or remove some filters." }
                }
            },
            ResultView::Rows => rsx! {
                ResultsTable { on_mutation_error: move |e| mutation_error.set(Some(e)) }
                PaginationControls {}
            },
        }}
    }
}

#[component]
fn ResultsTable(on_mutation_error: EventHandler<String>) -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;
    let entries = use_memo(move || engine.read().entries().to_vec());
    let sort = use_memo(move || {
        let engine = engine.read();
        (engine.applied().sort_by.clone(), engine.applied().sort_order)
    });

    rsx! {
        table {
            class: "x-table",
            thead {
                tr {
                    for (key, label) in COLUMNS {
                        th {
                            key: "{key}",
                            class: "x-sortable",
                            onclick: move |_| handle.dispatch(move |engine| engine.toggle_sort(key)),
                            "{label}"
                            if sort.read().0 == key {
                                SortArrow { order: sort.read().1 }
                            }
                        }
                    }
                    th { "" }
                }
            }
            tbody {
                for entry in entries() {
                    EntryRow { key: "{entry.id}", entry: entry.clone(), on_mutation_error }
                }
            }
        }
    }
}

#[component]
fn SortArrow(order: SortOrder) -> Element {
    match order {
        SortOrder::Asc => rsx! { Icon { icon: MdArrowUpward, style: "width: 14px; height: 14px; vertical-align: middle;" } },
        SortOrder::Desc => rsx! { Icon { icon: MdArrowDownward, style: "width: 14px; height: 14px; vertical-align: middle;" } },
    }
}

#[component]
fn EntryRow(entry: Entry, on_mutation_error: EventHandler<String>) -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let session = use_session();
    let mut confirming = use_signal(|| false);
    let mut deleting = use_signal(|| false);
    let id = entry.id.clone();

    let mut on_delete = move |id: String| {
        if !confirming() {
            confirming.set(true);
            return;
        }
        confirming.set(false);
        deleting.set(true);
        let token = handle.token.peek().clone();
        spawn(async move {
            match delete_entry(token, id.clone()).await {
                Ok(_) => {
                    tracing::info!("deleted entry {}", id);
                    handle.dispatch(|engine| engine.refresh());
                }
                Err(e) => on_mutation_error.call(error_text(&e)),
            }
            deleting.set(false);
        });
    };

    rsx! {
        tr {
            td {
                Link { to: Route::EntryDetailPage { id: id.clone() }, "{entry.disease}" }
            }
            td { "{entry.autoantibody}" }
            td { "{entry.autoantigen}" }
            td { {entry.epitope.clone().unwrap_or_default()} }
            td {
                if let Some(url) = entry.uniprot_url() {
                    a { href: "{url}", target: "_blank", rel: "noopener", {entry.uniprot_id.clone().unwrap_or_default()} }
                }
            }
            td { {entry.entry_type.clone().unwrap_or_default()} }
            td {
                style: "white-space: nowrap;",
                if session.is_signed_in() {
                    Link { to: Route::EntryEditPage { id: id.clone() }, class: "x-button x-button-small", "Edit" }
                    button {
                        class: "x-button x-button-small x-button-danger",
                        disabled: deleting(),
                        onclick: {
                            let id = id.clone();
                            move |_| on_delete(id.clone())
                        },
                        if confirming() { "Confirm" } else { "Delete" }
                    }
                }
            }
        }
    }
}

#[component]
fn PaginationControls() -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;
    let pagination = use_memo(move || *engine.read().pagination());
    let window = use_memo(move || engine.read().page_window());

    let p = pagination();
    let showing = match p.showing_range() {
        Some((first, last)) => format!("Showing {first}-{last} of {} entries", p.total),
        None => String::new(),
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 8px; padding: 12px 0;",
            span { style: "color: #4B5770; flex-grow: 1;", "{showing}" }
            button {
                class: "x-button x-button-small",
                disabled: !p.has_previous(),
                onclick: move |_| handle.dispatch(move |engine| engine.go_to_page(p.page - 1)),
                Icon { icon: MdArrowBack, style: "width: 16px; height: 16px;" }
            }
            for page in window() {
                button {
                    key: "{page}",
                    class: if page == p.page { "x-button x-button-small x-button-primary" } else { "x-button x-button-small" },
                    onclick: move |_| handle.dispatch(move |engine| engine.go_to_page(page)),
                    "{page}"
                }
            }
            button {
                class: "x-button x-button-small",
                disabled: !p.has_next(),
                onclick: move |_| handle.dispatch(move |engine| engine.go_to_page(p.page + 1)),
                Icon { icon: MdArrowForward, style: "width: 16px; height: 16px;" }
            }
        }
    }
}
