//! Browse page: search, cascading filters and the paged result table.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_content_icons::MdAdd};

use crate::{
    api::browse_engine_host::{BrowseEngineHandle, use_browse_engine},
    components::{
        disease_components::{
            export_buttons::ExportButtons, filter_chips::FilterChips, filter_panel::FilterPanel,
            results_table::ResultsArea, search_bar::SearchBar,
        },
        suspend_boundary::SuspendWrapper,
    },
    data_definitions::session_state::{use_session, use_session_token},
    routes::Route,
};

#[component]
pub fn DiseaseBrowsePage() -> Element {
    let token = use_session_token();
    let handle = use_browse_engine(token);
    use_context_provider(move || handle);

    rsx! {
        Title { "Autoimmune Atlas - Browse" }
        div {
            id: "x-disease-browse-page",
            style: "
                display: flex;
                flex-direction: column;
                gap: 8px;
                width: 100%;
                min-height: 100%;
                padding: 24px 32px;
                box-sizing: border-box;
                background: #F5F6F8;
            ",
            BrowseHeader {}
            div {
                id: "x-disease-browse-controls",
                style: "
                    background-color: #F8FCFF;
                    border: 1px solid rgb(164, 164, 164);
                    border-radius: 12px;
                    padding: 16px;
                ",
                SearchBar {}
                FilterPanel {}
            }
            FilterChips {}
            SuspendWrapper {
                ResultsArea {}
            }
        }
    }
}

#[component]
fn BrowseHeader() -> Element {
    let session = use_session();
    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 16px;",
            h1 { style: "font-size: 28px; font-weight: 500; margin: 0;", "Disease entries" }
            StatisticsStrip {}
            div { style: "flex-grow: 1;" }
            ExportButtons {}
            if session.is_signed_in() {
                Link {
                    to: Route::EntryCreatePage {},
                    class: "x-button x-button-primary",
                    Icon { icon: MdAdd, style: "width: 16px; height: 16px; vertical-align: middle;" }
                    " Add entry"
                }
            }
        }
    }
}

/// Headline counts loaded with the page.
#[component]
fn StatisticsStrip() -> Element {
    let engine = use_context::<BrowseEngineHandle>().engine;
    let rows = use_memo(move || engine.read().statistics().map(|s| s.overview_rows()).unwrap_or_default());
    rsx! {
        div {
            style: "display: flex; flex-direction: row; gap: 12px; color: #4B5770; font-size: 14px;",
            for (key, value) in rows().into_iter().take(4) {
                span { key: "{key}", class: "x-chip", "{key}: {value}" }
            }
        }
    }
}
