use common::filter::{ChainField, SearchField};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::api::browse_engine_host::BrowseEngineHandle;


#[component]
pub fn SearchBar() -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;

    let search_text = use_memo(move || engine.read().draft().search.clone());
    let search_field = use_memo(move || engine.read().draft().search_field);
    let can_submit = use_memo(move || !search_text.read().trim().is_empty());
    let search_button_color = use_memo(move || if can_submit() { "blue" } else { "#6B7280" });

    let search_oninput = move |event: Event<FormData>| {
        let text = event.value();
        handle.dispatch(move |engine| engine.set_search_text(text));
    };
    let search_onkeydown = move |event: Event<KeyboardData>| match event.key() {
        Key::Enter => handle.dispatch(|engine| engine.submit_search()),
        Key::Escape => handle.update(|engine| engine.hide_suggestions()),
        _ => {}
    };
    let field_onchange = move |event: Event<FormData>| {
        if let Some(field) = SearchField::parse(&event.value()) {
            handle.update(move |engine| engine.set_search_field(field));
        }
    };

    rsx! {
        div {
            id: "x-disease-search-bar",
            style: "
                position: relative;
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                width: 100%;
            ",
            div {
                style: "
                    display: flex;
                    align-items: center;
                    gap: 12px;
                    background-color: white;
                    border-radius: 9999px;
                    padding: 10px 14px;
                    height: 44px;
                    border: 1px solid rgba(101, 101, 101, 0.8);
                    flex-grow: 1;
                    max-width: 640px;
                    box-sizing: border-box;
                ",
                button {
                    style: "border: none; background: none; cursor: pointer;",
                    disabled: !can_submit(),
                    onclick: move |_| handle.dispatch(|engine| engine.submit_search()),
                    Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
                }
                input {
                    r#type: "text",
                    placeholder: "Search diseases, autoantibodies, autoantigens...",
                    style: "
                        flex: 1;
                        border: none;
                        outline: none;
                        background: transparent;
                        color: #111827;
                        font-size: 18px;
                        font-family: Roboto, sans-serif;
                    ",
                    value: "{search_text}",
                    oninput: search_oninput,
                    onkeydown: search_onkeydown,
                }
            }
            select {
                class: "x-select",
                value: "{search_field().as_str()}",
                onchange: field_onchange,
                for field in SearchField::ALL {
                    option {
                        value: "{field.as_str()}",
                        selected: field == search_field(),
                        "{field.display_name()}"
                    }
                }
            }
            SuggestionsPanel {}
        }
    }
}

#[component]
fn SuggestionsPanel() -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;
    let visible = use_memo(move || engine.read().suggestions_visible());
    let loading = use_memo(move || engine.read().suggestions_loading());
    let groups = use_memo(move || {
        engine
            .read()
            .suggestions()
            .groups()
            .iter()
            .filter(|group| !group.values.is_empty())
            .cloned()
            .collect::<Vec<_>>()
    });

    if !visible() {
        return rsx! {};
    }

    rsx! {
        // click anywhere outside closes the panel
        div {
            style: "position: fixed; inset: 0; z-index: 10;",
            onclick: move |_| handle.update(|engine| engine.hide_suggestions()),
        }
        div {
            id: "x-disease-suggestions",
            style: "
                position: absolute;
                top: 52px;
                left: 0;
                z-index: 11;
                width: 640px;
                max-height: 420px;
                overflow-y: auto;
                background: white;
                border: 1px solid #D1D5DB;
                border-radius: 12px;
                box-shadow: 0 8px 24px rgba(0, 0, 0, 0.12);
                padding: 8px 0;
            ",
            if loading() {
                div { style: "padding: 10px 16px; color: #6B7280;", "Searching..." }
            } else if groups.read().is_empty() {
                div { style: "padding: 10px 16px; color: #6B7280;", "No suggestions" }
            } else {
                for group in groups() {
                    SuggestionGroupView { key: "{group.field}", field: group.field, values: group.values.clone() }
                }
            }
        }
    }
}

#[component]
fn SuggestionGroupView(field: ChainField, values: Vec<String>) -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    rsx! {
        div {
            style: "padding: 4px 0;",
            div {
                style: "padding: 4px 16px; font-size: 12px; font-weight: 600; text-transform: uppercase; color: #6B7280;",
                "{field.display_name()}"
            }
            for value in values {
                button {
                    key: "{value}",
                    class: "x-suggestion-item",
                    onclick: {
                        let value = value.clone();
                        move |_| {
                            let value = value.clone();
                            handle.dispatch(move |engine| engine.select_suggestion(field, value));
                        }
                    },
                    "{value}"
                }
            }
        }
    }
}
