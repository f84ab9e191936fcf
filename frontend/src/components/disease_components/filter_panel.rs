use common::filter::{ChainField, FilterField};
use dioxus::prelude::*;

use crate::api::browse_engine_host::BrowseEngineHandle;


#[component]
pub fn FilterPanel() -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;
    let has_active_filters = use_memo(move || engine.read().has_active_filters());

    rsx! {
        div {
            id: "x-disease-filter-panel",
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                align-items: flex-end;
                gap: 12px;
                padding: 12px 0;
            ",
            for field in ChainField::ALL {
                ChainSelect { key: "{field}", field }
            }
            TypeFilterInput {}
            button {
                class: "x-button",
                disabled: !has_active_filters(),
                onclick: move |_| handle.dispatch(|engine| engine.clear_all()),
                "Clear all"
            }
        }
    }
}

/// Dropdown for one level of the disease → autoantibody → autoantigen → epitope chain.
#[component]
fn ChainSelect(field: ChainField) -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;

    let selected = use_memo(move || engine.read().draft().chain_value(field).to_string());
    let value_set = use_memo(move || engine.read().value_set(field));
    let selectable = use_memo(move || engine.read().is_selectable(field));

    let onchange = move |event: Event<FormData>| {
        let value = event.value();
        handle.dispatch(move |engine| match field {
            ChainField::Disease => engine.change_disease(value),
            ChainField::Autoantibody => engine.change_autoantibody(value),
            ChainField::Autoantigen => engine.change_autoantigen(value),
            ChainField::Epitope => engine.change_epitope(value),
        });
    };

    let set = value_set();
    let hint = match (set.loading, set.error.as_deref(), field.parent()) {
        (true, _, _) => Some("Loading...".to_string()),
        (_, Some(error), _) => Some(error.to_string()),
        (_, None, Some(parent)) if !selectable() => Some(format!("Select a {} first", parent.display_name().to_lowercase())),
        _ => None,
    };
    let hint_color = if set.error.is_some() && !set.loading { "#B91C1C" } else { "#6B7280" };

    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 180px;",
            span { style: "font-size: 13px; font-weight: 500; color: #374151;", "{field.display_name()}" }
            select {
                class: "x-select",
                disabled: !selectable(),
                onchange,
                option { value: "", selected: selected.read().is_empty(), "All" }
                for value in set.values.iter().cloned() {
                    option {
                        key: "{value}",
                        selected: *selected.read() == value,
                        value: "{value}",
                        "{value}"
                    }
                }
            }
            if let Some(hint) = hint {
                span { style: "font-size: 12px; color: {hint_color};", "{hint}" }
            }
        }
    }
}

#[component]
fn TypeFilterInput() -> Element {
    let handle = use_context::<BrowseEngineHandle>();
    let engine = handle.engine;
    let value = use_memo(move || engine.read().draft().entry_type.clone());

    let apply = move || {
        let value = value();
        handle.dispatch(move |engine| engine.set_field(FilterField::Type, value, true));
    };

    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 140px;",
            span { style: "font-size: 13px; font-weight: 500; color: #374151;", "Type" }
            input {
                class: "x-input",
                r#type: "text",
                placeholder: "e.g. IgG",
                value: "{value}",
                oninput: move |event: Event<FormData>| {
                    let value = event.value();
                    handle.dispatch(move |engine| engine.set_field(FilterField::Type, value, false));
                },
                onkeydown: move |event: Event<KeyboardData>| {
                    if event.key() == Key::Enter {
                        apply();
                    }
                },
                onblur: move |_| {
                    if engine.peek().applied().entry_type != *value.peek() {
                        apply();
                    }
                },
            }
        }
    }
}
