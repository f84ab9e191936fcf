//! Create/edit form for one disease entry, including the additional-fields editor.

use common::{disease_entry::EntryDraft, error::ValidationErrors};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdDelete, md_content_icons::MdAdd}};

use crate::components::form_fields::TextField;

#[component]
pub fn EntryForm(
    initial: EntryDraft,
    submit_label: String,
    busy: ReadSignal<bool>,
    // rejections reported by the Query Service for an otherwise valid draft
    server_error: ReadSignal<Option<String>>,
    on_submit: EventHandler<EntryDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let mut errors = use_signal(ValidationErrors::new);

    let error_for = move |field: &str| errors.read().get(field).map(String::from);

    let submit = move |_: MouseEvent| {
        let checked = draft.read().validate();
        match checked {
            Ok(valid) => {
                errors.set(ValidationErrors::new());
                on_submit.call(valid);
            }
            Err(e) => errors.set(e),
        }
    };

    let additional_len = draft.read().additional.len();

    rsx! {
        div {
            class: "x-card x-form",
            TextField {
                label: "Disease",
                required: true,
                value: draft.read().disease.clone(),
                error: error_for("disease"),
                oninput: move |v| draft.write().disease = v,
            }
            TextField {
                label: "Autoantibody",
                required: true,
                value: draft.read().autoantibody.clone(),
                error: error_for("autoantibody"),
                oninput: move |v| draft.write().autoantibody = v,
            }
            TextField {
                label: "Autoantigen",
                required: true,
                value: draft.read().autoantigen.clone(),
                error: error_for("autoantigen"),
                oninput: move |v| draft.write().autoantigen = v,
            }
            TextField {
                label: "Epitope",
                value: draft.read().epitope.clone(),
                error: error_for("epitope"),
                oninput: move |v| draft.write().epitope = v,
            }
            TextField {
                label: "UniProt ID",
                placeholder: "e.g. P02708",
                value: draft.read().uniprot_id.clone(),
                error: error_for("uniprotId"),
                oninput: move |v| draft.write().uniprot_id = v,
            }
            TextField {
                label: "Type",
                value: draft.read().entry_type.clone(),
                error: error_for("type"),
                oninput: move |v| draft.write().entry_type = v,
            }

            h3 { style: "margin: 16px 0 8px 0; font-size: 16px;", "Additional fields" }
            for index in 0..additional_len {
                AdditionalFieldRow { key: "{index}", draft, index, error: error_for(&format!("additional.{index}")) }
            }
            button {
                class: "x-button x-button-small",
                onclick: move |_| draft.write().push_additional_row(),
                Icon { icon: MdAdd, style: "width: 16px; height: 16px; vertical-align: middle;" }
                " Add field"
            }

            if let Some(message) = server_error() {
                div { class: "x-field-error", style: "margin-top: 12px;", "{message}" }
            }

            div {
                style: "display: flex; flex-direction: row; gap: 8px; margin-top: 20px;",
                button {
                    class: "x-button x-button-primary",
                    disabled: busy(),
                    onclick: submit,
                    if busy() { "Saving..." } else { "{submit_label}" }
                }
                button {
                    class: "x-button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn AdditionalFieldRow(draft: Signal<EntryDraft>, index: usize, error: Option<String>) -> Element {
    let mut draft = draft;
    let row = draft.read().additional.get(index).cloned().unwrap_or_default();
    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: flex-start; gap: 8px; margin-bottom: 8px;",
            div {
                style: "flex: 1;",
                input {
                    class: if error.is_some() { "x-input x-input-invalid" } else { "x-input" },
                    placeholder: "Field name",
                    value: "{row.key}",
                    oninput: move |event: Event<FormData>| {
                        if let Some(row) = draft.write().additional.get_mut(index) {
                            row.key = event.value();
                        }
                    },
                }
                if let Some(ref error) = error {
                    span { class: "x-field-error", "{error}" }
                }
            }
            input {
                class: "x-input",
                style: "flex: 2;",
                placeholder: "Value",
                value: "{row.value}",
                oninput: move |event: Event<FormData>| {
                    if let Some(row) = draft.write().additional.get_mut(index) {
                        row.value = event.value();
                    }
                },
            }
            button {
                class: "x-button x-button-small",
                title: "Remove field",
                onclick: move |_| draft.write().remove_additional_row(index),
                Icon { icon: MdDelete, style: "width: 16px; height: 16px;" }
            }
        }
    }
}
