//! Labelled inputs shared by the entry and user forms.

use dioxus::prelude::*;

#[component]
pub fn TextField(
    label: String,
    value: String,
    error: Option<String>,
    #[props(default)] required: bool,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "x-field",
            span {
                class: "x-field-label",
                "{label}"
                if required { span { style: "color: #B91C1C;", " *" } }
            }
            input {
                class: if error.is_some() { "x-input x-input-invalid" } else { "x-input" },
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |event: Event<FormData>| oninput.call(event.value()),
            }
            if let Some(ref error) = error {
                span { class: "x-field-error", "{error}" }
            }
        }
    }
}
