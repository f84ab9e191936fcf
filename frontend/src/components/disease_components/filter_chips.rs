use dioxus::prelude::*;

use crate::api::browse_engine_host::BrowseEngineHandle;

/// Applied filters as read-only chips above the results.
#[component]
pub fn FilterChips() -> Element {
    let engine = use_context::<BrowseEngineHandle>().engine;
    let chips = use_memo(move || engine.read().active_filter_chips());

    if chips.read().is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 8px; padding: 4px 0 12px 0;",
            for chip in chips() {
                span {
                    key: "{chip.label}",
                    class: "x-chip",
                    b { "{chip.label}: " }
                    "{chip.value}"
                }
            }
        }
    }
}
