use common::query_response::ExportFormat;
use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::md_file_icons::MdFileDownload};

use crate::api::browse_engine_host::BrowseEngineHandle;

/// Path of the export download route served next to the app.
const EXPORT_ROUTE: &str = "/_export";

/// Download links for the whole database, narrowed by the applied chain filters.
#[component]
pub fn ExportButtons() -> Element {
    let handle = use_context::<BrowseEngineHandle>();

    let download = move |format: ExportFormat| {
        let applied = handle.engine.peek().applied().clone();
        let token = handle.token.peek().clone();
        let pairs = [
            ("disease", applied.disease.trim().to_string()),
            ("autoantibody", applied.autoantibody.trim().to_string()),
            ("autoantigen", applied.autoantigen.trim().to_string()),
            ("token", token.unwrap_or_default()),
        ];
        if let Err(e) = start_download(format, &pairs) {
            tracing::error!("could not start {} export: {:?}", format.as_str(), e);
        }
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: row; gap: 8px;",
            for format in [ExportFormat::Csv, ExportFormat::Json] {
                button {
                    key: "{format.as_str()}",
                    class: "x-button",
                    onclick: move |_| download(format),
                    Icon { icon: MdFileDownload, style: "width: 16px; height: 16px; vertical-align: middle;" }
                    " Export {format.as_str().to_uppercase()}"
                }
            }
        }
    }
}

fn start_download(format: ExportFormat, pairs: &[(&str, String)]) -> Result<(), wasm_bindgen::JsValue> {
    let params = web_sys::UrlSearchParams::new()?;
    params.append("format", format.as_str());
    for (key, value) in pairs.iter().filter(|(_, v)| !v.is_empty()) {
        params.append(key, value);
    }
    let url = format!("{}?{}", EXPORT_ROUTE, String::from(params.to_string()));
    let window = web_sys::window().ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))?;
    window.location().set_href(&url)
}
