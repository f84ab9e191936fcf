//! Error boundaries and the inline error display used by pages.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    h1 {
                        style: "color:red; font-size: 54px; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px;",
                        "Something went wrong",
                    }
                    p {
                        style: "color:darkred; font-size: 22px; padding: 10px; margin: 15px;",
                        "The {boundary_name} view failed to render."
                    }
                    a {
                        href: "/",
                        style: "color:blue; font-size: 22px; border: 1px solid blue; padding: 10px; border-radius: 5px; margin: 15px;",
                        "Back to the dashboard"
                    }
                    pre {
                        style: "color:black; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px; text-wrap: auto;",
                        "{err:#?}"
                    }
                }
            },
            children
        }
    }
}

#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(e) => format!("{:#?}", e.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            class: "x-button",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Try again"
                        }
                    }
                }
            },
            div {
                width: "100%",
                {children}
            }
        }
    }
}

/// Failed request or validation summary, with optional actions below it.
#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    let unauthorized = use_memo(move || {
        let txt = error_txt.read();
        txt.starts_with("401") || txt.starts_with("403")
    });
    rsx! {
        div {
            width: "100%",
            display: "flex",
            flex_direction: "column",
            align_items: "center",
            justify_content: "center",
            padding: "20px",
            box_sizing: "border-box",

            h2 {
                style: "color:#B91C1C; font-size: 24px; margin: 5px;",
                "Request failed",
            }

            pre {
                style: "color:darkred; border: 1px solid #FCA5A5; background: #FEF2F2; padding: 10px; border-radius: 5px; margin: 5px; text-wrap: auto; max-width: 600px; max-height: 300px; overflow-y: auto;",
                "{error_txt}"
            }

            if unauthorized() {
                Link { to: Route::LoginPage {}, class: "x-button", "Sign in again" }
            }

            {children}
        }
    }
}

/// Dismissible banner above content that stays usable.
#[component]
pub fn ErrorBanner(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                padding: 10px 14px;
                margin: 8px 0;
                border-radius: 8px;
                background: #FEF2F2;
                border: 1px solid #FCA5A5;
                color: #991B1B;
            ",
            span { style: "flex-grow: 1;", "{message}" }
            button {
                class: "x-button x-button-small",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}
