//! Pieces of the disease browse page. All of them read the [`BrowseEngineHandle`]
//! the page puts in context.
//!
//! [`BrowseEngineHandle`]: crate::api::browse_engine_host::BrowseEngineHandle

pub mod export_buttons;
pub mod filter_chips;
pub mod filter_panel;
pub mod results_table;
pub mod search_bar;
