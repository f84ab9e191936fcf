//! UI components.

pub mod disease_components;
pub mod entry_form;
pub mod error_boundary;
pub mod form_fields;
pub mod navbar;
pub mod session_guard;
pub mod suspend_boundary;
