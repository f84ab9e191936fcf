//! Common library exports shared between frontend and backend.

extern crate serde;

pub mod error;
pub mod filter;
pub mod entries_query;
pub mod query_response;
pub mod disease_entry;
pub mod entry_import;
pub mod users;
pub mod session;
pub mod browse_engine;
