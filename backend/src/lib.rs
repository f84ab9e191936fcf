//! Server-side adapters over the remote Query Service.

pub mod api;
pub mod http_utils;
pub mod server_extra;
