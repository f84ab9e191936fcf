//! State types shared by pages and components.

pub mod session_state;
pub mod url_param;
