//! One module per route.

pub mod disease_browse_page;
pub mod entry_detail_page;
pub mod entry_form_page;
pub mod home_page;
pub mod import_page;
pub mod login_page;
pub mod user_form_page;
pub mod users_page;
