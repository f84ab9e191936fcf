use common::users::UserListQuery;
use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_param::UrlParam;
use crate::pages::disease_browse_page::DiseaseBrowsePage;
use crate::pages::entry_detail_page::EntryDetailPage;
use crate::pages::entry_form_page::{EntryCreatePage, EntryEditPage};
use crate::pages::home_page::HomePage;
use crate::pages::import_page::ImportPage;
use crate::pages::login_page::LoginPage;
use crate::pages::user_form_page::{UserCreatePage, UserEditPage};
use crate::pages::users_page::UsersPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},

    #[route("/login")]
    LoginPage {},


    #[route("/disease")]
    DiseaseBrowsePage {},

    #[route("/entry/new")]
    EntryCreatePage {},

    #[route("/entry/:id")]
    EntryDetailPage { id: String },

    #[route("/entry/:id/edit")]
    EntryEditPage { id: String },

    #[route("/import")]
    ImportPage {},


    #[route("/users/:query")]
    UsersPage { query: UrlParam<UserListQuery> },

    #[route("/user/new")]
    UserCreatePage {},

    #[route("/user/:id/edit")]
    UserEditPage { id: String },

}

impl Route {
    pub fn users_page(query: UserListQuery) -> Self {
        Self::UsersPage { query: UrlParam::from(query) }
    }
}
