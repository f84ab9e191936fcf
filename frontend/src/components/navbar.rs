//! Sidebar navigation shared by every page.

use dioxus::prelude::*;
use common::users::UserListQuery;

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::data_definitions::session_state::use_session;
use crate::routes::Route;

use dioxus_free_icons::icons::md_action_icons::{MdDashboard, MdExitToApp, MdSearch};
use dioxus_free_icons::icons::md_content_icons::MdAddBox;
use dioxus_free_icons::icons::md_file_icons::MdFileUpload;
use dioxus_free_icons::icons::md_social_icons::{MdPeople, MdPerson};
use dioxus_free_icons::{Icon, IconShape};


#[component]
pub fn Navbar() -> Element {
    rsx! {

        div {
            id:"x-nav-container",

            style:"
                display:flex;
                flex-direction: row;
                width: 100%;
                height: 100%;
            ",


            div {
                id:"x-nav-sidebar",
                style:"
                    display:flex;
                    flex-direction: column;
                    gap: 40px;
                    width: 70px;
                    height: 100%;
                    background-color: #1C212D;
                    border: 1px solid #000000;
                    padding: 16px;
                    box-sizing: border-box;
                ",

                NavbarTopLogo{},
                NavbarTopIconLinks{},

                div {
                    style: "flex-grow:1;"
                }
                NavbarBottomIconLinks{},
            },

            div {
                id:"x-page-container",
                style: "flex-grow:1; min-width: 100px; overflow: auto;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }

    }
}

#[component]
fn NavbarTopLogo() -> Element {
    rsx! {
        Link {
            to: Route::HomePage { },
            div {
                style: "
                    width: 38px;
                    height: 38px;
                    border-radius: 10px;
                    background: linear-gradient(135deg, #2D208A 0%, #5B3DF5 100%);
                    color: white;
                    font-weight: 700;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                ",
                "AA"
            }
        }
    }
}

#[component]
fn NavbarTopIconLinks() -> Element {
    let session = use_session();
    rsx! {
        div {
            style: "
                display:flex;
                flex-direction: column;
                gap: 24px;
                width: 38px;
                align-items: center;
                justify-content: center;
            ",
            IconLink { to: Route::HomePage { }, icon: MdDashboard, label: "Dashboard" }
            IconLink { to: Route::DiseaseBrowsePage { }, icon: MdSearch, label: "Browse entries" }
            if session.is_signed_in() {
                IconLink { to: Route::EntryCreatePage { }, icon: MdAddBox, label: "Add entry" }
                IconLink { to: Route::ImportPage { }, icon: MdFileUpload, label: "Import" }
            }
            if session.can_manage_users() {
                IconLink { to: Route::users_page(UserListQuery::default()), icon: MdPeople, label: "Users" }
            }
        }
    }
}


#[component]
fn NavbarBottomIconLinks() -> Element {
    let mut session = use_session();
    let signed_in_as = session.session.read().as_ref().map(|s| format!("{} ({})", s.user.name, s.user.role.display_name()));

    rsx! {

        div {
            style: "
                display:flex;
                flex-direction: column;
                gap: 24px;
                width: 38px;
                align-items: center;
                justify-content: center;
            ",

            {match signed_in_as {
                Some(label) => rsx! {
                    span {
                        title: "{label}",
                        style: "color:white;",
                        Icon { icon: MdPerson, style: "width: 26px; height: 26px;" }
                    }
                    button {
                        title: "Sign out",
                        style: "border: none; background: none; cursor: pointer; color: white; padding: 0;",
                        onclick: move |_| {
                            session.end();
                            navigator().push(Route::LoginPage {});
                        },
                        Icon { icon: MdExitToApp, style: "width: 26px; height: 26px;" }
                    }
                },
                None => rsx! {
                    IconLink { to: Route::LoginPage { }, icon: MdPerson, label: "Sign in" }
                },
            }}
        }
    }
}

#[component]
fn IconLink<T: IconShape + Clone + PartialEq + 'static> (to: Route, icon: T, label: String) -> Element {
    rsx! {
        Link {
            to: to,
            span {
                title: "{label}",
                style: "color:white;",
                Icon { icon: icon, style: "width: 26px; height: 26px;" }
            }
        }
    }
}
