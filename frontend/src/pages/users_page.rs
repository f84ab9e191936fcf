use common::{
    filter::SortOrder,
    users::{User, UserListQuery, UserRole},
};
use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::{md_navigation_icons::{MdArrowBack, MdArrowForward}, md_social_icons::MdPersonAdd}};

use crate::{
    api::{
        error_text,
        users_api::{delete_user, list_users, toggle_user_status, user_stats},
    },
    components::{
        error_boundary::{ComponentErrorDisplay, ErrorBanner},
        session_guard::RequireSession,
        suspend_boundary::LoadingIndicator,
    },
    data_definitions::{session_state::use_session_token, url_param::UrlParam},
    routes::Route,
};

/// Account list; the listing parameters live in the URL.
#[component]
pub fn UsersPage(query: UrlParam<UserListQuery>) -> Element {
    rsx! {
        Title { "Autoimmune Atlas - Users" }
        RequireSession {
            managers_only: true,
            UsersPageRoot { query: query.into_inner() }
        }
    }
}

#[derive(Clone, Copy)]
struct UserListState {
    query: ReadSignal<UserListQuery>,
    /// Re-runs the listing after a mutation.
    reload: Callback<()>,
    report_error: Callback<String>,
}

#[component]
fn UsersPageRoot(query: ReadSignal<UserListQuery>) -> Element {
    let token = use_session_token();
    let mut error = use_signal(|| None::<String>);

    let mut users = use_resource(move || {
        let q = query.read().clone();
        let token = token.read().clone();
        list_users(token, q)
    });
    let mut stats = use_resource(move || {
        let token = token.read().clone();
        user_stats(token)
    });

    use_context_provider(move || UserListState {
        query,
        reload: Callback::new(move |_: ()| {
            users.restart();
            stats.restart();
        }),
        report_error: Callback::new(move |message: String| error.set(Some(message))),
    });

    rsx! {
        div {
            class: "x-page",
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 16px;",
                h1 { style: "flex-grow: 1;", "Users" }
                Link {
                    to: Route::UserCreatePage {},
                    class: "x-button x-button-primary",
                    Icon { icon: MdPersonAdd, style: "width: 16px; height: 16px; vertical-align: middle;" }
                    " New user"
                }
            }
            {match stats.read().as_ref() {
                Some(Ok(stats)) => rsx! {
                    div {
                        style: "display: flex; flex-direction: row; gap: 8px; margin-bottom: 12px;",
                        span { class: "x-chip", "Total: {stats.overview.total_users}" }
                        span { class: "x-chip", "Active: {stats.overview.active_users}" }
                        span { class: "x-chip", "Inactive: {stats.overview.inactive_users}" }
                    }
                },
                _ => rsx! {},
            }}
            UserFilters {}
            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }
            {match users.read().as_ref() {
                Some(Err(e)) => rsx! { ComponentErrorDisplay { error_txt: error_text(e) } },
                Some(Ok(page)) => rsx! {
                    UserTable { users: page.users.clone() }
                    UserPagination {
                        current_page: page.pagination.current_page,
                        total_pages: page.pagination.total_pages,
                        total_users: page.pagination.total_users,
                    }
                },
                None => rsx! { LoadingIndicator { label: "Loading users..." } },
            }}
        }
    }
}

#[component]
fn UserFilters() -> Element {
    let state = use_context::<UserListState>();
    let mut draft = use_signal(|| state.query.read().clone());
    // navigation does not reset local signals
    use_effect(move || draft.set(state.query.read().clone()));

    let apply = move || {
        let query = UserListQuery { page: 1, ..draft.read().clone() };
        navigator().push(Route::users_page(query));
    };

    let role_value = draft.read().role.map(|r| r.as_str()).unwrap_or("");
    let status_value = match draft.read().is_active {
        Some(true) => "active",
        Some(false) => "inactive",
        None => "",
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 12px; align-items: center; margin-bottom: 12px;",
            input {
                class: "x-input",
                r#type: "text",
                placeholder: "Search name, username or email",
                value: "{draft.read().search}",
                oninput: move |event: Event<FormData>| draft.write().search = event.value(),
                onkeydown: move |event: Event<KeyboardData>| {
                    if event.key() == Key::Enter {
                        apply();
                    }
                },
            }
            select {
                class: "x-select",
                value: "{role_value}",
                onchange: move |event: Event<FormData>| draft.write().role = UserRole::parse(&event.value()),
                option { value: "", "All roles" }
                for role in UserRole::ALL {
                    option { value: "{role.as_str()}", selected: Some(role) == draft.read().role, "{role.display_name()}" }
                }
            }
            select {
                class: "x-select",
                value: "{status_value}",
                onchange: move |event: Event<FormData>| {
                    draft.write().is_active = match event.value().as_str() {
                        "active" => Some(true),
                        "inactive" => Some(false),
                        _ => None,
                    };
                },
                option { value: "", "Any status" }
                option { value: "active", selected: status_value == "active", "Active" }
                option { value: "inactive", selected: status_value == "inactive", "Inactive" }
            }
            button { class: "x-button", onclick: move |_| apply(), "Apply" }
        }
    }
}

#[component]
fn UserTable(users: Vec<User>) -> Element {
    let state = use_context::<UserListState>();

    let sort_by = move |column: &'static str| {
        let current = state.query.read().clone();
        let sort_order = match (current.sort_by.as_deref(), current.sort_order) {
            (Some(c), Some(order)) if c == column => order.flipped(),
            _ => SortOrder::Asc,
        };
        let query = UserListQuery { page: 1, sort_by: Some(column.to_string()), sort_order: Some(sort_order), ..current };
        navigator().push(Route::users_page(query));
    };

    if users.is_empty() {
        return rsx! { div { class: "x-empty-state", "No users match these filters." } };
    }

    rsx! {
        table {
            class: "x-table",
            thead {
                tr {
                    th { class: "x-sortable", onclick: move |_| sort_by("name"), "Name" }
                    th { class: "x-sortable", onclick: move |_| sort_by("username"), "Username" }
                    th { class: "x-sortable", onclick: move |_| sort_by("email"), "Email" }
                    th { class: "x-sortable", onclick: move |_| sort_by("role"), "Role" }
                    th { "Status" }
                    th { "" }
                }
            }
            tbody {
                for user in users {
                    UserRow { key: "{user.id}", user: user.clone() }
                }
            }
        }
    }
}

#[component]
fn UserRow(user: User) -> Element {
    let state = use_context::<UserListState>();
    let token = use_session_token();
    let mut confirm_permanent = use_signal(|| false);
    let id = user.id.clone();

    let run = move |action: UserAction| {
        let token = token.peek().clone();
        spawn(async move {
            let result = match &action {
                UserAction::Toggle(id) => toggle_user_status(token, id.clone()).await.map(|_| ()),
                UserAction::Delete { id, permanent } => delete_user(token, id.clone(), *permanent).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    tracing::info!("{:?} done", action);
                    state.reload.call(());
                }
                Err(e) => state.report_error.call(error_text(&e)),
            }
        });
    };

    rsx! {
        tr {
            td { "{user.name}" }
            td { "{user.username}" }
            td { "{user.email}" }
            td {
                "{user.role.display_name()}"
                if let Some(profile) = user.doctor_profile() {
                    div { style: "font-size: 12px; color: #6B7280;", "{profile}" }
                }
            }
            td {
                button {
                    class: if user.is_active { "x-chip x-chip-active" } else { "x-chip" },
                    title: "Toggle status",
                    onclick: {
                        let id = id.clone();
                        move |_| run(UserAction::Toggle(id.clone()))
                    },
                    if user.is_active { "Active" } else { "Inactive" }
                }
            }
            td {
                style: "white-space: nowrap;",
                Link { to: Route::UserEditPage { id: id.clone() }, class: "x-button x-button-small", "Edit" }
                if user.is_active {
                    button {
                        class: "x-button x-button-small",
                        onclick: {
                            let id = id.clone();
                            move |_| run(UserAction::Delete { id: id.clone(), permanent: false })
                        },
                        "Deactivate"
                    }
                }
                button {
                    class: "x-button x-button-small x-button-danger",
                    onclick: {
                        let id = id.clone();
                        move |_| {
                            if confirm_permanent() {
                                confirm_permanent.set(false);
                                run(UserAction::Delete { id: id.clone(), permanent: true });
                            } else {
                                confirm_permanent.set(true);
                            }
                        }
                    },
                    if confirm_permanent() { "Confirm delete" } else { "Delete" }
                }
            }
        }
    }
}

#[derive(Debug)]
enum UserAction {
    Toggle(String),
    /// Soft delete deactivates; permanent removes the account.
    Delete { id: String, permanent: bool },
}

#[component]
fn UserPagination(current_page: u64, total_pages: u64, total_users: u64) -> Element {
    let state = use_context::<UserListState>();
    let go = move |page: u64| {
        navigator().push(Route::users_page(state.query.read().with_page(page)));
    };
    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 8px; padding: 12px 0;",
            span { style: "color: #4B5770; flex-grow: 1;", "{total_users} users, page {current_page} of {total_pages.max(1)}" }
            button {
                class: "x-button x-button-small",
                disabled: current_page <= 1,
                onclick: move |_| go(current_page - 1),
                Icon { icon: MdArrowBack, style: "width: 16px; height: 16px;" }
            }
            button {
                class: "x-button x-button-small",
                disabled: current_page >= total_pages,
                onclick: move |_| go(current_page + 1),
                Icon { icon: MdArrowForward, style: "width: 16px; height: 16px;" }
            }
        }
    }
}
