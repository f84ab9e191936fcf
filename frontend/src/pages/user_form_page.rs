use common::{
    error::ValidationErrors,
    users::{UserDraft, UserListQuery, UserRole},
};
use dioxus::{logger::tracing, prelude::*};

use crate::{
    api::{
        error_text,
        users_api::{create_user, get_user, update_user},
    },
    components::{
        error_boundary::ComponentErrorDisplay,
        form_fields::TextField,
        session_guard::RequireSession,
        suspend_boundary::LoadingIndicator,
    },
    data_definitions::session_state::{use_session, use_session_token},
    routes::Route,
};

#[component]
pub fn UserCreatePage() -> Element {
    rsx! {
        Title { "Autoimmune Atlas - New user" }
        RequireSession {
            managers_only: true,
            div {
                class: "x-page",
                h1 { "New user" }
                UserForm { id: None, initial: UserDraft::default() }
            }
        }
    }
}

#[component]
pub fn UserEditPage(id: String) -> Element {
    rsx! {
        Title { "Autoimmune Atlas - Edit user" }
        RequireSession {
            managers_only: true,
            div {
                class: "x-page",
                h1 { "Edit user" }
                LoadUserForEdit { id }
            }
        }
    }
}

#[component]
fn LoadUserForEdit(id: ReadSignal<String>) -> Element {
    let token = use_session_token();
    let user = use_resource(move || {
        let id = id.read().clone();
        let token = token.read().clone();
        get_user(token, id)
    });
    let user = user.read();
    match user.as_ref() {
        Some(Err(e)) => rsx! { ComponentErrorDisplay { error_txt: error_text(e) } },
        Some(Ok(user)) => rsx! {
            UserForm {
                key: "{user.id}",
                id: Some(user.id.clone()),
                initial: UserDraft::from(user),
            }
        },
        None => rsx! { LoadingIndicator { label: "Loading user..." } },
    }
}

/// Roles the signed-in user may assign, plus the role the account already has.
fn role_choices(own_role: Option<UserRole>, current: Option<UserRole>) -> Vec<UserRole> {
    let creatable = own_role.map(|r| r.creatable_roles()).unwrap_or(&[]);
    UserRole::ALL
        .into_iter()
        .filter(|role| creatable.contains(role) || Some(*role) == current)
        .collect()
}

#[component]
fn UserForm(id: Option<String>, initial: UserDraft) -> Element {
    let session = use_session();
    let token = use_session_token();
    let creating = id.is_none();
    let mut draft = use_signal(|| initial.clone());
    let mut errors = use_signal(ValidationErrors::new);
    let mut server_error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let own_role = session.session.read().as_ref().map(|s| s.user.role);
    let roles = role_choices(own_role, initial.role);
    let error_for = move |field: &str| errors.read().get(field).map(String::from);

    let submit = move |_: MouseEvent| {
        let valid = match draft.read().validate(creating) {
            Ok(valid) => valid,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(ValidationErrors::new());
        server_error.set(None);
        busy.set(true);
        let id = id.clone();
        let token = token.peek().clone();
        spawn(async move {
            let saved = match id {
                Some(id) => update_user(token, id, valid).await,
                None => create_user(token, valid).await,
            };
            busy.set(false);
            match saved {
                Ok(user) => {
                    tracing::info!("saved user {}", user.id);
                    navigator().push(Route::users_page(UserListQuery::default()));
                }
                Err(e) => server_error.set(Some(error_text(&e))),
            }
        });
    };

    let selected_role = draft.read().role.map(|r| r.as_str()).unwrap_or("");
    let is_doctor = draft.read().role == Some(UserRole::Doctor);

    rsx! {
        div {
            class: "x-card x-form",
            TextField {
                label: "Name",
                required: true,
                value: draft.read().name.clone(),
                error: error_for("name"),
                oninput: move |v| draft.write().name = v,
            }
            TextField {
                label: "Username",
                required: true,
                value: draft.read().username.clone(),
                error: error_for("username"),
                oninput: move |v| draft.write().username = v,
            }
            TextField {
                label: "Email",
                required: true,
                input_type: "email",
                value: draft.read().email.clone(),
                error: error_for("email"),
                oninput: move |v| draft.write().email = v,
            }
            TextField {
                label: if creating { "Password".to_string() } else { "New password (leave blank to keep)".to_string() },
                required: creating,
                input_type: "password",
                value: draft.read().password.clone().unwrap_or_default(),
                error: error_for("password"),
                oninput: move |v: String| draft.write().password = Some(v).filter(|p| !p.is_empty()),
            }
            TextField {
                label: "Contact number",
                value: draft.read().contact_number.clone().unwrap_or_default(),
                error: error_for("contactNumber"),
                oninput: move |v: String| draft.write().contact_number = Some(v),
            }
            label {
                class: "x-field",
                span { class: "x-field-label", "Role" span { style: "color: #B91C1C;", " *" } }
                select {
                    class: "x-select",
                    value: "{selected_role}",
                    onchange: move |event: Event<FormData>| draft.write().role = UserRole::parse(&event.value()),
                    option { value: "", "Select a role" }
                    for role in roles {
                        option { value: "{role.as_str()}", selected: role.as_str() == selected_role, "{role.display_name()}" }
                    }
                }
                if let Some(error) = error_for("role") {
                    span { class: "x-field-error", "{error}" }
                }
            }
            if is_doctor {
                TextField {
                    label: "Department",
                    required: !creating,
                    placeholder: "Department id",
                    value: draft.read().department.clone().unwrap_or_default(),
                    error: error_for("department"),
                    oninput: move |v: String| draft.write().department = Some(v),
                }
                TextField {
                    label: "Specialization",
                    required: !creating,
                    value: draft.read().specialization.clone().unwrap_or_default(),
                    error: error_for("specialization"),
                    oninput: move |v: String| draft.write().specialization = Some(v),
                }
                TextField {
                    label: "Consultation charges",
                    required: !creating,
                    input_type: "number",
                    value: draft.read().consultation_charges.clone().unwrap_or_default(),
                    error: error_for("consultationCharges"),
                    oninput: move |v: String| draft.write().consultation_charges = Some(v),
                }
            }
            if let Some(message) = server_error() {
                div { class: "x-field-error", style: "margin-top: 12px;", "{message}" }
            }
            div {
                style: "display: flex; flex-direction: row; gap: 8px; margin-top: 20px;",
                button {
                    class: "x-button x-button-primary",
                    disabled: busy(),
                    onclick: submit,
                    if busy() { "Saving..." } else if creating { "Create user" } else { "Save changes" }
                }
                Link { to: Route::users_page(UserListQuery::default()), class: "x-button", "Cancel" }
            }
        }
    }
}
