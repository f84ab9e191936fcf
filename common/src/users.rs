//! User management models.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{error::ValidationErrors, filter::SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "superAdmin")]
    SuperAdmin,
    Admin,
    Doctor,
    Receptionist,
    Accountant,
    /// Any role this console does not know. Keeps one odd account from failing a whole listing.
    #[serde(other)]
    Other,
}

impl UserRole {
    pub const ALL: [UserRole; 5] =
        [UserRole::SuperAdmin, UserRole::Admin, UserRole::Doctor, UserRole::Receptionist, UserRole::Accountant];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "superAdmin",
            UserRole::Admin => "Admin",
            UserRole::Doctor => "Doctor",
            UserRole::Receptionist => "Receptionist",
            UserRole::Accountant => "Accountant",
            UserRole::Other => "Other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super Admin",
            other => other.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        UserRole::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Roles an account with this role is allowed to create.
    pub fn creatable_roles(&self) -> &'static [UserRole] {
        match self {
            UserRole::SuperAdmin => &[UserRole::Admin, UserRole::Doctor, UserRole::Receptionist, UserRole::Accountant],
            UserRole::Admin => &[UserRole::Doctor, UserRole::Receptionist, UserRole::Accountant],
            UserRole::Doctor | UserRole::Receptionist | UserRole::Accountant | UserRole::Other => &[],
        }
    }

    pub fn can_manage_users(&self) -> bool {
        !self.creatable_roles().is_empty()
    }
}

/// A doctor's department: a bare id, or the populated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Department {
    Id(String),
    Record {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Department {
    pub fn id(&self) -> &str {
        match self {
            Department::Id(id) | Department::Record { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Department::Record { name: Some(name), .. } => name,
            other => other.id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub consultation_charges: Option<f64>,
}

impl User {
    /// Department, specialization and charges, for doctors that have any of them.
    pub fn doctor_profile(&self) -> Option<String> {
        if self.role != UserRole::Doctor {
            return None;
        }
        let parts: Vec<String> = [
            self.department.as_ref().map(|d| d.label().to_string()),
            self.specialization.clone(),
            self.consultation_charges.map(|c| format!("{c} per consultation")),
        ]
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_users: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Default for UserPagination {
    fn default() -> Self {
        Self { current_page: 1, total_pages: 1, total_users: 0, has_next_page: false, has_prev_page: false }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserListPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: UserPagination,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub overview: UserStatsOverview,
    #[serde(default)]
    pub role_stats: Vec<RoleCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsOverview {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCount {
    #[serde(alias = "_id")]
    pub role: String,
    pub count: u64,
}

/// Listing parameters for `GET /api/users`, carried in the users page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserListQuery {
    pub page: u64,
    pub limit: u64,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub search: String,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10, role: None, is_active: None, search: String::new(), sort_by: None, sort_order: None }
    }
}

impl UserListQuery {
    pub fn with_page(&self, page: u64) -> Self {
        Self { page: page.max(1), ..self.clone() }
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.max(1).to_string()), ("limit", self.limit.to_string())];
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("isActive", is_active.to_string()));
        }
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("sortBy", sort_by.to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sortOrder", sort_order.as_str().to_string()));
        }
        pairs
    }
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Create/edit form state for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Department id. Doctors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Kept as typed text; sent as a number.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "charges::serialize",
        deserialize_with = "charges::deserialize"
    )]
    pub consultation_charges: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

impl UserDraft {
    /// Validates the draft. The password is required only when `creating`.
    /// Doctors need department, specialization and charges when edited.
    pub fn validate(&self, creating: bool) -> Result<UserDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [("name", &self.name), ("username", &self.username), ("email", &self.email)] {
            if value.trim().is_empty() {
                errors.add(field, "This field is required");
            }
        }
        let email = self.email.trim();
        if !email.is_empty() && !EMAIL.is_match(email) {
            errors.add("email", "Please enter a valid email address");
        }
        match self.password.as_deref() {
            None | Some("") if creating => errors.add("password", "This field is required"),
            Some(p) if !p.is_empty() && p.chars().count() < MIN_PASSWORD_LEN => {
                errors.add("password", format!("Password must be at least {MIN_PASSWORD_LEN} characters long"))
            }
            _ => {}
        }
        if self.role.is_none() {
            errors.add("role", "This field is required");
        }

        let is_doctor = self.role == Some(UserRole::Doctor);
        let (department, specialization, charges) = if is_doctor {
            (non_blank(&self.department), non_blank(&self.specialization), non_blank(&self.consultation_charges))
        } else {
            (None, None, None)
        };
        if charges.as_deref().is_some_and(|c| !c.parse::<f64>().is_ok_and(f64::is_finite)) {
            errors.add("consultationCharges", "Consultation charges must be a number");
        }
        if is_doctor && !creating {
            for (field, value) in
                [("department", &department), ("specialization", &specialization), ("consultationCharges", &charges)]
            {
                if value.is_none() {
                    errors.add(field, "This field is required for doctors");
                }
            }
        }

        errors.into_result(UserDraft {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: email.to_string(),
            password: self.password.clone().filter(|p| !p.is_empty()),
            role: self.role,
            contact_number: non_blank(&self.contact_number),
            department,
            specialization,
            consultation_charges: charges,
        })
    }
}

impl From<&User> for UserDraft {
    /// Edit form contents for an existing account. The password stays empty.
    fn from(user: &User) -> Self {
        UserDraft {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password: None,
            role: Some(user.role),
            contact_number: user.contact_number.clone(),
            department: user.department.as_ref().map(|d| d.id().to_string()),
            specialization: user.specialization.clone(),
            consultation_charges: user.consultation_charges.map(|c| c.to_string()),
        }
    }
}

mod charges {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value.as_deref().map(str::trim) {
            Some(text) => match text.parse::<f64>() {
                Ok(number) => serializer.serialize_f64(number),
                Err(_) => serializer.serialize_str(text),
            },
            None => serializer.serialize_none(),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<NumberOrText>::deserialize(deserializer)?.map(|v| match v {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(t) => t,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            name: "Ada".into(),
            username: "ada".into(),
            email: "ada@example.org".into(),
            password: Some("secret1".into()),
            role: Some(UserRole::Receptionist),
            ..Default::default()
        }
    }

    fn doctor() -> UserDraft {
        UserDraft {
            role: Some(UserRole::Doctor),
            department: Some("dep-7".into()),
            specialization: Some(" Rheumatology ".into()),
            consultation_charges: Some("450.5".into()),
            ..draft()
        }
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(serde_json::to_string(&UserRole::SuperAdmin).unwrap(), "\"superAdmin\"");
        assert_eq!(serde_json::from_str::<UserRole>("\"Receptionist\"").unwrap(), UserRole::Receptionist);
        assert_eq!(serde_json::from_str::<UserRole>("\"Accountant\"").unwrap(), UserRole::Accountant);
        assert_eq!(serde_json::from_str::<UserRole>("\"Nurse\"").unwrap(), UserRole::Other);
        assert_eq!(UserRole::parse("Other"), None);
    }

    #[test]
    fn listing_with_unfamiliar_roles_still_parses() {
        let page: UserListPage = serde_json::from_str(
            r#"{"users": [
                {"_id": "u1", "name": "A", "email": "a@b.co", "role": "Accountant"},
                {"_id": "u2", "name": "B", "email": "b@b.co", "role": "Pharmacist"}
            ]}"#,
        )
        .unwrap();
        let roles: Vec<UserRole> = page.users.iter().map(|u| u.role).collect();
        assert_eq!(roles, vec![UserRole::Accountant, UserRole::Other]);
    }

    #[test]
    fn role_creation_policy() {
        assert_eq!(
            UserRole::SuperAdmin.creatable_roles(),
            &[UserRole::Admin, UserRole::Doctor, UserRole::Receptionist, UserRole::Accountant]
        );
        assert_eq!(UserRole::Admin.creatable_roles(), &[UserRole::Doctor, UserRole::Receptionist, UserRole::Accountant]);
        assert!(!UserRole::Doctor.can_manage_users());
        assert!(!UserRole::Accountant.can_manage_users());
        assert!(!UserRole::Other.can_manage_users());
    }

    #[test]
    fn list_query_is_sparse() {
        let q = UserListQuery { role: Some(UserRole::Admin), is_active: Some(false), ..Default::default() };
        assert_eq!(
            q.to_query_pairs(),
            vec![
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
                ("role", "Admin".to_string()),
                ("isActive", "false".to_string()),
            ]
        );
    }

    #[test]
    fn user_draft_checks_email_and_password() {
        assert!(draft().validate(true).is_ok());

        let errors = UserDraft { email: "not-an-email".into(), password: Some("123".into()), ..draft() }.validate(true).unwrap_err();
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());

        // editing without a new password is fine
        assert!(UserDraft { password: None, ..draft() }.validate(false).is_ok());
        assert!(UserDraft { password: None, ..draft() }.validate(true).unwrap_err().get("password").is_some());
    }

    #[test]
    fn user_reads_wire_shape() {
        let user: User = serde_json::from_str(
            r#"{"_id": "u1", "name": "Ada", "username": "ada", "email": "a@b.co", "role": "superAdmin", "isActive": false}"#,
        )
        .unwrap();
        assert_eq!(user.role, UserRole::SuperAdmin);
        assert!(!user.is_active);
    }

    #[test]
    fn doctor_fields_are_required_on_edit() {
        assert!(doctor().validate(false).is_ok());

        let bare = UserDraft { role: Some(UserRole::Doctor), ..draft() };
        assert!(bare.validate(true).is_ok());
        let errors = bare.validate(false).unwrap_err();
        for field in ["department", "specialization", "consultationCharges"] {
            assert!(errors.get(field).is_some(), "{field}");
        }
    }

    #[test]
    fn doctor_charges_must_be_numeric() {
        let errors = UserDraft { consultation_charges: Some("a lot".into()), ..doctor() }.validate(true).unwrap_err();
        assert!(errors.get("consultationCharges").is_some());

        let valid = doctor().validate(true).unwrap();
        assert_eq!(valid.specialization.as_deref(), Some("Rheumatology"));
        let body = serde_json::to_value(&valid).unwrap();
        assert_eq!(body["consultationCharges"], serde_json::json!(450.5));
        assert_eq!(serde_json::from_value::<UserDraft>(body).unwrap(), valid);
    }

    #[test]
    fn doctor_fields_are_dropped_for_other_roles() {
        let valid = UserDraft { role: Some(UserRole::Accountant), ..doctor() }.validate(false).unwrap();
        assert_eq!((valid.department, valid.specialization, valid.consultation_charges), (None, None, None));
    }

    #[test]
    fn doctor_profile_reads_populated_department() {
        let user: User = serde_json::from_str(
            r#"{"_id": "u3", "name": "Dr B", "email": "b@b.co", "role": "Doctor",
                "department": {"_id": "dep-7", "name": "Immunology"},
                "specialization": "Rheumatology", "consultationCharges": 450}"#,
        )
        .unwrap();
        assert_eq!(user.doctor_profile().as_deref(), Some("Immunology · Rheumatology · 450 per consultation"));
        let edit = UserDraft::from(&user);
        assert_eq!(edit.department.as_deref(), Some("dep-7"));
        assert_eq!(edit.consultation_charges.as_deref(), Some("450"));
        assert!(doctor_with_id_department().doctor_profile().is_some());
    }

    fn doctor_with_id_department() -> User {
        serde_json::from_str(r#"{"_id": "u4", "name": "Dr C", "email": "c@b.co", "role": "Doctor", "department": "dep-9"}"#)
            .unwrap()
    }
}
