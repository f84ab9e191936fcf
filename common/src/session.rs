//! Explicit session context: created at login, dropped at logout.

use serde::{Deserialize, Serialize};

use crate::users::UserRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Credentials and identity of the signed-in user.
///
/// Passed to every call that needs authorisation instead of being read from
/// an ambient store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub user: SessionUser,
}

impl SessionContext {
    pub fn begin(login: LoginResponse) -> Self {
        Self { token: login.token, user: login.user }
    }

    pub fn bearer_token(&self) -> &str {
        &self.token
    }

    pub fn can_manage_users(&self) -> bool {
        self.user.role.can_manage_users()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}
