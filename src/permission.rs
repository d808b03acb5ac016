//! Permission codes of the signed-in user
//!
//! - A third-party app id grants everything
//! - Otherwise the user's permission code list decides
//! - A user without a code list falls back to the admin flag

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The subset of the login payload that carries permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// `None` means the backend sent no list at all, which differs from an empty one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perm_code_list: Option<Vec<String>>,
}

/// Who is asking, for permission checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionContext {
    pub app_id: Option<String>,
    pub user: Option<UserInfo>,
}

impl PermissionContext {
    pub fn new(app_id: Option<String>, user: Option<UserInfo>) -> Self {
        Self { app_id, user }
    }

    /// Context for a signed-in user with no app id
    pub fn for_user(user: UserInfo) -> Self {
        Self {
            app_id: None,
            user: Some(user),
        }
    }

    fn has_app_id(&self) -> bool {
        self.app_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Returns true if `perm_code` is granted
    pub fn check_perm_code_exist(&self, perm_code: &str) -> bool {
        if self.has_app_id() {
            return true;
        }
        match &self.user {
            None => false,
            Some(UserInfo {
                perm_code_list: Some(codes),
                ..
            }) => codes.iter().any(|c| c == perm_code),
            Some(user) => user.is_admin,
        }
    }

    /// All permission codes of the user, empty when signed out
    pub fn perm_code_set(&self) -> HashSet<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.perm_code_list.as_ref())
            .map(|codes| codes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
