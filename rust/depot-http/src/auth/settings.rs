use serde::{Deserialize, Serialize};

use crate::{Identity, User, Users};

/// Name that stands for [Identity::AnyUser] in [PermissionSettings].
pub const ANY_USER: &str = "*";

/// Serializable description of who may access a route.
///
/// ```rust
/// use depot_http::{Identity, Permission, PermissionSettings, Users};
///
/// let settings: PermissionSettings =
///     serde_json::from_str(r#"{ "users": ["alice", "bob"] }"#).unwrap();
/// let users = Users::from(settings);
/// assert!(!users.allowed(&Identity::AnyUser));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSettings {
    /// Allowed user names; [ANY_USER] makes the route public
    #[serde(default)]
    pub users: Vec<String>,
}

impl PermissionSettings {
    /// The identities these settings allow
    pub fn identities(&self) -> impl Iterator<Item = Identity> + '_ {
        self.users.iter().map(|name| match name.as_str() {
            ANY_USER => Identity::AnyUser,
            name => Identity::User(User::new(name)),
        })
    }
}

impl From<PermissionSettings> for Users {
    fn from(settings: PermissionSettings) -> Self {
        settings.identities().collect()
    }
}

impl From<&PermissionSettings> for Users {
    fn from(settings: &PermissionSettings) -> Self {
        settings.identities().collect()
    }
}
