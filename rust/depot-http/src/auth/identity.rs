use std::fmt::{Display, Formatter};

/// An authenticated principal, as resolved by an [crate::AuthScheme].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct User {
    name: String,
}

impl User {
    /// A user known by `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The user's name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The subject of a [crate::Permission] query.
///
/// [Identity::AnyUser] is a reserved sentinel asking "is this route open to
/// everyone?". It is a distinct variant, so no authenticated [User], whatever
/// its name, ever compares equal to it. Authentication schemes resolve to a
/// [User] and therefore cannot produce the sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Anyone, authenticated or not
    AnyUser,
    /// A specific authenticated user
    User(User),
}

impl Identity {
    /// The user behind this identity, if it is not the sentinel
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::AnyUser => None,
            Identity::User(user) => Some(user),
        }
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Identity::User(user)
    }
}
