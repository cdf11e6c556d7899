use std::{collections::BTreeSet, sync::Arc};

use depot_common::ConditionalSync;

use crate::{Identity, User};

/// Answers whether an [Identity] may pass.
///
/// Queried with [Identity::AnyUser] to learn whether a route is public, and
/// with the resolved user otherwise. Implementations must be pure and must not
/// block.
pub trait Permission: ConditionalSync {
    /// True if `identity` is allowed
    fn allowed(&self, identity: &Identity) -> bool;
}

impl<P> Permission for Arc<P>
where
    P: Permission + ?Sized,
{
    fn allowed(&self, identity: &Identity) -> bool {
        (**self).allowed(identity)
    }
}

impl<P> Permission for Box<P>
where
    P: Permission + ?Sized,
{
    fn allowed(&self, identity: &Identity) -> bool {
        (**self).allowed(identity)
    }
}

/// Allows every identity, the sentinel included; routes guarded by it are
/// public.
#[derive(Clone, Copy, Debug, Default)]
pub struct Everyone;

impl Permission for Everyone {
    fn allowed(&self, _identity: &Identity) -> bool {
        true
    }
}

/// Allows no identity at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nobody;

impl Permission for Nobody {
    fn allowed(&self, _identity: &Identity) -> bool {
        false
    }
}

/// Allows an explicit set of users, and optionally anyone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Users {
    anyone: bool,
    names: BTreeSet<String>,
}

impl Users {
    /// Also allow `user`
    pub fn with_user(mut self, user: User) -> Self {
        self.names.insert(user.name().to_owned());
        self
    }

    /// Make the route public
    pub fn with_any_user(mut self) -> Self {
        self.anyone = true;
        self
    }
}

impl Permission for Users {
    fn allowed(&self, identity: &Identity) -> bool {
        match identity {
            Identity::AnyUser => self.anyone,
            Identity::User(user) => self.anyone || self.names.contains(user.name()),
        }
    }
}

impl FromIterator<Identity> for Users {
    fn from_iter<I: IntoIterator<Item = Identity>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Users::default(), |users, identity| match identity {
                Identity::AnyUser => users.with_any_user(),
                Identity::User(user) => users.with_user(user),
            })
    }
}

/// Adapts a predicate into a [Permission].
///
/// ```rust
/// use depot_http::{Identity, Permission, Predicate};
///
/// let admins = Predicate::new(|identity: &Identity| {
///     identity.user().is_some_and(|user| user.name().starts_with("admin-"))
/// });
/// assert!(!admins.allowed(&Identity::AnyUser));
/// ```
#[derive(Clone, Debug)]
pub struct Predicate<F>(F);

impl<F> Predicate<F>
where
    F: Fn(&Identity) -> bool,
{
    /// Wrap `predicate`
    pub fn new(predicate: F) -> Self {
        Self(predicate)
    }
}

impl<F> Permission for Predicate<F>
where
    F: Fn(&Identity) -> bool + ConditionalSync,
{
    fn allowed(&self, identity: &Identity) -> bool {
        (self.0)(identity)
    }
}
