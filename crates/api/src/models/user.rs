//! User domain types.

use chrono::{DateTime, Utc};

use loommarket_core::{Email, Role, UserId};

/// An account holder (domain type).
///
/// The password hash never leaves the repository layer; this type is safe
/// to hand to route handlers and serializers.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Ordered role tags; the first entry is the primary role.
    pub roles: Vec<Role>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The primary role used for authorization decisions.
    ///
    /// Accounts are created with at least one role, but the store does not
    /// enforce a non-empty array, so this stays an `Option`.
    #[must_use]
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: Vec<Role>) -> User {
        User {
            id: UserId::new(1),
            name: "test".to_owned(),
            email: Email::parse("test@example.com").expect("valid email"),
            roles,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_primary_role_is_first() {
        let user = user_with_roles(vec![Role::Admin, Role::User]);
        assert_eq!(user.primary_role(), Some(Role::Admin));
    }

    #[test]
    fn test_primary_role_empty() {
        let user = user_with_roles(vec![]);
        assert_eq!(user.primary_role(), None);
    }
}
