//! Role tags for coarse-grained permission checks.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown role tag.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown role: {0}")]
pub struct RoleError(pub String);

/// A role tag assigned to a user identity.
///
/// Users carry an ordered list of roles; authorization checks look at the
/// first (primary) role only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Manufacturer,
    Retailer,
    Supplier,
}

impl Role {
    /// Parse a role from its stored string form.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError`] for tags not in the known set.
    pub fn parse(s: &str) -> Result<Self, RoleError> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "manufacturer" => Ok(Self::Manufacturer),
            "retailer" => Ok(Self::Retailer),
            "supplier" => Ok(Self::Supplier),
            other => Err(RoleError(other.to_owned())),
        }
    }

    /// The stored string form of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Manufacturer => "manufacturer",
            Self::Retailer => "retailer",
            Self::Supplier => "supplier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("user").unwrap(), Role::User);
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("manufacturer").unwrap(), Role::Manufacturer);
        assert_eq!(Role::parse("retailer").unwrap(), Role::Retailer);
        assert_eq!(Role::parse("supplier").unwrap(), Role::Supplier);
    }

    #[test]
    fn test_parse_unknown_role() {
        let err = Role::parse("superuser").unwrap_err();
        assert_eq!(err.to_string(), "unknown role: superuser");
    }

    #[test]
    fn test_roundtrip_as_str() {
        for role in [
            Role::User,
            Role::Admin,
            Role::Manufacturer,
            Role::Retailer,
            Role::Supplier,
        ] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }
}
