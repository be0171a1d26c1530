//! Role value object - a label used to group hosts
//!
//! Roles are an open vocabulary. `web`, `app`, `db` and `workers` are the
//! conventional labels, but any lowercase label made of ASCII letters,
//! digits, `-` and `_` is accepted. `all` is reserved for [`super::RoleFilter`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conventional role labels for a single-box site deploy.
pub const WELL_KNOWN_ROLES: &[&str] = &["web", "app", "db", "workers"];

/// Label reserved for "every role" in filters.
pub const ALL_ROLES: &str = "all";

/// Errors produced while parsing a role label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("role label must not be empty")]
    Empty,

    #[error("invalid role '{label}': only letters, digits, '-' and '_' are allowed")]
    InvalidCharacter { label: String },

    #[error("'all' is reserved and cannot be used as a server role")]
    Reserved,
}

/// A role tag attached to a host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Parse a role label.
    ///
    /// Surrounding whitespace and a leading `:` are stripped and the label
    /// is lowercased, so `:Web` and `web` name the same role.
    pub fn new(label: &str) -> Result<Self, RoleError> {
        let normalized = label.trim().trim_start_matches(':').to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(RoleError::Empty);
        }
        if normalized == ALL_ROLES {
            return Err(RoleError::Reserved);
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(RoleError::InvalidCharacter {
                label: label.trim().to_string(),
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for one of the [`WELL_KNOWN_ROLES`]
    pub fn is_well_known(&self) -> bool {
        WELL_KNOWN_ROLES.contains(&self.0.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = RoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::new(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::new(s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join role names with `", "` in the given order.
pub fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_accepts_conventional_labels() {
        for label in WELL_KNOWN_ROLES {
            let role = Role::new(label).unwrap();
            assert_eq!(role.as_str(), *label);
            assert!(role.is_well_known());
        }
    }

    #[test]
    fn role_normalizes_symbol_style_and_case() {
        assert_eq!(Role::new(":Web").unwrap().as_str(), "web");
        assert_eq!(Role::new("  DB ").unwrap().as_str(), "db");
    }

    #[test]
    fn role_accepts_custom_labels() {
        let role = Role::new("cron_runner-2").unwrap();
        assert_eq!(role.to_string(), "cron_runner-2");
        assert!(!role.is_well_known());
    }

    #[test]
    fn role_rejects_empty_and_reserved() {
        assert_eq!(Role::new("  "), Err(RoleError::Empty));
        assert_eq!(Role::new(":"), Err(RoleError::Empty));
        assert_eq!(Role::new("ALL"), Err(RoleError::Reserved));
    }

    #[test]
    fn role_rejects_invalid_characters() {
        let err = Role::new("web app").unwrap_err();
        assert_eq!(
            err,
            RoleError::InvalidCharacter {
                label: "web app".to_string()
            }
        );
    }

    #[test]
    fn join_roles_keeps_declaration_order() {
        let roles: Vec<Role> = ["web", "app"].iter().map(|r| Role::new(r).unwrap()).collect();
        assert_eq!(join_roles(&roles), "web, app");
        assert_eq!(join_roles(&[]), "");
    }
}
