//! Host entity - a configured remote machine

use thiserror::Error;

use crate::domain::value_objects::{join_roles, Role};

/// Errors produced while building a [`Host`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("server address must not be empty")]
    EmptyAddress,

    #[error("server '{address}' must have at least one role")]
    NoRoles { address: String },
}

/// A remote machine tagged with roles
///
/// Immutable once built. Roles keep declaration order; duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    address: String,
    user: Option<String>,
    port: Option<u16>,
    roles: Vec<Role>,
}

impl Host {
    pub fn new(
        address: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, HostError> {
        let address = address.into().trim().to_string();
        if address.is_empty() {
            return Err(HostError::EmptyAddress);
        }

        let mut unique: Vec<Role> = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        if unique.is_empty() {
            return Err(HostError::NoRoles { address });
        }

        Ok(Self {
            address,
            user: None,
            port: None,
            roles: unique,
        })
    }

    /// Set the login user (empty strings are ignored)
    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Role names joined with `", "` in declaration order
    pub fn roles_label(&self) -> String {
        join_roles(&self.roles)
    }

    /// SSH destination: `user@address` or bare `address`
    pub fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{}@{}", user, self.address),
            None => self.address.clone(),
        }
    }

    /// Line prefix used by every task report: `Host <address> (<roles>):`
    pub fn report_prefix(&self) -> String {
        format!("Host {} ({}):", self.address, self.roles_label())
    }
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}
