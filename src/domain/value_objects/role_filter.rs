//! Role filter - selects hosts by role

use crate::domain::entities::Host;

use super::role::{join_roles, Role, RoleError, ALL_ROLES};

/// Predicate over a host's role set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoleFilter {
    /// Every configured host
    #[default]
    All,
    /// Hosts carrying at least one of these roles
    Any(Vec<Role>),
}

impl RoleFilter {
    /// Parse `all` or a comma-separated list of role labels.
    ///
    /// An empty string or any `all` entry in the list selects every host.
    pub fn parse(input: &str) -> Result<Self, RoleError> {
        let parts: Vec<&str> = input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty()
            || parts
                .iter()
                .any(|p| p.trim_start_matches(':').eq_ignore_ascii_case(ALL_ROLES))
        {
            return Ok(RoleFilter::All);
        }

        let mut roles: Vec<Role> = Vec::with_capacity(parts.len());
        for part in parts {
            let role = Role::new(part)?;
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        Ok(RoleFilter::Any(roles))
    }

    /// Returns true if the host's roles intersect this filter
    pub fn matches(&self, host: &Host) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Any(wanted) => wanted.iter().any(|r| host.has_role(r)),
        }
    }

    /// Select matching hosts, preserving their order
    pub fn select<'a>(&self, hosts: &'a [Host]) -> Vec<&'a Host> {
        hosts.iter().filter(|h| self.matches(h)).collect()
    }
}

impl std::str::FromStr for RoleFilter {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleFilter::parse(s)
    }
}

impl std::fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleFilter::All => f.write_str(ALL_ROLES),
            RoleFilter::Any(roles) => f.write_str(&join_roles(roles)),
        }
    }
}
