//! The fixed set of user roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named permission profile controlling page-level access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Accountant,
}

impl Role {
    /// The role name as used in configuration and the login form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Accountant => "accountant",
        }
    }

    /// The page a freshly logged-in user of this role lands on.
    #[must_use]
    pub const fn landing_page(&self) -> &'static str {
        match self {
            Role::Admin => "dashboard",
            Role::Teacher => "students",
            Role::Accountant => "finance",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "accountant" => Ok(Role::Accountant),
            other => Err(crate::AccessError::UnknownRole(other.to_string())),
        }
    }
}
