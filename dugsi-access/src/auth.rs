//! Password login and the in-memory session.
//!
//! Sessions do not survive a restart; the app forces a fresh login on
//! every launch.

use crate::{AccessError, AccessResult, Role};
use std::collections::HashMap;

/// Per-role passwords.
#[derive(Debug, Clone)]
pub struct Credentials {
    passwords: HashMap<Role, String>,
}

impl Credentials {
    /// Builds a credential table from (role, password) pairs. Passwords
    /// are stored lowercased; comparison at login is case-insensitive.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Role, S)>,
        S: Into<String>,
    {
        let passwords = entries
            .into_iter()
            .map(|(role, pass)| (role, pass.into().to_lowercase()))
            .collect();
        Self { passwords }
    }

    /// Checks a password for a role and opens a session. Input is
    /// trimmed and lowercased before comparison, so pasted passwords
    /// with stray whitespace still work.
    pub fn login(&self, role: Role, password: &str) -> AccessResult<Session> {
        let supplied = password.trim().to_lowercase();
        match self.passwords.get(&role) {
            Some(expected) if *expected == supplied => Ok(Session::new(role)),
            _ => Err(AccessError::InvalidPassword),
        }
    }
}

/// An authenticated user for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    role: Role,
    display_name: String,
}

impl Session {
    fn new(role: Role) -> Self {
        // Display name is the capitalized role name, e.g. "Teacher".
        let name = role.as_str();
        let mut display_name = String::with_capacity(name.len());
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            display_name.extend(first.to_uppercase());
            display_name.push_str(chars.as_str());
        }
        Self { role, display_name }
    }

    /// The session's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Human-readable name shown in the header bar.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
