//! The role → permitted-pages table and the navigation gate.

use crate::Role;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Statically configured permitted-page sets per role.
///
/// Admin is a wildcard and consults no set. The gate is a pure function
/// of (role, this table, page id) — callers decide what to do on denial
/// (keep the current page visible and surface a rejection notice).
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    perms: HashMap<Role, HashSet<String>>,
}

impl Default for AccessPolicy {
    /// The stock configuration: teachers get the academic pages,
    /// accountants the financial ones, neither gets the dashboard.
    fn default() -> Self {
        let mut perms = HashMap::new();
        perms.insert(
            Role::Teacher,
            ["students", "attendance", "reports", "exams", "classes"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        perms.insert(
            Role::Accountant,
            ["finance", "reports"].into_iter().map(String::from).collect(),
        );
        Self { perms }
    }
}

impl AccessPolicy {
    /// Builds a policy from explicit (role, pages) pairs. Roles not
    /// listed are left with an empty set (admin never needs one).
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Role, Vec<S>)>,
        S: Into<String>,
    {
        let perms = entries
            .into_iter()
            .map(|(role, pages)| (role, pages.into_iter().map(Into::into).collect()))
            .collect();
        Self { perms }
    }

    /// Decides whether `role` may navigate to `page`.
    ///
    /// No role means unauthenticated: always denied (the caller routes
    /// to its login flow).
    #[must_use]
    pub fn is_allowed(&self, role: Option<Role>, page: &str) -> bool {
        let Some(role) = role else {
            return false;
        };
        if role == Role::Admin {
            return true;
        }
        let allowed = self
            .perms
            .get(&role)
            .is_some_and(|pages| pages.contains(page));
        if !allowed {
            warn!(%role, page, "navigation denied");
        }
        allowed
    }

    /// The pages a role may navigate to (empty for admin: wildcard).
    #[must_use]
    pub fn pages_for(&self, role: Role) -> Vec<&str> {
        self.perms
            .get(&role)
            .map(|pages| pages.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
