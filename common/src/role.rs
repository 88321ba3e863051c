use serde::{Deserialize, Serialize};

/// Account roles, closed set. Authorization is exact membership in a
/// per-route allow-list; admin does not implicitly inherit manager routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Owner => "owner",
        }
    }

    /// Exact-match set test over the allow-list.
    pub fn is_allowed(&self, allowed: &[Role]) -> bool {
        allowed.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_is_exact_membership() {
        assert!(Role::Admin.is_allowed(&[Role::Admin]));
        assert!(!Role::Manager.is_allowed(&[Role::Admin]));
        // no hierarchy: admin is not implicitly a manager
        assert!(!Role::Admin.is_allowed(&[Role::Manager]));
        assert!(Role::Owner.is_allowed(&[Role::Manager, Role::Owner]));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
