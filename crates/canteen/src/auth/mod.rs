//! # Authorization
//!
//! Every privileged operation starts from a [`Principal`]: the `(id, username, role)` carried
//! by a verified bearer token. The [`AuthorizationGate`] turns a presented token into a
//! principal, and a [`RoleSet`] decides whether that principal may proceed.
//!
//! The per-operation role sets are fixed policy, declared once in [`policy`]:
//!
//! ```rust
//! use canteen::auth::{policy, Principal};
//! use canteen::model::{Role, UserId};
//!
//! let cashier = Principal { id: UserId(4), username: "cashier1".into(), role: Role::Cashier };
//! assert!(policy::ORDER_STAFF.require(&cashier).is_ok());
//! assert!(policy::MENU_WRITE.require(&cashier).is_err());
//! ```

pub mod password;
pub mod token;

pub use password::{Argon2Hasher, CredentialHasher};
pub use token::{Claims, JwtTokens, TokenVerifier};

use crate::model::{Role, User, UserId};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Authentication and authorization failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// No token, or a token that fails signature, expiry or claim checks.
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid token, but the role is not allowed to do this.
    #[error("Access denied for role {role}")]
    Forbidden { role: Role },

    /// Signing a new token failed.
    #[error("Token could not be issued: {0}")]
    TokenIssue(String),
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// A declared set of roles allowed to perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn allows(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn roles(&self) -> &'static [Role] {
        self.0
    }

    /// `Ok` if the principal's role is in the set.
    pub fn require(&self, principal: &Principal) -> Result<(), AuthError> {
        if self.allows(principal.role) {
            Ok(())
        } else {
            warn!(user = %principal.username, role = %principal.role, allowed = %self, "Forbidden");
            Err(AuthError::Forbidden {
                role: principal.role,
            })
        }
    }
}

impl Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Role policy for every gated operation.
pub mod policy {
    use super::RoleSet;
    use crate::model::Role::{Admin, Cashier, Kitchen, Student};

    /// Any authenticated account.
    pub const ANY: RoleSet = RoleSet::new(&[Student, Admin, Kitchen, Cashier]);

    pub const MENU_WRITE: RoleSet = RoleSet::new(&[Admin]);
    pub const MENU_AVAILABILITY: RoleSet = RoleSet::new(&[Admin, Kitchen, Cashier]);
    pub const MENU_STAFF: RoleSet = RoleSet::new(&[Admin, Kitchen]);

    pub const STOCK_MANAGE: RoleSet = RoleSet::new(&[Admin, Kitchen]);
    pub const STOCK_ADJUST: RoleSet = RoleSet::new(&[Admin, Kitchen, Cashier]);
    pub const STOCK_STAFF: RoleSet = RoleSet::new(&[Admin, Kitchen, Cashier]);

    pub const ORDER_STAFF: RoleSet = RoleSet::new(&[Admin, Kitchen, Cashier]);
    pub const ORDER_DELETE: RoleSet = RoleSet::new(&[Admin]);

    pub const PAYMENT_RECORD: RoleSet = RoleSet::new(&[Admin, Cashier]);
    pub const PAYMENT_VIEW: RoleSet = RoleSet::new(&[Admin, Kitchen, Cashier]);

    pub const USER_ADMIN: RoleSet = RoleSet::new(&[Admin]);
}

/// Verifies presented tokens and applies role sets.
///
/// Pure: no store access, no side effects beyond logging.
#[derive(Clone)]
pub struct AuthorizationGate {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthorizationGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Resolves a token into the principal it was issued to.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Principal, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Unauthenticated("No token provided".into()))?;
        let principal = self.verifier.verify(token)?;
        debug!(user = %principal.username, role = %principal.role, "Authenticated");
        Ok(principal)
    }

    /// Authenticates, then checks the role against `allowed`.
    pub fn authorize(&self, token: Option<&str>, allowed: RoleSet) -> Result<Principal, AuthError> {
        let principal = self.authenticate(token)?;
        allowed.require(&principal)?;
        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticVerifier;

    impl TokenVerifier for StaticVerifier {
        fn verify(&self, token: &str) -> Result<Principal, AuthError> {
            let role = token
                .parse()
                .map_err(|_| AuthError::Unauthenticated("Invalid token".into()))?;
            Ok(Principal {
                id: UserId(1),
                username: "tester".into(),
                role,
            })
        }
    }

    fn gate() -> AuthorizationGate {
        AuthorizationGate::new(Arc::new(StaticVerifier))
    }

    #[test]
    fn test_missing_token_is_unauthenticated() {
        assert!(matches!(
            gate().authorize(None, policy::ANY),
            Err(AuthError::Unauthenticated(_))
        ));
        assert!(matches!(
            gate().authorize(Some("  "), policy::ANY),
            Err(AuthError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_bad_token_is_unauthenticated() {
        assert!(matches!(
            gate().authorize(Some("forged"), policy::ANY),
            Err(AuthError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_role_outside_set_is_forbidden() {
        let result = gate().authorize(Some("student"), policy::ORDER_STAFF);
        assert_eq!(
            result,
            Err(AuthError::Forbidden {
                role: Role::Student
            })
        );
    }

    #[test]
    fn test_role_inside_set_yields_principal() {
        let principal = gate()
            .authorize(Some("kitchen"), policy::STOCK_MANAGE)
            .unwrap();
        assert_eq!(principal.role, Role::Kitchen);
        assert_eq!(principal.id, UserId(1));
    }

    #[test]
    fn test_policy_sets() {
        assert!(policy::MENU_WRITE.allows(Role::Admin));
        assert!(!policy::MENU_WRITE.allows(Role::Kitchen));
        assert!(policy::STOCK_ADJUST.allows(Role::Cashier));
        assert!(!policy::STOCK_MANAGE.allows(Role::Cashier));
        assert!(!policy::PAYMENT_RECORD.allows(Role::Kitchen));
        assert_eq!(policy::STOCK_MANAGE.to_string(), "{admin, kitchen}");
    }
}
