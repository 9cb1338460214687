//! # User Client
//!
//! Accounts: self-registration (students only), credential checks for login, staff
//! provisioning at start-up, and the admin user listing.
//!
//! Hashing and verification are CPU-bound and run on the blocking pool.
use crate::auth::{policy, CredentialHasher, Principal};
use crate::clock::Clock;
use crate::model::{Role, User, UserCreate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A self-registration request.
#[derive(Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub role: Role,
}

/// Client for the users table.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
}

impl UserClient {
    pub fn new(
        inner: ResourceClient<User>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner,
            hasher,
            clock,
        }
    }

    /// Creates a student account. Other roles are provisioned, never self-registered.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: Registration) -> Result<User, UserError> {
        if registration.username.trim().is_empty() || registration.password.is_empty() {
            return Err(UserError::ValidationError("Missing required fields".into()));
        }
        if registration.role != Role::Student {
            warn!(role = %registration.role, "Self-registration with staff role refused");
            return Err(UserError::ValidationError("Invalid role".into()));
        }
        let user = self
            .insert(
                registration.username,
                registration.password,
                registration.email,
                registration.role,
            )
            .await?;
        info!(id = %user.id, "User registered");
        Ok(user)
    }

    /// Ensures a staff account exists. An existing account is returned untouched.
    #[instrument(skip(self, password))]
    pub async fn provision(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, UserError> {
        if let Some(existing) = self.inner.find_by_key(username).await.map_err(Self::map_error)? {
            debug!(id = %existing.id, "Account already provisioned");
            return Ok(existing);
        }
        let user = self
            .insert(username.to_string(), password.to_string(), None, role)
            .await?;
        info!(id = %user.id, %role, "Account provisioned");
        Ok(user)
    }

    /// Checks a username/password pair. Every failure is the same `InvalidCredentials`.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<User, UserError> {
        let found = self
            .inner
            .find_by_key(username.trim())
            .await
            .map_err(Self::map_error)?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let Some(user) = found else {
            tokio::task::spawn_blocking(move || hasher.verify_unknown(&password))
                .await
                .map_err(|e| UserError::ActorCommunicationError(e.to_string()))?;
            debug!("Unknown username");
            return Err(UserError::InvalidCredentials);
        };

        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::ActorCommunicationError(e.to_string()))?;

        if matches {
            Ok(user)
        } else {
            debug!("Password mismatch");
            Err(UserError::InvalidCredentials)
        }
    }

    /// The account behind a verified token.
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn current_user(&self, principal: &Principal) -> Result<User, UserError> {
        self.get(principal.id)
            .await?
            .ok_or_else(|| UserError::NotFound(principal.id.to_string()))
    }

    /// All accounts, newest first (admin).
    #[instrument(skip(self, principal), fields(user = %principal.username))]
    pub async fn list_users(&self, principal: &Principal) -> Result<Vec<User>, UserError> {
        policy::USER_ADMIN.require(principal)?;
        let mut users = self.list().await?;
        users.sort_by_key(|u| Reverse((u.created_at, u.id)));
        Ok(users)
    }

    async fn insert(
        &self,
        username: String,
        password: String,
        email: Option<String>,
        role: Role,
    ) -> Result<User, UserError> {
        let hasher = self.hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::ActorCommunicationError(e.to_string()))?
            .map_err(|e| UserError::ActorCommunicationError(e.to_string()))?;

        let params = UserCreate {
            username,
            password_hash,
            email,
            role,
            at: self.clock.now(),
        };
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<UserError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(FrameworkError::Conflict(username)) => UserError::AlreadyExists(username),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::HashError;
    use crate::clock::FixedClock;
    use crate::model::UserId;
    use chrono::DateTime;
    use resource_store::mock::MockClient;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stores the password reversed. Enough to tell right from wrong.
    #[derive(Default)]
    struct ReverseHasher {
        unknown_checks: AtomicUsize,
    }

    impl CredentialHasher for ReverseHasher {
        fn hash(&self, password: &str) -> Result<String, HashError> {
            Ok(password.chars().rev().collect())
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            password.chars().rev().collect::<String>() == hash
        }

        fn verify_unknown(&self, _password: &str) {
            self.unknown_checks.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn user(id: u32, username: &str, created: i64) -> User {
        let at = DateTime::from_timestamp(created, 0).unwrap();
        User {
            id: UserId(id),
            username: username.into(),
            password_hash: "1p".into(),
            email: None,
            role: Role::Student,
            created_at: at,
            updated_at: at,
        }
    }

    fn client(mock: &MockClient<User>) -> UserClient {
        client_with(mock, Arc::new(ReverseHasher::default()))
    }

    fn client_with(mock: &MockClient<User>, hasher: Arc<ReverseHasher>) -> UserClient {
        UserClient::new(mock.client(), hasher, Arc::new(FixedClock::at_millis(0)))
    }

    fn registration(role: Role) -> Registration {
        Registration {
            username: "alice".into(),
            password: "p1".into(),
            email: None,
            role,
        }
    }

    #[tokio::test]
    async fn test_staff_role_cannot_self_register() {
        let mock = MockClient::<User>::new();
        let result = client(&mock).register(registration(Role::Admin)).await;
        assert_eq!(
            result,
            Err(UserError::ValidationError("Invalid role".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_password_is_rejected() {
        let mock = MockClient::<User>::new();
        let mut request = registration(Role::Student);
        request.password.clear();
        assert!(matches!(
            client(&mock).register(request).await,
            Err(UserError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_already_exists() {
        let mut mock = MockClient::<User>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("alice".into()));

        let result = client(&mock).register(registration(Role::Student)).await;
        assert_eq!(result, Err(UserError::AlreadyExists("alice".into())));
        assert_eq!(
            result.unwrap_err().to_string(),
            "User already exists"
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let mut mock = MockClient::<User>::new();
        mock.expect_find_by_key("alice")
            .return_ok(Some(user(1, "alice", 0)));
        mock.expect_find_by_key("alice")
            .return_ok(Some(user(1, "alice", 0)));
        mock.expect_find_by_key("bob").return_ok(None);

        let client = client(&mock);
        assert_eq!(
            client.verify_credentials("alice", "p1").await.unwrap().id,
            UserId(1)
        );
        assert_eq!(
            client.verify_credentials("alice", "wrong").await,
            Err(UserError::InvalidCredentials)
        );
        assert_eq!(
            client.verify_credentials("bob", "p1").await,
            Err(UserError::InvalidCredentials)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_unknown_username_still_runs_a_verification() {
        let mut mock = MockClient::<User>::new();
        mock.expect_find_by_key("alice")
            .return_ok(Some(user(1, "alice", 0)));
        mock.expect_find_by_key("ghost").return_ok(None);

        let hasher = Arc::new(ReverseHasher::default());
        let client = client_with(&mock, hasher.clone());

        assert_eq!(
            client.verify_credentials("alice", "wrong").await,
            Err(UserError::InvalidCredentials)
        );
        assert_eq!(hasher.unknown_checks.load(Ordering::SeqCst), 0);

        assert_eq!(
            client.verify_credentials("ghost", "p1").await,
            Err(UserError::InvalidCredentials)
        );
        assert_eq!(hasher.unknown_checks.load(Ordering::SeqCst), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_users_is_admin_only_and_newest_first() {
        let mut mock = MockClient::<User>::new();
        mock.expect_list()
            .return_ok(vec![user(1, "alice", 100), user(2, "bob", 200)]);

        let client = client(&mock);
        let student = Principal {
            id: UserId(1),
            username: "alice".into(),
            role: Role::Student,
        };
        assert!(matches!(
            client.list_users(&student).await,
            Err(UserError::Auth(_))
        ));

        let admin = Principal {
            role: Role::Admin,
            ..student
        };
        let names: Vec<String> = client
            .list_users(&admin)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["bob", "alice"]);
        mock.verify();
    }
}
