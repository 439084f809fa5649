use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration and login.
///
/// Password hashing and verification run on the blocking thread pool so
/// they never stall the async workers.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    hash_timeout: Duration,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `hash_timeout` - Upper bound for one hash or verify call
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        hash_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            hash_timeout,
        }
    }

    async fn run_blocking<T, F>(&self, task: F) -> Result<T, UserError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        match tokio::time::timeout(self.hash_timeout, tokio::task::spawn_blocking(task)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(UserError::PasswordHashing(format!("worker failed: {}", e))),
            Err(_) => Err(UserError::PasswordHashing(format!(
                "timed out after {:?}",
                self.hash_timeout
            ))),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = self
            .run_blocking(move || authenticator.hash_password(&password))
            .await??;

        let user = NewUser {
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                // Pay the verification cost anyway so timing does not reveal the account.
                self.run_blocking(move || authenticator.reject_unknown_account(&password))
                    .await?;
                return Err(UserError::InvalidCredentials);
            }
        };

        let stored_hash = user.password_hash.clone();
        let user_id = user.id.0;

        let result = self
            .run_blocking(move || authenticator.login(&password, &stored_hash, user_id))
            .await?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => UserError::from(err),
                AuthenticationError::TokenError(err) => {
                    UserError::Unknown(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AccessToken::bearer(result.access_token, result.expires_in))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
