use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `InvalidPassword` - Password is empty or too long
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHashing` - Hashing failed or timed out
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User without id; the store assigns one
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
