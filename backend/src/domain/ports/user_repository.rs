//! Port for user persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{User, UserId, UserPage, UserProfile, UserSearch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds this email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Port for user storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored record.
    async fn insert(&self, profile: UserProfile) -> Result<User, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Replace the profile of an existing user.
    ///
    /// Returns `None` when no user with that identifier exists.
    async fn update(
        &self,
        id: &UserId,
        profile: UserProfile,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Delete a user, cascading to owned skills and recommendations.
    ///
    /// Returns `false` when no user with that identifier exists.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;

    /// List every user.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Filtered, ordered, paginated user listing with the total match count.
    async fn search(&self, query: UserSearch) -> Result<UserPage, UserRepositoryError>;
}
