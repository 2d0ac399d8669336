//! Port for skill persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::skill::{Skill, SkillDraft};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by skill repository adapters.
    pub enum SkillRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "skill repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "skill repository query failed: {message}",
        /// The user already declared a skill with this name.
        DuplicateName { name: String } => "skill {name} is already declared for this user",
        /// The owning user does not exist.
        OwnerMissing { user_id: String } => "no user with id {user_id} exists",
    }
}

/// Port for skill storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Insert a new skill for a user and return the stored record.
    async fn insert(
        &self,
        user_id: &UserId,
        draft: SkillDraft,
    ) -> Result<Skill, SkillRepositoryError>;

    /// Fetch a skill by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, SkillRepositoryError>;

    /// Replace the name and level of an existing skill.
    ///
    /// Returns `None` when no skill with that identifier exists.
    async fn update(
        &self,
        id: Uuid,
        draft: SkillDraft,
    ) -> Result<Option<Skill>, SkillRepositoryError>;

    /// Delete a skill. Returns `false` when no skill with that identifier
    /// exists.
    async fn delete(&self, id: Uuid) -> Result<bool, SkillRepositoryError>;

    /// List a user's skills ordered by name.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Skill>, SkillRepositoryError>;
}
