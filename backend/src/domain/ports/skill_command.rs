//! Driving port for skill mutations.
//!
//! Skill writes go through this port rather than the repository directly so
//! that recommendation generation always runs after a create or update.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::skill::{Skill, SkillDraft};
use crate::domain::user::UserId;

/// Use-case port for creating, updating, and deleting skills.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillCommand: Send + Sync {
    /// Create a skill for a user and run recommendation generation.
    async fn create(&self, user_id: &UserId, draft: SkillDraft) -> Result<Skill, Error>;

    /// Update a skill's name and level, then re-run recommendation
    /// generation. Returns `None` when the skill does not exist.
    async fn update(&self, id: Uuid, draft: SkillDraft) -> Result<Option<Skill>, Error>;

    /// Delete a skill. Returns `false` when the skill does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, Error>;
}
