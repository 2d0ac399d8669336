//! Skill mutation service.
//!
//! Wraps the skill repository and runs recommendation generation after every
//! successful create and update, so stored recommendations never lag behind
//! the skills they were derived from.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::ports::{
    RecommendationGenerator, SkillCommand, SkillRepository, SkillRepositoryError,
};
use crate::domain::skill::{Skill, SkillDraft};
use crate::domain::user::UserId;

/// Applies skill writes and triggers recommendation generation.
#[derive(Clone)]
pub struct SkillService<S, G> {
    skills: Arc<S>,
    generator: Arc<G>,
}

impl<S, G> SkillService<S, G> {
    /// Create a new service over the repository and generator.
    pub fn new(skills: Arc<S>, generator: Arc<G>) -> Self {
        Self { skills, generator }
    }
}

fn map_skill_error(error: SkillRepositoryError) -> Error {
    match error {
        SkillRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("skill repository unavailable: {message}"))
        }
        SkillRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("skill {name} is already declared for this user"))
        }
        SkillRepositoryError::OwnerMissing { user_id } => {
            Error::invalid_request(format!("user {user_id} does not exist"))
        }
        SkillRepositoryError::Query { message } => {
            Error::internal(format!("skill repository error: {message}"))
        }
    }
}

#[async_trait]
impl<S, G> SkillCommand for SkillService<S, G>
where
    S: SkillRepository,
    G: RecommendationGenerator,
{
    async fn create(&self, user_id: &UserId, draft: SkillDraft) -> Result<Skill, Error> {
        let skill = self
            .skills
            .insert(user_id, draft)
            .await
            .map_err(map_skill_error)?;
        self.generator.generate_for_skill(&skill).await?;
        Ok(skill)
    }

    async fn update(&self, id: Uuid, draft: SkillDraft) -> Result<Option<Skill>, Error> {
        let Some(skill) = self
            .skills
            .update(id, draft)
            .await
            .map_err(map_skill_error)?
        else {
            debug!(%id, "skill update targeted a missing row");
            return Ok(None);
        };
        // Regenerate even when the stored values did not change; the engine
        // writes nothing in that case.
        self.generator.generate_for_skill(&skill).await?;
        Ok(Some(skill))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Error> {
        self.skills.delete(id).await.map_err(map_skill_error)
    }
}
