//! Driving port for recommendation generation.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::skill::Skill;

/// Generates recommendations for the owner of a skill.
///
/// Invoked synchronously after every skill create and every skill update,
/// whether or not the level or name actually changed; re-running against
/// unchanged state writes nothing, so repeated invocations are idempotent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Evaluate trail rules for the skill and persist any new
    /// recommendations.
    ///
    /// A missing owning user is a silent no-op. Storage failures propagate
    /// untouched.
    async fn generate_for_skill(&self, skill: &Skill) -> Result<(), Error>;
}
