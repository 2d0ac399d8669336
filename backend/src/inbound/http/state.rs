//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain ports and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    RecommendationRepository, SkillCommand, SkillRepository, TrailRepository, UserRepository,
};

/// Port bundle for HTTP handlers.
///
/// Skill reads go straight to the repository; skill writes go through
/// [`SkillCommand`] so recommendation generation runs on every create and
/// update.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub skill_commands: Arc<dyn SkillCommand>,
    pub trails: Arc<dyn TrailRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
}
