//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod recommendation_generator;
mod recommendation_repository;
mod skill_command;
mod skill_repository;
mod trail_repository;
mod user_repository;

#[cfg(test)]
pub use recommendation_generator::MockRecommendationGenerator;
pub use recommendation_generator::RecommendationGenerator;
#[cfg(test)]
pub use recommendation_repository::MockRecommendationRepository;
pub use recommendation_repository::{RecommendationRepository, RecommendationRepositoryError};
#[cfg(test)]
pub use skill_command::MockSkillCommand;
pub use skill_command::SkillCommand;
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
pub use skill_repository::{SkillRepository, SkillRepositoryError};
#[cfg(test)]
pub use trail_repository::MockTrailRepository;
pub use trail_repository::{TrailRepository, TrailRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
