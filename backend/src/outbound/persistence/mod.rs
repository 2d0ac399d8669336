//! PostgreSQL persistence adapters built on Diesel.

pub mod diesel_recommendation_repository;
pub mod diesel_skill_repository;
pub mod diesel_trail_repository;
pub mod diesel_user_repository;
pub(crate) mod models;
pub mod pool;
pub mod schema;

pub use diesel_recommendation_repository::DieselRecommendationRepository;
pub use diesel_skill_repository::DieselSkillRepository;
pub use diesel_trail_repository::DieselTrailRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
