//! Domain model and business rules.
//!
//! Everything in this module is transport and storage agnostic. Inbound
//! adapters call the services through the driving ports; outbound adapters
//! implement the repository ports.

pub mod error;
pub mod matching;
pub mod ports;
pub mod recommendation;
pub mod recommendation_service;
pub mod skill;
pub mod skill_service;
pub mod trail;
pub mod user;

pub use error::{Error, ErrorCode};
pub use recommendation::{NewRecommendation, Recommendation};
pub use recommendation_service::RecommendationService;
pub use skill::{Skill, SkillDraft, SkillLevel};
pub use skill_service::SkillService;
pub use trail::{Trail, TrailDraft};
pub use user::{User, UserId, UserOrder, UserProfile, UserSearch};
