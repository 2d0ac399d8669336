//! HTTP adapter: handlers, DTOs, and route registration.

pub mod error;
pub mod health;
pub mod recommendations;
pub mod skills;
pub mod state;
pub mod trails;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::{ApiError, ApiResult};
pub use health::HealthState;
pub use state::HttpState;

/// Register every versioned API route.
///
/// Health probes are mounted separately so they stay outside the `/api/v1`
/// prefix.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(users::list_users)
            .service(users::search_users)
            .service(users::create_user)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user)
            .service(skills::list_skills)
            .service(skills::create_skill)
            .service(skills::get_skill)
            .service(skills::update_skill)
            .service(skills::delete_skill)
            .service(trails::list_trails)
            .service(trails::create_trail)
            .service(trails::get_trail)
            .service(trails::update_trail)
            .service(trails::delete_trail)
            .service(recommendations::list_recommendations),
    );
}

/// Register the liveness and readiness probes.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ready).service(health::live);
}
