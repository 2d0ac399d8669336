//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint and schema into one OpenAPI
//! document. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::recommendations::{RecommendationDto, RecommendationListDto};
use crate::inbound::http::skills::{SkillBody, SkillDto};
use crate::inbound::http::trails::{TrailBody, TrailDto};
use crate::inbound::http::users::{UserBody, UserDetailDto, UserDto, UserPageDto};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skills and recommendations API",
        description = "Tracks users, their self-declared skills, trail rules, \
                       and the recommendations generated from them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::skills::list_skills,
        crate::inbound::http::skills::create_skill,
        crate::inbound::http::skills::get_skill,
        crate::inbound::http::skills::update_skill,
        crate::inbound::http::skills::delete_skill,
        crate::inbound::http::trails::list_trails,
        crate::inbound::http::trails::create_trail,
        crate::inbound::http::trails::get_trail,
        crate::inbound::http::trails::update_trail,
        crate::inbound::http::trails::delete_trail,
        crate::inbound::http::recommendations::list_recommendations,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        UserDto,
        UserDetailDto,
        UserBody,
        UserPageDto,
        SkillDto,
        SkillBody,
        TrailDto,
        TrailBody,
        RecommendationDto,
        RecommendationListDto,
    )),
    tags(
        (name = "users", description = "User registration, profile, and search"),
        (name = "skills", description = "Self-declared skills per user"),
        (name = "trails", description = "Rules mapping skills to recommended content"),
        (name = "recommendations", description = "Generated recommendations, read-only"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
