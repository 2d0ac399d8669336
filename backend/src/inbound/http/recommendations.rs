//! Recommendation endpoints.
//!
//! Recommendations are read-only over HTTP; the matching engine is the only
//! writer.

use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::recommendation::Recommendation;
use crate::domain::user::UserId;

use super::error::ApiResult;
use super::state::HttpState;

/// Recommendation representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Recommendation> for RecommendationDto {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            id: recommendation.id,
            user_id: *recommendation.user_id.as_uuid(),
            title: recommendation.title,
            description: recommendation.description,
            created_at: recommendation.created_at,
        }
    }
}

/// Listing envelope carrying the recommendations and their count.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationListDto {
    pub data: Vec<RecommendationDto>,
    pub count: usize,
}

/// List a user's recommendations, newest first, with the total count.
#[utoipa::path(
    get,
    path = "/api/v1/recommendations/user/{user_id}",
    tags = ["recommendations"],
    params(("user_id" = Uuid, Path, description = "Owning user identifier")),
    responses(
        (status = 200, description = "The user's recommendations", body = RecommendationListDto)
    )
)]
#[get("/recommendations/user/{user_id}")]
pub async fn list_recommendations(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::from_uuid(path.into_inner());
    let recommendations = state.recommendations.list_by_user(&user_id).await?;
    let data: Vec<RecommendationDto> = recommendations
        .into_iter()
        .map(RecommendationDto::from)
        .collect();
    let count = data.len();
    Ok(HttpResponse::Ok().json(RecommendationListDto { data, count }))
}
