//! Trail rule endpoints.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::skill::SkillLevel;
use crate::domain::trail::{Trail, TrailDraft, TrailValidationError};

use super::error::{ApiError, ApiResult};
use super::state::HttpState;
use super::validation;

/// Trail rule representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrailDto {
    pub id: Uuid,
    pub area_of_interest: String,
    pub related_skill: String,
    #[schema(minimum = 1, maximum = 5)]
    pub minimum_level: u8,
    pub title: String,
    pub description: String,
}

impl From<Trail> for TrailDto {
    fn from(trail: Trail) -> Self {
        Self {
            id: trail.id,
            area_of_interest: trail.area_of_interest,
            related_skill: trail.related_skill,
            minimum_level: trail.minimum_level.get(),
            title: trail.title,
            description: trail.description,
        }
    }
}

/// Request body for creating or replacing a trail rule.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrailBody {
    pub area_of_interest: String,
    pub related_skill: String,
    #[schema(minimum = 1, maximum = 5)]
    pub minimum_level: i32,
    pub title: String,
    pub description: String,
}

fn validation_field(error: &TrailValidationError) -> &'static str {
    match error {
        TrailValidationError::EmptyAreaOfInterest
        | TrailValidationError::AreaOfInterestTooLong { .. } => "areaOfInterest",
        TrailValidationError::EmptyRelatedSkill
        | TrailValidationError::RelatedSkillTooLong { .. } => "relatedSkill",
        TrailValidationError::EmptyTitle | TrailValidationError::TitleTooLong { .. } => "title",
        TrailValidationError::EmptyDescription
        | TrailValidationError::DescriptionTooLong { .. } => "description",
    }
}

fn draft_from_body(body: TrailBody) -> Result<TrailDraft, ApiError> {
    let minimum_level = SkillLevel::try_from(body.minimum_level)
        .map_err(|err| ApiError::from(validation::field_error("minimumLevel", err)))?;
    TrailDraft::new(
        body.area_of_interest,
        body.related_skill,
        minimum_level,
        body.title,
        body.description,
    )
    .map_err(|err| ApiError::from(validation::field_error(validation_field(&err), err)))
}

/// List every trail rule.
#[utoipa::path(
    get,
    path = "/api/v1/trails",
    tags = ["trails"],
    responses(
        (status = 200, description = "All trail rules", body = [TrailDto])
    )
)]
#[get("/trails")]
pub async fn list_trails(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let trails = state.trails.list().await?;
    let dtos: Vec<TrailDto> = trails.into_iter().map(TrailDto::from).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// Register a new trail rule.
#[utoipa::path(
    post,
    path = "/api/v1/trails",
    tags = ["trails"],
    request_body = TrailBody,
    responses(
        (status = 201, description = "Trail created", body = TrailDto),
        (status = 400, description = "Validation failed", body = ApiError)
    )
)]
#[post("/trails")]
pub async fn create_trail(
    state: web::Data<HttpState>,
    body: web::Json<TrailBody>,
) -> ApiResult<HttpResponse> {
    let draft = draft_from_body(body.into_inner())?;
    let trail = state.trails.insert(draft).await?;
    Ok(HttpResponse::Created().json(TrailDto::from(trail)))
}

/// Fetch a trail rule by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/trails/{id}",
    tags = ["trails"],
    params(("id" = Uuid, Path, description = "Trail identifier")),
    responses(
        (status = 200, description = "The trail", body = TrailDto),
        (status = 404, description = "No such trail", body = ApiError)
    )
)]
#[get("/trails/{id}")]
pub async fn get_trail(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    match state.trails.find_by_id(id).await? {
        Some(trail) => Ok(HttpResponse::Ok().json(TrailDto::from(trail))),
        None => Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no trail with id {id}"
        )))),
    }
}

/// Replace a trail rule. Already-generated recommendations are untouched.
#[utoipa::path(
    put,
    path = "/api/v1/trails/{id}",
    tags = ["trails"],
    params(("id" = Uuid, Path, description = "Trail identifier")),
    request_body = TrailBody,
    responses(
        (status = 200, description = "Trail updated", body = TrailDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "No such trail", body = ApiError)
    )
)]
#[put("/trails/{id}")]
pub async fn update_trail(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<TrailBody>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let draft = draft_from_body(body.into_inner())?;
    match state.trails.update(id, draft).await? {
        Some(trail) => Ok(HttpResponse::Ok().json(TrailDto::from(trail))),
        None => Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no trail with id {id}"
        )))),
    }
}

/// Delete a trail rule.
#[utoipa::path(
    delete,
    path = "/api/v1/trails/{id}",
    tags = ["trails"],
    params(("id" = Uuid, Path, description = "Trail identifier")),
    responses(
        (status = 204, description = "Trail deleted"),
        (status = 404, description = "No such trail", body = ApiError)
    )
)]
#[delete("/trails/{id}")]
pub async fn delete_trail(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if state.trails.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no trail with id {id}"
        ))))
    }
}
