//! Skill endpoints.
//!
//! Creates and updates go through the skill command port so recommendation
//! generation runs inside the same request.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::skill::{Skill, SkillDraft, SkillLevel};
use crate::domain::user::UserId;

use super::error::{ApiError, ApiResult};
use super::state::HttpState;
use super::validation;

/// Skill representation returned by skill and user endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[schema(minimum = 1, maximum = 5)]
    pub level: u8,
}

impl From<Skill> for SkillDto {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            user_id: *skill.user_id.as_uuid(),
            name: skill.name,
            level: skill.level.get(),
        }
    }
}

/// Request body for declaring or updating a skill.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillBody {
    pub name: String,
    #[schema(minimum = 1, maximum = 5)]
    pub level: i32,
}

fn draft_from_body(body: SkillBody) -> Result<SkillDraft, ApiError> {
    let level = SkillLevel::try_from(body.level)
        .map_err(|err| ApiError::from(validation::field_error("level", err)))?;
    SkillDraft::new(body.name, level)
        .map_err(|err| ApiError::from(validation::field_error("name", err)))
}

/// List a user's skills ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/skills/user/{user_id}",
    tags = ["skills"],
    params(("user_id" = Uuid, Path, description = "Owning user identifier")),
    responses(
        (status = 200, description = "The user's skills", body = [SkillDto])
    )
)]
#[get("/skills/user/{user_id}")]
pub async fn list_skills(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::from_uuid(path.into_inner());
    let skills = state.skills.list_by_user(&user_id).await?;
    let dtos: Vec<SkillDto> = skills.into_iter().map(SkillDto::from).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// Declare a skill for a user and generate recommendations.
#[utoipa::path(
    post,
    path = "/api/v1/skills/user/{user_id}",
    tags = ["skills"],
    params(("user_id" = Uuid, Path, description = "Owning user identifier")),
    request_body = SkillBody,
    responses(
        (status = 201, description = "Skill created", body = SkillDto),
        (status = 400, description = "Validation failed or user missing", body = ApiError),
        (status = 409, description = "Skill already declared", body = ApiError)
    )
)]
#[post("/skills/user/{user_id}")]
pub async fn create_skill(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<SkillBody>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::from_uuid(path.into_inner());
    let draft = draft_from_body(body.into_inner())?;
    let skill = state.skill_commands.create(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(SkillDto::from(skill)))
}

/// Fetch a skill by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/skills/{id}",
    tags = ["skills"],
    params(("id" = Uuid, Path, description = "Skill identifier")),
    responses(
        (status = 200, description = "The skill", body = SkillDto),
        (status = 404, description = "No such skill", body = ApiError)
    )
)]
#[get("/skills/{id}")]
pub async fn get_skill(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    match state.skills.find_by_id(id).await? {
        Some(skill) => Ok(HttpResponse::Ok().json(SkillDto::from(skill))),
        None => Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no skill with id {id}"
        )))),
    }
}

/// Update a skill and regenerate recommendations.
#[utoipa::path(
    put,
    path = "/api/v1/skills/{id}",
    tags = ["skills"],
    params(("id" = Uuid, Path, description = "Skill identifier")),
    request_body = SkillBody,
    responses(
        (status = 200, description = "Skill updated", body = SkillDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "No such skill", body = ApiError),
        (status = 409, description = "Skill already declared", body = ApiError)
    )
)]
#[put("/skills/{id}")]
pub async fn update_skill(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<SkillBody>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let draft = draft_from_body(body.into_inner())?;
    match state.skill_commands.update(id, draft).await? {
        Some(skill) => Ok(HttpResponse::Ok().json(SkillDto::from(skill))),
        None => Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no skill with id {id}"
        )))),
    }
}

/// Delete a skill. Existing recommendations stay in place.
#[utoipa::path(
    delete,
    path = "/api/v1/skills/{id}",
    tags = ["skills"],
    params(("id" = Uuid, Path, description = "Skill identifier")),
    responses(
        (status = 204, description = "Skill deleted"),
        (status = 404, description = "No such skill", body = ApiError)
    )
)]
#[delete("/skills/{id}")]
pub async fn delete_skill(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if state.skill_commands.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no skill with id {id}"
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    fn out_of_range_levels_are_rejected(#[case] level: i32) {
        let body = SkillBody {
            name: "SQL".into(),
            level,
        };
        let err = draft_from_body(body).expect_err("invalid level");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn valid_bodies_produce_drafts() {
        let body = SkillBody {
            name: "SQL".into(),
            level: 3,
        };
        let draft = draft_from_body(body).expect("valid draft");
        assert_eq!(draft.name(), "SQL");
        assert_eq!(draft.level().get(), 3);
    }

    #[rstest]
    fn blank_names_are_rejected() {
        let body = SkillBody {
            name: "   ".into(),
            level: 3,
        };
        assert!(draft_from_body(body).is_err());
    }
}
