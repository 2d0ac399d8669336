//! User endpoints.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::user::{
    User, UserId, UserOrder, UserProfile, UserSearch, UserValidationError,
};

use super::error::{ApiError, ApiResult};
use super::recommendations::RecommendationDto;
use super::skills::SkillDto;
use super::state::HttpState;
use super::validation;

/// User representation returned by every user endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_of_interest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_objective: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.name,
            email: user.email,
            area_of_interest: user.area_of_interest,
            career_objective: user.career_objective,
            created_at: user.created_at,
        }
    }
}

/// User detail with owned skills and generated recommendations.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub skills: Vec<SkillDto>,
    pub recommendations: Vec<RecommendationDto>,
}

/// Request body for creating or replacing a user.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub name: String,
    pub email: String,
    pub area_of_interest: Option<String>,
    pub career_objective: Option<String>,
}

/// Query parameters accepted by the search endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchQuery {
    /// Substring filter on the user name.
    pub name: Option<String>,
    /// Substring filter on the area of interest.
    pub area_of_interest: Option<String>,
    /// 1-based page number, defaulting to 1.
    pub page_number: Option<u32>,
    /// Page size between 1 and 100, defaulting to 10.
    pub page_size: Option<u32>,
    /// One of `name`, `name_desc`, `created`, `created_desc`; anything else
    /// keeps the stable identifier ordering.
    pub order_by: Option<String>,
}

/// Page envelope for search results.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPageDto {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub items: Vec<UserDto>,
}

fn validation_field(error: &UserValidationError) -> &'static str {
    match error {
        UserValidationError::EmptyName | UserValidationError::NameTooLong { .. } => "name",
        UserValidationError::EmptyEmail
        | UserValidationError::EmailTooLong { .. }
        | UserValidationError::InvalidEmail => "email",
        UserValidationError::AreaOfInterestTooLong { .. } => "areaOfInterest",
        UserValidationError::CareerObjectiveTooLong { .. } => "careerObjective",
    }
}

fn profile_from_body(body: UserBody) -> Result<UserProfile, ApiError> {
    UserProfile::new(
        body.name,
        body.email,
        body.area_of_interest,
        body.career_objective,
    )
    .map_err(|err| ApiError::from(validation::field_error(validation_field(&err), err)))
}

fn page_envelope(
    current_page: u32,
    page_size: u32,
    total: u64,
    items: Vec<UserDto>,
) -> UserPageDto {
    let total_pages = u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);
    UserPageDto {
        current_page,
        page_size,
        total_count: total,
        total_pages,
        has_previous: current_page > 1,
        has_next: current_page < total_pages,
        items,
    }
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tags = ["users"],
    responses(
        (status = 200, description = "All users", body = [UserDto])
    )
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list().await?;
    let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// Filtered, ordered, paginated user search.
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    tags = ["users"],
    params(UserSearchQuery),
    responses(
        (status = 200, description = "One page of matching users", body = UserPageDto),
        (status = 400, description = "Invalid pagination parameters", body = ApiError)
    )
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    query: web::Query<UserSearchQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let page_number = validation::page_number(query.page_number).map_err(ApiError::from)?;
    let page_size = validation::page_size(query.page_size).map_err(ApiError::from)?;

    let search = UserSearch {
        name: query.name,
        area_of_interest: query.area_of_interest,
        page_number,
        page_size,
        order_by: UserOrder::parse(query.order_by.as_deref()),
    };

    let page = state.users.search(search).await?;
    let items: Vec<UserDto> = page.items.into_iter().map(UserDto::from).collect();
    Ok(HttpResponse::Ok().json(page_envelope(page_number, page_size, page.total, items)))
}

/// Fetch one user with skills and recommendations embedded.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tags = ["users"],
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserDetailDto),
        (status = 404, description = "No such user", body = ApiError)
    )
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = UserId::from_uuid(path.into_inner());

    let Some(user) = state.users.find_by_id(&id).await? else {
        return Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no user with id {id}"
        ))));
    };

    let skills = state.skills.list_by_user(&id).await?;
    let recommendations = state.recommendations.list_by_user(&id).await?;

    let detail = UserDetailDto {
        user: UserDto::from(user),
        skills: skills.into_iter().map(SkillDto::from).collect(),
        recommendations: recommendations
            .into_iter()
            .map(RecommendationDto::from)
            .collect(),
    };
    Ok(HttpResponse::Ok().json(detail))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tags = ["users"],
    request_body = UserBody,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Email already registered", body = ApiError)
    )
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Json<UserBody>,
) -> ApiResult<HttpResponse> {
    let profile = profile_from_body(body.into_inner())?;
    let user = state.users.insert(profile).await?;
    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

/// Replace a user's profile.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tags = ["users"],
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = UserBody,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "No such user", body = ApiError),
        (status = 409, description = "Email already registered", body = ApiError)
    )
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<UserBody>,
) -> ApiResult<HttpResponse> {
    let id = UserId::from_uuid(path.into_inner());
    let profile = profile_from_body(body.into_inner())?;

    match state.users.update(&id, profile).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserDto::from(user))),
        None => Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no user with id {id}"
        )))),
    }
}

/// Delete a user along with their skills and recommendations.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tags = ["users"],
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user", body = ApiError)
    )
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = UserId::from_uuid(path.into_inner());
    if state.users.delete(&id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::from(crate::domain::Error::not_found(format!(
            "no user with id {id}"
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn body(name: &str, email: &str) -> UserBody {
        UserBody {
            name: name.into(),
            email: email.into(),
            area_of_interest: None,
            career_objective: None,
        }
    }

    #[rstest]
    fn invalid_email_reports_the_email_field() {
        let err = profile_from_body(body("Ada", "not-an-email")).expect_err("invalid email");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert!(err.message().contains("email"));
    }

    #[rstest]
    fn blank_name_reports_the_name_field() {
        let err = profile_from_body(body("  ", "ada@example.com")).expect_err("blank name");
        assert!(err.message().contains("name"));
    }

    #[rstest]
    #[case(1, 10, 0, 0, false, false)]
    #[case(1, 10, 25, 3, false, true)]
    #[case(2, 10, 25, 3, true, true)]
    #[case(3, 10, 25, 3, true, false)]
    fn page_envelopes_report_navigation(
        #[case] current: u32,
        #[case] size: u32,
        #[case] total: u64,
        #[case] pages: u32,
        #[case] has_previous: bool,
        #[case] has_next: bool,
    ) {
        let page = page_envelope(current, size, total, Vec::new());
        assert_eq!(page.total_pages, pages);
        assert_eq!(page.has_previous, has_previous);
        assert_eq!(page.has_next, has_next);
    }
}
