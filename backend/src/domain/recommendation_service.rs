//! Recommendation generation service.
//!
//! Orchestrates the rule store, the matching engine, and the duplicate check
//! into one write path: load the owning user, fetch candidate trails, decide
//! the new recommendations, and commit them in a single batch. All decision
//! logic lives in [`crate::domain::matching`]; this service only performs the
//! surrounding I/O.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::domain::error::Error;
use crate::domain::matching;
use crate::domain::ports::{
    RecommendationGenerator, RecommendationRepository, RecommendationRepositoryError,
    TrailRepository, TrailRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::skill::Skill;

/// Generates and persists recommendations when a skill changes.
#[derive(Clone)]
pub struct RecommendationService<U, T, R> {
    users: Arc<U>,
    trails: Arc<T>,
    recommendations: Arc<R>,
}

impl<U, T, R> RecommendationService<U, T, R> {
    /// Create a new service over the given repositories.
    pub fn new(users: Arc<U>, trails: Arc<T>, recommendations: Arc<R>) -> Self {
        Self {
            users,
            trails,
            recommendations,
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_trail_error(error: TrailRepositoryError) -> Error {
    match error {
        TrailRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("trail repository unavailable: {message}"))
        }
        TrailRepositoryError::Query { message } => {
            Error::internal(format!("trail repository error: {message}"))
        }
    }
}

fn map_recommendation_error(error: RecommendationRepositoryError) -> Error {
    match error {
        RecommendationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recommendation repository unavailable: {message}"))
        }
        RecommendationRepositoryError::DuplicateTitle { title } => {
            // Concurrent generation hit the (user, title) uniqueness backstop.
            Error::conflict(format!("recommendation {title} was created concurrently"))
        }
        RecommendationRepositoryError::Query { message } => {
            Error::internal(format!("recommendation repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U, T, R> RecommendationGenerator for RecommendationService<U, T, R>
where
    U: UserRepository,
    T: TrailRepository,
    R: RecommendationRepository,
{
    async fn generate_for_skill(&self, skill: &Skill) -> Result<(), Error> {
        let Some(user) = self
            .users
            .find_by_id(&skill.user_id)
            .await
            .map_err(map_user_error)?
        else {
            debug!(user_id = %skill.user_id, "skipping generation: owning user not found");
            return Ok(());
        };

        let candidates = self
            .trails
            .list_by_skill_name(&skill.name)
            .await
            .map_err(map_trail_error)?;

        let area = user.effective_area_of_interest();
        let admitted = matching::admitted_trails(&candidates, skill, area);

        let mut existing_titles = HashSet::new();
        for trail in &admitted {
            let exists = self
                .recommendations
                .any_with_title(&user.id, &trail.title)
                .await
                .map_err(map_recommendation_error)?;
            if exists {
                existing_titles.insert(trail.title.clone());
            }
        }

        let planned =
            matching::plan_recommendations(&candidates, skill, area, &existing_titles, Utc::now());

        if planned.is_empty() {
            debug!(
                user_id = %user.id,
                skill = %skill.name,
                candidates = candidates.len(),
                "no new recommendations to write"
            );
            return Ok(());
        }

        self.recommendations
            .insert_batch(&planned)
            .await
            .map_err(map_recommendation_error)?;

        info!(
            user_id = %user.id,
            skill = %skill.name,
            written = planned.len(),
            "recommendations generated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{
        MockRecommendationRepository, MockTrailRepository, MockUserRepository,
    };
    use crate::domain::skill::SkillLevel;
    use crate::domain::trail::Trail;
    use crate::domain::user::{User, UserId};
    use uuid::Uuid;

    fn level(value: u8) -> SkillLevel {
        SkillLevel::new(value).expect("valid level")
    }

    fn user(id: UserId, area: Option<&str>) -> User {
        User {
            id,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            area_of_interest: area.map(str::to_owned),
            career_objective: None,
            created_at: Utc::now(),
        }
    }

    fn skill(user_id: UserId, name: &str, value: u8) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            level: level(value),
        }
    }

    fn trail(area: &str, related_skill: &str, minimum: u8, title: &str) -> Trail {
        Trail {
            id: Uuid::new_v4(),
            area_of_interest: area.into(),
            related_skill: related_skill.into(),
            minimum_level: level(minimum),
            title: title.into(),
            description: format!("{title} content"),
        }
    }

    fn service(
        users: MockUserRepository,
        trails: MockTrailRepository,
        recommendations: MockRecommendationRepository,
    ) -> RecommendationService<MockUserRepository, MockTrailRepository, MockRecommendationRepository>
    {
        RecommendationService::new(Arc::new(users), Arc::new(trails), Arc::new(recommendations))
    }

    #[tokio::test]
    async fn missing_user_is_a_silent_no_op() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let mut trails = MockTrailRepository::new();
        trails.expect_list_by_skill_name().times(0);

        let mut recommendations = MockRecommendationRepository::new();
        recommendations.expect_any_with_title().times(0);
        recommendations.expect_insert_batch().times(0);

        let svc = service(users, trails, recommendations);
        svc.generate_for_skill(&skill(UserId::random(), "SQL", 3))
            .await
            .expect("missing user is not an error");
    }

    #[tokio::test]
    async fn matching_trail_produces_one_recommendation() {
        let user_id = UserId::random();
        let owner = user(user_id, Some("Data"));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(owner)));

        let mut trails = MockTrailRepository::new();
        trails
            .expect_list_by_skill_name()
            .withf(|name| name == "SQL")
            .times(1)
            .return_once(|_| Ok(vec![trail("Data", "SQL", 2, "Advanced SQL")]));

        let mut recommendations = MockRecommendationRepository::new();
        recommendations
            .expect_any_with_title()
            .withf(move |uid, title| *uid == user_id && title == "Advanced SQL")
            .times(1)
            .return_once(|_, _| Ok(false));
        recommendations
            .expect_insert_batch()
            .withf(move |records| {
                records.len() == 1
                    && records[0].user_id == user_id
                    && records[0].title == "Advanced SQL"
                    && records[0].description == "Advanced SQL content"
            })
            .times(1)
            .return_once(|_| Ok(()));

        let svc = service(users, trails, recommendations);
        svc.generate_for_skill(&skill(user_id, "SQL", 3))
            .await
            .expect("generation succeeds");
    }

    #[tokio::test]
    async fn existing_title_suppresses_the_write() {
        let user_id = UserId::random();
        let owner = user(user_id, Some("Data"));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(owner)));

        let mut trails = MockTrailRepository::new();
        trails
            .expect_list_by_skill_name()
            .times(1)
            .return_once(|_| Ok(vec![trail("Data", "SQL", 2, "Advanced SQL")]));

        let mut recommendations = MockRecommendationRepository::new();
        recommendations
            .expect_any_with_title()
            .times(1)
            .return_once(|_, _| Ok(true));
        // Nothing new to write, so no batch insert is attempted.
        recommendations.expect_insert_batch().times(0);

        let svc = service(users, trails, recommendations);
        svc.generate_for_skill(&skill(user_id, "SQL", 3))
            .await
            .expect("duplicate is suppressed silently");
    }

    #[tokio::test]
    async fn two_trails_sharing_a_title_yield_one_record() {
        let user_id = UserId::random();
        let owner = user(user_id, None);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(owner)));

        let mut trails = MockTrailRepository::new();
        trails.expect_list_by_skill_name().times(1).return_once(|_| {
            Ok(vec![
                trail("Data", "SQL", 1, "Advanced SQL"),
                trail("Backend", "SQL", 2, "Advanced SQL"),
            ])
        });

        let mut recommendations = MockRecommendationRepository::new();
        // The batch is deduplicated before the checker runs, so the shared
        // title is probed exactly once.
        recommendations
            .expect_any_with_title()
            .times(1)
            .return_once(|_, _| Ok(false));
        recommendations
            .expect_insert_batch()
            .withf(|records| records.len() == 1 && records[0].title == "Advanced SQL")
            .times(1)
            .return_once(|_| Ok(()));

        let svc = service(users, trails, recommendations);
        svc.generate_for_skill(&skill(user_id, "SQL", 5))
            .await
            .expect("generation succeeds");
    }

    #[tokio::test]
    async fn user_area_filters_out_other_areas() {
        let user_id = UserId::random();
        let owner = user(user_id, Some("Data"));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(owner)));

        let mut trails = MockTrailRepository::new();
        trails.expect_list_by_skill_name().times(1).return_once(|_| {
            Ok(vec![
                trail("Mobile", "SQL", 1, "SQLite on device"),
                trail("Data", "SQL", 1, "Advanced SQL"),
            ])
        });

        let mut recommendations = MockRecommendationRepository::new();
        recommendations
            .expect_any_with_title()
            .withf(|_, title| title == "Advanced SQL")
            .times(1)
            .return_once(|_, _| Ok(false));
        recommendations
            .expect_insert_batch()
            .withf(|records| records.len() == 1 && records[0].title == "Advanced SQL")
            .times(1)
            .return_once(|_| Ok(()));

        let svc = service(users, trails, recommendations);
        svc.generate_for_skill(&skill(user_id, "SQL", 3))
            .await
            .expect("generation succeeds");
    }

    #[tokio::test]
    async fn storage_failure_during_commit_propagates() {
        let user_id = UserId::random();
        let owner = user(user_id, None);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(owner)));

        let mut trails = MockTrailRepository::new();
        trails
            .expect_list_by_skill_name()
            .times(1)
            .return_once(|_| Ok(vec![trail("Data", "SQL", 1, "Advanced SQL")]));

        let mut recommendations = MockRecommendationRepository::new();
        recommendations
            .expect_any_with_title()
            .times(1)
            .return_once(|_, _| Ok(false));
        recommendations
            .expect_insert_batch()
            .times(1)
            .return_once(|_| Err(RecommendationRepositoryError::connection("db down")));

        let svc = service(users, trails, recommendations);
        let err = svc
            .generate_for_skill(&skill(user_id, "SQL", 3))
            .await
            .expect_err("commit failure propagates");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn candidate_lookup_failure_propagates() {
        let user_id = UserId::random();
        let owner = user(user_id, None);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(owner)));

        let mut trails = MockTrailRepository::new();
        trails
            .expect_list_by_skill_name()
            .times(1)
            .return_once(|_| Err(TrailRepositoryError::query("bad query")));

        let mut recommendations = MockRecommendationRepository::new();
        recommendations.expect_insert_batch().times(0);

        let svc = service(users, trails, recommendations);
        let err = svc
            .generate_for_skill(&skill(user_id, "SQL", 3))
            .await
            .expect_err("lookup failure propagates");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
