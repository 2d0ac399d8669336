//! Port for recommendation persistence adapters.
//!
//! Carries the two read contracts recommendation generation depends on (the
//! per-user listing and the exact-title existence check) plus the single
//! batch write the writer issues per evaluation.

use async_trait::async_trait;

use crate::domain::recommendation::{NewRecommendation, Recommendation};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recommendation repository adapters.
    pub enum RecommendationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "recommendation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recommendation repository query failed: {message}",
        /// The `(user, title)` uniqueness backstop rejected the batch.
        DuplicateTitle { title: String } => "recommendation {title} already exists for this user",
    }
}

/// Port for recommendation storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// List a user's recommendations, newest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Recommendation>, RecommendationRepositoryError>;

    /// Whether the user already has a recommendation with this exact title.
    ///
    /// The comparison is case-sensitive.
    async fn any_with_title(
        &self,
        user_id: &UserId,
        title: &str,
    ) -> Result<bool, RecommendationRepositoryError>;

    /// Persist a batch of planned recommendations in a single statement.
    ///
    /// The insert is all-or-nothing: either every record is committed or
    /// none are.
    async fn insert_batch(
        &self,
        records: &[NewRecommendation],
    ) -> Result<(), RecommendationRepositoryError>;
}
