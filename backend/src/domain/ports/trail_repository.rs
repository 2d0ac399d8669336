//! Port for trail rule persistence adapters.
//!
//! `list_by_skill_name` is the rule-store accessor used by recommendation
//! generation: it filters by the related skill name only; area and level
//! admission happens in the matching engine.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::trail::{Trail, TrailDraft};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by trail repository adapters.
    pub enum TrailRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "trail repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "trail repository query failed: {message}",
    }
}

/// Port for trail rule storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrailRepository: Send + Sync {
    /// Insert a new trail rule and return the stored record.
    async fn insert(&self, draft: TrailDraft) -> Result<Trail, TrailRepositoryError>;

    /// Fetch a trail by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Trail>, TrailRepositoryError>;

    /// Replace the fields of an existing trail.
    ///
    /// Returns `None` when no trail with that identifier exists.
    async fn update(
        &self,
        id: Uuid,
        draft: TrailDraft,
    ) -> Result<Option<Trail>, TrailRepositoryError>;

    /// Delete a trail. Returns `false` when no trail with that identifier
    /// exists.
    async fn delete(&self, id: Uuid) -> Result<bool, TrailRepositoryError>;

    /// List every trail, ordered by area then related skill.
    async fn list(&self) -> Result<Vec<Trail>, TrailRepositoryError>;

    /// Candidate trails for a skill: exact, case-sensitive match on the
    /// related skill name. Read-only.
    async fn list_by_skill_name(&self, name: &str) -> Result<Vec<Trail>, TrailRepositoryError>;
}
