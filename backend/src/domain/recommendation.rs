//! Recommendation data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Learning content recommended to a user.
///
/// Recommendations are produced exclusively by the matching engine when a
/// skill is created or updated; they are never created or edited directly.
/// For a given user the title is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A recommendation planned by the matching engine, awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecommendation {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
