//! PostgreSQL-backed `RecommendationRepository` implementation.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RecommendationRepository, RecommendationRepositoryError};
use crate::domain::recommendation::{NewRecommendation, Recommendation};
use crate::domain::user::UserId;

use super::models::{NewRecommendationRow, RecommendationRow};
use super::pool::{DbPool, PoolError};
use super::schema::recommendations;

/// Diesel-backed implementation of the `RecommendationRepository` port.
#[derive(Clone)]
pub struct DieselRecommendationRepository {
    pool: DbPool,
}

impl DieselRecommendationRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecommendationRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecommendationRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecommendationRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "recommendation query failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecommendationRepositoryError::connection("database connection error")
        }
        other => RecommendationRepositoryError::query(other.to_string()),
    }
}

fn row_to_recommendation(row: RecommendationRow) -> Recommendation {
    Recommendation {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        title: row.title,
        description: row.description,
        created_at: row.created_at,
    }
}

#[async_trait]
impl RecommendationRepository for DieselRecommendationRepository {
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Recommendation>, RecommendationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecommendationRow> = recommendations::table
            .filter(recommendations::user_id.eq(user_id.as_uuid()))
            .select(RecommendationRow::as_select())
            .order(recommendations::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_recommendation).collect())
    }

    async fn any_with_title(
        &self,
        user_id: &UserId,
        title: &str,
    ) -> Result<bool, RecommendationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            recommendations::table.filter(
                recommendations::user_id
                    .eq(user_id.as_uuid())
                    .and(recommendations::title.eq(title)),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert_batch(
        &self,
        records: &[NewRecommendation],
    ) -> Result<(), RecommendationRepositoryError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NewRecommendationRow<'_>> = records
            .iter()
            .map(|record| NewRecommendationRow {
                id: Uuid::new_v4(),
                user_id: *record.user_id.as_uuid(),
                title: &record.title,
                description: &record.description,
                created_at: record.created_at,
            })
            .collect();

        // Single multi-row insert; the statement either commits every row
        // or none.
        diesel::insert_into(recommendations::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                use diesel::result::{DatabaseErrorKind, Error as DieselError};
                if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &err {
                    RecommendationRepositoryError::duplicate_title(records[0].title.clone())
                } else {
                    map_diesel_error(err)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(
            err,
            RecommendationRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn generic_diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, RecommendationRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_preserves_fields() {
        let id = Uuid::new_v4();
        let user = Uuid::new_v4();
        let row = RecommendationRow {
            id,
            user_id: user,
            title: "Advanced SQL".into(),
            description: "Window functions".into(),
            created_at: chrono::Utc::now(),
        };
        let rec = row_to_recommendation(row);
        assert_eq!(rec.id, id);
        assert_eq!(rec.user_id, UserId::from_uuid(user));
        assert_eq!(rec.title, "Advanced SQL");
    }
}
