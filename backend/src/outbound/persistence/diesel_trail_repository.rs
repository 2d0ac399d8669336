//! PostgreSQL-backed `TrailRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TrailRepository, TrailRepositoryError};
use crate::domain::skill::SkillLevel;
use crate::domain::trail::{Trail, TrailDraft};

use super::models::{NewTrailRow, TrailChangeset, TrailRow};
use super::pool::{DbPool, PoolError};
use super::schema::trails;

/// Diesel-backed implementation of the `TrailRepository` port.
#[derive(Clone)]
pub struct DieselTrailRepository {
    pool: DbPool,
}

impl DieselTrailRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TrailRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TrailRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> TrailRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "trail query failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TrailRepositoryError::connection("database connection error")
        }
        other => TrailRepositoryError::query(other.to_string()),
    }
}

fn row_to_trail(row: TrailRow) -> Result<Trail, TrailRepositoryError> {
    let minimum_level = SkillLevel::try_from(row.minimum_level).map_err(|err| {
        TrailRepositoryError::query(format!("stored minimum level invalid: {err}"))
    })?;
    Ok(Trail {
        id: row.id,
        area_of_interest: row.area_of_interest,
        related_skill: row.related_skill,
        minimum_level,
        title: row.title,
        description: row.description,
    })
}

#[async_trait]
impl TrailRepository for DieselTrailRepository {
    async fn insert(&self, draft: TrailDraft) -> Result<Trail, TrailRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTrailRow {
            id: Uuid::new_v4(),
            area_of_interest: draft.area_of_interest(),
            related_skill: draft.related_skill(),
            minimum_level: draft.minimum_level().as_i32(),
            title: draft.title(),
            description: draft.description(),
        };

        let row: TrailRow = diesel::insert_into(trails::table)
            .values(&new_row)
            .returning(TrailRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_trail(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Trail>, TrailRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TrailRow> = trails::table
            .find(id)
            .select(TrailRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_trail).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        draft: TrailDraft,
    ) -> Result<Option<Trail>, TrailRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = TrailChangeset {
            area_of_interest: draft.area_of_interest(),
            related_skill: draft.related_skill(),
            minimum_level: draft.minimum_level().as_i32(),
            title: draft.title(),
            description: draft.description(),
        };

        let row: Option<TrailRow> = diesel::update(trails::table.find(id))
            .set(&changes)
            .returning(TrailRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_trail).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, TrailRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(trails::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list(&self) -> Result<Vec<Trail>, TrailRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TrailRow> = trails::table
            .select(TrailRow::as_select())
            .order((trails::area_of_interest.asc(), trails::related_skill.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_trail).collect()
    }

    async fn list_by_skill_name(&self, name: &str) -> Result<Vec<Trail>, TrailRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Exact, case-sensitive equality; area and level admission happens
        // in the matching engine.
        let rows: Vec<TrailRow> = trails::table
            .filter(trails::related_skill.eq(name))
            .select(TrailRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_trail).collect()
    }
}
