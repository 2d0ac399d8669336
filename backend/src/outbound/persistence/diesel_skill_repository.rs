//! PostgreSQL-backed `SkillRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{SkillRepository, SkillRepositoryError};
use crate::domain::skill::{Skill, SkillDraft, SkillLevel};
use crate::domain::user::UserId;

use super::models::{NewSkillRow, SkillChangeset, SkillRow};
use super::pool::{DbPool, PoolError};
use super::schema::skills;

/// Diesel-backed implementation of the `SkillRepository` port.
#[derive(Clone)]
pub struct DieselSkillRepository {
    pool: DbPool,
}

impl DieselSkillRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SkillRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SkillRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SkillRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "skill query failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SkillRepositoryError::connection("database connection error")
        }
        other => SkillRepositoryError::query(other.to_string()),
    }
}

/// Map write errors, distinguishing the per-user name constraint from the
/// user foreign key.
fn map_write_error(
    error: diesel::result::Error,
    user_id: &UserId,
    name: &str,
) -> SkillRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            SkillRepositoryError::duplicate_name(name)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            SkillRepositoryError::owner_missing(user_id.to_string())
        }
        _ => map_diesel_error(error),
    }
}

fn row_to_skill(row: SkillRow) -> Result<Skill, SkillRepositoryError> {
    let level = SkillLevel::try_from(row.level)
        .map_err(|err| SkillRepositoryError::query(format!("stored level invalid: {err}")))?;
    Ok(Skill {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        name: row.name,
        level,
    })
}

#[async_trait]
impl SkillRepository for DieselSkillRepository {
    async fn insert(
        &self,
        user_id: &UserId,
        draft: SkillDraft,
    ) -> Result<Skill, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewSkillRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            name: draft.name(),
            level: draft.level().as_i32(),
        };

        let row: SkillRow = diesel::insert_into(skills::table)
            .values(&new_row)
            .returning(SkillRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user_id, draft.name()))?;

        row_to_skill(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SkillRow> = skills::table
            .find(id)
            .select(SkillRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_skill).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        draft: SkillDraft,
    ) -> Result<Option<Skill>, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = SkillChangeset {
            name: draft.name(),
            level: draft.level().as_i32(),
        };

        let result: Result<Option<SkillRow>, _> = diesel::update(skills::table.find(id))
            .set(&changes)
            .returning(SkillRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional();

        let row = result.map_err(|err| {
            use diesel::result::{DatabaseErrorKind, Error as DieselError};
            if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &err {
                SkillRepositoryError::duplicate_name(draft.name())
            } else {
                map_diesel_error(err)
            }
        })?;

        row.map(row_to_skill).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(skills::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Skill>, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SkillRow> = skills::table
            .filter(skills::user_id.eq(user_id.as_uuid()))
            .select(SkillRow::as_select())
            .order(skills::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_skill).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violations_map_to_duplicate_name() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        );
        let err = map_write_error(diesel_err, &UserId::random(), "SQL");
        assert_eq!(err, SkillRepositoryError::duplicate_name("SQL"));
    }

    #[rstest]
    fn foreign_key_violations_map_to_owner_missing() {
        let user_id = UserId::random();
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            Box::new("violates foreign key".to_owned()),
        );
        let err = map_write_error(diesel_err, &user_id, "SQL");
        assert_eq!(
            err,
            SkillRepositoryError::owner_missing(user_id.to_string())
        );
    }

    #[rstest]
    fn in_range_levels_convert() {
        let row = SkillRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "SQL".into(),
            level: 3,
        };
        let skill = row_to_skill(row).expect("valid row");
        assert_eq!(skill.level.get(), 3);
    }

    #[rstest]
    fn out_of_range_levels_surface_as_query_errors() {
        let row = SkillRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "SQL".into(),
            level: 9,
        };
        let err = row_to_skill(row).expect_err("invalid level");
        assert!(matches!(err, SkillRepositoryError::Query { .. }));
    }
}
