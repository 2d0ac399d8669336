//! PostgreSQL-backed `UserRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{User, UserId, UserOrder, UserPage, UserProfile, UserSearch};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "user query failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        other => UserRepositoryError::query(other.to_string()),
    }
}

/// Map write errors, turning the unique email constraint into its own
/// variant.
fn map_write_error(error: diesel::result::Error, email: &str) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        return UserRepositoryError::duplicate_email(email);
    }
    map_diesel_error(error)
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        area_of_interest: row.area_of_interest,
        career_objective: row.career_objective,
        created_at: row.created_at,
    }
}

fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, profile: UserProfile) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            name: profile.name(),
            email: profile.email(),
            area_of_interest: profile.area_of_interest(),
            career_objective: profile.career_objective(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, profile.email()))?;

        Ok(row_to_user(row))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_user))
    }

    async fn update(
        &self,
        id: &UserId,
        profile: UserProfile,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserChangeset {
            name: profile.name(),
            email: profile.email(),
            area_of_interest: profile.area_of_interest(),
            career_objective: profile.career_objective(),
        };

        let row: Option<UserRow> = diesel::update(users::table.find(id.as_uuid()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, profile.email()))?;

        Ok(row.map(row_to_user))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Owned skills and recommendations go with the row via ON DELETE
        // CASCADE.
        let deleted = diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn search(&self, query: UserSearch) -> Result<UserPage, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let name_pattern = query
            .name
            .as_deref()
            .map(|name| format!("%{}%", escape_like(name)));
        let area_pattern = query
            .area_of_interest
            .as_deref()
            .map(|area| format!("%{}%", escape_like(area)));

        let mut count_statement = users::table.count().into_boxed();
        if let Some(pattern) = &name_pattern {
            count_statement = count_statement.filter(users::name.like(pattern.clone()));
        }
        if let Some(pattern) = &area_pattern {
            count_statement = count_statement.filter(users::area_of_interest.like(pattern.clone()));
        }
        let total: i64 = count_statement
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut statement = users::table.select(UserRow::as_select()).into_boxed();
        if let Some(pattern) = &name_pattern {
            statement = statement.filter(users::name.like(pattern.clone()));
        }
        if let Some(pattern) = &area_pattern {
            statement = statement.filter(users::area_of_interest.like(pattern.clone()));
        }

        statement = match query.order_by {
            UserOrder::Id => statement.order(users::id.asc()),
            UserOrder::Name => statement.order(users::name.asc()),
            UserOrder::NameDesc => statement.order(users::name.desc()),
            UserOrder::Created => statement.order(users::created_at.asc()),
            UserOrder::CreatedDesc => statement.order(users::created_at.desc()),
        };

        let offset = i64::from(query.page_number.saturating_sub(1)) * i64::from(query.page_size);
        let rows: Vec<UserRow> = statement
            .offset(offset)
            .limit(i64::from(query.page_size))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(UserPage {
            items: rows.into_iter().map(row_to_user).collect(),
            total: u64::try_from(total).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, UserRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn generic_diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn unique_violations_map_to_duplicate_email() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        );
        let err = map_write_error(diesel_err, "ada@example.com");
        assert_eq!(
            err,
            UserRepositoryError::duplicate_email("ada@example.com")
        );
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("50%", "50\\%")]
    #[case("a_b", "a\\_b")]
    fn like_fragments_are_escaped(#[case] raw: &str, #[case] escaped: &str) {
        assert_eq!(escape_like(raw), escaped);
    }

    #[rstest]
    fn row_conversion_preserves_fields() {
        let id = Uuid::new_v4();
        let row = UserRow {
            id,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            area_of_interest: Some("Data".into()),
            career_objective: None,
            created_at: chrono::Utc::now(),
        };
        let user = row_to_user(row);
        assert_eq!(user.id, UserId::from_uuid(id));
        assert_eq!(user.area_of_interest.as_deref(), Some("Data"));
    }
}
