//! Users repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{ProfileUpdate, Role, StoredUser, UserRecord, UserUuid};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const CREATE_USER_IF_ABSENT_SQL: &str = include_str!("sql/create_user_if_absent.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const UPDATE_PASSWORD_SQL: &str = include_str!("sql/update_password.sql");
const UPDATE_PASSWORD_BY_USERNAME_SQL: &str = include_str!("sql/update_password_by_username.sql");

/// Columns needed to insert a user.
#[derive(Debug, Clone)]
pub(crate) struct NewUserRow<'a> {
    pub uuid: UserUuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub name: &'a str,
    pub email: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_user(&self, user: UserUuid) -> Result<StoredUser, sqlx::Error> {
        query_as::<Postgres, StoredUser>(FIND_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, sqlx::Error> {
        query_as::<Postgres, StoredUser>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a user unless the username is taken. Returns the row when inserted.
    pub(crate) async fn create_user_if_absent(
        &self,
        user: NewUserRow<'_>,
    ) -> Result<Option<StoredUser>, sqlx::Error> {
        query_as::<Postgres, StoredUser>(CREATE_USER_IF_ABSENT_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.username)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .bind(user.name)
            .bind(user.email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<StoredUser, sqlx::Error> {
        query_as::<Postgres, StoredUser>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.email.as_deref())
            .bind(update.phone.as_deref())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_password(
        &self,
        user: UserUuid,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PASSWORD_SQL)
            .bind(user.into_uuid())
            .bind(password_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_password_by_username(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PASSWORD_BY_USERNAME_SQL)
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for StoredUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let role = role.parse::<Role>().map_err(|error| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(error),
        })?;

        Ok(Self {
            user: UserRecord {
                uuid: row.try_get::<Uuid, _>("uuid")?.into(),
                username: row.try_get("username")?,
                role,
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                phone: row.try_get("phone")?,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            },
            password_hash: row.try_get("password_hash")?,
        })
    }
}
