use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone, password_hash, role, \
                            access_token, refresh_token, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &PgRow) -> Result<User, UserError> {
    let role: String = row.try_get("role").map_err(db_error)?;

    Ok(User {
        id: UserId(row.try_get("id").map_err(db_error)?),
        first_name: PersonName::new(row.try_get("first_name").map_err(db_error)?)?,
        last_name: PersonName::new(row.try_get("last_name").map_err(db_error)?)?,
        email: EmailAddress::new(row.try_get("email").map_err(db_error)?)?,
        phone: PhoneNumber::new(row.try_get("phone").map_err(db_error)?)?,
        password_hash: row.try_get("password_hash").map_err(db_error)?,
        role: Role::from_str(&role)?,
        access_token: row.try_get("access_token").map_err(db_error)?,
        refresh_token: row.try_get("refresh_token").map_err(db_error)?,
        created_at: row.try_get("created_at").map_err(db_error)?,
        updated_at: row.try_get("updated_at").map_err(db_error)?,
    })
}

fn db_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

/// Translate unique-constraint violations into conflict errors. This is the
/// backstop for concurrent signups that pass the application-level checks.
fn map_unique_violation(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
            if db_err.constraint() == Some("users_phone_key") {
                return UserError::PhoneAlreadyExists(user.phone.as_str().to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, phone, password_hash, role,
                               access_token, refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.0)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.access_token)
        .bind(&user.refresh_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE phone = $1");
        let row = sqlx::query(&sql)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn update_tokens(
        &self,
        id: &UserId,
        access_token: &str,
        refresh_token: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET access_token = $2, refresh_token = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(access_token)
        .bind(refresh_token)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, UserError> {
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC OFFSET $1 LIMIT $2");
        let rows = sqlx::query(&sql)
            .bind(offset as i64)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter().map(map_row).collect()
    }

    async fn count(&self) -> Result<u64, UserError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        let count: i64 = row.try_get("count").map_err(db_error)?;
        Ok(count as u64)
    }
}
