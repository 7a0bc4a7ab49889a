use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::account::errors::StoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::StoreStats;
use crate::domain::account::ports::AccountRepository;

/// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    learning_level: i32,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: AccountId(row.id),
            email: row.email,
            username: row.username,
            password_hash: row.password_hash,
            learning_level: row.learning_level,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::UniqueViolation(
                db_err.constraint().unwrap_or("unknown").to_string(),
            );
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (email, username, password_hash, learning_level, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, username, password_hash, learning_level, avatar_url, created_at, updated_at
            "#,
        )
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.learning_level)
        .bind(&account.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, learning_level, avatar_url, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Account::from))
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, learning_level, avatar_url, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Account::from))
    }

    async fn exists(&self, email: &str, username: &str) -> Result<bool, StoreError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM users WHERE email = $1 OR username = $2"#)
                .bind(email)
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    fn stats(&self) -> Option<StoreStats> {
        let open_connections = self.pool.size();
        let idle = u32::try_from(self.pool.num_idle()).unwrap_or(open_connections);

        Some(StoreStats {
            max_connections: self.pool.options().get_max_connections(),
            open_connections,
            in_use: open_connections.saturating_sub(idle),
            idle,
        })
    }
}
