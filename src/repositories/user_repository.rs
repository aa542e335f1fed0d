use crate::models::user::{User, UserRole};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_driver(&self, driver_id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE driver_id = $1")
            .bind(driver_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn admin_exists(&self) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE role = 'admin')")
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
        driver_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, role, driver_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email.trim().to_lowercase())
        .bind(password_hash)
        .bind(role.as_str())
        .bind(driver_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Crear o reinicializar la cuenta de un chauffeur
    pub async fn upsert_driver_account(
        &self,
        driver_id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        Self::upsert_driver_account_with(&self.pool, driver_id, email, password_hash).await
    }

    /// Igual que `upsert_driver_account` sobre cualquier executor (pool o transacción)
    pub async fn upsert_driver_account_with<'e, E>(
        executor: E,
        driver_id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, role, driver_id, created_at)
            VALUES ($1, $2, $3, 'driver', $4, $5)
            ON CONFLICT (driver_id) DO UPDATE
            SET email = EXCLUDED.email, password_hash = EXCLUDED.password_hash
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email.trim().to_lowercase())
        .bind(password_hash)
        .bind(driver_id)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
