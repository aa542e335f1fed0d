use crate::models::client::{Client, CreateClientRequest, UpdateClientRequest};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY name
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn create(&self, request: &CreateClientRequest) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, client_type, email, phone, address, siret, billing_rule_id, status, created_at)
            VALUES ($1, $2, COALESCE($3, 'particulier'), $4, $5, $6, $7, $8, COALESCE($9, 'active'), $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.client_type)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.siret)
        .bind(request.billing_rule_id)
        .bind(&request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateClientRequest) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                client_type = COALESCE($3, client_type),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                siret = COALESCE($7, siret),
                billing_rule_id = COALESCE($8, billing_rule_id),
                status = COALESCE($9, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.client_type)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.siret)
        .bind(request.billing_rule_id)
        .bind(&request.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
