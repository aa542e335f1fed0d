use crate::models::partner::{CreatePartnerRequest, Partner, UpdatePartnerRequest};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Partner>, AppError> {
        let partners = sqlx::query_as::<_, Partner>(
            "SELECT * FROM partners WHERE ($1::text IS NULL OR status = $1) ORDER BY name",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Partner>, AppError> {
        let partner = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(partner)
    }

    pub async fn create(&self, request: &CreatePartnerRequest) -> Result<Partner, AppError> {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            INSERT INTO partners (id, name, partner_type, contact_name, phone, email, address, status, created_at)
            VALUES ($1, $2, COALESCE($3, 'garage'), $4, $5, $6, $7, COALESCE($8, 'active'), $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.partner_type)
        .bind(&request.contact_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.address)
        .bind(&request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(partner)
    }

    pub async fn update(&self, id: Uuid, request: &UpdatePartnerRequest) -> Result<Option<Partner>, AppError> {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            UPDATE partners
            SET name = COALESCE($2, name),
                partner_type = COALESCE($3, partner_type),
                contact_name = COALESCE($4, contact_name),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                address = COALESCE($7, address),
                status = COALESCE($8, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.partner_type)
        .bind(&request.contact_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.address)
        .bind(&request.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(partner)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
