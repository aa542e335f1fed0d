use crate::models::company::{Company, UpdateCompanyRequest};
use crate::utils::errors::AppError;
use sqlx::PgPool;

/// La fila de la empresa es única (id = 1) y la crea la migración inicial
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO company (id) VALUES (1)
            ON CONFLICT (id) DO UPDATE SET id = company.id
            RETURNING *
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    pub async fn update(&self, request: &UpdateCompanyRequest) -> Result<Company, AppError> {
        // Recrear la fila si alguien la borró a mano
        self.get().await?;

        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE company
            SET name = COALESCE($1, name),
                siret = COALESCE($2, siret),
                address = COALESCE($3, address),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                vat_rate = COALESCE($6, vat_rate),
                invoice_prefix = COALESCE($7, invoice_prefix),
                updated_at = NOW()
            WHERE id = 1
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.siret)
        .bind(&request.address)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(request.vat_rate)
        .bind(request.invoice_prefix.as_deref().map(|p| p.trim().to_uppercase()))
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }
}
