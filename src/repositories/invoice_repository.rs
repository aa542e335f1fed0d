use crate::models::company::Company;
use crate::models::invoice::{GenerateInvoiceRequest, Invoice, InvoiceFilters};
use crate::models::rules::BillingRule;
use crate::models::trip::Trip;
use crate::services::invoicing::{build_invoice_draft, due_date, invoice_number_pattern, next_invoice_number};
use crate::utils::errors::{not_found_error, AppError};
use chrono::{Datelike, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filters: &InvoiceFilters) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE ($1::uuid IS NULL OR client_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY issue_date DESC, number DESC
            "#,
        )
        .bind(filters.client_id)
        .bind(&filters.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    /// Facturar todas las courses no facturadas de un cliente en el periodo.
    ///
    /// Todo ocurre en una transacción: la fila de la empresa queda bloqueada
    /// mientras se calcula el número, y las courses quedan enlazadas a la factura.
    pub async fn generate(&self, request: &GenerateInvoiceRequest) -> Result<(Invoice, Vec<Trip>), AppError> {
        let mut tx = self.pool.begin().await?;

        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE id = 1 FOR UPDATE")
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::Internal("Configuración de empresa ausente".to_string()))?;

        let billing_rule_id: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT billing_rule_id FROM clients WHERE id = $1")
                .bind(request.client_id)
                .fetch_optional(&mut *tx)
                .await?;
        let billing_rule_id = billing_rule_id.ok_or_else(|| not_found_error("Cliente", request.client_id))?;

        let rule = match billing_rule_id {
            Some(rule_id) => {
                sqlx::query_as::<_, BillingRule>("SELECT * FROM billing_rules WHERE id = $1")
                    .bind(rule_id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };

        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT t.* FROM trips t
            JOIN shifts s ON s.id = t.shift_id
            WHERE t.client_id = $1
              AND t.invoice_id IS NULL
              AND s.shift_date BETWEEN $2 AND $3
            ORDER BY s.shift_date, t.departure_time NULLS LAST, t.created_at
            FOR UPDATE OF t
            "#,
        )
        .bind(request.client_id)
        .bind(request.period_start)
        .bind(request.period_end)
        .fetch_all(&mut *tx)
        .await?;

        if trips.is_empty() {
            return Err(AppError::BadRequest(
                "No hay courses por facturar para este cliente en el periodo".to_string(),
            ));
        }

        let issue_date = request.issue_date.unwrap_or_else(|| Utc::now().date_naive());
        // por longitud primero: "-10000" va después de "-9999"
        let pattern = invoice_number_pattern(&company.invoice_prefix, issue_date.year());
        let last_number: Option<String> = sqlx::query_scalar(
            r#"
            SELECT number FROM invoices
            WHERE number LIKE $1 ESCAPE '\'
            ORDER BY length(number) DESC, number DESC
            LIMIT 1
            "#,
        )
        .bind(&pattern)
        .fetch_optional(&mut *tx)
        .await?;

        let number = next_invoice_number(&company.invoice_prefix, issue_date, last_number.as_deref());
        let draft = build_invoice_draft(&trips, rule.as_ref(), company.vat_rate);

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (
                id, number, client_id, issue_date, due_date, period_start, period_end,
                total_ht, vat_rate, total_vat, total_ttc, status, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'draft', $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&number)
        .bind(request.client_id)
        .bind(issue_date)
        .bind(due_date(issue_date, request.due_days))
        .bind(request.period_start)
        .bind(request.period_end)
        .bind(draft.totals.total_ht)
        .bind(draft.totals.vat_rate)
        .bind(draft.totals.total_vat)
        .bind(draft.totals.total_ttc)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let trip_ids: Vec<Uuid> = trips.iter().map(|t| t.id).collect();
        let linked = sqlx::query_as::<_, Trip>(
            "UPDATE trips SET invoice_id = $1 WHERE id = ANY($2) RETURNING *",
        )
        .bind(invoice.id)
        .bind(&trip_ids)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "🧾 Factura {} generada: {} courses, total TTC {}",
            invoice.number,
            linked.len(),
            invoice.total_ttc
        );

        Ok((invoice, linked))
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("UPDATE invoices SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    /// Las courses vuelven a quedar disponibles (FK ON DELETE SET NULL)
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
