use crate::dto::ApiResponse;
use crate::models::invoice::{GenerateInvoiceRequest, Invoice, InvoiceFilters, UpdateInvoiceStatusRequest};
use crate::models::trip::Trip;
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::{not_found_error, AppError};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Factura con sus courses
#[derive(Debug, Serialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub trips: Vec<Trip>,
}

pub struct InvoiceController {
    repository: InvoiceRepository,
    trips: TripRepository,
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: InvoiceFilters) -> Result<ApiResponse<Vec<Invoice>>, AppError> {
        Ok(ApiResponse::success(self.repository.list(&filters).await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<InvoiceDetail>, AppError> {
        let invoice = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Factura", id))?;
        let trips = self.trips.list_by_invoice(id).await?;

        Ok(ApiResponse::success(InvoiceDetail { invoice, trips }))
    }

    pub async fn generate(&self, request: GenerateInvoiceRequest) -> Result<ApiResponse<InvoiceDetail>, AppError> {
        request.validate()?;

        let (invoice, trips) = self.repository.generate(&request).await?;
        let message = format!("Factura {} generada", invoice.number);

        Ok(ApiResponse::success_with_message(InvoiceDetail { invoice, trips }, message))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateInvoiceStatusRequest,
    ) -> Result<ApiResponse<Invoice>, AppError> {
        request.validate()?;

        let invoice = self
            .repository
            .update_status(id, &request.status)
            .await?
            .ok_or_else(|| not_found_error("Factura", id))?;

        info!("🧾 Factura {} → {}", invoice.number, invoice.status);
        Ok(ApiResponse::success(invoice))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Factura", id));
        }

        info!("🗑️ Factura {} eliminada, courses liberadas", id);
        Ok(ApiResponse::message("Factura eliminada"))
    }
}
