//! Modelo de Client
//!
//! Clientes facturables (particuliers, entreprises, conventions).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_catalog_status, validate_phone, validate_siret};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub client_type: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub siret: Option<String>,
    pub billing_rule_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 2, max = 50))]
    pub client_type: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(custom = "validate_siret")]
    pub siret: Option<String>,

    pub billing_rule_id: Option<Uuid>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub client_type: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(custom = "validate_siret")]
    pub siret: Option<String>,

    pub billing_rule_id: Option<Uuid>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}
