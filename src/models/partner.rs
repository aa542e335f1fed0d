//! Modelo de Partner
//!
//! Garages, assureurs y demás proveedores de la flota.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_catalog_status, validate_phone};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub partner_type: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartnerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 2, max = 50))]
    pub partner_type: Option<String>,

    #[validate(length(max = 255))]
    pub contact_name: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub partner_type: Option<String>,

    #[validate(length(max = 255))]
    pub contact_name: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}
