// src/models/grant.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Avisos de subsídio (補助金・助成金) ---
// Não pertencem a um usuário: valem para toda a cooperativa.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: String,
    #[schema(example = "漁業経営安定化支援補助金")]
    pub title: String,
    pub description: String,
    pub eligibility_requirements: String,
    pub application_deadline: Option<DateTime<Utc>>,
    #[schema(value_type = Option<f64>, example = 500000)]
    pub grant_amount: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGrant {
    pub title: String,
    pub description: String,
    pub eligibility_requirements: String,
    pub application_deadline: Option<DateTime<Utc>>,
    pub grant_amount: Option<Decimal>,
    pub is_active: bool,
}
