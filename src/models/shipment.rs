// src/models/shipment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_FISH_SPECIES: &str = "その他";
pub const DEFAULT_QUANTITY: &str = "0kg";

// --- Registro de Envio (出荷記録) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: String,
    pub user_id: String,
    #[schema(example = "マダイ")]
    pub fish_species: String,
    // Texto livre (valor + unidade), NÃO normalizado.
    #[schema(example = "12.5kg")]
    pub quantity: String,
    #[schema(example = "篠島漁協")]
    pub destination: String,
    #[schema(value_type = Option<f64>, example = 1200)]
    pub price: Option<Decimal>,
    // Guardado como texto; pode não ser numérico. O painel trata isso.
    #[schema(example = "25000")]
    pub total_amount: Option<String>,
    pub notes: Option<String>,
    /// Confiança do reconhecimento por IA (0 a 1).
    #[schema(value_type = Option<f64>, example = 0.85)]
    pub confidence: Option<Decimal>,
    pub shipment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Dados de inserção; `shipment_date` ausente vira o instante da criação.
#[derive(Debug, Clone)]
pub struct NewShipment {
    pub user_id: String,
    pub fish_species: String,
    pub quantity: String,
    pub destination: String,
    pub price: Option<Decimal>,
    pub total_amount: Option<String>,
    pub notes: Option<String>,
    pub confidence: Option<Decimal>,
    pub shipment_date: Option<DateTime<Utc>>,
}

/// O que o cliente mandou, já validado. Campos ausentes recebem os padrões no service.
#[derive(Debug, Clone, Default)]
pub struct ShipmentDraft {
    pub fish_species: Option<String>,
    pub quantity: Option<String>,
    pub destination: Option<String>,
    pub price: Option<Decimal>,
    pub total_amount: Option<String>,
    pub notes: Option<String>,
    pub confidence: Option<Decimal>,
    pub shipment_date: Option<DateTime<Utc>>,
}
