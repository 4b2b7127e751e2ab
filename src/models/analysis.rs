// src/models/analysis.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Resultado do reconhecimento de peixe por foto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FishAnalysis {
    #[schema(example = "マダイ")]
    pub fish_species: String,
    #[schema(example = "10.5kg")]
    pub quantity: String,
    #[schema(example = 0.82)]
    pub confidence: f64,
}

/// Resultado do OCR de recibo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptAnalysis {
    #[schema(example = "2025-10-05")]
    pub date: String,
    // Só dígitos, sem vírgula (pedido no prompt)
    #[schema(example = "5000")]
    pub amount: String,
    pub vendor: String,
    #[schema(example = "燃料費")]
    pub category: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdviceResponse {
    pub advice: String,
}
