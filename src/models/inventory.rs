// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Item de Estoque (網、ロープ、燃料...) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub user_id: String,
    #[schema(example = "ロープ（50m）")]
    pub item_name: String,
    pub current_stock: i32,
    pub min_threshold: i32,
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Mesma regra do cliente: no limite mínimo já conta como baixo.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_threshold
    }
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub user_id: String,
    pub item_name: String,
    pub current_stock: i32,
    pub min_threshold: i32,
}

/// Atualização parcial: só os campos `Some` são aplicados.
#[derive(Debug, Clone, Default)]
pub struct InventoryUpdate {
    pub item_name: Option<String>,
    pub current_stock: Option<i32>,
    pub min_threshold: Option<i32>,
}
