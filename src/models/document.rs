// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Documentos guardados (許可証、免許、保険証...) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub user_id: String,
    #[schema(example = "漁業許可証")]
    pub document_name: String,
    #[schema(example = "許可証")]
    pub document_type: String,
    pub image_url: String,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: String,
    pub document_name: String,
    pub document_type: String,
    pub image_url: String,
    pub expiry_date: Option<DateTime<Utc>>,
}
