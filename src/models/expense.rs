// src/models/expense.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_EXPENSE_CATEGORY: &str = "その他";

// --- Registro de Despesa (経費記録) ---
// A categoria é texto livre (燃料費, 資材費, 修理費...), não um enum.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    #[schema(example = "燃料費")]
    pub category: String,
    #[schema(value_type = f64, example = 5000)]
    pub amount: Decimal,
    pub description: Option<String>,
    pub receipt_image_url: Option<String>,
    pub expense_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub user_id: String,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub receipt_image_url: Option<String>,
    pub expense_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub receipt_image_url: Option<String>,
    pub expense_date: Option<DateTime<Utc>>,
}
