// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::shipment::Shipment;

// 1. Resumo do Mês (os cards do topo)
// Os nomes no JSON seguem o que o cliente já consome.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    #[schema(value_type = f64)]
    pub revenue: Decimal,
    #[schema(value_type = f64)]
    pub expenses: Decimal,
    #[schema(value_type = f64)]
    pub profit: Decimal, // Pode ser negativo
    #[serde(rename = "shipments")]
    pub shipment_count: usize,
    // Comparação com o mês anterior ainda não é calculada: sempre zero.
    #[serde(rename = "revenueChange")]
    #[schema(value_type = f64)]
    pub revenue_change_percent: Decimal,
    #[serde(rename = "expenseChange")]
    #[schema(value_type = f64)]
    pub expense_change_percent: Decimal,
}

// 2. Painel completo
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub monthly_stats: MonthlyStats,
    /// Os 5 envios mais recentes de todo o histórico.
    pub recent_shipments: Vec<Shipment>,
}
