// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, Utc};
use rust_decimal::Decimal;

use crate::{
    common::{
        amount::{parse_leading_decimal, round_to_unit},
        error::AppError,
    },
    db::RecordStore,
    models::{
        dashboard::{DashboardData, MonthlyStats},
        expense::Expense,
        shipment::Shipment,
    },
};

pub const RECENT_SHIPMENTS_LIMIT: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Resumo do mês corrente (fuso local do servidor).
    pub async fn get_dashboard(&self, user_id: &str) -> Result<DashboardData, AppError> {
        let shipments = self.store.get_shipments(user_id).await?;
        let expenses = self.store.get_expenses(user_id).await?;

        Ok(summarize(&shipments, &expenses, Local::now()))
    }
}

fn in_month(date: &DateTime<Utc>, now: &DateTime<Local>) -> bool {
    let local = date.with_timezone(&Local);
    local.year() == now.year() && local.month() == now.month()
}

/// Calcula o painel a partir dos registros. Função pura: `now` define o mês.
///
/// `totalAmount` é texto livre; o que não começa com número soma zero.
/// As somas saturam em `Decimal::MAX`/`MIN` em vez de estourar.
pub fn summarize(shipments: &[Shipment], expenses: &[Expense], now: DateTime<Local>) -> DashboardData {
    let monthly_shipments: Vec<&Shipment> = shipments
        .iter()
        .filter(|s| in_month(&s.shipment_date, &now))
        .collect();

    let revenue: Decimal = monthly_shipments
        .iter()
        .map(|s| {
            s.total_amount
                .as_deref()
                .and_then(parse_leading_decimal)
                .unwrap_or(Decimal::ZERO)
        })
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let total_expenses: Decimal = expenses
        .iter()
        .filter(|e| in_month(&e.expense_date, &now))
        .map(|e| e.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let mut recent_shipments = shipments.to_vec();
    recent_shipments.sort_by(|a, b| b.shipment_date.cmp(&a.shipment_date));
    recent_shipments.truncate(RECENT_SHIPMENTS_LIMIT);

    DashboardData {
        monthly_stats: MonthlyStats {
            revenue: round_to_unit(revenue),
            expenses: round_to_unit(total_expenses),
            profit: round_to_unit(revenue.saturating_sub(total_expenses)),
            shipment_count: monthly_shipments.len(),
            revenue_change_percent: Decimal::ZERO,
            expense_change_percent: Decimal::ZERO,
        },
        recent_shipments,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Local> {
        // Meio do mês: somar ou subtrair poucos dias não muda o mês.
        Local.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
    }

    fn shipment(total_amount: Option<&str>, date: DateTime<Local>) -> Shipment {
        let date = date.with_timezone(&Utc);
        Shipment {
            id: format!("s-{}", date.timestamp()),
            user_id: "u1".to_string(),
            fish_species: "マダイ".to_string(),
            quantity: "10kg".to_string(),
            destination: "篠島漁協".to_string(),
            price: None,
            total_amount: total_amount.map(str::to_string),
            notes: None,
            confidence: None,
            shipment_date: date,
            created_at: date,
        }
    }

    fn expense(amount: &str, date: DateTime<Local>) -> Expense {
        let date = date.with_timezone(&Utc);
        Expense {
            id: format!("e-{}", date.timestamp()),
            user_id: "u1".to_string(),
            category: "燃料費".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            description: None,
            receipt_image_url: None,
            expense_date: date,
            created_at: date,
        }
    }

    #[test]
    fn empty_month_is_all_zero() {
        let data = summarize(&[], &[], now());

        assert_eq!(data.monthly_stats.revenue, Decimal::ZERO);
        assert_eq!(data.monthly_stats.expenses, Decimal::ZERO);
        assert_eq!(data.monthly_stats.profit, Decimal::ZERO);
        assert_eq!(data.monthly_stats.shipment_count, 0);
        assert!(data.recent_shipments.is_empty());
    }

    #[test]
    fn revenue_reads_leading_number_and_ignores_garbage() {
        let shipments = vec![
            shipment(Some("25000"), now()),
            shipment(Some("abc"), now() - Duration::hours(1)),
            shipment(None, now() - Duration::hours(2)),
            shipment(Some("1200円"), now() - Duration::hours(3)),
        ];

        let stats = summarize(&shipments, &[], now()).monthly_stats;
        assert_eq!(stats.revenue, Decimal::from(26200));
        assert_eq!(stats.shipment_count, 4);
    }

    #[test]
    fn profit_can_be_negative() {
        let shipments = vec![shipment(Some("3000"), now())];
        let expenses = vec![expense("5000", now()), expense("120.4", now())];

        let stats = summarize(&shipments, &expenses, now()).monthly_stats;
        assert_eq!(stats.expenses, Decimal::from(5120));
        assert_eq!(stats.profit, Decimal::from(-2120));
        assert_eq!(stats.revenue_change_percent, Decimal::ZERO);
        assert_eq!(stats.expense_change_percent, Decimal::ZERO);
    }

    #[test]
    fn half_units_round_up() {
        let shipments = vec![shipment(Some("100.5"), now())];
        let stats = summarize(&shipments, &[], now()).monthly_stats;
        assert_eq!(stats.revenue, Decimal::from(101));
    }

    #[test]
    fn other_months_are_left_out_of_totals() {
        let last_month = now() - Duration::days(40);
        let shipments = vec![shipment(Some("9999"), last_month), shipment(Some("100"), now())];
        let expenses = vec![expense("777", last_month)];

        let stats = summarize(&shipments, &expenses, now()).monthly_stats;
        assert_eq!(stats.revenue, Decimal::from(100));
        assert_eq!(stats.expenses, Decimal::ZERO);
        assert_eq!(stats.shipment_count, 1);
    }

    #[test]
    fn totals_near_the_decimal_limit_saturate() {
        let huge = "79228162514264337593543950335";
        let shipments = vec![
            shipment(Some(huge), now()),
            shipment(Some("999999999999999999999999999999999"), now() - Duration::hours(1)),
        ];
        let expenses = vec![
            expense(huge, now()),
            expense(huge, now() - Duration::hours(1)),
        ];

        let stats = summarize(&shipments, &expenses, now()).monthly_stats;
        assert_eq!(stats.revenue, Decimal::MAX);
        assert_eq!(stats.expenses, Decimal::MAX);
        assert_eq!(stats.profit, Decimal::ZERO);
        assert_eq!(stats.shipment_count, 2);
    }

    #[test]
    fn negative_totals_saturate_at_the_minimum() {
        let shipments = vec![
            shipment(Some("-79228162514264337593543950335"), now()),
            shipment(Some("-1e40"), now() - Duration::hours(1)),
        ];
        let expenses = vec![expense("79228162514264337593543950335", now())];

        let stats = summarize(&shipments, &expenses, now()).monthly_stats;
        assert_eq!(stats.revenue, Decimal::MIN);
        assert_eq!(stats.profit, Decimal::MIN);
    }

    #[test]
    fn revenue_text_is_read_like_parse_float() {
        let shipments = vec![
            shipment(Some("1,200円"), now()),
            shipment(Some("1e3"), now() - Duration::hours(1)),
        ];

        let stats = summarize(&shipments, &[], now()).monthly_stats;
        assert_eq!(stats.revenue, Decimal::from(1001));
    }

    #[test]
    fn recent_shipments_are_the_five_latest_of_all_time() {
        let shipments: Vec<Shipment> = (0..8)
            .map(|i| shipment(Some("1"), now() - Duration::days(i * 20)))
            .collect();
        let mut shuffled = shipments.clone();
        shuffled.reverse();

        let data = summarize(&shuffled, &[], now());
        assert_eq!(data.recent_shipments.len(), 5);
        let ids: Vec<&str> = data.recent_shipments.iter().map(|s| s.id.as_str()).collect();
        let expected: Vec<&str> = shipments[..5].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, expected);
    }
}
