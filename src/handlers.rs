// src/handlers.rs

pub mod analysis;
pub mod dashboard;
pub mod documents;
pub mod expenses;
pub mod grants;
pub mod inventory;
pub mod shipments;
pub mod users;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::common::{amount::AmountInput, dates::parse_record_date, error::AppError};

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Servidor no ar", body = String))
)]
pub async fn health() -> &'static str {
    "OK"
}

// --- Conversões compartilhadas pelos payloads ---

/// Teto para valores monetários digitados (1000兆円).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Texto obrigatório: só espaços não conta como preenchido.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("空白のみの入力はできません".into());
        return Err(err);
    }
    Ok(())
}

/// Data opcional do payload. Texto em branco conta como ausente.
pub(crate) fn optional_date(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_record_date(&raw)
            .map(Some)
            .ok_or_else(|| {
                AppError::invalid_field(field, "invalid_date", "日付の形式が正しくありません")
            }),
        _ => Ok(None),
    }
}

/// Valor monetário opcional, estrito: lixo vira erro de validação em vez de zero.
pub(crate) fn optional_amount(
    field: &'static str,
    raw: Option<AmountInput>,
) -> Result<Option<Decimal>, AppError> {
    match raw {
        Some(input) if !input.is_blank() => {
            let value = input.to_decimal().ok_or_else(|| {
                AppError::invalid_field(field, "invalid_amount", "金額は数値で入力してください")
            })?;
            if value.is_sign_negative() {
                return Err(AppError::invalid_field(
                    field,
                    "range",
                    "金額は0以上で入力してください",
                ));
            }
            if value > MAX_AMOUNT {
                return Err(AppError::invalid_field(field, "range", "金額が大きすぎます"));
            }
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}
