// src/handlers/expenses.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::{
        amount::AmountInput,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{i18n::Locale, user::CurrentUser},
    models::expense::{Expense, ExpenseDraft},
};

use super::{optional_amount, optional_date};

// ---
// Payload: CreateExpense
// Os nomes seguem o que sai do OCR de recibo (vendor, date).
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[schema(example = "燃料費")]
    pub category: Option<String>,
    /// Número ou texto numérico (`5000`, `"5,000"`); ausente = 0.
    pub amount: Option<AmountInput>,
    /// Vira a descrição da despesa.
    #[schema(example = "篠島石油")]
    pub vendor: Option<String>,
    /// Usado quando `vendor` não vem.
    pub description: Option<String>,
    pub receipt_image_url: Option<String>,
    /// RFC 3339 ou `YYYY-MM-DD`; ausente = agora.
    #[schema(example = "2025-10-05")]
    pub date: Option<String>,
}

impl CreateExpensePayload {
    fn into_draft(self) -> Result<ExpenseDraft, AppError> {
        let description = self
            .vendor
            .filter(|v| !v.trim().is_empty())
            .or(self.description);

        Ok(ExpenseDraft {
            amount: optional_amount("amount", self.amount)?,
            expense_date: optional_date("date", self.date)?,
            category: self.category,
            description,
            receipt_image_url: self.receipt_image_url,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseCreated {
    pub success: bool,
    #[schema(example = "経費記録を保存しました")]
    pub message: String,
    pub data: Expense,
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Expenses",
    request_body = CreateExpensePayload,
    responses(
        (status = 201, description = "Despesa registrada", body = ExpenseCreated),
        (status = 400, description = "Valor ou data inválidos")
    )
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload
        .into_draft()
        .map_err(|e| e.to_api_error(&locale))?;

    let expense = app_state
        .bookkeeping_service
        .create_expense(&user.0, draft)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let message = if locale.is_english() {
        "Expense record saved."
    } else {
        "経費記録を保存しました"
    };

    Ok((
        StatusCode::CREATED,
        Json(ExpenseCreated {
            success: true,
            message: message.to_string(),
            data: expense,
        }),
    ))
}

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Expenses",
    responses(
        (status = 200, description = "Despesas do usuário, mais recentes primeiro", body = Vec<Expense>)
    )
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = app_state
        .bookkeeping_service
        .list_expenses(&user.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(expenses)))
}

// GET /api/expenses/{id}
#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    tag = "Expenses",
    responses(
        (status = 200, description = "Despesa encontrada", body = Expense),
        (status = 404, description = "Despesa não encontrada")
    ),
    params(
        ("id" = String, Path, description = "ID da despesa")
    )
)]
pub async fn get_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = app_state
        .bookkeeping_service
        .get_expense(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(expense)))
}
