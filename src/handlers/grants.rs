// src/handlers/grants.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        amount::AmountInput,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::grant::{Grant, NewGrant},
};

use super::{optional_amount, optional_date, validate_not_blank};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrantPayload {
    #[validate(custom(function = "validate_not_blank", message = "タイトルは必須です"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub eligibility_requirements: String,

    #[schema(example = "2026-03-31")]
    pub application_deadline: Option<String>,

    pub grant_amount: Option<AmountInput>,

    // Ausente = ativo
    pub is_active: Option<bool>,
}

// GET /api/grants
#[utoipa::path(
    get,
    path = "/api/grants",
    tag = "Grants",
    responses(
        (status = 200, description = "Avisos de subsídio: ativos primeiro, por prazo", body = Vec<Grant>)
    )
)]
pub async fn list_grants(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let grants = app_state
        .grant_service
        .list_grants()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(grants)))
}

// POST /api/grants
#[utoipa::path(
    post,
    path = "/api/grants",
    tag = "Grants",
    request_body = CreateGrantPayload,
    responses(
        (status = 201, description = "Aviso publicado", body = Grant),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_grant(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateGrantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let application_deadline = optional_date("applicationDeadline", payload.application_deadline)
        .map_err(|e| e.to_api_error(&locale))?;
    let grant_amount =
        optional_amount("grantAmount", payload.grant_amount).map_err(|e| e.to_api_error(&locale))?;

    let grant = app_state
        .grant_service
        .create_grant(NewGrant {
            title: payload.title.trim().to_string(),
            description: payload.description,
            eligibility_requirements: payload.eligibility_requirements,
            application_deadline,
            grant_amount,
            is_active: payload.is_active.unwrap_or(true),
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(grant)))
}
