// src/handlers/shipments.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        amount::AmountInput,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{i18n::Locale, user::CurrentUser},
    models::shipment::{Shipment, ShipmentDraft},
};

use super::{optional_amount, optional_date};

// ---
// Payload: CreateShipment
// Tudo opcional: a entrada por voz costuma vir incompleta.
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentPayload {
    #[schema(example = "マダイ")]
    pub fish_species: Option<String>,
    #[schema(example = "12.5kg")]
    pub quantity: Option<String>,
    #[schema(example = "篠島漁協")]
    pub destination: Option<String>,
    pub price: Option<AmountInput>,
    // Guardado como veio (texto livre)
    pub total_amount: Option<AmountInput>,
    pub notes: Option<String>,
    #[validate(range(min = 0.0, max = 1.0, message = "信頼度は0から1の間で指定してください"))]
    pub confidence: Option<f64>,
    /// RFC 3339 ou `YYYY-MM-DD`; ausente = agora.
    #[schema(example = "2025-10-05")]
    pub shipment_date: Option<String>,
}

impl CreateShipmentPayload {
    fn into_draft(self) -> Result<ShipmentDraft, AppError> {
        Ok(ShipmentDraft {
            price: optional_amount("price", self.price)?,
            shipment_date: optional_date("shipmentDate", self.shipment_date)?,
            confidence: self.confidence.and_then(Decimal::from_f64),
            total_amount: self.total_amount.and_then(AmountInput::into_text),
            fish_species: self.fish_species,
            quantity: self.quantity,
            destination: self.destination,
            notes: self.notes,
        })
    }
}

/// Resposta de criação no formato que o cliente já espera.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShipmentCreated {
    pub success: bool,
    #[schema(example = "出荷記録を保存しました")]
    pub message: String,
    pub data: Shipment,
}

// POST /api/shipments
#[utoipa::path(
    post,
    path = "/api/shipments",
    tag = "Shipments",
    request_body = CreateShipmentPayload,
    responses(
        (status = 201, description = "Envio registrado", body = ShipmentCreated),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_shipment(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
    Json(payload): Json<CreateShipmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let draft = payload
        .into_draft()
        .map_err(|e| e.to_api_error(&locale))?;

    let shipment = app_state
        .bookkeeping_service
        .create_shipment(&user.0, draft)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let message = if locale.is_english() {
        "Shipment record saved."
    } else {
        "出荷記録を保存しました"
    };

    Ok((
        StatusCode::CREATED,
        Json(ShipmentCreated {
            success: true,
            message: message.to_string(),
            data: shipment,
        }),
    ))
}

// GET /api/shipments
#[utoipa::path(
    get,
    path = "/api/shipments",
    tag = "Shipments",
    responses(
        (status = 200, description = "Envios do usuário, mais recentes primeiro", body = Vec<Shipment>)
    )
)]
pub async fn list_shipments(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let shipments = app_state
        .bookkeeping_service
        .list_shipments(&user.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(shipments)))
}

// GET /api/shipments/{id}
#[utoipa::path(
    get,
    path = "/api/shipments/{id}",
    tag = "Shipments",
    responses(
        (status = 200, description = "Envio encontrado", body = Shipment),
        (status = 404, description = "Envio não encontrado")
    ),
    params(
        ("id" = String, Path, description = "ID do envio")
    )
)]
pub async fn get_shipment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let shipment = app_state
        .bookkeeping_service
        .get_shipment(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(shipment)))
}
