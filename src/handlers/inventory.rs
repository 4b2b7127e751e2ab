// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, user::CurrentUser},
    models::inventory::{InventoryItem, InventoryUpdate},
};

use super::validate_not_blank;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// `true`: só itens com estoque no limite mínimo ou abaixo.
    pub low_stock: Option<bool>,
}

// ---
// Payload: CreateItem
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemPayload {
    #[validate(custom(function = "validate_not_blank", message = "品目名は必須です"))]
    #[schema(example = "ロープ（50m）")]
    pub item_name: String,

    #[validate(
        required(message = "在庫数は必須です"),
        range(min = 0, message = "在庫数は0以上で入力してください")
    )]
    pub current_stock: Option<i32>,

    #[validate(range(min = 0, message = "最低在庫数は0以上で入力してください"))]
    #[serde(default)]
    pub min_threshold: i32,
}

// ---
// Payload: UpdateItem (parcial)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    #[validate(custom(function = "validate_not_blank", message = "品目名は必須です"))]
    pub item_name: Option<String>,

    #[validate(range(min = 0, message = "在庫数は0以上で入力してください"))]
    pub current_stock: Option<i32>,

    #[validate(range(min = 0, message = "最低在庫数は0以上で入力してください"))]
    pub min_threshold: Option<i32>,
}

impl From<UpdateItemPayload> for InventoryUpdate {
    fn from(payload: UpdateItemPayload) -> Self {
        InventoryUpdate {
            item_name: payload.item_name.map(|name| name.trim().to_string()),
            current_stock: payload.current_stock,
            min_threshold: payload.min_threshold,
        }
    }
}

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Itens de estoque do usuário", body = Vec<InventoryItem>)
    )
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
    Query(query): Query<InventoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .inventory_service
        .list_items(&user.0, query.low_stock.unwrap_or(false))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(items)))
}

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = CreateItemPayload,
    responses(
        (status = 201, description = "Item criado", body = InventoryItem),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    // `validate` garante o `Some`
    let current_stock = payload.current_stock.unwrap_or_default();

    let item = app_state
        .inventory_service
        .create_item(&user.0, &payload.item_name, current_stock, payload.min_threshold)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PATCH /api/inventory/{id}
#[utoipa::path(
    patch,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    request_body = UpdateItemPayload,
    responses(
        (status = 200, description = "Item atualizado", body = InventoryItem),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Item não encontrado")
    ),
    params(
        ("id" = String, Path, description = "ID do item")
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let item = app_state
        .inventory_service
        .update_item(&id, payload.into())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(item)))
}
