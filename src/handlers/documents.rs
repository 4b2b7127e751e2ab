// src/handlers/documents.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, user::CurrentUser},
    models::document::{Document, NewDocument},
};

use super::{optional_date, validate_not_blank};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentPayload {
    #[validate(custom(function = "validate_not_blank", message = "書類名は必須です"))]
    #[schema(example = "漁業許可証")]
    pub document_name: String,

    #[validate(custom(function = "validate_not_blank", message = "書類の種類は必須です"))]
    #[schema(example = "許可証")]
    pub document_type: String,

    #[validate(custom(function = "validate_not_blank", message = "画像URLは必須です"))]
    pub image_url: String,

    #[schema(example = "2026-03-31")]
    pub expiry_date: Option<String>,
}

// GET /api/documents
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "Documents",
    responses(
        (status = 200, description = "Documentos do usuário", body = Vec<Document>)
    )
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let documents = app_state
        .document_service
        .list_documents(&user.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(documents)))
}

// POST /api/documents
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    request_body = CreateDocumentPayload,
    responses(
        (status = 201, description = "Documento salvo", body = Document),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_document(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
    Json(payload): Json<CreateDocumentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let expiry_date =
        optional_date("expiryDate", payload.expiry_date).map_err(|e| e.to_api_error(&locale))?;

    let document = app_state
        .document_service
        .create_document(NewDocument {
            user_id: user.0,
            document_name: payload.document_name,
            document_type: payload.document_type,
            image_url: payload.image_url,
            expiry_date,
        })
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(document)))
}

// DELETE /api/documents/{id}
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = "Documents",
    responses(
        (status = 204, description = "Documento removido (ou já inexistente)")
    ),
    params(
        ("id" = String, Path, description = "ID do documento")
    )
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .document_service
        .delete_document(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
