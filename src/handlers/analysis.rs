// src/handlers/analysis.rs

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    ai::ImageInput,
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, user::CurrentUser},
    models::analysis::{AdviceResponse, FishAnalysis, ReceiptAnalysis},
};

pub const IMAGE_FIELD: &str = "image";

/// Formulário multipart com a foto no campo `image`.
#[derive(ToSchema)]
pub struct ImageUpload {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

// Lê o campo `image` do formulário. Sem multipart ou sem o campo -> MissingImage.
async fn read_image(
    multipart: Result<Multipart, MultipartRejection>,
    limit: usize,
) -> Result<ImageInput, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Requisição sem multipart: {}", rejection.body_text());
        AppError::MissingImage
    })?;

    let upload_error = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::UploadTooLarge { limit }
        } else {
            AppError::InvalidUpload(e.body_text())
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;
        if bytes.is_empty() {
            return Err(AppError::MissingImage);
        }
        return Ok(ImageInput::new(bytes.to_vec(), content_type.as_deref()));
    }

    Err(AppError::MissingImage)
}

// POST /api/analyze-fish
#[utoipa::path(
    post,
    path = "/api/analyze-fish",
    tag = "Analysis",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Espécie e peso estimado", body = FishAnalysis),
        (status = 400, description = "Nenhuma imagem enviada"),
        (status = 413, description = "Imagem acima do limite"),
        (status = 500, description = "Falha do modelo")
    )
)]
pub async fn analyze_fish(
    State(app_state): State<AppState>,
    locale: Locale,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let image = read_image(multipart, app_state.config.max_upload_bytes)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let analysis = app_state
        .analysis_service
        .analyze_fish(image)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(analysis)))
}

// POST /api/analyze-receipt
#[utoipa::path(
    post,
    path = "/api/analyze-receipt",
    tag = "Analysis",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Dados lidos do recibo", body = ReceiptAnalysis),
        (status = 400, description = "Nenhuma imagem enviada"),
        (status = 413, description = "Imagem acima do limite"),
        (status = 500, description = "Falha do modelo")
    )
)]
pub async fn analyze_receipt(
    State(app_state): State<AppState>,
    locale: Locale,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let image = read_image(multipart, app_state.config.max_upload_bytes)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let analysis = app_state
        .analysis_service
        .analyze_receipt(image)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(analysis)))
}

// ---
// Payload: BusinessAdvice
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAdvicePayload {
    #[schema(example = "燃料費を抑えるにはどうすればいいですか？")]
    pub question: Option<String>,
    /// Contexto livre; ausente = painel do mês atual.
    #[schema(value_type = Option<Object>)]
    pub business_data: Option<Value>,
}

// POST /api/business-advice
#[utoipa::path(
    post,
    path = "/api/business-advice",
    tag = "Analysis",
    request_body = BusinessAdvicePayload,
    responses(
        (status = 200, description = "Conselho gerado", body = AdviceResponse),
        (status = 400, description = "Pergunta ausente"),
        (status = 500, description = "Falha do modelo")
    )
)]
pub async fn business_advice(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
    Json(payload): Json<BusinessAdvicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let question = payload
        .question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            AppError::invalid_field("question", "required", "質問が必要です").to_api_error(&locale)
        })?;

    // `null` explícito conta como ausente.
    let business_data = payload.business_data.filter(|data| !data.is_null());

    let advice = app_state
        .analysis_service
        .business_advice(&user.0, &question, business_data)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(AdviceResponse { advice })))
}
