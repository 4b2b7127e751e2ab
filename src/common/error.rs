// src/common/error.rs

use std::{borrow::Cow, collections::HashMap, fmt};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::{ai::AiError, db::StoreError, middleware::i18n::Locale};

/// Qual chamada de IA falhou. Define a mensagem mostrada ao usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Fish,
    Receipt,
    Advice,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisKind::Fish => "peixe",
            AnalysisKind::Receipt => "recibo",
            AnalysisKind::Advice => "consultoria",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("Nenhuma imagem enviada")]
    MissingImage,

    #[error("Upload inválido: {0}")]
    InvalidUpload(String),

    #[error("Upload acima do limite de {limit} bytes")]
    UploadTooLarge { limit: usize },

    #[error("{entity} não encontrado: {id}")]
    NotFound { entity: &'static str, id: String },

    // O texto do erro de origem vai junto na resposta, o cliente mostra e deixa tentar de novo.
    #[error("Falha na análise de {kind}: {source}")]
    AnalysisFailed {
        kind: AnalysisKind,
        #[source]
        source: AiError,
    },

    #[error("Erro no armazenamento: {0}")]
    Store(StoreError),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => AppError::NotFound { entity, id },
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    /// Erro de validação de um único campo, no mesmo formato do `validator`.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Borrowed(message));
        let mut errors = ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::MissingImage | AppError::InvalidUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AnalysisFailed { .. }
            | AppError::Store(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para a resposta HTTP no idioma pedido, registrando o erro no log.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Erro Interno do Servidor");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Requisição rejeitada");
        }

        let en = locale.is_english();
        let text = |ja: &str, en_text: &str| if en { en_text.to_string() } else { ja.to_string() };

        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status,
                    message: text("入力内容に誤りがあります", "One or more fields are invalid."),
                    details: Some(json!(details)),
                }
            }
            AppError::MissingImage => {
                ApiError::new(status, text("画像ファイルが必要です", "An image file is required."))
            }
            AppError::InvalidUpload(reason) => ApiError {
                status,
                message: text("画像を読み込めませんでした", "The uploaded image could not be read."),
                details: Some(json!(reason)),
            },
            AppError::UploadTooLarge { limit } => {
                let mb = limit / (1024 * 1024);
                let message = if en {
                    format!("The image is too large (limit {} MB).", mb)
                } else {
                    format!("画像サイズが大きすぎます（上限{}MB）", mb)
                };
                ApiError::new(status, message)
            }
            AppError::NotFound { entity, .. } => {
                let message = if en {
                    format!("{} not found.", entity)
                } else {
                    format!("{}が見つかりません", entity_label_ja(entity))
                };
                ApiError::new(status, message)
            }
            AppError::AnalysisFailed { kind, source } => {
                let message = match kind {
                    AnalysisKind::Fish => text("魚種解析に失敗しました", "Fish analysis failed."),
                    AnalysisKind::Receipt => {
                        text("レシート解析に失敗しました", "Receipt analysis failed.")
                    }
                    AnalysisKind::Advice => {
                        text("アドバイス生成に失敗しました", "Could not generate advice.")
                    }
                };
                ApiError {
                    status,
                    message,
                    details: Some(json!(source.to_string())),
                }
            }
            AppError::Store(_) | AppError::InternalServerError(_) => ApiError::new(
                status,
                text("サーバーでエラーが発生しました", "An unexpected error occurred."),
            ),
        }
    }
}

fn entity_label_ja(entity: &str) -> &'static str {
    match entity {
        "shipment" => "出荷記録",
        "expense" => "経費記録",
        "inventory item" => "在庫品目",
        "document" => "書類",
        "user" => "ユーザー",
        _ => "記録",
    }
}

// Sem Locale à mão (ex: extratores), responde no idioma padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

/// Erro já traduzido, pronto para virar resposta.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
