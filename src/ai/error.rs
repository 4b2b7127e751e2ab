// src/ai/error.rs
// Erros do cliente do modelo generativo.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// Nenhuma chave de API configurada.
    #[error("GEMINI_API_KEY não configurada")]
    NotConfigured,

    /// Falha de transporte (conexão, TLS, corpo ilegível).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A API respondeu com status de erro.
    #[error("API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// O modelo não devolveu texto.
    #[error("Empty response from Gemini")]
    EmptyResponse,

    /// O JSON devolvido não segue o esquema pedido.
    #[error("schema error: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Corpo de erro da API (`{"error": {"code", "message", "status"}}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Monta o erro a partir de uma resposta sem sucesso. Se o corpo não for o
/// JSON de erro conhecido, o texto cru vira a mensagem.
pub fn upstream_error(status: u16, body: &str) -> AiError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(kind) => format!("{kind}: {}", parsed.error.message),
            None => parsed.error.message,
        },
        Err(_) => body.trim().to_string(),
    };
    AiError::Upstream { status, message }
}
