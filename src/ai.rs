// src/ai.rs
// Integração com o modelo generativo externo (OCR, reconhecimento de peixes
// e consultoria). O modelo é uma capacidade opaca atrás de `AiClient`.

pub mod client;
pub mod error;
pub mod prompts;
pub mod types;

use async_trait::async_trait;

pub use client::GeminiClient;
pub use error::AiError;
pub use types::ImageInput;

use crate::models::analysis::{FishAnalysis, ReceiptAnalysis};

/// Sem retry, cache ou limite de taxa: cada chamada vai direto ao modelo.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Espécie e peso estimado a partir da foto.
    async fn analyze_fish(&self, image: ImageInput) -> Result<FishAnalysis, AiError>;

    /// Data, valor, fornecedor e categoria a partir da foto do recibo.
    async fn analyze_receipt(&self, image: ImageInput) -> Result<ReceiptAnalysis, AiError>;

    /// Conselho em texto livre; `business_data` vai no prompt como contexto.
    async fn business_advice(
        &self,
        question: &str,
        business_data: &serde_json::Value,
    ) -> Result<String, AiError>;
}
