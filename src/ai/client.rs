// src/ai/client.rs
// Cliente do endpoint `generateContent` da API Gemini.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
    config::AiConfig,
    models::analysis::{FishAnalysis, ReceiptAnalysis},
};

use super::{
    AiClient,
    error::{AiError, upstream_error},
    prompts,
    types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageInput, Part},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    vision_model: String,
    text_model: String,
}

impl GeminiClient {
    /// Sem chave o cliente é criado mesmo assim; cada chamada devolve `NotConfigured`.
    pub fn new(config: &AiConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                api_key: config.api_key.clone(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                vision_model: config.vision_model.clone(),
                text_model: config.text_model.clone(),
            }),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.inner.base_url, model)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let api_key = self.inner.api_key.as_ref().ok_or(AiError::NotConfigured)?;

        let response = self
            .inner
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn analyze_image<T: DeserializeOwned>(
        &self,
        system: &str,
        user_prompt: &str,
        schema: serde_json::Value,
        image: &ImageInput,
    ) -> Result<T, AiError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(system)),
            contents: vec![Content::user(vec![Part::image(image), Part::text(user_prompt)])],
            generation_config: Some(GenerationConfig::json(schema)),
        };

        let response = self.generate(&self.inner.vision_model, &request).await?;
        let text = response.text().ok_or(AiError::EmptyResponse)?;
        decode_structured(&text)
    }
}

/// Lê o JSON devolvido pelo modelo, tolerando a cerca de código ```json.
pub fn decode_structured<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    if unfenced.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(serde_json::from_str(unfenced)?)
}

#[async_trait]
impl AiClient for GeminiClient {
    #[instrument(skip(self, image), fields(model = %self.inner.vision_model, bytes = image.bytes.len()))]
    async fn analyze_fish(&self, image: ImageInput) -> Result<FishAnalysis, AiError> {
        self.analyze_image(
            prompts::FISH_SYSTEM_PROMPT,
            prompts::FISH_USER_PROMPT,
            prompts::fish_schema(),
            &image,
        )
        .await
    }

    #[instrument(skip(self, image), fields(model = %self.inner.vision_model, bytes = image.bytes.len()))]
    async fn analyze_receipt(&self, image: ImageInput) -> Result<ReceiptAnalysis, AiError> {
        self.analyze_image(
            prompts::RECEIPT_SYSTEM_PROMPT,
            prompts::RECEIPT_USER_PROMPT,
            prompts::receipt_schema(),
            &image,
        )
        .await
    }

    #[instrument(skip(self, question, business_data), fields(model = %self.inner.text_model))]
    async fn business_advice(
        &self,
        question: &str,
        business_data: &serde_json::Value,
    ) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(prompts::ADVICE_SYSTEM_PROMPT)),
            contents: vec![Content::user(vec![Part::text(prompts::advice_prompt(
                question,
                business_data,
            ))])],
            generation_config: None,
        };

        let response = self.generate(&self.inner.text_model, &request).await?;
        Ok(response
            .text()
            .unwrap_or_else(|| prompts::ADVICE_FALLBACK.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> AiConfig {
        AiConfig {
            api_key: api_key.map(SecretString::from),
            base_url: "http://localhost:1/v1beta/".to_string(),
            ..AiConfig::default()
        }
    }

    #[test]
    fn endpoint_uses_model_path() {
        let client = GeminiClient::new(&config(Some("k"))).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-pro"),
            "http://localhost:1/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = GeminiClient::new(&config(None)).unwrap();
        let image = ImageInput::new(vec![0xff, 0xd8], None);

        let err = client.analyze_fish(image).await.unwrap_err();
        assert!(matches!(err, AiError::NotConfigured));
    }

    #[test]
    fn structured_output_accepts_fenced_json() {
        let text = "```json\n{\"fishSpecies\":\"マダイ\",\"quantity\":\"10.5kg\",\"confidence\":0.9}\n```";
        let fish: FishAnalysis = decode_structured(text).unwrap();

        assert_eq!(fish.fish_species, "マダイ");
        assert_eq!(fish.quantity, "10.5kg");
    }

    #[test]
    fn structured_output_missing_field_is_schema_error() {
        let result: Result<ReceiptAnalysis, _> = decode_structured(r#"{"date":"2025-10-01"}"#);
        assert!(matches!(result, Err(AiError::Schema(_))));
    }

    #[test]
    fn blank_output_is_empty_response() {
        let result: Result<FishAnalysis, _> = decode_structured("```\n```");
        assert!(matches!(result, Err(AiError::EmptyResponse)));
    }

    #[test]
    fn advice_request_has_no_json_config() {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(prompts::ADVICE_SYSTEM_PROMPT)),
            contents: vec![Content::user(vec![Part::text("q")])],
            generation_config: None,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("generationConfig").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert!(json["systemInstruction"]["parts"][0]["text"].is_string());
    }
}
