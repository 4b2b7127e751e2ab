// src/config.rs

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use secrecy::SecretString;

use crate::{
    ai::{AiClient, GeminiClient},
    db::{MemoryStore, RecordStore},
    services::{
        AnalysisService, BookkeepingService, DashboardService, DocumentService, GrantService,
        InventoryService, UserService,
    },
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_USER_ID: &str = "default-user";
pub const DEFAULT_DESTINATION: &str = "篠島漁協";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10 MiB
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Configuração do cliente de IA generativa.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Env: `GEMINI_API_KEY`. Sem chave, toda análise falha com `AnalysisFailed`.
    pub api_key: Option<SecretString>,
    /// Env: `GEMINI_API_BASE`
    pub base_url: String,
    /// Modelo usado para OCR de recibos e reconhecimento de peixes.
    /// Env: `GEMINI_VISION_MODEL`
    pub vision_model: String,
    /// Modelo usado para o consultor de negócios.
    /// Env: `GEMINI_TEXT_MODEL`
    pub text_model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_API_BASE.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }
}

/// Configuração do servidor, carregada de variáveis de ambiente (e do `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Env: `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// Identidade fixa usada por todas as rotas (não há sessão).
    /// Env: `DEFAULT_USER_ID`
    pub default_user_id: String,
    /// Destino aplicado quando o envio não informa um.
    /// Env: `DEFAULT_DESTINATION`
    pub default_destination: String,
    /// Env: `MAX_UPLOAD_BYTES`
    pub max_upload_bytes: usize,
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 3000).into(),
            default_user_id: DEFAULT_USER_ID.to_string(),
            default_destination: DEFAULT_DESTINATION.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave/valor.
    /// Valores vazios contam como ausentes.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR inválido")?;

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES inválido: {raw}"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let ai = AiConfig {
            api_key: get("GEMINI_API_KEY").map(SecretString::from),
            base_url: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            vision_model: get("GEMINI_VISION_MODEL")
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            text_model: get("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
        };

        Ok(Self {
            bind_addr,
            default_user_id: get("DEFAULT_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            default_destination: get("DEFAULT_DESTINATION")
                .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
            max_upload_bytes,
            ai,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bookkeeping_service: BookkeepingService,
    pub dashboard_service: DashboardService,
    pub inventory_service: InventoryService,
    pub document_service: DocumentService,
    pub grant_service: GrantService,
    pub analysis_service: AnalysisService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        if config.ai.api_key.is_none() {
            tracing::warn!("⚠️ GEMINI_API_KEY não definida: as análises de IA vão falhar.");
        }

        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::seeded(&config.default_user_id));
        let ai: Arc<dyn AiClient> = Arc::new(GeminiClient::new(&config.ai)?);

        tracing::info!("✅ Armazenamento em memória inicializado.");

        Ok(Self::with_components(config, store, ai))
    }

    // --- Monta o gráfico de dependências ---
    // Recebe store e cliente de IA prontos, para que os testes injetem os seus.
    pub fn with_components(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        ai: Arc<dyn AiClient>,
    ) -> Self {
        let bookkeeping_service =
            BookkeepingService::new(store.clone(), config.default_destination.clone());
        let dashboard_service = DashboardService::new(store.clone());
        let analysis_service = AnalysisService::new(ai, dashboard_service.clone());

        Self {
            bookkeeping_service,
            inventory_service: InventoryService::new(store.clone()),
            document_service: DocumentService::new(store.clone()),
            grant_service: GrantService::new(store.clone()),
            user_service: UserService::new(store),
            dashboard_service,
            analysis_service,
            config: Arc::new(config),
        }
    }
}
