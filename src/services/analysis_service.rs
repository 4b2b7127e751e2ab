// src/services/analysis_service.rs

use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;

use crate::{
    ai::{AiClient, ImageInput},
    common::error::{AnalysisKind, AppError},
    models::analysis::{FishAnalysis, ReceiptAnalysis},
};

use super::DashboardService;

/// Ponte entre os handlers e o modelo externo. Toda falha do modelo vira
/// `AppError::AnalysisFailed` com o tipo da análise.
#[derive(Clone)]
pub struct AnalysisService {
    ai: Arc<dyn AiClient>,
    dashboard_service: DashboardService,
}

impl AnalysisService {
    pub fn new(ai: Arc<dyn AiClient>, dashboard_service: DashboardService) -> Self {
        Self {
            ai,
            dashboard_service,
        }
    }

    pub async fn analyze_fish(&self, image: ImageInput) -> Result<FishAnalysis, AppError> {
        let analysis = self
            .ai
            .analyze_fish(image)
            .await
            .map_err(|source| AppError::AnalysisFailed {
                kind: AnalysisKind::Fish,
                source,
            })?;

        tracing::info!(
            "🔎 Peixe reconhecido: {} {} (confiança {:.2})",
            analysis.fish_species,
            analysis.quantity,
            analysis.confidence
        );
        Ok(analysis)
    }

    pub async fn analyze_receipt(&self, image: ImageInput) -> Result<ReceiptAnalysis, AppError> {
        let analysis = self
            .ai
            .analyze_receipt(image)
            .await
            .map_err(|source| AppError::AnalysisFailed {
                kind: AnalysisKind::Receipt,
                source,
            })?;

        tracing::info!(
            "🔎 Recibo lido: {} {} (confiança {:.2})",
            analysis.vendor,
            analysis.amount,
            analysis.confidence
        );
        Ok(analysis)
    }

    /// Sem `business_data`, o painel atual do usuário vai como contexto.
    pub async fn business_advice(
        &self,
        user_id: &str,
        question: &str,
        business_data: Option<Value>,
    ) -> Result<String, AppError> {
        let business_data = match business_data {
            Some(data) => data,
            None => {
                let dashboard = self.dashboard_service.get_dashboard(user_id).await?;
                serde_json::to_value(dashboard).context("Falha ao serializar o painel")?
            }
        };

        self.ai
            .business_advice(question, &business_data)
            .await
            .map_err(|source| AppError::AnalysisFailed {
                kind: AnalysisKind::Advice,
                source,
            })
    }
}
