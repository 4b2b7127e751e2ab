// src/services/grant_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::grant::{Grant, NewGrant},
};

#[derive(Clone)]
pub struct GrantService {
    store: Arc<dyn RecordStore>,
}

impl GrantService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list_grants(&self) -> Result<Vec<Grant>, AppError> {
        Ok(self.store.list_grants().await?)
    }

    pub async fn create_grant(&self, grant: NewGrant) -> Result<Grant, AppError> {
        let grant = self.store.create_grant(grant).await?;
        tracing::info!("📢 Aviso de subsídio publicado: {} ({})", grant.title, grant.id);
        Ok(grant)
    }
}
