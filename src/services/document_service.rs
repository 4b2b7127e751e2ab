// src/services/document_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::document::{Document, NewDocument},
};

#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn RecordStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list_documents(&self, user_id: &str) -> Result<Vec<Document>, AppError> {
        Ok(self.store.get_documents(user_id).await?)
    }

    pub async fn create_document(&self, document: NewDocument) -> Result<Document, AppError> {
        let document = self.store.create_document(document).await?;
        tracing::info!("📄 Documento salvo: {} ({})", document.document_name, document.id);
        Ok(document)
    }

    pub async fn delete_document(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_document(id).await?;
        tracing::info!("🗑️ Documento removido: {}", id);
        Ok(())
    }
}
