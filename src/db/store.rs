// src/db/store.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    document::{Document, NewDocument},
    expense::{Expense, NewExpense},
    grant::{Grant, NewGrant},
    inventory::{InventoryItem, InventoryUpdate, NewInventoryItem},
    shipment::{NewShipment, Shipment},
    user::{NewUser, User},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} não encontrado: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("armazenamento indisponível: {0}")]
    Unavailable(String),
}

/// Armazenamento dos registros da cooperativa.
///
/// Todo `create_*` gera um id novo (UUID v4) e o carimbo de criação; o resto
/// do registro volta como foi recebido. As listagens são por usuário, da data
/// de registro mais recente para a mais antiga (empates sem ordem definida).
/// Não há controle de concorrência: a última escrita vence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- Usuários ---
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn get_user_by_name(&self, name: &str) -> Result<Option<User>, StoreError>;
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    // --- Envios (ordenados por shipment_date) ---
    async fn get_shipments(&self, user_id: &str) -> Result<Vec<Shipment>, StoreError>;
    async fn get_shipment(&self, id: &str) -> Result<Option<Shipment>, StoreError>;
    async fn create_shipment(&self, shipment: NewShipment) -> Result<Shipment, StoreError>;

    // --- Despesas (ordenadas por expense_date) ---
    async fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>, StoreError>;
    async fn get_expense(&self, id: &str) -> Result<Option<Expense>, StoreError>;
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, StoreError>;

    // --- Estoque (ordenado por last_updated) ---
    async fn get_inventory(&self, user_id: &str) -> Result<Vec<InventoryItem>, StoreError>;
    async fn create_inventory_item(
        &self,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, StoreError>;
    /// Aplica os campos informados e renova `last_updated`.
    /// Id desconhecido -> `StoreError::NotFound`, sem criar nada.
    async fn update_inventory_item(
        &self,
        id: &str,
        updates: InventoryUpdate,
    ) -> Result<InventoryItem, StoreError>;

    // --- Documentos (ordenados por created_at) ---
    async fn get_documents(&self, user_id: &str) -> Result<Vec<Document>, StoreError>;
    async fn create_document(&self, document: NewDocument) -> Result<Document, StoreError>;
    /// Idempotente: apagar um id que não existe não é erro.
    async fn delete_document(&self, id: &str) -> Result<(), StoreError>;

    // --- Subsídios ---
    /// Ativos primeiro, por prazo mais próximo; sem prazo vão para o fim.
    async fn list_grants(&self) -> Result<Vec<Grant>, StoreError>;
    async fn create_grant(&self, grant: NewGrant) -> Result<Grant, StoreError>;
}
