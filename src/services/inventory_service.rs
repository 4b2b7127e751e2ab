// src/services/inventory_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::inventory::{InventoryItem, InventoryUpdate, NewInventoryItem},
};

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn RecordStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    // --- LISTAGEM ---
    // `low_stock_only`: só itens no limite mínimo ou abaixo dele.
    pub async fn list_items(
        &self,
        user_id: &str,
        low_stock_only: bool,
    ) -> Result<Vec<InventoryItem>, AppError> {
        let mut items = self.store.get_inventory(user_id).await?;
        if low_stock_only {
            items.retain(InventoryItem::is_low_stock);
        }
        Ok(items)
    }

    // --- CREATE ITEM ---
    pub async fn create_item(
        &self,
        user_id: &str,
        item_name: &str,
        current_stock: i32,
        min_threshold: i32,
    ) -> Result<InventoryItem, AppError> {
        let item = self
            .store
            .create_inventory_item(NewInventoryItem {
                user_id: user_id.to_string(),
                item_name: item_name.trim().to_string(),
                current_stock,
                min_threshold,
            })
            .await?;

        tracing::info!("📦 Item de estoque criado: {} ({})", item.item_name, item.id);
        Ok(item)
    }

    // --- UPDATE ITEM ---
    pub async fn update_item(
        &self,
        id: &str,
        updates: InventoryUpdate,
    ) -> Result<InventoryItem, AppError> {
        let item = self.store.update_inventory_item(id, updates).await?;

        if item.is_low_stock() {
            tracing::warn!(
                "⚠️ Estoque baixo: {} ({} <= {})",
                item.item_name,
                item.current_stock,
                item.min_threshold
            );
        }
        Ok(item)
    }
}
