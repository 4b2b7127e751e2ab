// src/services/bookkeeping_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::{
        expense::{DEFAULT_EXPENSE_CATEGORY, Expense, ExpenseDraft, NewExpense},
        shipment::{DEFAULT_FISH_SPECIES, DEFAULT_QUANTITY, NewShipment, Shipment, ShipmentDraft},
    },
};

// Texto em branco conta como ausente (o cliente manda "" nos campos não preenchidos).
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Envios (出荷) e despesas (経費): os dois livros do pescador.
#[derive(Clone)]
pub struct BookkeepingService {
    store: Arc<dyn RecordStore>,
    default_destination: String,
}

impl BookkeepingService {
    pub fn new(store: Arc<dyn RecordStore>, default_destination: String) -> Self {
        Self {
            store,
            default_destination,
        }
    }

    // --- ENVIOS ---
    pub async fn create_shipment(
        &self,
        user_id: &str,
        draft: ShipmentDraft,
    ) -> Result<Shipment, AppError> {
        let new_shipment = NewShipment {
            user_id: user_id.to_string(),
            fish_species: non_blank(draft.fish_species)
                .unwrap_or_else(|| DEFAULT_FISH_SPECIES.to_string()),
            quantity: non_blank(draft.quantity).unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
            destination: non_blank(draft.destination)
                .unwrap_or_else(|| self.default_destination.clone()),
            price: draft.price,
            total_amount: non_blank(draft.total_amount),
            notes: non_blank(draft.notes),
            confidence: draft.confidence,
            shipment_date: draft.shipment_date,
        };

        let shipment = self.store.create_shipment(new_shipment).await?;
        tracing::info!(
            "🐟 Envio registrado: {} ({} {}) -> {}",
            shipment.id,
            shipment.fish_species,
            shipment.quantity,
            shipment.destination
        );
        Ok(shipment)
    }

    pub async fn list_shipments(&self, user_id: &str) -> Result<Vec<Shipment>, AppError> {
        Ok(self.store.get_shipments(user_id).await?)
    }

    pub async fn get_shipment(&self, id: &str) -> Result<Shipment, AppError> {
        self.store
            .get_shipment(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "shipment",
                id: id.to_string(),
            })
    }

    // --- DESPESAS ---
    pub async fn create_expense(
        &self,
        user_id: &str,
        draft: ExpenseDraft,
    ) -> Result<Expense, AppError> {
        let new_expense = NewExpense {
            user_id: user_id.to_string(),
            category: non_blank(draft.category)
                .unwrap_or_else(|| DEFAULT_EXPENSE_CATEGORY.to_string()),
            amount: draft.amount.unwrap_or(Decimal::ZERO),
            description: non_blank(draft.description),
            receipt_image_url: non_blank(draft.receipt_image_url),
            expense_date: draft.expense_date,
        };

        let expense = self.store.create_expense(new_expense).await?;
        tracing::info!(
            "🧾 Despesa registrada: {} ({} {})",
            expense.id,
            expense.category,
            expense.amount
        );
        Ok(expense)
    }

    pub async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>, AppError> {
        Ok(self.store.get_expenses(user_id).await?)
    }

    pub async fn get_expense(&self, id: &str) -> Result<Expense, AppError> {
        self.store
            .get_expense(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "expense",
                id: id.to_string(),
            })
    }
}
