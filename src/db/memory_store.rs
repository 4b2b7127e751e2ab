// src/db/memory_store.rs

use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::store::{RecordStore, StoreError};
use crate::models::{
    document::{Document, NewDocument},
    expense::{Expense, NewExpense},
    grant::{Grant, NewGrant},
    inventory::{InventoryItem, InventoryUpdate, NewInventoryItem},
    shipment::{NewShipment, Shipment},
    user::{NewUser, User},
};

type Table<T> = RwLock<HashMap<String, T>>;

/// Store em memória, vive enquanto o processo viver.
///
/// Cada tabela tem seu próprio `RwLock`; nenhum lock atravessa um `.await`.
/// Um lock envenenado (panic de outra thread segurando o lock) vira
/// `StoreError::Unavailable`.
#[derive(Default)]
pub struct MemoryStore {
    users: Table<User>,
    shipments: Table<Shipment>,
    expenses: Table<Expense>,
    inventory: Table<InventoryItem>,
    documents: Table<Document>,
    grants: Table<Grant>,
}

fn read<T>(table: &Table<T>) -> Result<RwLockReadGuard<'_, HashMap<String, T>>, StoreError> {
    table
        .read()
        .map_err(|_| StoreError::Unavailable("lock de leitura envenenado".to_string()))
}

fn write<T>(table: &Table<T>) -> Result<RwLockWriteGuard<'_, HashMap<String, T>>, StoreError> {
    table
        .write()
        .map_err(|_| StoreError::Unavailable("lock de escrita envenenado".to_string()))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Filtra por dono e ordena de forma decrescente pela chave de data.
fn owned_by<T, K>(
    table: &Table<T>,
    user_id: &str,
    owner: impl Fn(&T) -> &str,
    date_key: impl Fn(&T) -> K,
) -> Result<Vec<T>, StoreError>
where
    T: Clone,
    K: Ord,
{
    let mut rows: Vec<T> = read(table)?
        .values()
        .filter(|row| owner(row) == user_id)
        .cloned()
        .collect();
    rows.sort_by(|a, b| date_key(b).cmp(&date_key(a)));
    Ok(rows)
}

fn deadline(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
}

impl MemoryStore {
    /// Store vazio (usado nos testes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Store com o usuário padrão e os avisos de subsídio de exemplo.
    pub fn seeded(default_user_id: &str) -> Self {
        let mut store = Self::default();
        let now = Utc::now();

        let default_user = User {
            id: default_user_id.to_string(),
            name: "山田太郎".to_string(),
            phone: Some("090-1234-5678".to_string()),
            address: Some("愛知県知多郡南知多町篠島".to_string()),
        };

        let sample_grants = [
            (
                "漁業経営安定化支援補助金",
                "燃料費高騰に対する経営安定化を目的とした補助金制度です。",
                "個人漁業者、年間売上300万円以上",
                deadline(2024, 10, 31),
                500_000,
                true,
            ),
            (
                "漁船設備更新支援事業",
                "漁船の安全設備や効率化設備の更新・導入を支援します。",
                "登録漁業者、5年以上の操業実績",
                deadline(2024, 11, 15),
                2_000_000,
                true,
            ),
            (
                "スマート漁業推進補助金",
                "IoT機器やAIシステム導入による漁業のデジタル化を支援。",
                "組合員、革新的技術導入計画有り",
                deadline(2024, 12, 20),
                1_000_000,
                true,
            ),
            (
                "漁業後継者育成支援金",
                "次世代漁業者の育成・技能向上を目的とした支援制度です。",
                "40歳以下、後継者認定",
                deadline(2024, 9, 30),
                300_000,
                false,
            ),
        ];

        // Ninguém mais tem acesso ao store ainda, então `get_mut` basta.
        if let Ok(users) = store.users.get_mut() {
            users.insert(default_user.id.clone(), default_user);
        }
        if let Ok(grants) = store.grants.get_mut() {
            for (title, description, eligibility, application_deadline, amount, is_active) in
                sample_grants
            {
                let id = new_id();
                grants.insert(
                    id.clone(),
                    Grant {
                        id,
                        title: title.to_string(),
                        description: description.to_string(),
                        eligibility_requirements: eligibility.to_string(),
                        application_deadline,
                        grant_amount: Some(Decimal::from(amount)),
                        is_active,
                        created_at: now,
                    },
                );
            }
        }

        store
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?.get(id).cloned())
    }

    async fn get_user_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?
            .values()
            .find(|user| user.name == name)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: new_id(),
            name: user.name,
            phone: user.phone,
            address: user.address,
        };
        write(&self.users)?.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_shipments(&self, user_id: &str) -> Result<Vec<Shipment>, StoreError> {
        owned_by(&self.shipments, user_id, |s| s.user_id.as_str(), |s| s.shipment_date)
    }

    async fn get_shipment(&self, id: &str) -> Result<Option<Shipment>, StoreError> {
        Ok(read(&self.shipments)?.get(id).cloned())
    }

    async fn create_shipment(&self, shipment: NewShipment) -> Result<Shipment, StoreError> {
        let now = Utc::now();
        let shipment = Shipment {
            id: new_id(),
            user_id: shipment.user_id,
            fish_species: shipment.fish_species,
            quantity: shipment.quantity,
            destination: shipment.destination,
            price: shipment.price,
            total_amount: shipment.total_amount,
            notes: shipment.notes,
            confidence: shipment.confidence,
            shipment_date: shipment.shipment_date.unwrap_or(now),
            created_at: now,
        };
        write(&self.shipments)?.insert(shipment.id.clone(), shipment.clone());
        Ok(shipment)
    }

    async fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>, StoreError> {
        owned_by(&self.expenses, user_id, |e| e.user_id.as_str(), |e| e.expense_date)
    }

    async fn get_expense(&self, id: &str) -> Result<Option<Expense>, StoreError> {
        Ok(read(&self.expenses)?.get(id).cloned())
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        let now = Utc::now();
        let expense = Expense {
            id: new_id(),
            user_id: expense.user_id,
            category: expense.category,
            amount: expense.amount,
            description: expense.description,
            receipt_image_url: expense.receipt_image_url,
            expense_date: expense.expense_date.unwrap_or(now),
            created_at: now,
        };
        write(&self.expenses)?.insert(expense.id.clone(), expense.clone());
        Ok(expense)
    }

    async fn get_inventory(&self, user_id: &str) -> Result<Vec<InventoryItem>, StoreError> {
        owned_by(&self.inventory, user_id, |i| i.user_id.as_str(), |i| i.last_updated)
    }

    async fn create_inventory_item(
        &self,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, StoreError> {
        let item = InventoryItem {
            id: new_id(),
            user_id: item.user_id,
            item_name: item.item_name,
            current_stock: item.current_stock,
            min_threshold: item.min_threshold,
            last_updated: Utc::now(),
        };
        write(&self.inventory)?.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        updates: InventoryUpdate,
    ) -> Result<InventoryItem, StoreError> {
        let mut inventory = write(&self.inventory)?;
        let item = inventory.get_mut(id).ok_or_else(|| StoreError::NotFound {
            entity: "inventory item",
            id: id.to_string(),
        })?;

        if let Some(item_name) = updates.item_name {
            item.item_name = item_name;
        }
        if let Some(current_stock) = updates.current_stock {
            item.current_stock = current_stock;
        }
        if let Some(min_threshold) = updates.min_threshold {
            item.min_threshold = min_threshold;
        }
        item.last_updated = Utc::now();

        Ok(item.clone())
    }

    async fn get_documents(&self, user_id: &str) -> Result<Vec<Document>, StoreError> {
        owned_by(&self.documents, user_id, |d| d.user_id.as_str(), |d| d.created_at)
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document, StoreError> {
        let document = Document {
            id: new_id(),
            user_id: document.user_id,
            document_name: document.document_name,
            document_type: document.document_type,
            image_url: document.image_url,
            expiry_date: document.expiry_date,
            created_at: Utc::now(),
        };
        write(&self.documents)?.insert(document.id.clone(), document.clone());
        Ok(document)
    }

    async fn delete_document(&self, id: &str) -> Result<(), StoreError> {
        write(&self.documents)?.remove(id);
        Ok(())
    }

    async fn list_grants(&self) -> Result<Vec<Grant>, StoreError> {
        let mut grants: Vec<Grant> = read(&self.grants)?.values().cloned().collect();
        grants.sort_by_key(|g| {
            (
                !g.is_active,
                g.application_deadline.is_none(),
                g.application_deadline,
            )
        });
        Ok(grants)
    }

    async fn create_grant(&self, grant: NewGrant) -> Result<Grant, StoreError> {
        let grant = Grant {
            id: new_id(),
            title: grant.title,
            description: grant.description,
            eligibility_requirements: grant.eligibility_requirements,
            application_deadline: grant.application_deadline,
            grant_amount: grant.grant_amount,
            is_active: grant.is_active,
            created_at: Utc::now(),
        };
        write(&self.grants)?.insert(grant.id.clone(), grant.clone());
        Ok(grant)
    }
}
