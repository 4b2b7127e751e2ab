// src/services/user_service.rs

use std::sync::Arc;

use crate::{common::error::AppError, db::RecordStore, models::user::User};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn RecordStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_user(&self, id: &str) -> Result<User, AppError> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user",
                id: id.to_string(),
            })
    }
}
