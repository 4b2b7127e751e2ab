// src/models/user.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[schema(example = "山田太郎")]
    pub name: String,
    #[schema(example = "090-1234-5678")]
    pub phone: Option<String>,
    #[schema(example = "愛知県知多郡南知多町篠島")]
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}
