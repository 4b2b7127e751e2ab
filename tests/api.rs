use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use fishery_ledger::{
    ai::{AiClient, AiError, ImageInput},
    config::{AppConfig, AppState},
    db::{MemoryStore, RecordStore, StoreError},
    models::{
        analysis::{FishAnalysis, ReceiptAnalysis},
        document::{Document, NewDocument},
        expense::{Expense, NewExpense},
        grant::{Grant, NewGrant},
        inventory::{InventoryItem, InventoryUpdate, NewInventoryItem},
        shipment::{NewShipment, Shipment},
        user::{NewUser, User},
    },
    routes::build_router,
};

// --- Dublês ---

struct StubAi {
    fail: bool,
}

impl StubAi {
    fn failure() -> AiError {
        AiError::Upstream {
            status: 503,
            message: "UNAVAILABLE: The model is overloaded.".to_string(),
        }
    }
}

#[async_trait]
impl AiClient for StubAi {
    async fn analyze_fish(&self, image: ImageInput) -> Result<FishAnalysis, AiError> {
        if self.fail {
            return Err(Self::failure());
        }
        assert!(!image.bytes.is_empty());
        Ok(FishAnalysis {
            fish_species: "マダイ".to_string(),
            quantity: "10.5kg".to_string(),
            confidence: 0.9,
        })
    }

    async fn analyze_receipt(&self, _image: ImageInput) -> Result<ReceiptAnalysis, AiError> {
        if self.fail {
            return Err(Self::failure());
        }
        Ok(ReceiptAnalysis {
            date: "2025-10-05".to_string(),
            amount: "5000".to_string(),
            vendor: "篠島石油".to_string(),
            category: "燃料費".to_string(),
            confidence: 0.8,
        })
    }

    async fn business_advice(&self, question: &str, _data: &Value) -> Result<String, AiError> {
        if self.fail {
            return Err(Self::failure());
        }
        Ok(format!("回答: {question}"))
    }
}

/// Store que nunca consegue ler nem escrever.
struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Unavailable("disco fora do ar".to_string())
}

#[async_trait]
impl RecordStore for BrokenStore {
    async fn get_user(&self, _id: &str) -> Result<Option<User>, StoreError> {
        Err(broken())
    }
    async fn get_user_by_name(&self, _name: &str) -> Result<Option<User>, StoreError> {
        Err(broken())
    }
    async fn create_user(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(broken())
    }
    async fn get_shipments(&self, _user_id: &str) -> Result<Vec<Shipment>, StoreError> {
        Err(broken())
    }
    async fn get_shipment(&self, _id: &str) -> Result<Option<Shipment>, StoreError> {
        Err(broken())
    }
    async fn create_shipment(&self, _shipment: NewShipment) -> Result<Shipment, StoreError> {
        Err(broken())
    }
    async fn get_expenses(&self, _user_id: &str) -> Result<Vec<Expense>, StoreError> {
        Err(broken())
    }
    async fn get_expense(&self, _id: &str) -> Result<Option<Expense>, StoreError> {
        Err(broken())
    }
    async fn create_expense(&self, _expense: NewExpense) -> Result<Expense, StoreError> {
        Err(broken())
    }
    async fn get_inventory(&self, _user_id: &str) -> Result<Vec<InventoryItem>, StoreError> {
        Err(broken())
    }
    async fn create_inventory_item(
        &self,
        _item: NewInventoryItem,
    ) -> Result<InventoryItem, StoreError> {
        Err(broken())
    }
    async fn update_inventory_item(
        &self,
        _id: &str,
        _updates: InventoryUpdate,
    ) -> Result<InventoryItem, StoreError> {
        Err(broken())
    }
    async fn get_documents(&self, _user_id: &str) -> Result<Vec<Document>, StoreError> {
        Err(broken())
    }
    async fn create_document(&self, _document: NewDocument) -> Result<Document, StoreError> {
        Err(broken())
    }
    async fn delete_document(&self, _id: &str) -> Result<(), StoreError> {
        Err(broken())
    }
    async fn list_grants(&self) -> Result<Vec<Grant>, StoreError> {
        Err(broken())
    }
    async fn create_grant(&self, _grant: NewGrant) -> Result<Grant, StoreError> {
        Err(broken())
    }
}

// --- Helpers ---

fn app_with(store: Arc<dyn RecordStore>, ai_fails: bool) -> Router {
    build_router(AppState::with_components(
        AppConfig::default(),
        store,
        Arc::new(StubAi { fail: ai_fails }),
    ))
}

// Store novo por teste, com o usuário padrão e os avisos de exemplo.
fn app() -> Router {
    let store = MemoryStore::seeded(&AppConfig::default().default_user_id);
    app_with(Arc::new(store), false)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "----fishery-test-boundary";

fn image_upload(uri: &str, field: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// --- Testes ---

#[tokio::test]
async fn health_says_ok() {
    let (status, body) = send(&app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn expense_of_this_month_shows_up_on_dashboard() {
    let app = app();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/expenses",
            json!({ "category": "燃料費", "amount": "5000", "vendor": "篠島石油", "date": today }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "経費記録を保存しました");
    assert_eq!(body["data"]["category"], "燃料費");
    assert_eq!(body["data"]["description"], "篠島石油");
    assert_eq!(body["data"]["amount"].as_f64(), Some(5000.0));

    let (status, dashboard) = send(&app, get("/api/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    let stats = &dashboard["monthlyStats"];
    assert_eq!(stats["expenses"].as_f64(), Some(5000.0));
    assert_eq!(stats["revenue"].as_f64(), Some(0.0));
    assert_eq!(stats["profit"].as_f64(), Some(-5000.0));
    assert_eq!(stats["shipments"], 0);
    assert_eq!(stats["revenueChange"].as_f64(), Some(0.0));
    assert_eq!(stats["expenseChange"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn shipment_revenue_and_recent_list() {
    let app = app();

    for amount in ["25000", "abc"] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/shipments",
                json!({ "fishSpecies": "スズキ", "quantity": "8kg", "totalAmount": amount }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, dashboard) = send(&app, get("/api/dashboard")).await;
    assert_eq!(dashboard["monthlyStats"]["revenue"].as_f64(), Some(25000.0));
    assert_eq!(dashboard["monthlyStats"]["shipments"], 2);
    assert_eq!(dashboard["recentShipments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn shipment_defaults_and_lookup() {
    let app = app();

    let (status, body) = send(&app, json_request("POST", "/api/shipments", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let shipment = &body["data"];
    assert_eq!(shipment["fishSpecies"], "その他");
    assert_eq!(shipment["quantity"], "0kg");
    assert_eq!(shipment["destination"], "篠島漁協");
    assert_eq!(shipment["userId"], "default-user");
    assert!(shipment["shipmentDate"].is_string());

    let id = shipment["id"].as_str().unwrap();
    let (status, fetched) = send(&app, get(&format!("/api/shipments/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);

    let (status, listed) = send(&app, get("/api/shipments")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, get("/api/shipments/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "出荷記録が見つかりません");
}

#[tokio::test]
async fn invalid_expense_amount_is_rejected_per_field() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request("POST", "/api/expenses", json!({ "amount": "たくさん" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["amount"][0], "金額は数値で入力してください");

    let (_, listed) = send(&app, get("/api/expenses")).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_amounts_do_not_break_the_dashboard() {
    let app = app();
    let huge = "79228162514264337593543950335";

    let (status, body) = send(
        &app,
        json_request("POST", "/api/expenses", json!({ "amount": huge })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["amount"][0], "金額が大きすぎます");

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            json_request("POST", "/api/shipments", json!({ "totalAmount": huge })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, dashboard) = send(&app, get("/api/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    let revenue = dashboard["monthlyStats"]["revenue"].as_f64().unwrap();
    assert!(revenue > 7.9e28);
    assert_eq!(dashboard["monthlyStats"]["shipments"], 2);
}

#[tokio::test]
async fn errors_follow_accept_language() {
    let request = Request::builder()
        .uri("/api/expenses/nope")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "expense not found.");
}

#[tokio::test]
async fn analyze_fish_needs_an_image() {
    let app = app();

    let (status, body) = send(&app, json_request("POST", "/api/analyze-fish", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "画像ファイルが必要です");

    let (status, _) = send(&app, image_upload("/api/analyze-fish", "photo", b"\xff\xd8")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_fish_returns_model_result() {
    let (status, body) =
        send(&app(), image_upload("/api/analyze-fish", "image", b"\xff\xd8\xff\xe0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fishSpecies"], "マダイ");
    assert_eq!(body["quantity"], "10.5kg");
}

#[tokio::test]
async fn analyze_receipt_returns_model_result() {
    let (status, body) =
        send(&app(), image_upload("/api/analyze-receipt", "image", b"\xff\xd8\xff\xe0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vendor"], "篠島石油");
    assert_eq!(body["amount"], "5000");
}

#[tokio::test]
async fn model_failure_is_a_500_with_details() {
    let app = app_with(Arc::new(MemoryStore::new()), true);

    let (status, body) = send(&app, image_upload("/api/analyze-fish", "image", b"\xff\xd8")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "魚種解析に失敗しました");
    assert!(body["details"].as_str().unwrap().contains("overloaded"));

    let (status, body) = send(
        &app,
        json_request("POST", "/api/business-advice", json!({ "question": "燃料費は？" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "アドバイス生成に失敗しました");
}

#[tokio::test]
async fn business_advice_requires_a_question() {
    let app = app();

    let (status, body) =
        send(&app, json_request("POST", "/api/business-advice", json!({ "question": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["question"][0], "質問が必要です");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/business-advice", json!({ "question": "燃料費は？" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advice"], "回答: 燃料費は？");
}

#[tokio::test]
async fn inventory_flow() {
    let app = app();

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/inventory",
            json!({ "itemName": "ロープ（50m）", "currentStock": 10, "minThreshold": 5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (_, low) = send(&app, get("/api/inventory?lowStock=true")).await;
    assert!(low.as_array().unwrap().is_empty());

    let (status, updated) = send(
        &app,
        json_request("PATCH", &format!("/api/inventory/{id}"), json!({ "currentStock": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["currentStock"], 5);
    assert_eq!(updated["itemName"], "ロープ（50m）");

    let (_, low) = send(&app, get("/api/inventory?lowStock=true")).await;
    assert_eq!(low.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        json_request("PATCH", "/api/inventory/unknown", json!({ "currentStock": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(&app, get("/api/inventory")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn inventory_rejects_missing_or_negative_stock() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request("POST", "/api/inventory", json!({ "itemName": "網" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["current_stock"].is_array());

    let (status, _) = send(
        &app,
        json_request("POST", "/api/inventory", json!({ "itemName": "網", "currentStock": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inventory_rejects_blank_item_names() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request("POST", "/api/inventory", json!({ "itemName": "   ", "currentStock": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["item_name"][0], "品目名は必須です");

    let (_, created) = send(
        &app,
        json_request("POST", "/api/inventory", json!({ "itemName": "浮き", "currentStock": 3 })),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        json_request("PATCH", &format!("/api/inventory/{id}"), json!({ "itemName": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, all) = send(&app, get("/api/inventory")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["itemName"], "浮き");
}

#[tokio::test]
async fn documents_can_be_created_and_deleted() {
    let app = app();

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/documents",
            json!({
                "documentName": "漁業許可証",
                "documentType": "許可証",
                "imageUrl": "/uploads/license.jpg",
                "expiryDate": "2026-03-31"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/documents/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&app, get("/api/documents")).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn grants_list_active_first() {
    let app = app();

    let (status, grants) = send(&app, get("/api/grants")).await;
    assert_eq!(status, StatusCode::OK);
    let grants = grants.as_array().unwrap();
    assert_eq!(grants.len(), 4);
    assert_eq!(grants[0]["isActive"], true);
    assert_eq!(grants[3]["isActive"], false);

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/grants",
            json!({ "title": "新規補助金", "grantAmount": 300000 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isActive"], true);
    assert_eq!(created["grantAmount"].as_f64(), Some(300000.0));
}

#[tokio::test]
async fn current_user_is_the_seeded_one() {
    let (status, me) = send(&app(), get("/api/users/me")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], "default-user");
    assert_eq!(me["name"], "山田太郎");
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let app = app_with(Arc::new(BrokenStore), false);

    let (status, body) = send(&app, get("/api/dashboard")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "サーバーでエラーが発生しました");

    let (status, _) = send(&app, json_request("POST", "/api/shipments", json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, doc) = send(&app(), get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/dashboard"].is_object());
}
