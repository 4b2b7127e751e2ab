// src/docs.rs

use utoipa::OpenApi;

use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Fishery Ledger API", description = "Registro de envios, despesas e painel da cooperativa de pesca"),
    paths(
        handlers::health,

        // --- Analysis (IA) ---
        handlers::analysis::analyze_fish,
        handlers::analysis::analyze_receipt,
        handlers::analysis::business_advice,

        // --- Shipments ---
        handlers::shipments::create_shipment,
        handlers::shipments::list_shipments,
        handlers::shipments::get_shipment,

        // --- Expenses ---
        handlers::expenses::create_expense,
        handlers::expenses::list_expenses,
        handlers::expenses::get_expense,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Inventory ---
        handlers::inventory::list_items,
        handlers::inventory::create_item,
        handlers::inventory::update_item,

        // --- Documents ---
        handlers::documents::list_documents,
        handlers::documents::create_document,
        handlers::documents::delete_document,

        // --- Grants ---
        handlers::grants::list_grants,
        handlers::grants::create_grant,

        // --- Users ---
        handlers::users::get_me,
    ),
    components(
        schemas(
            common::amount::AmountInput,

            // --- Models ---
            models::user::User,
            models::shipment::Shipment,
            models::expense::Expense,
            models::inventory::InventoryItem,
            models::document::Document,
            models::grant::Grant,
            models::dashboard::MonthlyStats,
            models::dashboard::DashboardData,
            models::analysis::FishAnalysis,
            models::analysis::ReceiptAnalysis,
            models::analysis::AdviceResponse,

            // --- Payloads ---
            handlers::analysis::ImageUpload,
            handlers::analysis::BusinessAdvicePayload,
            handlers::shipments::CreateShipmentPayload,
            handlers::shipments::ShipmentCreated,
            handlers::expenses::CreateExpensePayload,
            handlers::expenses::ExpenseCreated,
            handlers::inventory::CreateItemPayload,
            handlers::inventory::UpdateItemPayload,
            handlers::documents::CreateDocumentPayload,
            handlers::grants::CreateGrantPayload,
        )
    ),
    tags(
        (name = "Health", description = "Estado do servidor"),
        (name = "Analysis", description = "Reconhecimento de peixes, OCR de recibos e consultoria por IA"),
        (name = "Shipments", description = "Registros de envio (出荷)"),
        (name = "Expenses", description = "Registros de despesa (経費)"),
        (name = "Dashboard", description = "Totais do mês corrente"),
        (name = "Inventory", description = "Estoque de materiais"),
        (name = "Documents", description = "Licenças e documentos guardados"),
        (name = "Grants", description = "Avisos de subsídio"),
        (name = "Users", description = "Dados do usuário")
    )
)]
pub struct ApiDoc;
