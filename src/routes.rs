// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de IA (fotos chegam por multipart, com limite de tamanho)
    let analysis_routes = Router::new()
        .route("/analyze-fish", post(handlers::analysis::analyze_fish))
        .route("/analyze-receipt", post(handlers::analysis::analyze_receipt))
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes));

    let record_routes = Router::new()
        .route("/business-advice", post(handlers::analysis::business_advice))
        .route(
            "/shipments",
            post(handlers::shipments::create_shipment).get(handlers::shipments::list_shipments),
        )
        .route("/shipments/{id}", get(handlers::shipments::get_shipment))
        .route(
            "/expenses",
            post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
        )
        .route("/expenses/{id}", get(handlers::expenses::get_expense))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/inventory",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route("/inventory/{id}", patch(handlers::inventory::update_item))
        .route(
            "/documents",
            get(handlers::documents::list_documents).post(handlers::documents::create_document),
        )
        .route("/documents/{id}", delete(handlers::documents::delete_document))
        .route(
            "/grants",
            get(handlers::grants::list_grants).post(handlers::grants::create_grant),
        )
        .route("/users/me", get(handlers::users::get_me));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .merge(analysis_routes)
        .merge(record_routes);

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
