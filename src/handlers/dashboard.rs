// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, user::CurrentUser},
    models::dashboard::DashboardData,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais do mês corrente e últimos envios", body = DashboardData),
        (status = 500, description = "Armazenamento indisponível")
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = app_state
        .dashboard_service
        .get_dashboard(&user.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(dashboard)))
}
