// src/handlers/users.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, user::CurrentUser},
    models::user::User,
};

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário atual", body = User),
        (status = 404, description = "Usuário padrão não cadastrado")
    )
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let me = app_state
        .user_service
        .get_user(&user.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(me)))
}
