// src/middleware/user.rs

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::config::AppState;

// Não há login: toda requisição age em nome do usuário padrão configurado.
// O extrator existe para que os handlers não leiam a config diretamente.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(state.config.default_user_id.clone()))
    }
}
