// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{common::error::AppError, config::AppState, services::auth::Sessao};

// O middleware em si: valida o Bearer token e injeta a sessão resolvida
// nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(authorization) = bearer.ok_or(AppError::InvalidToken)?;

    let sessao = app_state
        .auth_service
        .validar_token(authorization.token())
        .await?;

    request.extensions_mut().insert(sessao);
    Ok(next.run(request).await)
}

// Extrator para obter a sessão autenticada diretamente nos handlers
pub struct SessaoAutenticada(pub Sessao);

impl<S> FromRequestParts<S> for SessaoAutenticada
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Sessao>()
            .cloned()
            .map(SessaoAutenticada)
            .ok_or(AppError::InvalidToken)
    }
}
