// src/handlers/auth.rs

use axum::{extract::State, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SessaoAutenticada,
    models::auth::{LoginPayload, SessaoResponse, TrocarPerfilPayload},
    services::auth::perfis_permitidos,
};

// Handler de login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<SessaoResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sessao = app_state
        .auth_service
        .login(&payload.email, &payload.senha)
        .await?;

    Ok(Json(sessao))
}

// Handler da rota protegida /me
pub async fn get_me(
    SessaoAutenticada(sessao): SessaoAutenticada,
) -> Json<serde_json::Value> {
    let perfis: Vec<&str> = perfis_permitidos(&sessao.usuario)
        .iter()
        .map(|p| p.como_str())
        .collect();

    Json(json!({
        "usuario": sessao.usuario,
        "perfilAtivo": sessao.perfil.como_str(),
        "perfis": perfis,
    }))
}

// Troca o perfil ativo dentro do conjunto permitido (reemite o token)
pub async fn trocar_perfil(
    State(app_state): State<AppState>,
    SessaoAutenticada(sessao): SessaoAutenticada,
    Json(payload): Json<TrocarPerfilPayload>,
) -> Result<Json<SessaoResponse>, AppError> {
    let resposta = app_state
        .auth_service
        .trocar_perfil(&sessao.usuario, &payload.perfil)?;

    Ok(Json(resposta))
}
