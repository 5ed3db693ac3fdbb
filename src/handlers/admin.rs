// src/handlers/admin.rs
//
// Painel e gestão de usuários: prefixo exclusivo do administrador.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AcessoAdmin, ExigePerfil},
    models::{
        auth::{AtualizarUsuarioPayload, CriarUsuarioPayload, ListarUsuariosQuery},
        metricas::FiltrosMetricas,
    },
};

/// As quatro visões agregadas do painel, com filtros opcionais de
/// operador, concessionária, responsável e balde de dias.
pub async fn metricas(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoAdmin>,
    Query(filtros): Query<FiltrosMetricas>,
) -> Result<impl IntoResponse, AppError> {
    let painel = app_state.metricas_service.painel(&filtros).await?;
    Ok((StatusCode::OK, Json(painel)))
}

// ---
// Usuários
// ---

pub async fn listar_usuarios(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoAdmin>,
    Query(query): Query<ListarUsuariosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagina = app_state.usuario_service.listar(&query).await?;
    Ok((StatusCode::OK, Json(pagina)))
}

pub async fn buscar_usuario(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = app_state.usuario_service.buscar(id).await?;
    Ok((StatusCode::OK, Json(usuario)))
}

pub async fn criar_usuario(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoAdmin>,
    Json(payload): Json<CriarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state.usuario_service.criar(payload).await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}

pub async fn atualizar_usuario(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state.usuario_service.atualizar(id, payload).await?;
    Ok((StatusCode::OK, Json(usuario)))
}

pub async fn excluir_usuario(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.usuario_service.excluir(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
