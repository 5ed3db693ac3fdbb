// src/handlers/transportadoras.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        paginacao::{normalizar_pagina, Paginado},
    },
    config::AppState,
    middleware::rbac::{AcessoGestao, ExigePerfil},
    models::transportadora::{
        AtualizarTransportadoraPayload, CriarTransportadoraPayload, ListarTransportadorasQuery,
    },
};

pub async fn listar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Query(query): Query<ListarTransportadorasQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = normalizar_pagina(query.page, query.limit);
    let (transportadoras, total) = app_state
        .transportadora_repo
        .listar(&query, page, limit)
        .await?;
    Ok((
        StatusCode::OK,
        Json(Paginado::montar(transportadoras, page, limit, total)),
    ))
}

pub async fn buscar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let transportadora = app_state
        .transportadora_repo
        .buscar_por_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado("Transportadora"))?;
    Ok((StatusCode::OK, Json(transportadora)))
}

pub async fn criar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Json(payload): Json<CriarTransportadoraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    if payload.valor_frete.is_sign_negative() {
        return Err(AppError::RequisicaoInvalida(
            "O valor do frete não pode ser negativo.".to_string(),
        ));
    }

    let transportadora = app_state.transportadora_repo.criar(&payload).await?;
    Ok((StatusCode::CREATED, Json(transportadora)))
}

pub async fn atualizar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarTransportadoraPayload>,
) -> Result<impl IntoResponse, AppError> {
    if payload
        .valor_frete
        .is_some_and(|v| v.is_sign_negative())
    {
        return Err(AppError::RequisicaoInvalida(
            "O valor do frete não pode ser negativo.".to_string(),
        ));
    }

    let transportadora = app_state
        .transportadora_repo
        .atualizar(id, &payload)
        .await?
        .ok_or(AppError::NaoEncontrado("Transportadora"))?;
    Ok((StatusCode::OK, Json(transportadora)))
}

pub async fn excluir(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.transportadora_repo.excluir(id).await? {
        return Err(AppError::NaoEncontrado("Transportadora"));
    }
    Ok(StatusCode::NO_CONTENT)
}
