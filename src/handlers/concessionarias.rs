// src/handlers/concessionarias.rs

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
    models::concessionaria::{
        AtualizarConcessionariaPayload, CriarConcessionariaPayload, ListarConcessionariasQuery,
    },
};

pub async fn listar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Query(query): Query<ListarConcessionariasQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = normalizar_pagina(query.page, query.limit);
    let (concessionarias, total) = app_state
        .concessionaria_repo
        .listar(&query, page, limit)
        .await?;
    Ok((
        StatusCode::OK,
        Json(Paginado::montar(concessionarias, page, limit, total)),
    ))
}

pub async fn buscar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let concessionaria = app_state
        .concessionaria_repo
        .buscar_por_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado("Concessionária"))?;
    Ok((StatusCode::OK, Json(concessionaria)))
}

pub async fn criar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Json(payload): Json<CriarConcessionariaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let concessionaria = app_state.concessionaria_repo.criar(&payload).await?;
    Ok((StatusCode::CREATED, Json(concessionaria)))
}

pub async fn atualizar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarConcessionariaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let concessionaria = app_state
        .concessionaria_repo
        .atualizar(id, &payload)
        .await?
        .ok_or(AppError::NaoEncontrado("Concessionária"))?;
    Ok((StatusCode::OK, Json(concessionaria)))
}

pub async fn excluir(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.concessionaria_repo.excluir(id).await? {
        return Err(AppError::NaoEncontrado("Concessionária"));
    }
    Ok(StatusCode::NO_CONTENT)
}
