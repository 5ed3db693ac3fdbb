// src/handlers/tabelas.rs
//
// As três tabelas de referência compartilham a mesma paginação genérica;
// os handlers só fixam o tipo e o payload de cada uma.

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
    middleware::rbac::{AcessoGestao, AcessoLeitura, ExigePerfil},
    models::tabelas::{
        Cor, ListarTabelaQuery, Marca, Modelo, SalvarCorPayload, SalvarMarcaPayload,
        SalvarModeloPayload,
    },
};

// ---
// Marcas
// ---

pub async fn listar_marcas(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Query(query): Query<ListarTabelaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagina = app_state.tabelas_service.listar::<Marca>(&query).await?;
    Ok((StatusCode::OK, Json(pagina)))
}

pub async fn criar_marca(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Json(payload): Json<SalvarMarcaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let marca = app_state.tabelas_service.criar_marca(&payload).await?;
    Ok((StatusCode::CREATED, Json(marca)))
}

pub async fn buscar_marca(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let marca = app_state.tabelas_service.buscar_marca(id).await?;
    Ok((StatusCode::OK, Json(marca)))
}

pub async fn atualizar_marca(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SalvarMarcaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let marca = app_state.tabelas_service.atualizar_marca(id, &payload).await?;
    Ok((StatusCode::OK, Json(marca)))
}

pub async fn excluir_marca(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabelas_service.excluir_marca(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Cores
// ---

pub async fn listar_cores(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Query(query): Query<ListarTabelaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagina = app_state.tabelas_service.listar::<Cor>(&query).await?;
    Ok((StatusCode::OK, Json(pagina)))
}

pub async fn criar_cor(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Json(payload): Json<SalvarCorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let cor = app_state.tabelas_service.criar_cor(&payload).await?;
    Ok((StatusCode::CREATED, Json(cor)))
}

pub async fn buscar_cor(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cor = app_state.tabelas_service.buscar_cor(id).await?;
    Ok((StatusCode::OK, Json(cor)))
}

pub async fn atualizar_cor(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SalvarCorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let cor = app_state.tabelas_service.atualizar_cor(id, &payload).await?;
    Ok((StatusCode::OK, Json(cor)))
}

pub async fn excluir_cor(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabelas_service.excluir_cor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Modelos
// ---

pub async fn listar_modelos(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Query(query): Query<ListarTabelaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagina = app_state.tabelas_service.listar::<Modelo>(&query).await?;
    Ok((StatusCode::OK, Json(pagina)))
}

pub async fn criar_modelo(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Json(payload): Json<SalvarModeloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let modelo = app_state.tabelas_service.criar_modelo(&payload).await?;
    Ok((StatusCode::CREATED, Json(modelo)))
}

pub async fn buscar_modelo(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let modelo = app_state.tabelas_service.buscar_modelo(id).await?;
    Ok((StatusCode::OK, Json(modelo)))
}

/// Edição com cascateamento: a resposta informa quantos veículos tiveram
/// as cópias desnormalizadas sobrescritas.
pub async fn atualizar_modelo(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SalvarModeloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let resultado = app_state.tabelas_service.atualizar_modelo(id, &payload).await?;
    Ok((StatusCode::OK, Json(resultado)))
}

pub async fn excluir_modelo(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabelas_service.excluir_modelo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Importação em lote: corpo texto `marca,modelo`, cabeçalho na primeira
/// linha, falhas coletadas por linha.
pub async fn importar_modelos(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    corpo: String,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state.importacao_service.importar_modelos(&corpo).await?;
    Ok((StatusCode::OK, Json(resultado)))
}
