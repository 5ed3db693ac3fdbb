// src/handlers/veiculos.rs

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
    models::veiculo::{AtualizarVeiculoPayload, CriarVeiculoPayload, ListarVeiculosQuery},
};

pub async fn listar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Query(query): Query<ListarVeiculosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagina = app_state.veiculo_service.listar(&query).await?;
    Ok((StatusCode::OK, Json(pagina)))
}

pub async fn buscar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoLeitura>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let veiculo = app_state.veiculo_service.buscar(id).await?;
    Ok((StatusCode::OK, Json(veiculo)))
}

pub async fn criar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Json(payload): Json<CriarVeiculoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let veiculo = app_state.veiculo_service.criar(payload).await?;
    Ok((StatusCode::CREATED, Json(veiculo)))
}

pub async fn atualizar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarVeiculoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let veiculo = app_state.veiculo_service.atualizar(id, &payload).await?;
    Ok((StatusCode::OK, Json(veiculo)))
}

pub async fn excluir(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.veiculo_service.excluir(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Importação em lote: corpo texto com dez colunas por linha, cabeçalho na
/// primeira. Falhas por linha não abortam o lote.
pub async fn importar(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoGestao>,
    corpo: String,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state.importacao_service.importar_veiculos(&corpo).await?;
    Ok((StatusCode::OK, Json(resultado)))
}
