// src/handlers/concessionaria.rs
//
// Autoatendimento da concessionária: perfil próprio e métricas restritas
// aos veículos da própria loja (via vínculo usuarios.concessionaria_id).

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::SessaoAutenticada,
        rbac::{AcessoConcessionaria, ExigePerfil},
    },
    models::{concessionaria::AtualizarConcessionariaPayload, metricas::FiltrosMetricas},
};

fn vinculo_da_sessao(sessao: &crate::services::auth::Sessao) -> Result<Uuid, AppError> {
    sessao
        .usuario
        .concessionaria_id
        .ok_or(AppError::NaoEncontrado("Concessionária vinculada"))
}

pub async fn perfil(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoConcessionaria>,
    SessaoAutenticada(sessao): SessaoAutenticada,
) -> Result<impl IntoResponse, AppError> {
    let id = vinculo_da_sessao(&sessao)?;
    let concessionaria = app_state
        .concessionaria_repo
        .buscar_por_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado("Concessionária"))?;
    Ok((StatusCode::OK, Json(concessionaria)))
}

pub async fn atualizar_perfil(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoConcessionaria>,
    SessaoAutenticada(sessao): SessaoAutenticada,
    Json(payload): Json<AtualizarConcessionariaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = vinculo_da_sessao(&sessao)?;
    let concessionaria = app_state
        .concessionaria_repo
        .atualizar(id, &payload)
        .await?
        .ok_or(AppError::NaoEncontrado("Concessionária"))?;
    Ok((StatusCode::OK, Json(concessionaria)))
}

/// O painel da concessionária é o mesmo do admin, com o filtro de
/// concessionária travado no nome da loja do chamador.
pub async fn metricas(
    State(app_state): State<AppState>,
    _guarda: ExigePerfil<AcessoConcessionaria>,
    SessaoAutenticada(sessao): SessaoAutenticada,
    Query(filtros): Query<FiltrosMetricas>,
) -> Result<impl IntoResponse, AppError> {
    let id = vinculo_da_sessao(&sessao)?;
    let concessionaria = app_state
        .concessionaria_repo
        .buscar_por_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado("Concessionária"))?;

    let painel = app_state
        .metricas_service
        .painel_da_concessionaria(&concessionaria.nome, &filtros)
        .await?;
    Ok((StatusCode::OK, Json(painel)))
}
