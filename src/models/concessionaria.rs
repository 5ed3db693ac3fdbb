// src/models/concessionaria.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Concessionaria {
    pub id: Uuid,
    pub nome: String,
    pub razao_social: Option<String>,
    pub cnpj: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub responsavel: Option<String>,
    pub ativa: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarConcessionariaPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub razao_social: Option<String>,
    pub cnpj: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub responsavel: Option<String>,

    #[serde(default = "ativa_padrao")]
    pub ativa: bool,
}

fn ativa_padrao() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarConcessionariaPayload {
    pub nome: Option<String>,
    pub razao_social: Option<String>,
    pub cnpj: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub responsavel: Option<String>,
    pub ativa: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListarConcessionariasQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub ativa: Option<bool>,
}
