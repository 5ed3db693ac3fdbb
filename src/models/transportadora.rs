// src/models/transportadora.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Parceiro logístico: registro de contato e frete, independente dos veículos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transportadora {
    pub id: Uuid,
    pub nome: String,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub responsavel: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub valor_frete: Decimal,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarTransportadoraPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub responsavel: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,

    #[serde(default)]
    pub valor_frete: Decimal,
    pub observacoes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarTransportadoraPayload {
    pub nome: Option<String>,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub responsavel: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub valor_frete: Option<Decimal>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListarTransportadorasQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}
