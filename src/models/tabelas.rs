// src/models/tabelas.rs
//
// Tabelas de referência: registros de consulta (marca, modelo, cor)
// referenciados por cópias desnormalizadas nos veículos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Marca {
    pub id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Modelo {
    pub id: Uuid,
    pub nome: String,
    pub marca: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cor {
    pub id: Uuid,
    pub nome: String,
    // Preservado exatamente como enviado (a sanitização só atinge o nome).
    pub hex: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate)]
pub struct SalvarMarcaPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SalvarModeloPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub marca: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SalvarCorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub hex: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListarTabelaQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

/// Resultado do cascateamento modelo -> veículos.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeloAtualizado {
    pub modelo: Modelo,
    pub veiculos_atualizados: u64,
}
