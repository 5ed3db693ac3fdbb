// src/models/veiculo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Status de faturamento do veículo.
pub const STATUS_VALIDOS: &[&str] = &["A faturar", "Refaturamento", "Licenciado"];
pub const STATUS_PADRAO: &str = "A faturar";
pub const CAMBIO_PADRAO: &str = "Manual";
pub const COMBUSTIVEL_PADRAO: &str = "Flex";

/// `marca`/`modelo` são cópias desnormalizadas da linha de `modelos`
/// apontada por `modelo_id`; o cascateamento de atualização as mantém
/// consistentes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Veiculo {
    pub id: Uuid,
    pub marca: String,
    pub modelo: String,
    pub modelo_id: Option<Uuid>,
    pub versao: Option<String>,
    pub cor: Option<String>,
    pub ano: Option<i32>,
    pub preco: Decimal,
    pub status: String,
    pub combustivel: String,
    pub cambio: String,
    pub concessionaria: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub vendedor: Option<String>,
    pub responsavel: Option<String>,
    pub operador: Option<String>,
    pub contato: Option<String>,
    pub observacoes: Option<String>,
    pub opcionais: Option<String>,
    pub data_entrada: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarVeiculoPayload {
    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub marca: String,

    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub modelo: String,

    pub modelo_id: Option<Uuid>,
    pub versao: Option<String>,
    pub cor: Option<String>,
    pub ano: Option<i32>,

    // Ausente => 0 (preenchido no service)
    pub preco: Option<Decimal>,

    // Ausente => "A faturar"
    pub status: Option<String>,
    pub combustivel: Option<String>,
    pub cambio: Option<String>,

    pub concessionaria: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub vendedor: Option<String>,
    pub responsavel: Option<String>,
    pub operador: Option<String>,
    pub contato: Option<String>,
    pub observacoes: Option<String>,
    pub opcionais: Option<String>,

    // Ausente => data de hoje
    pub data_entrada: Option<NaiveDate>,
}

/// Atualização parcial: só os campos presentes sobrescrevem.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarVeiculoPayload {
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub modelo_id: Option<Uuid>,
    pub versao: Option<String>,
    pub cor: Option<String>,
    pub ano: Option<i32>,
    pub preco: Option<Decimal>,
    pub status: Option<String>,
    pub combustivel: Option<String>,
    pub cambio: Option<String>,
    pub concessionaria: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub vendedor: Option<String>,
    pub responsavel: Option<String>,
    pub operador: Option<String>,
    pub contato: Option<String>,
    pub observacoes: Option<String>,
    pub opcionais: Option<String>,
    pub data_entrada: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListarVeiculosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub status: Option<String>,
    pub marca: Option<String>,
    pub combustivel: Option<String>,
    pub cambio: Option<String>,
    pub ano: Option<i32>,
}
