// src/db/veiculo_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::veiculo::{AtualizarVeiculoPayload, CriarVeiculoPayload, ListarVeiculosQuery, Veiculo},
};

// Campos texto varridos pela busca por substring (case-insensitive).
const COLUNAS_BUSCA: &[&str] = &[
    "marca",
    "modelo",
    "versao",
    "cor",
    "concessionaria",
    "cidade",
    "estado",
    "vendedor",
    "observacoes",
    "contato",
    "combustivel",
    "cambio",
    "status",
    "ano::text",
    "opcionais",
];

/// Traduz o parâmetro `sort` para uma cláusula segura (allowlist).
/// Prefixo '-' inverte a direção. Qualquer coisa fora da lista cai no padrão.
pub fn ordem_sql(sort: Option<&str>) -> &'static str {
    match sort.unwrap_or_default() {
        "preco" => "preco ASC",
        "-preco" => "preco DESC",
        "ano" => "ano ASC NULLS LAST",
        "-ano" => "ano DESC NULLS LAST",
        "marca" => "marca ASC, modelo ASC",
        "dataEntrada" => "data_entrada ASC",
        "-dataEntrada" => "data_entrada DESC",
        "updatedAt" => "updated_at ASC",
        _ => "updated_at DESC",
    }
}

#[derive(Clone)]
pub struct VeiculoRepository {
    pool: PgPool,
}

impl VeiculoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, q: &ListarVeiculosQuery) {
        if let Some(status) = q.status.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND status = ").push_bind(status.to_string());
        }
        if let Some(marca) = q.marca.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND marca ILIKE ").push_bind(marca.to_string());
        }
        if let Some(combustivel) = q.combustivel.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND combustivel ILIKE ").push_bind(combustivel.to_string());
        }
        if let Some(cambio) = q.cambio.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND cambio ILIKE ").push_bind(cambio.to_string());
        }
        if let Some(ano) = q.ano {
            qb.push(" AND ano = ").push_bind(ano);
        }
        if let Some(busca) = q.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let padrao = format!("%{}%", busca);
            qb.push(" AND (");
            for (i, coluna) in COLUNAS_BUSCA.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*coluna);
                qb.push(" ILIKE ");
                qb.push_bind(padrao.clone());
            }
            qb.push(")");
        }
    }

    /// Lê uma página e o total em duas queries separadas (o total pode
    /// correr contra escritas concorrentes; não há garantia de snapshot).
    pub async fn listar(
        &self,
        q: &ListarVeiculosQuery,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Veiculo>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM veiculos WHERE 1=1");
        Self::aplicar_filtros(&mut qb, q);
        qb.push(" ORDER BY ");
        qb.push(ordem_sql(q.sort.as_deref()));
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind((page - 1) * limit);

        let veiculos = qb
            .build_query_as::<Veiculo>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb_total = QueryBuilder::new("SELECT COUNT(*) FROM veiculos WHERE 1=1");
        Self::aplicar_filtros(&mut qb_total, q);
        let total: i64 = qb_total
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((veiculos, total))
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Veiculo>, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>("SELECT * FROM veiculos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(veiculo)
    }

    /// Insere com RETURNING: grava e relê o registro na mesma query,
    /// evitando o padrão escreve-depois-relê do sistema antigo.
    /// O chamador já preencheu os defaults (preço, status, câmbio...).
    pub async fn criar(&self, payload: &CriarVeiculoPayload) -> Result<Veiculo, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            r#"
            INSERT INTO veiculos (
                marca, modelo, modelo_id, versao, cor, ano, preco, status,
                combustivel, cambio, concessionaria, cidade, estado, vendedor,
                responsavel, operador, contato, observacoes, opcionais, data_entrada
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            RETURNING *
            "#,
        )
        .bind(&payload.marca)
        .bind(&payload.modelo)
        .bind(payload.modelo_id)
        .bind(&payload.versao)
        .bind(&payload.cor)
        .bind(payload.ano)
        .bind(payload.preco)
        .bind(&payload.status)
        .bind(&payload.combustivel)
        .bind(&payload.cambio)
        .bind(&payload.concessionaria)
        .bind(&payload.cidade)
        .bind(&payload.estado)
        .bind(&payload.vendedor)
        .bind(&payload.responsavel)
        .bind(&payload.operador)
        .bind(&payload.contato)
        .bind(&payload.observacoes)
        .bind(&payload.opcionais)
        .bind(payload.data_entrada)
        .fetch_one(&self.pool)
        .await?;

        Ok(veiculo)
    }

    /// Atualização parcial: apenas os campos presentes no payload entram
    /// no SET. Retorna None quando o id não existe.
    pub async fn atualizar(
        &self,
        id: Uuid,
        p: &AtualizarVeiculoPayload,
    ) -> Result<Option<Veiculo>, AppError> {
        let mut qb = QueryBuilder::new("UPDATE veiculos SET updated_at = now()");

        if let Some(v) = &p.marca {
            qb.push(", marca = ").push_bind(v);
        }
        if let Some(v) = &p.modelo {
            qb.push(", modelo = ").push_bind(v);
        }
        if let Some(v) = p.modelo_id {
            qb.push(", modelo_id = ").push_bind(v);
        }
        if let Some(v) = &p.versao {
            qb.push(", versao = ").push_bind(v);
        }
        if let Some(v) = &p.cor {
            qb.push(", cor = ").push_bind(v);
        }
        if let Some(v) = p.ano {
            qb.push(", ano = ").push_bind(v);
        }
        if let Some(v) = p.preco {
            qb.push(", preco = ").push_bind(v);
        }
        if let Some(v) = &p.status {
            qb.push(", status = ").push_bind(v);
        }
        if let Some(v) = &p.combustivel {
            qb.push(", combustivel = ").push_bind(v);
        }
        if let Some(v) = &p.cambio {
            qb.push(", cambio = ").push_bind(v);
        }
        if let Some(v) = &p.concessionaria {
            qb.push(", concessionaria = ").push_bind(v);
        }
        if let Some(v) = &p.cidade {
            qb.push(", cidade = ").push_bind(v);
        }
        if let Some(v) = &p.estado {
            qb.push(", estado = ").push_bind(v);
        }
        if let Some(v) = &p.vendedor {
            qb.push(", vendedor = ").push_bind(v);
        }
        if let Some(v) = &p.responsavel {
            qb.push(", responsavel = ").push_bind(v);
        }
        if let Some(v) = &p.operador {
            qb.push(", operador = ").push_bind(v);
        }
        if let Some(v) = &p.contato {
            qb.push(", contato = ").push_bind(v);
        }
        if let Some(v) = &p.observacoes {
            qb.push(", observacoes = ").push_bind(v);
        }
        if let Some(v) = &p.opcionais {
            qb.push(", opcionais = ").push_bind(v);
        }
        if let Some(v) = p.data_entrada {
            qb.push(", data_entrada = ").push_bind(v);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let veiculo = qb
            .build_query_as::<Veiculo>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(veiculo)
    }

    /// Exclusão definitiva, sem verificação referencial (contrato do recurso).
    pub async fn excluir(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM veiculos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    /// Quantos veículos referenciam um modelo (bloqueio de exclusão).
    pub async fn contar_por_modelo<'e, E>(
        &self,
        executor: E,
        modelo_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM veiculos WHERE modelo_id = $1")
                .bind(modelo_id)
                .fetch_one(executor)
                .await?;
        Ok(total)
    }

    /// Sobrescreve as cópias desnormalizadas marca/modelo de todos os
    /// veículos que apontam para o modelo. Roda dentro da transação do
    /// cascateamento (o executor vem de fora).
    pub async fn sincronizar_denormalizados<'e, E>(
        &self,
        executor: E,
        modelo_id: Uuid,
        marca: &str,
        modelo: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            "UPDATE veiculos SET marca = $1, modelo = $2, updated_at = now() WHERE modelo_id = $3",
        )
        .bind(marca)
        .bind(modelo)
        .bind(modelo_id)
        .execute(executor)
        .await?;
        Ok(resultado.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordem_sql_so_aceita_a_allowlist() {
        assert_eq!(ordem_sql(Some("preco")), "preco ASC");
        assert_eq!(ordem_sql(Some("-preco")), "preco DESC");
        // tentativa de injeção cai no padrão
        assert_eq!(ordem_sql(Some("preco; DROP TABLE veiculos")), "updated_at DESC");
        assert_eq!(ordem_sql(None), "updated_at DESC");
    }
}
