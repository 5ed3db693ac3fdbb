// src/db/metricas_repo.rs
//
// As quatro visões do painel administrativo: queries agregadas
// independentes, somente leitura, sobre a mesma tabela de veículos.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::metricas::{
        ContagemPorConcessionaria, ContagemPorOperador, CruzamentoMetricas,
        EstagnacaoConcessionaria, FiltrosMetricas, JanelaDias,
    },
};

// Dias (com piso) desde a movimentação mais recente do grupo.
const DIAS_PARADO_SQL: &str =
    "FLOOR(EXTRACT(EPOCH FROM (now() - MAX(GREATEST(updated_at, created_at)))) / 86400)::BIGINT";

#[derive(Clone)]
pub struct MetricasRepository {
    pool: PgPool,
}

impl MetricasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtros comuns às quatro visões. A janela de dias é semiaberta e
    /// calculada do "agora" da requisição, sobre a última movimentação
    /// (updated_at ou created_at, o que for mais recente).
    fn aplicar_filtros(
        qb: &mut QueryBuilder<'_, Postgres>,
        f: &FiltrosMetricas,
        agora: DateTime<Utc>,
    ) {
        if let Some(operador) = f.operador.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND operador = ").push_bind(operador.to_string());
        }
        if let Some(concessionaria) = f.concessionaria.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND concessionaria = ")
                .push_bind(concessionaria.to_string());
        }
        if let Some(responsavel) = f.responsavel.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND responsavel = ").push_bind(responsavel.to_string());
        }
        if let Some(janela) = f
            .dias
            .as_deref()
            .and_then(|balde| JanelaDias::do_balde(balde, agora))
        {
            if let Some(minimo) = janela.minimo {
                qb.push(" AND GREATEST(updated_at, created_at) >= ")
                    .push_bind(minimo);
            }
            if let Some(maximo) = janela.maximo {
                qb.push(" AND GREATEST(updated_at, created_at) < ")
                    .push_bind(maximo);
            }
        }
    }

    /// Top 10 operadores por quantidade de veículos (nulos/vazios fora).
    pub async fn contagem_por_operador(
        &self,
        f: &FiltrosMetricas,
        agora: DateTime<Utc>,
    ) -> Result<Vec<ContagemPorOperador>, AppError> {
        let mut qb = QueryBuilder::new(
            "SELECT operador, COUNT(*) AS total FROM veiculos \
             WHERE operador IS NOT NULL AND operador <> ''",
        );
        Self::aplicar_filtros(&mut qb, f, agora);
        qb.push(" GROUP BY operador ORDER BY total DESC LIMIT 10");

        let linhas = qb
            .build_query_as::<ContagemPorOperador>()
            .fetch_all(&self.pool)
            .await?;
        Ok(linhas)
    }

    /// Contagem por concessionária, sem ranking (ordem alfabética).
    pub async fn contagem_por_concessionaria(
        &self,
        f: &FiltrosMetricas,
        agora: DateTime<Utc>,
    ) -> Result<Vec<ContagemPorConcessionaria>, AppError> {
        let mut qb = QueryBuilder::new(
            "SELECT concessionaria, COUNT(*) AS total FROM veiculos \
             WHERE concessionaria IS NOT NULL AND concessionaria <> ''",
        );
        Self::aplicar_filtros(&mut qb, f, agora);
        qb.push(" GROUP BY concessionaria ORDER BY concessionaria ASC");

        let linhas = qb
            .build_query_as::<ContagemPorConcessionaria>()
            .fetch_all(&self.pool)
            .await?;
        Ok(linhas)
    }

    /// Estagnação por concessionária: dias desde a movimentação mais
    /// recente, do mais parado para o menos.
    pub async fn estagnacao_por_concessionaria(
        &self,
        f: &FiltrosMetricas,
        agora: DateTime<Utc>,
    ) -> Result<Vec<EstagnacaoConcessionaria>, AppError> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT concessionaria, {DIAS_PARADO_SQL} AS dias_parado FROM veiculos \
             WHERE concessionaria IS NOT NULL AND concessionaria <> ''"
        ));
        Self::aplicar_filtros(&mut qb, f, agora);
        qb.push(" GROUP BY concessionaria ORDER BY dias_parado DESC");

        let linhas = qb
            .build_query_as::<EstagnacaoConcessionaria>()
            .fetch_all(&self.pool)
            .await?;
        Ok(linhas)
    }

    /// Cruzamento concessionária × responsável × operador.
    pub async fn cruzamento(
        &self,
        f: &FiltrosMetricas,
        agora: DateTime<Utc>,
    ) -> Result<Vec<CruzamentoMetricas>, AppError> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT concessionaria, responsavel, operador, COUNT(*) AS total, \
             {DIAS_PARADO_SQL} AS dias_parado FROM veiculos WHERE 1=1"
        ));
        Self::aplicar_filtros(&mut qb, f, agora);
        qb.push(" GROUP BY concessionaria, responsavel, operador ORDER BY total DESC");

        let linhas = qb
            .build_query_as::<CruzamentoMetricas>()
            .fetch_all(&self.pool)
            .await?;
        Ok(linhas)
    }
}
