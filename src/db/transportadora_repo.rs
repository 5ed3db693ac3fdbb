// src/db/transportadora_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::transportadora::{
        AtualizarTransportadoraPayload, CriarTransportadoraPayload, ListarTransportadorasQuery,
        Transportadora,
    },
};

#[derive(Clone)]
pub struct TransportadoraRepository {
    pool: PgPool,
}

impl TransportadoraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, q: &ListarTransportadorasQuery) {
        if let Some(busca) = q.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let padrao = format!("%{}%", busca);
            qb.push(" AND (nome ILIKE ")
                .push_bind(padrao.clone())
                .push(" OR cidade ILIKE ")
                .push_bind(padrao.clone())
                .push(" OR cnpj ILIKE ")
                .push_bind(padrao)
                .push(")");
        }
    }

    pub async fn listar(
        &self,
        q: &ListarTransportadorasQuery,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Transportadora>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM transportadoras WHERE 1=1");
        Self::aplicar_filtros(&mut qb, q);
        qb.push(" ORDER BY nome ASC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind((page - 1) * limit);

        let transportadoras = qb
            .build_query_as::<Transportadora>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb_total = QueryBuilder::new("SELECT COUNT(*) FROM transportadoras WHERE 1=1");
        Self::aplicar_filtros(&mut qb_total, q);
        let total: i64 = qb_total
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((transportadoras, total))
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Transportadora>, AppError> {
        let transportadora =
            sqlx::query_as::<_, Transportadora>("SELECT * FROM transportadoras WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(transportadora)
    }

    pub async fn criar(&self, p: &CriarTransportadoraPayload) -> Result<Transportadora, AppError> {
        let transportadora = sqlx::query_as::<_, Transportadora>(
            r#"
            INSERT INTO transportadoras (
                nome, cnpj, telefone, email, responsavel, cidade, estado,
                valor_frete, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&p.nome)
        .bind(&p.cnpj)
        .bind(&p.telefone)
        .bind(&p.email)
        .bind(&p.responsavel)
        .bind(&p.cidade)
        .bind(&p.estado)
        .bind(p.valor_frete)
        .bind(&p.observacoes)
        .fetch_one(&self.pool)
        .await?;

        Ok(transportadora)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        p: &AtualizarTransportadoraPayload,
    ) -> Result<Option<Transportadora>, AppError> {
        let mut qb = QueryBuilder::new("UPDATE transportadoras SET updated_at = now()");

        if let Some(v) = &p.nome {
            qb.push(", nome = ").push_bind(v);
        }
        if let Some(v) = &p.cnpj {
            qb.push(", cnpj = ").push_bind(v);
        }
        if let Some(v) = &p.telefone {
            qb.push(", telefone = ").push_bind(v);
        }
        if let Some(v) = &p.email {
            qb.push(", email = ").push_bind(v);
        }
        if let Some(v) = &p.responsavel {
            qb.push(", responsavel = ").push_bind(v);
        }
        if let Some(v) = &p.cidade {
            qb.push(", cidade = ").push_bind(v);
        }
        if let Some(v) = &p.estado {
            qb.push(", estado = ").push_bind(v);
        }
        if let Some(v) = p.valor_frete {
            qb.push(", valor_frete = ").push_bind(v);
        }
        if let Some(v) = &p.observacoes {
            qb.push(", observacoes = ").push_bind(v);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let transportadora = qb
            .build_query_as::<Transportadora>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(transportadora)
    }

    pub async fn excluir(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM transportadoras WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
