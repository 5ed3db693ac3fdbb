// src/db/concessionaria_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::concessionaria::{
        AtualizarConcessionariaPayload, Concessionaria, CriarConcessionariaPayload,
        ListarConcessionariasQuery,
    },
};

#[derive(Clone)]
pub struct ConcessionariaRepository {
    pool: PgPool,
}

impl ConcessionariaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, q: &ListarConcessionariasQuery) {
        if let Some(ativa) = q.ativa {
            qb.push(" AND ativa = ").push_bind(ativa);
        }
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
        q: &ListarConcessionariasQuery,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Concessionaria>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM concessionarias WHERE 1=1");
        Self::aplicar_filtros(&mut qb, q);
        qb.push(" ORDER BY nome ASC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind((page - 1) * limit);

        let concessionarias = qb
            .build_query_as::<Concessionaria>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb_total = QueryBuilder::new("SELECT COUNT(*) FROM concessionarias WHERE 1=1");
        Self::aplicar_filtros(&mut qb_total, q);
        let total: i64 = qb_total
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((concessionarias, total))
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Concessionaria>, AppError> {
        let concessionaria =
            sqlx::query_as::<_, Concessionaria>("SELECT * FROM concessionarias WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(concessionaria)
    }

    pub async fn criar(
        &self,
        p: &CriarConcessionariaPayload,
    ) -> Result<Concessionaria, AppError> {
        let concessionaria = sqlx::query_as::<_, Concessionaria>(
            r#"
            INSERT INTO concessionarias (
                nome, razao_social, cnpj, endereco, cidade, estado,
                telefone, email, responsavel, ativa
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&p.nome)
        .bind(&p.razao_social)
        .bind(&p.cnpj)
        .bind(&p.endereco)
        .bind(&p.cidade)
        .bind(&p.estado)
        .bind(&p.telefone)
        .bind(&p.email)
        .bind(&p.responsavel)
        .bind(p.ativa)
        .fetch_one(&self.pool)
        .await?;

        Ok(concessionaria)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        p: &AtualizarConcessionariaPayload,
    ) -> Result<Option<Concessionaria>, AppError> {
        let mut qb = QueryBuilder::new("UPDATE concessionarias SET updated_at = now()");

        if let Some(v) = &p.nome {
            qb.push(", nome = ").push_bind(v);
        }
        if let Some(v) = &p.razao_social {
            qb.push(", razao_social = ").push_bind(v);
        }
        if let Some(v) = &p.cnpj {
            qb.push(", cnpj = ").push_bind(v);
        }
        if let Some(v) = &p.endereco {
            qb.push(", endereco = ").push_bind(v);
        }
        if let Some(v) = &p.cidade {
            qb.push(", cidade = ").push_bind(v);
        }
        if let Some(v) = &p.estado {
            qb.push(", estado = ").push_bind(v);
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
        if let Some(v) = p.ativa {
            qb.push(", ativa = ").push_bind(v);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let concessionaria = qb
            .build_query_as::<Concessionaria>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(concessionaria)
    }

    pub async fn excluir(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM concessionarias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
