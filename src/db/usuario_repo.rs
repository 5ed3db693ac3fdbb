// src/db/usuario_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{ListarUsuariosQuery, Usuario},
};

#[derive(Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

pub struct NovoUsuario<'a> {
    pub email: &'a str,
    pub nome: &'a str,
    pub password_hash: &'a str,
    pub perfis: &'a [String],
    pub concessionaria_id: Option<Uuid>,
    pub desativado: bool,
    pub trocar_senha: bool,
}

/// Campos alteráveis; a senha chega já como hash.
#[derive(Default)]
pub struct AlteracaoUsuario<'a> {
    pub email: Option<&'a str>,
    pub nome: Option<&'a str>,
    pub password_hash: Option<String>,
    pub perfis: Option<&'a [String]>,
    pub concessionaria_id: Option<Uuid>,
    pub desativado: Option<bool>,
    pub trocar_senha: Option<bool>,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let usuario =
            sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE lower(email) = lower($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(usuario)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn listar(
        &self,
        q: &ListarUsuariosQuery,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Usuario>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM usuarios WHERE 1=1");
        Self::aplicar_filtros(&mut qb, q);
        qb.push(" ORDER BY email ASC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind((page - 1) * limit);

        let usuarios = qb.build_query_as::<Usuario>().fetch_all(&self.pool).await?;

        let mut qb_total = QueryBuilder::new("SELECT COUNT(*) FROM usuarios WHERE 1=1");
        Self::aplicar_filtros(&mut qb_total, q);
        let total: i64 = qb_total
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((usuarios, total))
    }

    fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, q: &ListarUsuariosQuery) {
        if let Some(busca) = q.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let padrao = format!("%{}%", busca);
            qb.push(" AND (email ILIKE ")
                .push_bind(padrao.clone())
                .push(" OR nome ILIKE ")
                .push_bind(padrao)
                .push(")");
        }
    }

    pub async fn criar(&self, novo: &NovoUsuario<'_>) -> Result<Usuario, AppError> {
        sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (
                email, nome, password_hash, perfis, concessionaria_id,
                desativado, trocar_senha
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(novo.email)
        .bind(novo.nome)
        .bind(novo.password_hash)
        .bind(novo.perfis)
        .bind(novo.concessionaria_id)
        .bind(novo.desativado)
        .bind(novo.trocar_senha)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        alteracao: &AlteracaoUsuario<'_>,
    ) -> Result<Option<Usuario>, AppError> {
        let mut qb = QueryBuilder::new("UPDATE usuarios SET updated_at = now()");

        if let Some(v) = alteracao.email {
            qb.push(", email = ").push_bind(v);
        }
        if let Some(v) = alteracao.nome {
            qb.push(", nome = ").push_bind(v);
        }
        if let Some(v) = &alteracao.password_hash {
            qb.push(", password_hash = ").push_bind(v);
        }
        if let Some(v) = alteracao.perfis {
            qb.push(", perfis = ").push_bind(v);
        }
        if let Some(v) = alteracao.concessionaria_id {
            qb.push(", concessionaria_id = ").push_bind(v);
        }
        if let Some(v) = alteracao.desativado {
            qb.push(", desativado = ").push_bind(v);
        }
        if let Some(v) = alteracao.trocar_senha {
            qb.push(", trocar_senha = ").push_bind(v);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Usuario>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::EmailAlreadyExists;
                    }
                }
                e.into()
            })
    }

    pub async fn excluir(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
