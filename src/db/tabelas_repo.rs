// src/db/tabelas_repo.rs
//
// Repositório genérico das tabelas de referência (marcas, modelos, cores).
// A paginação por cursor é uma só, parametrizada por tabela e chave de
// ordenação, em vez de três cópias da mesma lógica de skip/cursor.

use sqlx::{postgres::PgRow, Executor, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        paginacao::{Cursor, PaginaTabela},
    },
    models::tabelas::{Cor, Marca, Modelo},
};

/// O que uma tabela de referência precisa expor para a paginação genérica.
pub trait TabelaReferencia: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABELA: &'static str;
    /// Colunas de ordenação/desempate, na ordem da cláusula ORDER BY.
    const COLUNAS_ORDENACAO: &'static [&'static str];
    /// Valores das colunas de ordenação desta linha (vira a chave do cursor).
    fn chave_ordenacao(&self) -> Vec<String>;
}

impl TabelaReferencia for Marca {
    const TABELA: &'static str = "marcas";
    const COLUNAS_ORDENACAO: &'static [&'static str] = &["nome"];
    fn chave_ordenacao(&self) -> Vec<String> {
        vec![self.nome.clone()]
    }
}

impl TabelaReferencia for Cor {
    const TABELA: &'static str = "cores";
    const COLUNAS_ORDENACAO: &'static [&'static str] = &["nome"];
    fn chave_ordenacao(&self) -> Vec<String> {
        vec![self.nome.clone()]
    }
}

impl TabelaReferencia for Modelo {
    const TABELA: &'static str = "modelos";
    const COLUNAS_ORDENACAO: &'static [&'static str] = &["marca", "nome"];
    fn chave_ordenacao(&self) -> Vec<String> {
        vec![self.marca.clone(), self.nome.clone()]
    }
}

/// O cursor só continua a leitura quando aponta exatamente para a página
/// anterior; fora disso a recuperação é um OFFSET a partir do início
/// (O(page × limit), sem estado entre requisições).
pub fn cursor_aproveitavel(cursor: Option<&str>, page: i64, colunas: usize) -> Option<Cursor> {
    cursor
        .and_then(Cursor::decodificar)
        .filter(|c| c.pagina == page - 1 && c.chave.len() == colunas)
}

#[derive(Clone)]
pub struct TabelasRepository {
    pool: PgPool,
}

impl TabelasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar<T: TabelaReferencia>(
        &self,
        page: i64,
        limit: i64,
        cursor: Option<&str>,
    ) -> Result<PaginaTabela<T>, AppError> {
        let continuacao = cursor_aproveitavel(cursor, page, T::COLUNAS_ORDENACAO.len());

        let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", T::TABELA));

        if let Some(c) = &continuacao {
            // Keyset: segue da última linha vista, comparando a tupla inteira.
            qb.push(" WHERE (");
            for (i, coluna) in T::COLUNAS_ORDENACAO.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                qb.push(*coluna);
            }
            qb.push(") > (");
            for (i, valor) in c.chave.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                qb.push_bind(valor.clone());
            }
            qb.push(")");
        }

        qb.push(" ORDER BY ");
        for (i, coluna) in T::COLUNAS_ORDENACAO.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*coluna);
            qb.push(" ASC");
        }

        // limit + 1 para detectar a próxima página sem um COUNT extra.
        qb.push(" LIMIT ");
        qb.push_bind(limit + 1);
        if continuacao.is_none() && page > 1 {
            qb.push(" OFFSET ");
            qb.push_bind((page - 1) * limit);
        }

        let mut linhas: Vec<T> = qb.build_query_as::<T>().fetch_all(&self.pool).await?;
        let has_next_page = linhas.len() as i64 > limit;
        linhas.truncate(limit as usize);

        let proximo_cursor = if has_next_page {
            linhas.last().map(|linha| {
                Cursor {
                    pagina: page,
                    chave: linha.chave_ordenacao(),
                }
                .codificar()
            })
        } else {
            None
        };

        Ok(PaginaTabela {
            itens: linhas,
            page,
            limit,
            has_next_page,
            cursor: proximo_cursor,
        })
    }

    // ---
    // Marcas
    // ---

    pub async fn criar_marca(&self, nome: &str) -> Result<Marca, AppError> {
        sqlx::query_as::<_, Marca>("INSERT INTO marcas (nome) VALUES ($1) RETURNING *")
            .bind(nome)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| mapear_duplicado(e, format!("Marca '{}' já cadastrada.", nome)))
    }

    pub async fn buscar_marca(&self, id: Uuid) -> Result<Option<Marca>, AppError> {
        let marca = sqlx::query_as::<_, Marca>("SELECT * FROM marcas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(marca)
    }

    pub async fn atualizar_marca(&self, id: Uuid, nome: &str) -> Result<Option<Marca>, AppError> {
        sqlx::query_as::<_, Marca>(
            "UPDATE marcas SET nome = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(nome)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| mapear_duplicado(e, format!("Marca '{}' já cadastrada.", nome)))
    }

    pub async fn excluir_marca(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM marcas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    // ---
    // Cores
    // ---

    pub async fn criar_cor(&self, nome: &str, hex: Option<&str>) -> Result<Cor, AppError> {
        sqlx::query_as::<_, Cor>("INSERT INTO cores (nome, hex) VALUES ($1, $2) RETURNING *")
            .bind(nome)
            .bind(hex)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| mapear_duplicado(e, format!("Cor '{}' já cadastrada.", nome)))
    }

    pub async fn buscar_cor(&self, id: Uuid) -> Result<Option<Cor>, AppError> {
        let cor = sqlx::query_as::<_, Cor>("SELECT * FROM cores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cor)
    }

    pub async fn atualizar_cor(
        &self,
        id: Uuid,
        nome: &str,
        hex: Option<&str>,
    ) -> Result<Option<Cor>, AppError> {
        sqlx::query_as::<_, Cor>(
            "UPDATE cores SET nome = $1, hex = $2, updated_at = now() WHERE id = $3 RETURNING *",
        )
        .bind(nome)
        .bind(hex)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| mapear_duplicado(e, format!("Cor '{}' já cadastrada.", nome)))
    }

    pub async fn excluir_cor(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM cores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    // ---
    // Modelos
    // ---
    // As escritas de modelos aceitam um executor externo para rodarem na
    // mesma transação do cascateamento sobre os veículos.

    pub async fn criar_modelo<'e, E>(
        &self,
        executor: E,
        nome: &str,
        marca: &str,
    ) -> Result<Modelo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Modelo>(
            "INSERT INTO modelos (nome, marca) VALUES ($1, $2) RETURNING *",
        )
        .bind(nome)
        .bind(marca)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            mapear_duplicado(e, format!("Modelo '{}' já cadastrado para a marca '{}'.", nome, marca))
        })
    }

    pub async fn buscar_modelo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Modelo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let modelo = sqlx::query_as::<_, Modelo>("SELECT * FROM modelos WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(modelo)
    }

    pub async fn atualizar_modelo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: &str,
        marca: &str,
    ) -> Result<Option<Modelo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Modelo>(
            "UPDATE modelos SET nome = $1, marca = $2, updated_at = now() WHERE id = $3 RETURNING *",
        )
        .bind(nome)
        .bind(marca)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            mapear_duplicado(e, format!("Modelo '{}' já cadastrado para a marca '{}'.", nome, marca))
        })
    }

    pub async fn excluir_modelo<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM modelos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}

fn mapear_duplicado(e: sqlx::Error, mensagem: String) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::RegistroDuplicado(mensagem);
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_so_continua_a_pagina_seguinte() {
        let cursor = Cursor {
            pagina: 2,
            chave: vec!["FIAT".into(), "ARGO".into()],
        };
        let opaco = cursor.codificar();

        // página 3 aproveita o cursor da página 2
        assert!(cursor_aproveitavel(Some(&opaco), 3, 2).is_some());
        // salto para a página 5 cai no caminho de OFFSET
        assert!(cursor_aproveitavel(Some(&opaco), 5, 2).is_none());
        // aridade errada da chave também invalida
        assert!(cursor_aproveitavel(Some(&opaco), 3, 1).is_none());
        assert!(cursor_aproveitavel(None, 3, 2).is_none());
    }
}
