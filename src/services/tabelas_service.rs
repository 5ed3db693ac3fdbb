// src/services/tabelas_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        paginacao::{normalizar_pagina, PaginaTabela},
        texto::normalizar_nome,
    },
    db::{tabelas_repo::TabelaReferencia, TabelasRepository, VeiculoRepository},
    models::tabelas::{
        Cor, ListarTabelaQuery, Marca, Modelo, ModeloAtualizado, SalvarCorPayload,
        SalvarMarcaPayload, SalvarModeloPayload,
    },
};

fn exigir_nome(bruto: &str) -> Result<String, AppError> {
    let nome = normalizar_nome(bruto);
    if nome.is_empty() {
        return Err(AppError::RequisicaoInvalida(
            "O nome não pode ficar vazio após a sanitização.".to_string(),
        ));
    }
    Ok(nome)
}

/// O cascateamento só roda quando nome/marca de fato mudaram; edições
/// idempotentes não encostam nos veículos.
fn precisa_cascatear(atual: &Modelo, novo: &Modelo) -> bool {
    atual.nome != novo.nome || atual.marca != novo.marca
}

/// Exclusão de modelo bloqueada enquanto houver veículos dependentes.
fn exigir_sem_dependentes(dependentes: i64) -> Result<(), AppError> {
    if dependentes > 0 {
        return Err(AppError::ModeloEmUso(dependentes));
    }
    Ok(())
}

#[derive(Clone)]
pub struct TabelasService {
    repo: TabelasRepository,
    veiculo_repo: VeiculoRepository,
    pool: PgPool,
}

impl TabelasService {
    pub fn new(repo: TabelasRepository, veiculo_repo: VeiculoRepository, pool: PgPool) -> Self {
        Self {
            repo,
            veiculo_repo,
            pool,
        }
    }

    pub async fn listar<T: TabelaReferencia>(
        &self,
        q: &ListarTabelaQuery,
    ) -> Result<PaginaTabela<T>, AppError> {
        let (page, limit) = normalizar_pagina(q.page, q.limit);
        self.repo.listar::<T>(page, limit, q.cursor.as_deref()).await
    }

    // ---
    // Marcas
    // ---

    pub async fn criar_marca(&self, p: &SalvarMarcaPayload) -> Result<Marca, AppError> {
        self.repo.criar_marca(&exigir_nome(&p.nome)?).await
    }

    pub async fn buscar_marca(&self, id: Uuid) -> Result<Marca, AppError> {
        self.repo
            .buscar_marca(id)
            .await?
            .ok_or(AppError::NaoEncontrado("Marca"))
    }

    pub async fn atualizar_marca(&self, id: Uuid, p: &SalvarMarcaPayload) -> Result<Marca, AppError> {
        self.repo
            .atualizar_marca(id, &exigir_nome(&p.nome)?)
            .await?
            .ok_or(AppError::NaoEncontrado("Marca"))
    }

    pub async fn excluir_marca(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.excluir_marca(id).await? {
            return Err(AppError::NaoEncontrado("Marca"));
        }
        Ok(())
    }

    // ---
    // Cores
    // ---

    pub async fn criar_cor(&self, p: &SalvarCorPayload) -> Result<Cor, AppError> {
        // O hex é preservado exatamente como enviado.
        self.repo
            .criar_cor(&exigir_nome(&p.nome)?, p.hex.as_deref())
            .await
    }

    pub async fn buscar_cor(&self, id: Uuid) -> Result<Cor, AppError> {
        self.repo
            .buscar_cor(id)
            .await?
            .ok_or(AppError::NaoEncontrado("Cor"))
    }

    pub async fn atualizar_cor(&self, id: Uuid, p: &SalvarCorPayload) -> Result<Cor, AppError> {
        self.repo
            .atualizar_cor(id, &exigir_nome(&p.nome)?, p.hex.as_deref())
            .await?
            .ok_or(AppError::NaoEncontrado("Cor"))
    }

    pub async fn excluir_cor(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.excluir_cor(id).await? {
            return Err(AppError::NaoEncontrado("Cor"));
        }
        Ok(())
    }

    // ---
    // Modelos
    // ---

    pub async fn criar_modelo(&self, p: &SalvarModeloPayload) -> Result<Modelo, AppError> {
        self.repo
            .criar_modelo(&self.pool, &exigir_nome(&p.nome)?, &exigir_nome(&p.marca)?)
            .await
    }

    pub async fn buscar_modelo(&self, id: Uuid) -> Result<Modelo, AppError> {
        self.repo
            .buscar_modelo(&self.pool, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Modelo"))
    }

    /// Edição de modelo com cascateamento: a linha de `modelos` e as cópias
    /// desnormalizadas marca/modelo dos veículos dependentes mudam na mesma
    /// transação. Ou tudo entra, ou nada entra — sem a janela de falha
    /// parcial do sistema antigo.
    pub async fn atualizar_modelo(
        &self,
        id: Uuid,
        p: &SalvarModeloPayload,
    ) -> Result<ModeloAtualizado, AppError> {
        let nome = exigir_nome(&p.nome)?;
        let marca = exigir_nome(&p.marca)?;

        let mut tx = self.pool.begin().await?;

        let atual = self
            .repo
            .buscar_modelo(&mut *tx, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Modelo"))?;

        let modelo = self
            .repo
            .atualizar_modelo(&mut *tx, id, &nome, &marca)
            .await?
            .ok_or(AppError::NaoEncontrado("Modelo"))?;

        let veiculos_atualizados = if precisa_cascatear(&atual, &modelo) {
            self.veiculo_repo
                .sincronizar_denormalizados(&mut *tx, id, &modelo.marca, &modelo.nome)
                .await?
        } else {
            0
        };

        tx.commit().await?;

        if veiculos_atualizados > 0 {
            tracing::info!(
                modelo_id = %id,
                veiculos_atualizados,
                "Cascateamento de modelo aplicado aos veículos dependentes"
            );
        }

        Ok(ModeloAtualizado {
            modelo,
            veiculos_atualizados,
        })
    }

    /// Exclusão bloqueada enquanto houver veículos apontando para o modelo.
    pub async fn excluir_modelo(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let dependentes = self.veiculo_repo.contar_por_modelo(&mut *tx, id).await?;
        exigir_sem_dependentes(dependentes)?;

        if !self.repo.excluir_modelo(&mut *tx, id).await? {
            return Err(AppError::NaoEncontrado("Modelo"));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn modelo_com(nome: &str, marca: &str) -> Modelo {
        Modelo {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            marca: marca.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cascateamento_so_quando_nome_ou_marca_mudam() {
        let atual = modelo_com("ARGO", "FIAT");

        assert!(precisa_cascatear(&atual, &modelo_com("ARGO DRIVE", "FIAT")));
        assert!(precisa_cascatear(&atual, &modelo_com("ARGO", "VW")));
        // edição idempotente não encosta nos veículos
        assert!(!precisa_cascatear(&atual, &modelo_com("ARGO", "FIAT")));
    }

    #[test]
    fn exclusao_bloqueada_com_dependentes() {
        assert!(exigir_sem_dependentes(0).is_ok());

        let erro = exigir_sem_dependentes(3).unwrap_err();
        // a contagem de veículos dependentes viaja no erro (vira 400)
        assert!(matches!(erro, AppError::ModeloEmUso(3)));
    }
}
