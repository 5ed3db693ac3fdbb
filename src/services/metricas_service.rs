// src/services/metricas_service.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::MetricasRepository,
    models::metricas::{FiltrosMetricas, PainelMetricas},
};

#[derive(Clone)]
pub struct MetricasService {
    repo: MetricasRepository,
}

impl MetricasService {
    pub fn new(repo: MetricasRepository) -> Self {
        Self { repo }
    }

    /// Monta o painel: quatro visões independentes sobre a mesma coleção,
    /// todas com o mesmo "agora" para as janelas de dias.
    pub async fn painel(&self, filtros: &FiltrosMetricas) -> Result<PainelMetricas, AppError> {
        let agora = Utc::now();

        let (por_operador, por_concessionaria, estagnacao, cruzamento) = tokio::try_join!(
            self.repo.contagem_por_operador(filtros, agora),
            self.repo.contagem_por_concessionaria(filtros, agora),
            self.repo.estagnacao_por_concessionaria(filtros, agora),
            self.repo.cruzamento(filtros, agora),
        )?;

        Ok(PainelMetricas {
            por_operador,
            por_concessionaria,
            estagnacao,
            cruzamento,
        })
    }

    /// Painel restrito a uma concessionária (autoatendimento): o filtro de
    /// concessionária do chamador sobrepõe qualquer valor vindo da query.
    pub async fn painel_da_concessionaria(
        &self,
        nome: &str,
        filtros: &FiltrosMetricas,
    ) -> Result<PainelMetricas, AppError> {
        let mut restritos = filtros.clone();
        restritos.concessionaria = Some(nome.to_string());
        self.painel(&restritos).await
    }
}
