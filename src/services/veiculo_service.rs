// src/services/veiculo_service.rs

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        paginacao::{normalizar_pagina, Paginado},
        texto::aparar_opcional,
    },
    db::VeiculoRepository,
    models::veiculo::{
        AtualizarVeiculoPayload, CriarVeiculoPayload, ListarVeiculosQuery, Veiculo,
        CAMBIO_PADRAO, COMBUSTIVEL_PADRAO, STATUS_PADRAO, STATUS_VALIDOS,
    },
};

/// Status fora do enumerado são rejeitados na borda de escrita.
pub fn validar_status(status: Option<&str>) -> Result<(), AppError> {
    match status {
        Some(s) if !STATUS_VALIDOS.contains(&s) => Err(AppError::RequisicaoInvalida(format!(
            "Status inválido: '{}'. Valores aceitos: {}.",
            s,
            STATUS_VALIDOS.join(", ")
        ))),
        _ => Ok(()),
    }
}

fn validar_preco(preco: Option<rust_decimal::Decimal>) -> Result<(), AppError> {
    if let Some(p) = preco {
        if p.is_sign_negative() {
            return Err(AppError::RequisicaoInvalida(
                "O preço não pode ser negativo.".to_string(),
            ));
        }
    }
    Ok(())
}

/// Preenche os campos opcionais de cadastro com os padrões de negócio.
pub fn aplicar_padroes(payload: &mut CriarVeiculoPayload, hoje: chrono::NaiveDate) {
    payload.preco.get_or_insert(rust_decimal::Decimal::ZERO);
    payload
        .status
        .get_or_insert_with(|| STATUS_PADRAO.to_string());
    payload
        .combustivel
        .get_or_insert_with(|| COMBUSTIVEL_PADRAO.to_string());
    payload
        .cambio
        .get_or_insert_with(|| CAMBIO_PADRAO.to_string());
    payload.data_entrada.get_or_insert(hoje);
}

#[derive(Clone)]
pub struct VeiculoService {
    repo: VeiculoRepository,
}

impl VeiculoService {
    pub fn new(repo: VeiculoRepository) -> Self {
        Self { repo }
    }

    pub async fn listar(&self, q: &ListarVeiculosQuery) -> Result<Paginado<Veiculo>, AppError> {
        let (page, limit) = normalizar_pagina(q.page, q.limit);
        let (veiculos, total) = self.repo.listar(q, page, limit).await?;
        Ok(Paginado::montar(veiculos, page, limit, total))
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Veiculo, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NaoEncontrado("Veículo"))
    }

    pub async fn criar(&self, mut payload: CriarVeiculoPayload) -> Result<Veiculo, AppError> {
        validar_status(payload.status.as_deref())?;
        validar_preco(payload.preco)?;
        aplicar_padroes(&mut payload, chrono::Utc::now().date_naive());

        payload.marca = payload.marca.trim().to_string();
        payload.modelo = payload.modelo.trim().to_string();
        payload.versao = aparar_opcional(payload.versao);
        payload.cor = aparar_opcional(payload.cor);
        payload.concessionaria = aparar_opcional(payload.concessionaria);
        payload.cidade = aparar_opcional(payload.cidade);
        payload.estado = aparar_opcional(payload.estado);
        payload.vendedor = aparar_opcional(payload.vendedor);
        payload.responsavel = aparar_opcional(payload.responsavel);
        payload.operador = aparar_opcional(payload.operador);
        payload.contato = aparar_opcional(payload.contato);
        payload.observacoes = aparar_opcional(payload.observacoes);
        payload.opcionais = aparar_opcional(payload.opcionais);

        self.repo.criar(&payload).await
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &AtualizarVeiculoPayload,
    ) -> Result<Veiculo, AppError> {
        validar_status(payload.status.as_deref())?;
        validar_preco(payload.preco)?;

        self.repo
            .atualizar(id, payload)
            .await?
            .ok_or(AppError::NaoEncontrado("Veículo"))
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.excluir(id).await? {
            return Err(AppError::NaoEncontrado("Veículo"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn status_fora_do_enumerado_e_rejeitado() {
        assert!(validar_status(None).is_ok());
        assert!(validar_status(Some("A faturar")).is_ok());
        assert!(validar_status(Some("Refaturamento")).is_ok());
        assert!(validar_status(Some("Licenciado")).is_ok());
        assert!(validar_status(Some("Vendido")).is_err());
        assert!(validar_status(Some("")).is_err());
    }

    #[test]
    fn preco_negativo_e_rejeitado() {
        assert!(validar_preco(None).is_ok());
        assert!(validar_preco(Some(Decimal::ZERO)).is_ok());
        assert!(validar_preco(Some(Decimal::new(-1, 0))).is_err());
    }

    #[test]
    fn padroes_so_preenchem_campos_ausentes() {
        let mut payload = CriarVeiculoPayload {
            marca: "Fiat".to_string(),
            modelo: "Argo".to_string(),
            modelo_id: None,
            versao: None,
            cor: None,
            ano: None,
            preco: None,
            status: Some("Licenciado".to_string()),
            combustivel: None,
            cambio: None,
            concessionaria: None,
            cidade: None,
            estado: None,
            vendedor: None,
            responsavel: None,
            operador: None,
            contato: None,
            observacoes: None,
            opcionais: None,
            data_entrada: None,
        };
        let hoje = chrono::NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        aplicar_padroes(&mut payload, hoje);

        assert_eq!(payload.preco, Some(Decimal::ZERO));
        assert_eq!(payload.status.as_deref(), Some("Licenciado"));
        assert_eq!(payload.combustivel.as_deref(), Some(COMBUSTIVEL_PADRAO));
        assert_eq!(payload.cambio.as_deref(), Some(CAMBIO_PADRAO));
        assert_eq!(payload.data_entrada, Some(hoje));
    }
}
