// src/services/importacao.rs
//
// Importação por CSV simples (sem aspas/escapes): a primeira linha é
// cabeçalho e é pulada; falhas de linha são coletadas como {linha, motivo}
// e não abortam o lote.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    common::error::AppError,
    models::{tabelas::SalvarModeloPayload, veiculo::CriarVeiculoPayload},
    services::{
        tabelas_service::TabelasService,
        veiculo_service::{validar_status, VeiculoService},
    },
};

const COLUNAS_MODELO: usize = 2;
const COLUNAS_VEICULO: usize = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FalhaLinha {
    pub linha: usize,
    pub motivo: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoImportacao {
    pub importados: usize,
    pub falhas: Vec<FalhaLinha>,
}

/// Linhas de dados com o número original (1-based; a linha 1 é o
/// cabeçalho). Linhas em branco são ignoradas.
pub fn linhas_de_dados(texto: &str) -> Vec<(usize, &str)> {
    texto
        .lines()
        .enumerate()
        .skip(1)
        .map(|(i, linha)| (i + 1, linha.trim_end_matches('\r')))
        .filter(|(_, linha)| !linha.trim().is_empty())
        .collect()
}

fn campo_opcional(bruto: &str) -> Option<String> {
    let aparado = bruto.trim();
    if aparado.is_empty() {
        None
    } else {
        Some(aparado.to_string())
    }
}

/// Formato de duas colunas: `marca,modelo`.
pub fn analisar_linha_modelo(linha: &str) -> Result<(String, String), String> {
    let campos: Vec<&str> = linha.split(',').collect();
    if campos.len() != COLUNAS_MODELO {
        return Err(format!(
            "Esperadas {} colunas (marca,modelo), recebidas {}.",
            COLUNAS_MODELO,
            campos.len()
        ));
    }
    let marca = campos[0].trim();
    let modelo = campos[1].trim();
    if marca.is_empty() || modelo.is_empty() {
        return Err("Marca e modelo não podem ficar vazios.".to_string());
    }
    Ok((marca.to_string(), modelo.to_string()))
}

/// Formato de dez colunas:
/// `marca,modelo,versao,cor,ano,preco,status,concessionaria,contato,observacoes`.
pub fn analisar_linha_veiculo(linha: &str) -> Result<CriarVeiculoPayload, String> {
    let campos: Vec<&str> = linha.split(',').collect();
    if campos.len() != COLUNAS_VEICULO {
        return Err(format!(
            "Esperadas {} colunas, recebidas {}.",
            COLUNAS_VEICULO,
            campos.len()
        ));
    }

    let marca = campos[0].trim();
    let modelo = campos[1].trim();
    if marca.is_empty() || modelo.is_empty() {
        return Err("Marca e modelo não podem ficar vazios.".to_string());
    }

    let ano = match campo_opcional(campos[4]) {
        Some(bruto) => Some(
            bruto
                .parse::<i32>()
                .map_err(|_| format!("Ano inválido: '{}'.", bruto))?,
        ),
        None => None,
    };

    let preco = match campo_opcional(campos[5]) {
        Some(bruto) => Some(
            bruto
                .parse::<Decimal>()
                .map_err(|_| format!("Preço inválido: '{}'.", bruto))?,
        ),
        None => None,
    };

    let status = campo_opcional(campos[6]);
    validar_status(status.as_deref()).map_err(|e| e.to_string())?;

    Ok(CriarVeiculoPayload {
        marca: marca.to_string(),
        modelo: modelo.to_string(),
        modelo_id: None,
        versao: campo_opcional(campos[2]),
        cor: campo_opcional(campos[3]),
        ano,
        preco,
        status,
        combustivel: None,
        cambio: None,
        concessionaria: campo_opcional(campos[7]),
        cidade: None,
        estado: None,
        vendedor: None,
        responsavel: None,
        operador: None,
        contato: campo_opcional(campos[8]),
        observacoes: campo_opcional(campos[9]),
        opcionais: None,
        data_entrada: None,
    })
}

#[derive(Clone)]
pub struct ImportacaoService {
    tabelas_service: TabelasService,
    veiculo_service: VeiculoService,
}

impl ImportacaoService {
    pub fn new(tabelas_service: TabelasService, veiculo_service: VeiculoService) -> Self {
        Self {
            tabelas_service,
            veiculo_service,
        }
    }

    pub async fn importar_modelos(&self, texto: &str) -> Result<ResultadoImportacao, AppError> {
        let mut importados = 0;
        let mut falhas = Vec::new();

        for (numero, linha) in linhas_de_dados(texto) {
            let (marca, modelo) = match analisar_linha_modelo(linha) {
                Ok(campos) => campos,
                Err(motivo) => {
                    falhas.push(FalhaLinha { linha: numero, motivo });
                    continue;
                }
            };

            // Duplicatas e afins entram como falha da linha, sem abortar.
            match self
                .tabelas_service
                .criar_modelo(&SalvarModeloPayload {
                    nome: modelo,
                    marca,
                })
                .await
            {
                Ok(_) => importados += 1,
                Err(e) => falhas.push(FalhaLinha {
                    linha: numero,
                    motivo: e.to_string(),
                }),
            }
        }

        Ok(ResultadoImportacao { importados, falhas })
    }

    pub async fn importar_veiculos(&self, texto: &str) -> Result<ResultadoImportacao, AppError> {
        let mut importados = 0;
        let mut falhas = Vec::new();

        for (numero, linha) in linhas_de_dados(texto) {
            let payload = match analisar_linha_veiculo(linha) {
                Ok(payload) => payload,
                Err(motivo) => {
                    falhas.push(FalhaLinha { linha: numero, motivo });
                    continue;
                }
            };

            match self.veiculo_service.criar(payload).await {
                Ok(_) => importados += 1,
                Err(e) => falhas.push(FalhaLinha {
                    linha: numero,
                    motivo: e.to_string(),
                }),
            }
        }

        Ok(ResultadoImportacao { importados, falhas })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cabecalho_e_linhas_vazias_sao_pulados() {
        let texto = "marca,modelo\r\nFIAT,ARGO\n\nVW,POLO\r\n";
        let linhas = linhas_de_dados(texto);
        assert_eq!(linhas, vec![(2, "FIAT,ARGO"), (4, "VW,POLO")]);
    }

    #[test]
    fn linha_de_modelo_valida_aridade_e_vazios() {
        assert_eq!(
            analisar_linha_modelo(" FIAT , ARGO "),
            Ok(("FIAT".to_string(), "ARGO".to_string()))
        );
        assert!(analisar_linha_modelo("FIAT").is_err());
        assert!(analisar_linha_modelo("FIAT,ARGO,EXTRA").is_err());
        assert!(analisar_linha_modelo("FIAT,").is_err());
    }

    #[test]
    fn linha_de_veiculo_com_dez_colunas() {
        let payload = analisar_linha_veiculo(
            "FIAT,ARGO,Drive 1.0,PRATA,2023,85990.50,A faturar,Auto Norte,11 99999-0000,entrega rápida",
        )
        .unwrap();
        assert_eq!(payload.marca, "FIAT");
        assert_eq!(payload.ano, Some(2023));
        assert_eq!(payload.preco, Some("85990.50".parse().unwrap()));
        assert_eq!(payload.status.as_deref(), Some("A faturar"));
        assert_eq!(payload.contato.as_deref(), Some("11 99999-0000"));
    }

    #[test]
    fn campos_opcionais_vazios_viram_none() {
        let payload =
            analisar_linha_veiculo("FIAT,ARGO,,,,,,,,").unwrap();
        assert_eq!(payload.versao, None);
        assert_eq!(payload.ano, None);
        assert_eq!(payload.preco, None);
        assert_eq!(payload.status, None);
    }

    #[test]
    fn erros_de_conversao_sao_reportados() {
        assert!(analisar_linha_veiculo("FIAT,ARGO,,,carro,,,,,").is_err());
        assert!(analisar_linha_veiculo("FIAT,ARGO,,,,caro,,,,").is_err());
        assert!(analisar_linha_veiculo("FIAT,ARGO,,,,,Vendido,,,").is_err());
        assert!(analisar_linha_veiculo("so,tres,colunas").is_err());
    }
}
