// src/models/metricas.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FiltrosMetricas {
    pub operador: Option<String>,
    pub concessionaria: Option<String>,
    pub responsavel: Option<String>,
    // Balde de "dias desde a última atualização": 0-1, 2-3, 4+, 7+, 15+
    pub dias: Option<String>,
}

/// Janela de datas semiaberta calculada a partir do "agora" da requisição.
/// `minimo` é inclusivo; `maximo` é exclusivo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JanelaDias {
    pub minimo: Option<DateTime<Utc>>,
    pub maximo: Option<DateTime<Utc>>,
}

impl JanelaDias {
    /// Traduz o balde textual na janela correspondente.
    ///
    /// "2-3" cobre idade com piso de 2 ou 3 dias, ou seja
    /// `[agora-4d, agora-2d)`: um registro de 3,5 dias atrás cai aqui e
    /// ainda não em "4+".
    pub fn do_balde(balde: &str, agora: DateTime<Utc>) -> Option<JanelaDias> {
        match balde.trim() {
            // Fechado em "agora": timestamps futuros (relógio adiantado de
            // outro nó) não entram em nenhum balde.
            "0-1" => Some(JanelaDias {
                minimo: Some(agora - Duration::days(1)),
                maximo: Some(agora),
            }),
            "2-3" => Some(JanelaDias {
                minimo: Some(agora - Duration::days(4)),
                maximo: Some(agora - Duration::days(2)),
            }),
            "4+" => Some(JanelaDias {
                minimo: None,
                maximo: Some(agora - Duration::days(4)),
            }),
            "7+" => Some(JanelaDias {
                minimo: None,
                maximo: Some(agora - Duration::days(7)),
            }),
            "15+" => Some(JanelaDias {
                minimo: None,
                maximo: Some(agora - Duration::days(15)),
            }),
            _ => None,
        }
    }

    pub fn contem(&self, instante: DateTime<Utc>) -> bool {
        if let Some(minimo) = self.minimo {
            if instante < minimo {
                return false;
            }
        }
        if let Some(maximo) = self.maximo {
            if instante >= maximo {
                return false;
            }
        }
        true
    }
}

// --- Visões agregadas (somente leitura, independentes entre si) ---

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContagemPorOperador {
    pub operador: String,
    pub total: i64,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContagemPorConcessionaria {
    pub concessionaria: String,
    pub total: i64,
}

/// Dias (com piso) desde a movimentação mais recente da concessionária.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EstagnacaoConcessionaria {
    pub concessionaria: String,
    pub dias_parado: i64,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CruzamentoMetricas {
    pub concessionaria: Option<String>,
    pub responsavel: Option<String>,
    pub operador: Option<String>,
    pub total: i64,
    pub dias_parado: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PainelMetricas {
    pub por_operador: Vec<ContagemPorOperador>,
    pub por_concessionaria: Vec<ContagemPorConcessionaria>,
    pub estagnacao: Vec<EstagnacaoConcessionaria>,
    pub cruzamento: Vec<CruzamentoMetricas>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agora() -> DateTime<Utc> {
        "2026-08-30T12:00:00Z".parse().unwrap()
    }

    fn dias_atras(horas: i64) -> DateTime<Utc> {
        agora() - Duration::hours(horas)
    }

    #[test]
    fn registro_de_3_dias_e_meio_cai_no_balde_2_3() {
        let instante = dias_atras(84); // 3,5 dias
        let j23 = JanelaDias::do_balde("2-3", agora()).unwrap();
        let j4 = JanelaDias::do_balde("4+", agora()).unwrap();
        let j7 = JanelaDias::do_balde("7+", agora()).unwrap();
        let j15 = JanelaDias::do_balde("15+", agora()).unwrap();

        assert!(j23.contem(instante));
        assert!(!j4.contem(instante));
        assert!(!j7.contem(instante));
        assert!(!j15.contem(instante));
    }

    #[test]
    fn fronteiras_semiabertas() {
        let j23 = JanelaDias::do_balde("2-3", agora()).unwrap();
        // limite superior exclusivo: exatamente 2 dias atrás fica fora
        assert!(!j23.contem(dias_atras(48)));
        // um instante depois do limite inferior fica dentro
        assert!(j23.contem(dias_atras(95)));
        // limite inferior inclusivo
        assert!(j23.contem(dias_atras(96)));

        let j4 = JanelaDias::do_balde("4+", agora()).unwrap();
        assert!(!j4.contem(dias_atras(96)));
        assert!(j4.contem(dias_atras(97)));
    }

    #[test]
    fn balde_0_1_cobre_o_ultimo_dia() {
        let j01 = JanelaDias::do_balde("0-1", agora()).unwrap();
        assert!(j01.contem(dias_atras(12)));
        assert!(j01.contem(dias_atras(24)));
        assert!(!j01.contem(dias_atras(25)));
        // timestamp futuro (relógio adiantado) fica fora
        assert!(!j01.contem(agora() + Duration::hours(1)));
    }

    #[test]
    fn balde_desconhecido_vira_none() {
        assert_eq!(JanelaDias::do_balde("ontem", agora()), None);
        assert_eq!(JanelaDias::do_balde("", agora()), None);
    }
}
