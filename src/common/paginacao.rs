// src/common/paginacao.rs

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const LIMITE_PADRAO: i64 = 20;
pub const LIMITE_MAXIMO: i64 = 100;

/// Normaliza `page`/`limit` vindos da query string.
pub fn normalizar_pagina(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(LIMITE_PADRAO).clamp(1, LIMITE_MAXIMO);
    (page, limit)
}

/// Página de resultados com total (listagens skip/limit).
/// O `total` vem de uma query COUNT separada, sem garantia de consistência
/// com a leitura da página sob escrita concorrente.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginado<T> {
    pub itens: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub has_next_page: bool,
}

impl<T> Paginado<T> {
    pub fn montar(itens: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let skip = (page - 1) * limit;
        let has_next_page = skip + (itens.len() as i64) < total;
        Self {
            itens,
            page,
            limit,
            total,
            has_next_page,
        }
    }
}

/// Página de tabela de referência: sem total, com flag de próxima página
/// calculada buscando `limit + 1` linhas e cursor de continuação.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginaTabela<T> {
    pub itens: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub cursor: Option<String>,
}

/// Cursor opaco de continuação: página já lida + chave de ordenação da
/// última linha devolvida (nome, ou marca+nome para modelos).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub pagina: i64,
    pub chave: Vec<String>,
}

impl Cursor {
    pub fn codificar(&self) -> String {
        serde_json::to_vec(self)
            .map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
            .unwrap_or_default()
    }

    /// Cursores corrompidos ou de outra versão são simplesmente ignorados
    /// (o chamador cai no caminho de OFFSET).
    pub fn decodificar(bruto: &str) -> Option<Cursor> {
        let bytes = URL_SAFE_NO_PAD.decode(bruto).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizar_pagina_aplica_padroes_e_limites() {
        assert_eq!(normalizar_pagina(None, None), (1, LIMITE_PADRAO));
        assert_eq!(normalizar_pagina(Some(0), Some(0)), (1, 1));
        assert_eq!(normalizar_pagina(Some(-3), Some(9999)), (1, LIMITE_MAXIMO));
        assert_eq!(normalizar_pagina(Some(7), Some(50)), (7, 50));
    }

    #[test]
    fn has_next_page_respeita_o_total() {
        // skip + retornados < total => tem próxima página
        let p = Paginado::montar(vec![1, 2, 3], 1, 3, 10);
        assert!(p.has_next_page);

        // última página exata
        let p = Paginado::montar(vec![1, 2, 3], 4, 3, 12);
        assert!(!p.has_next_page);

        // página além do fim: vazia, sem próxima
        let p = Paginado::montar(Vec::<i32>::new(), 9, 3, 12);
        assert!(!p.has_next_page);

        // skip + retornados nunca excede o total nas páginas válidas
        let p = Paginado::montar(vec![1, 2], 5, 3, 14);
        assert!((p.page - 1) * p.limit + p.itens.len() as i64 <= p.total);
    }

    #[test]
    fn cursor_codifica_e_decodifica() {
        let cursor = Cursor {
            pagina: 3,
            chave: vec!["FIAT".into(), "ARGO".into()],
        };
        let opaco = cursor.codificar();
        assert_eq!(Cursor::decodificar(&opaco), Some(cursor));
    }

    #[test]
    fn cursor_corrompido_e_descartado() {
        assert_eq!(Cursor::decodificar("###nao-e-base64###"), None);
        assert_eq!(Cursor::decodificar(&URL_SAFE_NO_PAD.encode(b"{]")), None);
    }
}
