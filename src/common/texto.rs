// src/common/texto.rs

/// Sanitização aplicada na escrita das tabelas de referência:
/// apara as pontas, colapsa espaços internos e põe em caixa alta.
pub fn normalizar_nome(bruto: &str) -> String {
    bruto
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Apara um campo opcional; strings vazias viram `None`.
pub fn aparar_opcional(valor: Option<String>) -> Option<String> {
    valor
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizar_nome_colapsa_e_capitaliza() {
        assert_eq!(normalizar_nome("  azul   claro "), "AZUL CLARO");
        assert_eq!(normalizar_nome("Fiat"), "FIAT");
        assert_eq!(normalizar_nome("   "), "");
    }

    #[test]
    fn aparar_opcional_descarta_vazios() {
        assert_eq!(aparar_opcional(Some("  x ".into())), Some("x".into()));
        assert_eq!(aparar_opcional(Some("   ".into())), None);
        assert_eq!(aparar_opcional(None), None);
    }
}
