// src/middleware/rbac.rs
//
// Autorização por perfil: o roteador mapeia cada prefixo de recurso para
// uma regra de acesso, e os handlers declaram a regra como extrator.
// O administrador passa em todas as regras.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::Perfil, services::auth::Sessao};

/// O trait que define uma regra de acesso por perfil.
pub trait RegraAcesso: Send + Sync + 'static {
    fn permitidos() -> &'static [Perfil];
}

/// O extrator (guardião): 401 sem sessão, 403 com perfil insuficiente.
pub struct ExigePerfil<T>(PhantomData<T>);

impl<T, S> FromRequestParts<S> for ExigePerfil<T>
where
    T: RegraAcesso,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let sessao = parts
            .extensions
            .get::<Sessao>()
            .ok_or(AppError::InvalidToken)?;

        if !perfil_atende::<T>(sessao.perfil) {
            return Err(AppError::AcessoNegado);
        }

        Ok(ExigePerfil(PhantomData))
    }
}

pub fn perfil_atende<T: RegraAcesso>(perfil: Perfil) -> bool {
    perfil == Perfil::Administrador || T::permitidos().contains(&perfil)
}

// ---
// DEFINIÇÃO DAS REGRAS (TIPOS)
// ---

/// Painéis e gestão administrativa.
pub struct AcessoAdmin;
impl RegraAcesso for AcessoAdmin {
    fn permitidos() -> &'static [Perfil] {
        &[Perfil::Administrador]
    }
}

/// Operação do inventário: veículos, tabelas de referência, cadastros.
pub struct AcessoGestao;
impl RegraAcesso for AcessoGestao {
    fn permitidos() -> &'static [Perfil] {
        &[Perfil::Operador]
    }
}

/// Autoatendimento da concessionária.
pub struct AcessoConcessionaria;
impl RegraAcesso for AcessoConcessionaria {
    fn permitidos() -> &'static [Perfil] {
        &[Perfil::Concessionaria]
    }
}

/// Leitura do inventário (inclui o perfil cliente).
pub struct AcessoLeitura;
impl RegraAcesso for AcessoLeitura {
    fn permitidos() -> &'static [Perfil] {
        &[
            Perfil::Operador,
            Perfil::Concessionaria,
            Perfil::Cliente,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrador_passa_em_todas_as_regras() {
        assert!(perfil_atende::<AcessoAdmin>(Perfil::Administrador));
        assert!(perfil_atende::<AcessoGestao>(Perfil::Administrador));
        assert!(perfil_atende::<AcessoConcessionaria>(Perfil::Administrador));
        assert!(perfil_atende::<AcessoLeitura>(Perfil::Administrador));
    }

    #[test]
    fn demais_perfis_ficam_confinados_ao_proprio_prefixo() {
        assert!(!perfil_atende::<AcessoAdmin>(Perfil::Operador));
        assert!(!perfil_atende::<AcessoAdmin>(Perfil::Concessionaria));

        assert!(perfil_atende::<AcessoGestao>(Perfil::Operador));
        assert!(!perfil_atende::<AcessoGestao>(Perfil::Concessionaria));

        assert!(perfil_atende::<AcessoConcessionaria>(Perfil::Concessionaria));
        assert!(!perfil_atende::<AcessoConcessionaria>(Perfil::Cliente));

        assert!(perfil_atende::<AcessoLeitura>(Perfil::Cliente));
    }
}
