// src/services/usuario_service.rs

use bcrypt::hash;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        paginacao::{normalizar_pagina, Paginado},
    },
    db::{
        usuario_repo::{AlteracaoUsuario, NovoUsuario},
        UsuarioRepository,
    },
    models::auth::{
        AtualizarUsuarioPayload, CriarUsuarioPayload, ListarUsuariosQuery, Perfil, Usuario,
    },
    services::auth::normalizar_perfis,
};

async fn gerar_hash(senha: String) -> Result<String, AppError> {
    // Hashing de bcrypt fora do runtime async, como no login
    let hash = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hash)
}

/// Valida e canoniza os rótulos de perfil vindos do payload.
/// O cadastro administrativo exige atribuição explícita: nada de herdar o
/// fallback por e-mail do login.
fn canonizar_perfis(brutos: &[String]) -> Result<Vec<String>, AppError> {
    for bruto in brutos {
        if Perfil::de_rotulo(bruto).is_none() {
            return Err(AppError::RequisicaoInvalida(format!(
                "Perfil desconhecido: '{}'.",
                bruto
            )));
        }
    }
    let perfis = normalizar_perfis(brutos);
    if perfis.is_empty() {
        return Err(AppError::RequisicaoInvalida(
            "Informe ao menos um perfil.".to_string(),
        ));
    }
    Ok(perfis.iter().map(|p| p.como_str().to_string()).collect())
}

#[derive(Clone)]
pub struct UsuarioService {
    repo: UsuarioRepository,
}

impl UsuarioService {
    pub fn new(repo: UsuarioRepository) -> Self {
        Self { repo }
    }

    pub async fn listar(&self, q: &ListarUsuariosQuery) -> Result<Paginado<Usuario>, AppError> {
        let (page, limit) = normalizar_pagina(q.page, q.limit);
        let (usuarios, total) = self.repo.listar(q, page, limit).await?;
        Ok(Paginado::montar(usuarios, page, limit, total))
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Usuario, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NaoEncontrado("Usuário"))
    }

    pub async fn criar(&self, payload: CriarUsuarioPayload) -> Result<Usuario, AppError> {
        let perfis = canonizar_perfis(&payload.perfis)?;
        let password_hash = gerar_hash(payload.senha).await?;

        self.repo
            .criar(&NovoUsuario {
                email: payload.email.trim(),
                nome: payload.nome.trim(),
                password_hash: &password_hash,
                perfis: &perfis,
                concessionaria_id: payload.concessionaria_id,
                desativado: payload.desativado,
                trocar_senha: payload.trocar_senha,
            })
            .await
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: AtualizarUsuarioPayload,
    ) -> Result<Usuario, AppError> {
        let perfis = match &payload.perfis {
            Some(brutos) => Some(canonizar_perfis(brutos)?),
            None => None,
        };

        // Redefinição de senha liga trocar_senha: o usuário escolhe a
        // definitiva no próximo login.
        let (password_hash, trocar_senha) = match payload.senha {
            Some(senha) => (Some(gerar_hash(senha).await?), Some(true)),
            None => (None, payload.trocar_senha),
        };

        let alteracao = AlteracaoUsuario {
            email: payload.email.as_deref().map(str::trim),
            nome: payload.nome.as_deref().map(str::trim),
            password_hash,
            perfis: perfis.as_deref(),
            concessionaria_id: payload.concessionaria_id,
            desativado: payload.desativado,
            trocar_senha,
        };

        self.repo
            .atualizar(id, &alteracao)
            .await?
            .ok_or(AppError::NaoEncontrado("Usuário"))
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.excluir(id).await? {
            return Err(AppError::NaoEncontrado("Usuário"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfis_sao_canonizados_e_validados() {
        let ok = canonizar_perfis(&["admin".into(), "operador".into()]).unwrap();
        assert_eq!(ok, vec!["administrador".to_string(), "operador".to_string()]);

        assert!(canonizar_perfis(&["gerente".into()]).is_err());
        assert!(canonizar_perfis(&[]).is_err());
    }
}
