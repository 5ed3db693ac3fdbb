// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UsuarioRepository,
    models::auth::{Claims, Perfil, SessaoResponse, Usuario},
};

/// Sessão resolvida: usuário + perfil ativo extraído do token assinado.
#[derive(Debug, Clone)]
pub struct Sessao {
    pub usuario: Usuario,
    pub perfil: Perfil,
}

/// Normaliza os rótulos armazenados (inclusive os legados em inglês),
/// descartando desconhecidos e duplicatas.
pub fn normalizar_perfis(brutos: &[String]) -> Vec<Perfil> {
    let mut perfis = Vec::new();
    for bruto in brutos {
        if let Some(perfil) = Perfil::de_rotulo(bruto) {
            if !perfis.contains(&perfil) {
                perfis.push(perfil);
            }
        }
    }
    perfis
}

/// Fallback por substring do e-mail quando o cadastro não tem perfis.
/// Comportamento herdado e frágil: não é fronteira de segurança, e o
/// padrão na ausência de qualquer indício é o menos privilegiado.
pub fn inferir_perfis_por_email(email: &str) -> Vec<Perfil> {
    let email = email.to_lowercase();
    if email.contains("admin") {
        vec![Perfil::Administrador]
    } else if email.contains("concessionaria") || email.contains("dealership") {
        vec![Perfil::Concessionaria]
    } else if email.contains("client") || email.contains("cliente") {
        vec![Perfil::Cliente]
    } else {
        vec![Perfil::Operador]
    }
}

/// Conjunto de perfis do usuário: o cadastro quando válido, senão a
/// inferência por e-mail.
pub fn perfis_permitidos(usuario: &Usuario) -> Vec<Perfil> {
    let cadastrados = normalizar_perfis(&usuario.perfis);
    if !cadastrados.is_empty() {
        return cadastrados;
    }
    tracing::warn!(
        email = %usuario.email,
        "Usuário sem perfis cadastrados; inferindo pelo e-mail (comportamento legado)"
    );
    inferir_perfis_por_email(&usuario.email)
}

#[derive(Clone)]
pub struct AuthService {
    usuario_repo: UsuarioRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(usuario_repo: UsuarioRepository, jwt_secret: String) -> Self {
        Self {
            usuario_repo,
            jwt_secret,
        }
    }

    pub async fn login(&self, email: &str, senha: &str) -> Result<SessaoResponse, AppError> {
        let usuario = self
            .usuario_repo
            .buscar_por_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let senha_clone = senha.to_owned();
        let hash_clone = usuario.password_hash.clone();

        // Executa a verificação de bcrypt fora do runtime async
        let senha_valida = tokio::task::spawn_blocking(move || verify(&senha_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::InvalidCredentials);
        }
        if usuario.desativado {
            return Err(AppError::UsuarioDesativado);
        }

        let perfis = perfis_permitidos(&usuario);
        // O primeiro perfil do conjunto é o ativo inicial da sessão.
        let perfil_ativo = perfis.first().copied().unwrap_or(Perfil::Operador);
        let token = self.emitir_token(usuario.id, perfil_ativo)?;

        Ok(SessaoResponse {
            token,
            perfis: perfis.iter().map(|p| p.como_str().to_string()).collect(),
            perfil_ativo: perfil_ativo.como_str().to_string(),
            trocar_senha: usuario.trocar_senha,
        })
    }

    pub async fn validar_token(&self, token: &str) -> Result<Sessao, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let usuario = self
            .usuario_repo
            .buscar_por_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if usuario.desativado {
            return Err(AppError::UsuarioDesativado);
        }

        // O perfil assinado precisa continuar dentro do conjunto permitido
        // (pode ter sido revogado depois da emissão do token).
        let perfil = Perfil::de_rotulo(&token_data.claims.perfil)
            .filter(|p| perfis_permitidos(&usuario).contains(p))
            .ok_or(AppError::InvalidToken)?;

        Ok(Sessao { usuario, perfil })
    }

    /// Reemite o token com outro perfil do conjunto permitido do usuário.
    pub fn trocar_perfil(
        &self,
        usuario: &Usuario,
        rotulo: &str,
    ) -> Result<SessaoResponse, AppError> {
        let novo_perfil = Perfil::de_rotulo(rotulo)
            .ok_or_else(|| AppError::RequisicaoInvalida(format!("Perfil desconhecido: {}", rotulo)))?;

        let perfis = perfis_permitidos(usuario);
        if !perfis.contains(&novo_perfil) {
            return Err(AppError::PerfilNaoPermitido(rotulo.to_string()));
        }

        let token = self.emitir_token(usuario.id, novo_perfil)?;
        Ok(SessaoResponse {
            token,
            perfis: perfis.iter().map(|p| p.como_str().to_string()).collect(),
            perfil_ativo: novo_perfil.como_str().to_string(),
            trocar_senha: usuario.trocar_senha,
        })
    }

    fn emitir_token(&self, usuario_id: Uuid, perfil: Perfil) -> Result<String, AppError> {
        let agora = Utc::now();
        let expira_em = agora + chrono::Duration::days(7);

        let claims = Claims {
            sub: usuario_id,
            perfil: perfil.como_str().to_string(),
            exp: expira_em.timestamp() as usize,
            iat: agora.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn usuario_com(email: &str, perfis: Vec<String>) -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            email: email.to_string(),
            nome: "Teste".to_string(),
            password_hash: String::new(),
            perfis,
            concessionaria_id: None,
            desativado: false,
            trocar_senha: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cadastro_sem_perfis_vira_operador() {
        let u = usuario_com("joao@exemplo.com", vec![]);
        assert_eq!(perfis_permitidos(&u), vec![Perfil::Operador]);
    }

    #[test]
    fn inferencia_por_substring_do_email() {
        let u = usuario_com("admin@exemplo.com", vec![]);
        assert_eq!(perfis_permitidos(&u), vec![Perfil::Administrador]);

        let u = usuario_com("loja@concessionaria.com.br", vec![]);
        assert_eq!(perfis_permitidos(&u), vec![Perfil::Concessionaria]);

        let u = usuario_com("cliente.final@exemplo.com", vec![]);
        assert_eq!(perfis_permitidos(&u), vec![Perfil::Cliente]);
    }

    #[test]
    fn perfis_cadastrados_ganham_da_inferencia() {
        let u = usuario_com("admin@exemplo.com", vec!["operador".into()]);
        assert_eq!(perfis_permitidos(&u), vec![Perfil::Operador]);
    }

    #[test]
    fn rotulos_legados_em_ingles_sao_normalizados() {
        let brutos = vec![
            "admin".to_string(),
            "operator".to_string(),
            "dealership".to_string(),
            "client".to_string(),
            "ADMINISTRADOR".to_string(), // duplicata em outra grafia
            "qualquer-coisa".to_string(),
        ];
        assert_eq!(
            normalizar_perfis(&brutos),
            vec![
                Perfil::Administrador,
                Perfil::Operador,
                Perfil::Concessionaria,
                Perfil::Cliente,
            ]
        );
    }
}
