// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Perfis de acesso do sistema. Os rótulos canônicos são os em português;
/// os aliases em inglês existem por compatibilidade com cadastros antigos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perfil {
    Administrador,
    Operador,
    Concessionaria,
    Cliente,
}

impl Perfil {
    pub fn como_str(&self) -> &'static str {
        match self {
            Perfil::Administrador => "administrador",
            Perfil::Operador => "operador",
            Perfil::Concessionaria => "concessionaria",
            Perfil::Cliente => "cliente",
        }
    }

    /// Converte um rótulo armazenado (canônico ou legado em inglês).
    pub fn de_rotulo(rotulo: &str) -> Option<Perfil> {
        match rotulo.trim().to_lowercase().as_str() {
            "administrador" | "admin" | "administrator" => Some(Perfil::Administrador),
            "operador" | "operator" => Some(Perfil::Operador),
            "concessionaria" | "dealership" => Some(Perfil::Concessionaria),
            "cliente" | "client" => Some(Perfil::Cliente),
            _ => None,
        }
    }
}

impl std::fmt::Display for Perfil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.como_str())
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,
    pub nome: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub perfis: Vec<String>,
    pub concessionaria_id: Option<Uuid>,
    pub desativado: bool,
    pub trocar_senha: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
}

// Troca do perfil ativo da sessão
#[derive(Debug, Deserialize)]
pub struct TrocarPerfilPayload {
    pub perfil: String,
}

// Resposta de autenticação com o token e o contexto da sessão
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessaoResponse {
    pub token: String,
    pub perfis: Vec<String>,
    pub perfil_ativo: String,
    pub trocar_senha: bool,
}

// Estrutura de dados ("claims") dentro do JWT.
// O perfil ativo viaja assinado junto com o id do usuário.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // Subject (ID do usuário)
    pub perfil: String, // Perfil ativo da sessão
    pub exp: usize,     // Expiration time (quando o token expira)
    pub iat: usize,     // Issued At (quando o token foi criado)
}

// --- Gestão de usuários (admin) ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarUsuarioPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,

    // Atribuição explícita: o cadastro não herda o fallback por e-mail.
    #[validate(length(min = 1, message = "Informe ao menos um perfil."))]
    pub perfis: Vec<String>,

    pub concessionaria_id: Option<Uuid>,

    #[serde(default)]
    pub desativado: bool,

    #[serde(default)]
    pub trocar_senha: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarUsuarioPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub nome: Option<String>,

    // Quando presente, redefine a senha e liga `trocar_senha`.
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: Option<String>,

    pub perfis: Option<Vec<String>>,
    pub concessionaria_id: Option<Uuid>,
    pub desativado: Option<bool>,
    pub trocar_senha: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListarUsuariosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}
