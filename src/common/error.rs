use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("{0}")]
    RegistroDuplicado(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Usuário desativado")]
    UsuarioDesativado,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Perfil '{0}' não permitido para este usuário")]
    PerfilNaoPermitido(String),

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("{0} não encontrado(a)")]
    NaoEncontrado(&'static str),

    // Exclusão bloqueada por registros dependentes (ex.: modelo em uso).
    #[error("Exclusão bloqueada: {0} veículo(s) referenciam este modelo")]
    ModeloEmUso(i64),

    #[error("Requisição inválida: {0}")]
    RequisicaoInvalida(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::RegistroDuplicado(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::UsuarioDesativado => {
                (StatusCode::UNAUTHORIZED, "Usuário desativado.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::PerfilNaoPermitido(perfil) => (
                StatusCode::FORBIDDEN,
                format!("Perfil '{}' não permitido para este usuário.", perfil),
            ),
            AppError::AcessoNegado => (
                StatusCode::FORBIDDEN,
                "Seu perfil não tem acesso a este recurso.".to_string(),
            ),
            AppError::NaoEncontrado(recurso) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", recurso))
            }
            AppError::ModeloEmUso(qtd) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Não é possível excluir: {} veículo(s) referenciam este modelo.",
                    qtd
                ),
            ),
            AppError::RequisicaoInvalida(msg) => (StatusCode::BAD_REQUEST, msg),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe só o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
