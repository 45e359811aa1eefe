// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

/// Erro de validação associado a um campo do corpo do pedido.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro interno inesperado")]
    InternalServerError,

    #[error("Não autorizado")]
    Unauthorized,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("Dados inválidos: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Pedido inválido: {0}")]
    BadRequest(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| FieldError {
                    field: field.clone(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        // HashMap não tem ordem estável
        fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        AppError::Validation(fields)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, errors) = match self {
            AppError::SqlxError(ref e) => {
                tracing::error!("Erro processado: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".to_string(), vec![])
            }
            AppError::SqlxMigrateError(ref e) => {
                tracing::error!("Erro processado: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".to_string(), vec![])
            }
            AppError::Config(ref e) => {
                tracing::error!("Erro de configuração: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.".to_string(), vec![])
            }
            AppError::PasswordHashingError => {
                tracing::error!("Erro processado: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.".to_string(), vec![])
            }
            AppError::SessionError(ref e) => {
                tracing::error!("Erro de sessão: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.".to_string(), vec![])
            }
            AppError::InternalServerError => {
                tracing::error!("Erro processado: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string(), vec![])
            }
            // Mensagem genérica para não revelar se o utilizador existe
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos.".to_string(), vec![])
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Não autorizado".to_string(), vec![]),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message, vec![]),
            AppError::Validation(errors) => {
                tracing::debug!("Validação falhou: {:?}", errors);
                (StatusCode::BAD_REQUEST, "Dados inválidos.".to_string(), errors)
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, vec![]),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message, vec![]),
        };

        (status, Json(ErrorBody { message, errors })).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;

/// Verifica se o erro do sqlx corresponde a uma violação de UNIQUE.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
