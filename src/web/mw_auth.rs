// src/web/mw_auth.rs
use crate::error::AppError;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

/// Chave da sessão onde guardamos o ID do utilizador autenticado.
pub const SESSION_USER_KEY: &str = "user_id";

// Middleware que verifica se o utilizador está logado
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<i64>(SESSION_USER_KEY).await {
        Ok(Some(user_id)) => {
            tracing::debug!("Autenticação MW: utilizador {} autenticado.", user_id);
            // Os handlers protegidos leem o ID daqui
            request.extensions_mut().insert(UserId(user_id));
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: pedido sem sessão para {}", request.uri().path());
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Autenticação MW: Erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}

// ID do utilizador autenticado, posto nas extensões por `require_auth`
#[derive(Clone, Copy, Debug)]
pub struct UserId(pub i64);
