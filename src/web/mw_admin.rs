// src/web/mw_admin.rs
use crate::{
    error::AppError,
    services::user_service,
    state::AppState,
    web::mw_auth::UserId,
};
use axum::{
    extract::{Extension, Request, State},
    middleware::Next,
    response::Response,
};

/// Middleware que só deixa passar administradores.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_admin(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    tracing::debug!("Admin MW: Verificando permissão de admin para {}", user_id);

    match user_service::find_user_by_id(&state.db_pool, user_id).await? {
        Some(user) if user.is_admin => {
            tracing::debug!("Admin MW: Acesso admin concedido para {}", user.username);
            Ok(next.run(request).await)
        }
        Some(user) => {
            tracing::warn!(
                "Admin MW: Acesso negado para {} em {} {}",
                user.username,
                request.method(),
                request.uri().path()
            );
            Err(AppError::Forbidden("Apenas administradores podem realizar esta ação".into()))
        }
        // A sessão aponta para um utilizador que já não existe
        None => {
            tracing::warn!("Admin MW: utilizador {} da sessão não existe.", user_id);
            Err(AppError::Unauthorized)
        }
    }
}
