// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginPayload, User},
    services::{auth_service, class_service, report_service, student_service, user_service},
    state::AppState,
    web::{extract::ValidatedJson, mw_auth::{UserId, SESSION_USER_KEY}},
};
use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_sessions::Session;

// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<LoginPayload>,
) -> AppResult<Json<User>> {
    tracing::info!("Tentativa de login para: {}", payload.username);

    let user = auth_service::authenticate(&state.db_pool, payload.username.trim(), &payload.password).await?;

    // Gera novo ID de sessão (evita fixação de sessão)
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

    tracing::info!("✅ Login bem-sucedido para: {}", user.username);
    Ok(Json(user))
}

// POST /api/logout
pub async fn handle_logout(session: Session) -> AppResult<Json<Value>> {
    let user_id: Option<i64> = session.get(SESSION_USER_KEY).await.ok().flatten();

    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    match user_id {
        Some(id) => tracing::info!("🚪 Utilizador {} desligado.", id),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }
    Ok(Json(json!({ "message": "Sessão encerrada" })))
}

// GET /api/user
pub async fn current_user(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Json<User>> {
    let user = user_service::find_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("user_id {} da sessão não existe na DB.", user_id);
            AppError::Unauthorized
        })?;
    Ok(Json(user))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    pub ready: bool,
    pub classes: i64,
    pub students: i64,
    pub reports: i64,
    pub users: i64,
    pub admin_present: bool,
}

// GET /api/setup — diagnóstico público, só leitura
pub async fn setup_status(State(state): State<AppState>) -> AppResult<Json<SetupStatus>> {
    let pool = &state.db_pool;
    Ok(Json(SetupStatus {
        ready: state.is_bootstrap_done(),
        classes: class_service::count_classes(pool).await?,
        students: student_service::count_students(pool).await?,
        reports: report_service::count_reports(pool).await?,
        users: user_service::count_users(pool).await?,
        admin_present: user_service::admin_exists(pool).await?,
    }))
}
