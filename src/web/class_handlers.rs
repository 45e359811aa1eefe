// src/web/class_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{class::Class, dashboard::ClassWithStudents},
    services::{class_service, dashboard_service},
    state::AppState,
    web::extract::ApiPath,
};
use axum::{
    extract::State,
    Json,
};

// GET /api/classes
pub async fn list_classes(State(state): State<AppState>) -> AppResult<Json<Vec<Class>>> {
    let classes = class_service::find_all_classes(&state.db_pool).await?;
    Ok(Json(classes))
}

// GET /api/classes/{id}
pub async fn get_class(
    State(state): State<AppState>,
    ApiPath(class_id): ApiPath<i64>,
) -> AppResult<Json<ClassWithStudents>> {
    dashboard_service::class_with_students(&state.db_pool, class_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Turma não encontrada".into()))
}

// GET /api/dashboard
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<Vec<ClassWithStudents>>> {
    let classes = dashboard_service::classes_with_students(&state.db_pool).await?;
    tracing::debug!("Dashboard com {} turmas.", classes.len());
    Ok(Json(classes))
}
