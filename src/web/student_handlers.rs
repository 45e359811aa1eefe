// src/web/student_handlers.rs
use crate::{
    error::{AppError, AppResult, FieldError},
    models::{
        dashboard::StudentWithReports,
        student::{NewStudent, Student, StudentQuery},
    },
    services::{class_service, dashboard_service, student_service},
    state::AppState,
    web::extract::{ApiPath, ApiQuery, ValidatedJson},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Resposta do GET /api/students: com `classId` vêm os relatórios e a contagem.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StudentListing {
    WithReports(Vec<StudentWithReports>),
    Plain(Vec<Student>),
}

// GET /api/students?classId=
pub async fn list_students(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StudentQuery>,
) -> AppResult<Json<StudentListing>> {
    let listing = match query.class_id {
        Some(class_id) => StudentListing::WithReports(
            dashboard_service::students_with_reports(&state.db_pool, class_id).await?,
        ),
        None => StudentListing::Plain(student_service::find_all_students(&state.db_pool).await?),
    };
    Ok(Json(listing))
}

// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    let data = checked_student(&state, &payload).await?;
    let student = student_service::create_student(&state.db_pool, &data).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

// PATCH|PUT /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<NewStudent>,
) -> AppResult<Json<Student>> {
    if student_service::find_student_by_id(&state.db_pool, student_id).await?.is_none() {
        return Err(AppError::NotFound("Aluno não encontrado".into()));
    }
    let data = checked_student(&state, &payload).await?;
    let student = student_service::update_student(&state.db_pool, student_id, &data).await?;
    Ok(Json(student))
}

// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i64>,
) -> AppResult<Json<Value>> {
    if student_service::find_student_by_id(&state.db_pool, student_id).await?.is_none() {
        return Err(AppError::NotFound("Aluno não encontrado".into()));
    }
    student_service::delete_student(&state.db_pool, student_id).await?;
    Ok(Json(json!({ "message": "Aluno removido com sucesso" })))
}

/// Nome sem espaços nas pontas e turma existente; nada é escrito se falhar.
async fn checked_student(state: &AppState, payload: &NewStudent) -> AppResult<NewStudent> {
    let data = payload.trimmed();
    if data.name.is_empty() {
        return Err(AppError::Validation(vec![FieldError {
            field: "name".into(),
            message: "O nome do aluno é obrigatório".into(),
        }]));
    }
    if class_service::find_class_by_id(&state.db_pool, data.class_id).await?.is_none() {
        tracing::warn!("Turma {} não existe.", data.class_id);
        return Err(AppError::BadRequest("Turma não encontrada".into()));
    }
    Ok(data)
}
