// src/web/admin_handlers.rs
use crate::{
    error::{AppError, AppResult, FieldError},
    models::{
        class::{Class, NewClass},
        student::{BulkStudentsPayload, Student},
        user::{NewUser, User},
    },
    services::{class_service, student_service, user_service},
    state::AppState,
    web::extract::ValidatedJson,
};
use axum::{extract::State, http::StatusCode, Json};

/// GET /api/users - lista de utilizadores (sem hash de senha)
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    tracing::debug!("GET /api/users: listando utilizadores...");
    let users = user_service::find_all_users(&state.db_pool).await?;
    Ok(Json(users))
}

/// POST /api/register - cria um novo utilizador
pub async fn handle_register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    if payload.username.trim().chars().count() < 3 {
        return Err(AppError::Validation(vec![FieldError {
            field: "username".into(),
            message: "Nome de usuário deve ter pelo menos 3 caracteres".into(),
        }]));
    }
    if user_service::find_user_by_username(&state.db_pool, payload.username.trim())
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Nome de usuário já existe".into()));
    }

    let user = user_service::create_user(&state.db_pool, &payload, state.bcrypt_cost).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/classes - cria uma turma
pub async fn handle_create_class(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewClass>,
) -> AppResult<(StatusCode, Json<Class>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(vec![FieldError {
            field: "name".into(),
            message: "O nome da turma é obrigatório".into(),
        }]));
    }
    if class_service::find_class_by_name(&state.db_pool, name).await?.is_some() {
        return Err(AppError::BadRequest("Já existe uma turma com este nome".into()));
    }

    let class = class_service::create_class(&state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// POST /api/students/bulk - importação em massa para uma turma
pub async fn handle_bulk_import(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkStudentsPayload>,
) -> AppResult<(StatusCode, Json<Vec<Student>>)> {
    let invalid = payload.invalid_names();
    if !invalid.is_empty() {
        return Err(AppError::Validation(invalid));
    }
    let new_students = payload.to_new_students();
    if new_students.is_empty() {
        return Err(AppError::Validation(vec![FieldError {
            field: "names".into(),
            message: "Digite pelo menos um nome de aluno".into(),
        }]));
    }

    if class_service::find_class_by_id(&state.db_pool, payload.class_id).await?.is_none() {
        return Err(AppError::BadRequest("Turma não encontrada".into()));
    }

    tracing::info!(
        "POST /api/students/bulk: {} alunos para a turma {}",
        new_students.len(),
        payload.class_id
    );
    let students = student_service::create_many_students(&state.db_pool, &new_students).await?;
    Ok((StatusCode::CREATED, Json(students)))
}
