// src/services/class_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::class::{compare_names, Class, NewClass},
};
use sqlx::SqlitePool;

/// Todas as turmas, ordenadas pelo nome (ex: 6A < 6B < 7A).
pub async fn find_all_classes(db_pool: &SqlitePool) -> AppResult<Vec<Class>> {
    tracing::debug!("Buscando todas as turmas...");
    let mut classes = sqlx::query_as::<_, Class>("SELECT id, name FROM classes")
        .fetch_all(db_pool)
        .await?;
    classes.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(classes)
}

pub async fn find_class_by_id(db_pool: &SqlitePool, class_id: i64) -> AppResult<Option<Class>> {
    let class = sqlx::query_as::<_, Class>("SELECT id, name FROM classes WHERE id = ?1")
        .bind(class_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(class)
}

pub async fn find_class_by_name(db_pool: &SqlitePool, name: &str) -> AppResult<Option<Class>> {
    let class = sqlx::query_as::<_, Class>("SELECT id, name FROM classes WHERE name = ?1")
        .bind(name)
        .fetch_optional(db_pool)
        .await?;
    Ok(class)
}

/// Cria uma turma. Nome repetido resulta em `BadRequest`.
pub async fn create_class(db_pool: &SqlitePool, new_class: &NewClass) -> AppResult<Class> {
    let name = new_class.name.trim();
    tracing::info!("Criando turma '{}'", name);

    let inserted = sqlx::query_as::<_, Class>(
        "INSERT INTO classes (name) VALUES (?1) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(db_pool)
    .await;

    match inserted {
        Ok(class) => Ok(class),
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Turma '{}' já existe.", name);
            Err(AppError::BadRequest("Já existe uma turma com este nome".into()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn count_classes(db_pool: &SqlitePool) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes")
        .fetch_one(db_pool)
        .await?;
    Ok(total)
}
