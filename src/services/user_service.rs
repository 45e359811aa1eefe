// src/services/user_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::user::{NewUser, User},
    services::auth_service,
};
use sqlx::SqlitePool;

/// Busca um utilizador na base de dados pelo seu ID.
pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por ID: {}", user_id);
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, is_admin FROM users WHERE id = ?1",
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Busca um utilizador pelo nome de login.
pub async fn find_user_by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por username: {}", username);
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, is_admin FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(db_pool)
    .await?;

    if user.is_some() {
        tracing::debug!("Utilizador '{}' encontrado.", username);
    } else {
        tracing::debug!("Utilizador '{}' não encontrado.", username);
    }
    Ok(user)
}

/// Busca todos os utilizadores, por ordem de criação.
pub async fn find_all_users(db_pool: &SqlitePool) -> AppResult<Vec<User>> {
    tracing::debug!("Buscando todos os utilizadores...");
    let users = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, is_admin FROM users ORDER BY id ASC",
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontrados {} utilizadores.", users.len());
    Ok(users)
}

/// Cria um utilizador guardando apenas o hash bcrypt da senha.
/// Nome já existente resulta em `BadRequest`.
pub async fn create_user(db_pool: &SqlitePool, new_user: &NewUser, bcrypt_cost: u32) -> AppResult<User> {
    let username = new_user.username.trim();
    tracing::info!("Tentando criar utilizador: {}", username);

    let password_hash = auth_service::hash_password(&new_user.password, bcrypt_cost).await?;

    let inserted = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, is_admin)
        VALUES (?1, ?2, ?3)
        RETURNING id, username, password_hash, is_admin
        "#,
    )
    .bind(username)
    .bind(&password_hash)
    .bind(new_user.is_admin)
    .fetch_one(db_pool)
    .await;

    match inserted {
        Ok(user) => {
            tracing::info!("✅ Utilizador '{}' criado (admin: {}).", user.username, user.is_admin);
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Falha ao criar user: '{}' já existe.", username);
            Err(AppError::BadRequest("Nome de usuário já existe".into()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn count_users(db_pool: &SqlitePool) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db_pool)
        .await?;
    Ok(total)
}

pub async fn admin_exists(db_pool: &SqlitePool) -> AppResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM users WHERE is_admin = 1 LIMIT 1")
        .fetch_optional(db_pool)
        .await?;
    Ok(found.is_some())
}
