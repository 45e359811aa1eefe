// src/models/user.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    // Nunca sai nas respostas JSON
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
}

// Corpo do POST /api/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "O nome de usuário é obrigatório"))]
    pub username: String,
    #[validate(length(min = 1, message = "A senha é obrigatória"))]
    pub password: String,
}

// Corpo do POST /api/register (apenas admin)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 3, max = 64, message = "Nome de usuário deve ter pelo menos 3 caracteres"))]
    pub username: String,
    #[validate(length(min = 4, message = "A senha deve ter pelo menos 4 caracteres"))]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}
