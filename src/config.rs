// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const MIN_SESSION_SECRET_LEN: usize = 64;

/// Configuração do processo, lida das variáveis de ambiente.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub admin_username: String,
    pub admin_password: Option<String>,
    /// Se `true`, o servidor só começa a aceitar pedidos depois da reconciliação inicial.
    pub bootstrap_blocking: bool,
    pub session_secure: bool,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Lê as variáveis do processo. O `.env` já foi carregado por `main`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Constrói a configuração a partir de uma função de leitura arbitrária (útil nos testes).
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL não definida".into()))?;

        let session_secret = lookup("SESSION_SECRET")
            .ok_or_else(|| AppError::Config("SESSION_SECRET não definida".into()))?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(AppError::Config(format!(
                "SESSION_SECRET precisa de pelo menos {} bytes",
                MIN_SESSION_SECRET_LEN
            )));
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR inválido: {}", e)))?;

        let admin_username = lookup("ADMIN_USERNAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
        let admin_password = lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty());

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| AppError::Config(format!("BCRYPT_COST inválido: {}", e)))?,
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
            admin_username,
            admin_password,
            bootstrap_blocking: parse_flag(lookup("BOOTSTRAP_BLOCKING")),
            session_secure: parse_flag(lookup("SESSION_SECURE")),
            bcrypt_cost,
        })
    }
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
