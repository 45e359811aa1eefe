// src/models/mod.rs
pub mod class;
pub mod dashboard;
pub mod report;
pub mod student;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Filtro numérico da query string; vazio ou lixo vira `None` em vez de 400.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}
