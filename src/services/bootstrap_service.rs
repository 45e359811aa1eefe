// src/services/bootstrap_service.rs
use crate::{
    error::AppResult,
    models::user::NewUser,
    services::user_service,
};
use sqlx::SqlitePool;

/// Turmas que têm de existir sempre.
pub const REQUIRED_CLASSES: &[&str] = &["6A", "6B", "6C", "7A", "7B", "7C", "8A", "8B", "9B"];

/// Turmas descontinuadas, removidas (com alunos e relatórios) no arranque.
pub const LEGACY_CLASSES: &[&str] = &["9A", "9C"];

/// Credenciais do administrador inicial.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: Option<String>,
    pub bcrypt_cost: u32,
}

/// O que a reconciliação mudou nesta execução.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub admin_created: bool,
    pub removed_classes: Vec<String>,
    pub created_classes: Vec<String>,
}

impl BootstrapSummary {
    pub fn changed_anything(&self) -> bool {
        self.admin_created || !self.removed_classes.is_empty() || !self.created_classes.is_empty()
    }
}

/// Garante o administrador, retira as turmas antigas e cria as obrigatórias.
/// Pode correr quantas vezes for preciso: o resultado converge sempre.
pub async fn reconcile(db_pool: &SqlitePool, admin: &AdminSeed) -> AppResult<BootstrapSummary> {
    tracing::info!("🔄 Reconciliando dados iniciais...");
    let mut summary = BootstrapSummary {
        admin_created: ensure_admin(db_pool, admin).await?,
        ..Default::default()
    };

    for name in LEGACY_CLASSES {
        if remove_class_cascading(db_pool, name).await? {
            summary.removed_classes.push(name.to_string());
        }
    }

    for name in REQUIRED_CLASSES {
        if create_class_if_missing(db_pool, name).await? {
            summary.created_classes.push(name.to_string());
        }
    }

    if summary.changed_anything() {
        tracing::info!(
            "✅ Reconciliação concluída: admin criado={}, removidas={:?}, criadas={:?}",
            summary.admin_created,
            summary.removed_classes,
            summary.created_classes
        );
    } else {
        tracing::info!("✅ Reconciliação concluída: nada a alterar.");
    }
    Ok(summary)
}

/// Cria o administrador configurado se ainda não existir.
async fn ensure_admin(db_pool: &SqlitePool, admin: &AdminSeed) -> AppResult<bool> {
    if user_service::find_user_by_username(db_pool, &admin.username).await?.is_some() {
        return Ok(false);
    }
    let Some(password) = admin.password.as_ref() else {
        tracing::warn!(
            "⚠️ ADMIN_PASSWORD não definida: administrador '{}' não foi criado.",
            admin.username
        );
        return Ok(false);
    };

    let new_admin = NewUser {
        username: admin.username.clone(),
        password: password.clone(),
        is_admin: true,
    };
    user_service::create_user(db_pool, &new_admin, admin.bcrypt_cost).await?;
    Ok(true)
}

// A unicidade do nome é que impede duplicados
async fn create_class_if_missing(db_pool: &SqlitePool, name: &str) -> AppResult<bool> {
    let inserted = sqlx::query("INSERT INTO classes (name) VALUES (?1) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(db_pool)
        .await?
        .rows_affected();
    Ok(inserted > 0)
}

/// Remove a turma, os seus alunos e os relatórios desses alunos numa só transação.
async fn remove_class_cascading(db_pool: &SqlitePool, name: &str) -> AppResult<bool> {
    let mut tx = db_pool.begin().await?;

    let class_id: Option<i64> = sqlx::query_scalar("SELECT id FROM classes WHERE name = ?1")
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(class_id) = class_id else {
        tx.rollback().await?;
        return Ok(false);
    };

    let reports = sqlx::query(
        "DELETE FROM reports WHERE student_id IN (SELECT id FROM students WHERE class_id = ?1)",
    )
    .bind(class_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let students = sqlx::query("DELETE FROM students WHERE class_id = ?1")
        .bind(class_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM classes WHERE id = ?1")
        .bind(class_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(
        "🗑️ Turma antiga '{}' removida ({} alunos, {} relatórios).",
        name,
        students,
        reports
    );
    Ok(true)
}
