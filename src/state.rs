// src/state.rs
use sqlx::SqlitePool;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Estado partilhado por todos os handlers. Construído em `main` (ou nos
/// testes) e injetado no router com `with_state`.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    /// Custo bcrypt usado ao criar utilizadores.
    pub bcrypt_cost: u32,
    // Fica a true quando a reconciliação inicial termina
    pub bootstrap_done: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self {
            db_pool,
            bcrypt_cost,
            bootstrap_done: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn mark_bootstrap_done(&self) {
        self.bootstrap_done.store(true, Ordering::Release);
    }

    pub fn is_bootstrap_done(&self) -> bool {
        self.bootstrap_done.load(Ordering::Acquire)
    }
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
