// src/main.rs
use axum::serve;
use ocorrencias::{
    config::Config,
    db,
    services::bootstrap_service::{self, AdminSeed},
    state::AppState,
    web,
};
use time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_cookies::Key;
use tower_http::trace::TraceLayer;
use tower_sessions::{ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "ocorrencias=debug,tower_http=info,sqlx=warn,tower_sessions=info".into()
        }))
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando servidor de ocorrências...");

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{}", e))?;

    // --- Configuração da Base de Dados ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };

    // --- Configuração das Sessões ---
    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
    session_store.migrate().await?;

    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let key = Key::try_from(config.session_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("SESSION_SECRET inválida: {}", e))?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.session_secure)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_signed(key);
    tracing::info!("🔑 Camada de sessão configurada.");

    // --- Criação do Estado da Aplicação ---
    let app_state = AppState::new(db_pool, config.bcrypt_cost);

    // --- Reconciliação inicial (turmas e admin) ---
    let seed = AdminSeed {
        username: config.admin_username.clone(),
        password: config.admin_password.clone(),
        bcrypt_cost: config.bcrypt_cost,
    };
    if config.bootstrap_blocking {
        run_bootstrap(app_state.clone(), seed).await;
    } else {
        // Pedidos que cheguem antes do fim podem ver a lista de turmas incompleta
        tokio::spawn(run_bootstrap(app_state.clone(), seed));
    }

    // --- Listener ---
    tracing::info!("📡 Servidor escutando em http://{}", config.bind_addr);
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };

    // --- Router e Middlewares ---
    let app = web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    );
    tracing::info!("✅ Router e middlewares configurados.");

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}

async fn run_bootstrap(state: AppState, seed: AdminSeed) {
    match bootstrap_service::reconcile(&state.db_pool, &seed).await {
        Ok(_) => state.mark_bootstrap_done(),
        Err(e) => tracing::error!("❌ Falha na reconciliação inicial: {}", e),
    }
}
