// src/web/routes.rs
use crate::{
    error::AppError,
    state::AppState,
    web::{
        admin_handlers, auth_handlers, class_handlers, mw_admin, mw_auth, report_handlers,
        student_handlers,
    },
};
use axum::{
    extract::OriginalUri,
    middleware,
    routing::{get, patch, post},
    Router,
};

/// Router da API (tudo debaixo de `/api`). A camada de sessão é aplicada por
/// quem o constrói (`main` ou os testes).
pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", post(auth_handlers::handle_login))
        .route("/logout", post(auth_handlers::handle_logout))
        .route("/setup", get(auth_handlers::setup_status));

    // --- Rotas de Admin ---
    // Exigem login E is_admin; mw_auth é aplicado no router pai
    let admin_routes = Router::new()
        .route("/users", get(admin_handlers::list_users))
        .route("/register", post(admin_handlers::handle_register))
        .route("/students/bulk", post(admin_handlers::handle_bulk_import))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_admin::require_admin,
        ));

    // GET /classes é para todos, POST só para admin
    let create_class = post(admin_handlers::handle_create_class).route_layer(
        middleware::from_fn_with_state(app_state.clone(), mw_admin::require_admin),
    );

    // --- Rotas Autenticadas ---
    let authenticated_routes = Router::new()
        .route("/user", get(auth_handlers::current_user))
        .route("/classes", get(class_handlers::list_classes).merge(create_class))
        .route("/classes/{id}", get(class_handlers::get_class))
        .route(
            "/students",
            get(student_handlers::list_students).post(student_handlers::create_student),
        )
        .route(
            "/students/{id}",
            patch(student_handlers::update_student)
                .put(student_handlers::update_student)
                .delete(student_handlers::delete_student),
        )
        .route(
            "/reports",
            get(report_handlers::list_reports).post(report_handlers::create_report),
        )
        .route("/dashboard", get(class_handlers::dashboard))
        .merge(admin_routes)
        // Aplica require_auth a TODAS as rotas acima (incluindo as de admin)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    let api = Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .fallback(handler404);

    Router::new().nest("/api", api).with_state(app_state)
}

// Dentro do nest o caminho vem sem o prefixo; OriginalUri guarda o pedido inteiro
async fn handler404(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Rota não encontrada: {}", uri.path()))
}
