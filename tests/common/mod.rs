#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use ocorrencias::{
    db,
    models::user::NewUser,
    services::user_service,
    state::AppState,
    web::routes::create_router,
};
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub const ADMIN: (&str, &str) = ("direcao", "admin-1234");
pub const PROFESSOR: (&str, &str) = ("prof.ana", "prof-1234");

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Router completo sobre uma base em memória, com um admin e um professor.
pub async fn spawn_app() -> TestApp {
    let pool = db::create_db_pool("sqlite::memory:").await.expect("pool em memória");
    let state = AppState::new(pool, 4);

    for (username, password, is_admin) in [(ADMIN.0, ADMIN.1, true), (PROFESSOR.0, PROFESSOR.1, false)] {
        user_service::create_user(
            &state.db_pool,
            &NewUser { username: username.into(), password: password.into(), is_admin },
            state.bcrypt_cost,
        )
        .await
        .expect("utilizador de teste");
    }

    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);
    let router = create_router(state.clone()).layer(session_layer);
    TestApp { router, state }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, json) = self.send_raw(method, uri, cookie, body).await;
        (status, json)
    }

    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, set_cookie, json)
    }

    /// Faz login e devolve o cookie de sessão (`nome=valor`).
    pub async fn login(&self, (username, password): (&str, &str)) -> String {
        let (status, cookie, _) = self
            .send_raw(
                Method::POST,
                "/api/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login de {} falhou", username);
        cookie.expect("cookie de sessão")
    }

    pub async fn create_class(&self, admin_cookie: &str, name: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/classes",
                Some(admin_cookie),
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().expect("id da turma")
    }
}
