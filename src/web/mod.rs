use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::server::config::ServerConfig;

pub mod error;
pub mod models;
pub mod routes;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<ServerConfig>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(db_pool: PgPool, config: Arc<ServerConfig>) -> Router {
    let app_state = Arc::new(AppState {
        db_pool,
        config: config.clone(),
    });

    let cors = match config
        .cors_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any),
    };

    let api_router = routes::catalog_routes::create_catalog_router()
        .merge(routes::session_routes::create_session_router())
        .merge(routes::history_routes::create_history_router())
        .merge(routes::auth_routes::create_auth_router())
        .route("/health", get(health_check_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(app_state)
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        // connect_lazy never touches the network, so routes that fail
        // validation before querying can be exercised without a database.
        let pool = PgPool::connect_lazy("postgres://postgres@localhost/chequeos_test")
            .expect("lazy pool");
        let config = Arc::new(ServerConfig {
            database_url: "postgres://postgres@localhost/chequeos_test".to_string(),
            http_addr: "127.0.0.1:5000".parse().unwrap(),
            cors_origin: None,
        });
        create_axum_router(pool, config)
    }

    async fn body_message(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["message"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn health_check_responds_ok() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/no-such-thing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_session_requires_legajo_and_checklist_type() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/sesiones")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"cliente":"ACME"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_message(response).await,
            "legajo e idTipoChequeo son requeridos"
        );
    }

    #[tokio::test]
    async fn empty_answer_batch_is_rejected() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/respuestas")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"respuestas":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_message(response).await, "No hay respuestas para guardar");
    }

    #[tokio::test]
    async fn blank_answer_values_are_skipped_without_inserting() {
        let body = r#"{"respuestas":[{"idPregunta":1,"idSesion":1,"respuesta":"  "}]}"#;
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/respuestas")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, serde_json::json!({ "affectedRows": 0 }));
    }

    #[tokio::test]
    async fn answer_without_ids_is_rejected() {
        let body = r#"{"respuestas":[{"respuesta":"ok"}]}"#;
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/respuestas")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_message(response).await,
            "idPregunta e idSesion son requeridos en cada respuesta"
        );
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"usuario":"jperez"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_message(response).await,
            "Usuario y contraseña son requeridos"
        );
    }
}
