//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Full application: `/api/*`, docs, `/health` and `/ready`.
pub fn app(state: &AppState) -> io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state))?
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()));
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use core_config::{app_info, server::ServerConfig};
    use database::common::RetryConfig;
    use database::postgres::PostgresConfig;
    use domain_products::{Product, ProductSubject};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use test_utils::TestDatabase;
    use tower::ServiceExt;

    async fn json_body<T: DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn test_app(db: &TestDatabase) -> Router {
        let state = AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new(db.connection_string.clone()),
                retry: RetryConfig::default(),
                server: ServerConfig::default(),
                environment: Environment::Development,
                run_migrations: false,
                events_capacity: 8,
            },
            db: db.connection(),
            products_subject: Arc::new(ProductSubject::new()),
        };
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || app(&state)).unwrap()
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_product_lifecycle() {
        let db = TestDatabase::in_memory().await;
        let app = test_app(&db);

        let response = app
            .clone()
            .oneshot(request("POST", "/api/products", Some(json!({ "name": "Test Product" }))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
        let created: Product = json_body(response.into_body()).await;
        assert_eq!(location, format!("/api/products/{}", created.id));

        let response = app.clone().oneshot(request("GET", &location, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Product = json_body(response.into_body()).await;
        assert_eq!(fetched.name, "Test Product");

        let mismatched = json!({ "id": created.id + 1, "name": "Test Product" });
        let response = app
            .clone()
            .oneshot(request("PUT", &location, Some(mismatched)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.clone().oneshot(request("DELETE", &location, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.clone().oneshot(request("DELETE", &location, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(request("GET", "/api/products/search?name=", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let db = TestDatabase::in_memory().await;
        let app = test_app(&db);

        let response = app.clone().oneshot(request("GET", "/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = json_body(response.into_body()).await;
        assert_eq!(json["name"], "webshop_api");

        let response = app.oneshot(request("GET", "/ready", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = json_body(response.into_body()).await;
        assert_eq!(json["database"], "connected");
    }

    #[tokio::test]
    async fn test_openapi_document_nests_products() {
        let db = TestDatabase::in_memory().await;

        let response = test_app(&db)
            .oneshot(request("GET", "/api-docs/openapi.json", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: Value = json_body(response.into_body()).await;
        assert!(json["paths"]["/api/products/{id}"].is_object());
        assert!(json["paths"]["/api/products/search"].is_object());
    }

    #[tokio::test]
    async fn test_subject_wires_default_observers() {
        assert_eq!(products::subject(4).observer_count(), 2);
    }
}
