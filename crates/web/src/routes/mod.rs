use axum::{Router, middleware, routing::get};

use crate::features::{admin, draw, registration};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(admin::routes::protected_routes())
        .merge(draw::routes::routes())
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/participants", registration::routes::routes())
        .nest("/api/admin", admin::routes::routes().merge(protected))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use storage::{
        MemoryStore, Spreadsheet,
        error::{Result, StorageError},
        models::ColumnNames,
        store::{Record, RowStore},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::auth::AccessGate;
    use crate::state::DrawSettings;

    const PASSWORD: &str = "hunter2";

    /// A sheet whose backend answers every call with a 503.
    struct UnavailableStore;

    impl UnavailableStore {
        fn error() -> StorageError {
            StorageError::Remote {
                status: 503,
                message: "backend error".to_string(),
            }
        }
    }

    #[async_trait::async_trait]
    impl RowStore for UnavailableStore {
        async fn header(&self) -> Result<Vec<String>> {
            Err(Self::error())
        }

        async fn append(&self, _fields: &[String]) -> Result<()> {
            Err(Self::error())
        }

        async fn read_all(&self) -> Result<Vec<Record>> {
            Err(Self::error())
        }

        async fn find_row_index(&self, _column: usize, _value: &str) -> Result<Option<usize>> {
            Err(Self::error())
        }

        async fn set_cell(&self, _row: usize, _column: usize, _value: &str) -> Result<()> {
            Err(Self::error())
        }
    }

    fn app_with(store: Arc<dyn RowStore>) -> Router {
        router(AppState {
            sheet: Spreadsheet::new(store, ColumnNames::default()),
            gate: AccessGate::new(PASSWORD),
            draw: DrawSettings::default(),
        })
    }

    fn empty_store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new(["name", "email", "won"]))
    }

    /// `Value::Null` sends an empty body.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = if body.is_null() {
            Body::empty()
        } else {
            Body::from(body.to_string())
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn register(app: &Router, name: &str, email: &str) -> StatusCode {
        send(
            app,
            "POST",
            "/api/participants",
            None,
            json!({ "name": name, "email": email }),
        )
        .await
        .0
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/admin/login",
            None,
            json!({ "password": PASSWORD }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(empty_store());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register() {
        let store = empty_store();
        let app = app_with(store.clone());

        let (status, body) = send(
            &app,
            "POST",
            "/api/participants",
            None,
            json!({ "name": " A ", "email": "a@x" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "name": "A", "email": "a@x", "won": false }));
        assert_eq!(store.rows().await, vec![vec!["A".to_string(), "a@x".to_string()]]);
    }

    #[tokio::test]
    async fn test_register_empty_name() {
        let store = empty_store();
        let app = app_with(store.clone());

        let (status, body) = send(
            &app,
            "POST",
            "/api/participants",
            None,
            json!({ "name": "", "email": "a@x" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_twice() {
        let store = empty_store();
        let app = app_with(store.clone());

        assert_eq!(register(&app, "A", "a@x").await, StatusCode::CREATED);
        assert_eq!(register(&app, "A", "a@x").await, StatusCode::CONFLICT);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_admin_routes_need_a_session() {
        let app = app_with(empty_store());

        let (status, _) = send(&app, "GET", "/api/admin/participants", None, Value::Null).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            "POST",
            "/api/admin/draw",
            Some("00000000-0000-0000-0000-000000000000"),
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let app = app_with(empty_store());

        let (status, body) = send(
            &app,
            "POST",
            "/api/admin/login",
            None,
            json!({ "password": "letmein" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_list_participants() {
        let app = app_with(empty_store());
        register(&app, "A", "a@x").await;
        register(&app, "B", "b@x").await;
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            "GET",
            "/api/admin/participants",
            Some(&token),
            Value::Null,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["eligible"], 2);
        assert_eq!(body["participants"][1]["email"], "b@x");
    }

    #[tokio::test]
    async fn test_draw_workflow() {
        let store = empty_store();
        let app = app_with(store.clone());
        for (name, email) in [("A", "a@x"), ("B", "b@x"), ("C", "c@x")] {
            assert_eq!(register(&app, name, email).await, StatusCode::CREATED);
        }
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/admin/draw",
            Some(&token),
            json!({ "count": 2 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["winners"].as_array().unwrap().len(), 2);
        assert_eq!(body["warnings"], json!([]));

        let (status, body) = send(&app, "POST", "/api/admin/draw", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        let last = body["winners"][0]["email"].as_str().unwrap().to_string();

        let rows = store.rows().await;
        assert!(rows.iter().all(|row| row.get(2).is_some_and(|cell| cell == "yes")));
        assert!(rows.iter().any(|row| row[1] == last));

        let (status, _) = send(&app, "POST", "/api/admin/draw", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_draw_zero_winners() {
        let app = app_with(empty_store());
        register(&app, "A", "a@x").await;
        let token = login(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/admin/draw",
            Some(&token),
            json!({ "count": 0 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_draw_without_body_picks_one_winner() {
        let store = empty_store();
        let app = app_with(store.clone());
        register(&app, "A", "a@x").await;
        register(&app, "B", "b@x").await;
        let token = login(&app).await;

        let (status, body) =
            send(&app, "POST", "/api/admin/draw", Some(&token), Value::Null).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["winners"].as_array().unwrap().len(), 1);
        let marked = store
            .rows()
            .await
            .iter()
            .filter(|row| row.get(2).is_some_and(|cell| cell == "yes"))
            .count();
        assert_eq!(marked, 1);
    }

    #[tokio::test]
    async fn test_draw_with_malformed_count() {
        let store = empty_store();
        let app = app_with(store.clone());
        register(&app, "A", "a@x").await;
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/admin/draw",
            Some(&token),
            json!({ "count": -1 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(store.rows().await, vec![vec!["A".to_string(), "a@x".to_string()]]);
    }

    #[tokio::test]
    async fn test_unavailable_sheet() {
        let app = app_with(Arc::new(UnavailableStore));

        let (status, body) = send(
            &app,
            "POST",
            "/api/participants",
            None,
            json!({ "name": "A", "email": "a@x" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"],
            "The participant sheet is unavailable, please try again later"
        );

        let token = login(&app).await;
        let (status, _) = send(&app, "POST", "/api/admin/draw", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_draw_without_won_column() {
        let store = Arc::new(MemoryStore::with_rows(
            ["name", "email"],
            vec![vec!["A".to_string(), "a@x".to_string()]],
        ));
        let app = app_with(store.clone());
        let token = login(&app).await;

        let (status, body) = send(&app, "POST", "/api/admin/draw", Some(&token), json!({})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "The participant sheet is misconfigured");
        assert_eq!(store.rows().await, vec![vec!["A".to_string(), "a@x".to_string()]]);
    }
}
