use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, SeedExpense};
use migration::MigratorTrait;

const ALLOWED_ORIGIN: &str = "http://localhost:5173";

async fn app_with_seed(seed: Option<Vec<SeedExpense>>) -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let mut builder = Engine::builder().database(db);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let engine = builder.build().await.unwrap();
    server::router(
        engine,
        &[ALLOWED_ORIGIN.to_string(), "*.onrender.com".to_string()],
    )
}

async fn app() -> Router {
    app_with_seed(None).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(request).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = app().await;
    let (status, body) = send(&app, get("/api/expenses")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/expenses",
            &json!({
                "payer": "Alice",
                "date": "2024-01-01T00:00:00Z",
                "description": "Coffee",
                "amount": 4.50
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_i64());
    assert_eq!(body["payer"], "Alice");
    assert_eq!(body["date"], "2024-01-01T00:00:00.000Z");
    assert_eq!(body["description"], "Coffee");
    assert_eq!(body["amount"], 4.5);

    let (_, listed) = send(&app, get("/api/expenses")).await;
    assert_eq!(listed, json!([body]));
}

#[tokio::test]
async fn description_may_be_omitted() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/expenses",
            &json!({"payer": "Bob", "date": "2024-03-02", "amount": 10}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["description"], "");
    assert_eq!(body["date"], "2024-03-02T00:00:00.000Z");
}

#[tokio::test]
async fn invalid_creates_return_400_and_change_nothing() {
    let app = app().await;
    let bad_bodies = [
        json!({"payer": "Alice", "date": "2024-01-01T00:00:00Z", "amount": 0}),
        json!({"payer": "Alice", "date": "2024-01-01T00:00:00Z", "amount": -4}),
        json!({"payer": "Alice", "date": "2024-01-01T00:00:00Z", "amount": "four"}),
        json!({"payer": "Carol", "date": "2024-01-01T00:00:00Z", "amount": 4}),
        json!({"payer": "Bob", "date": "someday", "amount": 4}),
        json!({"payer": "Bob", "date": "2024-01-01", "amount": 4, "description": "d".repeat(201)}),
        json!({"payer": "Bob"}),
    ];

    for bad in bad_bodies {
        let (status, body) = send(&app, post_json("/api/expenses", &bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(body["code"], "validation_error", "{bad}");
        assert!(body["error"].is_string());
    }

    let (_, listed) = send(&app, get("/api/expenses")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/expenses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn reset_returns_the_seed_set() {
    let seed = vec![
        SeedExpense {
            payer: "Bob".to_string(),
            date: "2024-05-03T00:00:00.000Z".to_string(),
            description: "Train tickets".to_string(),
            amount: 28.0,
        },
        SeedExpense {
            payer: "Alice".to_string(),
            date: "2024-05-01".to_string(),
            description: String::new(),
            amount: 4.5,
        },
    ];
    let app = app_with_seed(Some(seed)).await;
    for _ in 0..3 {
        send(
            &app,
            post_json(
                "/api/expenses",
                &json!({"payer": "Alice", "date": "2024-01-01", "amount": 1}),
            ),
        )
        .await;
    }

    let (status, body) = send(&app, post_empty("/api/expenses/reset")).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["description"], "Train tickets");
    assert_eq!(data[1]["date"], "2024-05-01T00:00:00.000Z");
    assert!(data.iter().all(|e| e["id"].as_i64().unwrap() > 3));

    let (_, listed) = send(&app, get("/api/expenses")).await;
    assert_eq!(&listed, &body["data"]);
}

#[tokio::test]
async fn preflight_from_allowed_origin_is_accepted() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/expenses")
        .header(header::ORIGIN, ALLOWED_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let res = app.oneshot(request).await.unwrap();
    let headers = res.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"] {
        assert!(methods.contains(method), "{methods}");
    }
}

#[tokio::test]
async fn wildcard_origin_is_accepted() {
    let app = app().await;
    let request = Request::builder()
        .uri("/api/expenses")
        .header(header::ORIGIN, "https://expenso.onrender.com")
        .body(Body::empty())
        .unwrap();

    let res = app.oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://expenso.onrender.com"
    );
}

#[tokio::test]
async fn unknown_origin_gets_no_cors_headers() {
    let app = app().await;
    let request = Request::builder()
        .uri("/api/expenses")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let res = app.oneshot(request).await.unwrap();
    assert!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
