use axum::{
    Router,
    extract::{MatchedPath, Request},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{cors, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the application router: expense routes under `/api`, wrapped in the
/// CORS policy and request tracing.
pub fn router(engine: Engine, allowed_origins: &[String]) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    let api = Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/reset", post(expenses::reset));

    let tracing_layer = TraceLayer::new_for_http().make_span_with(|req: &Request| {
        let method = req.method();
        let uri = req.uri();

        let matched_path = req
            .extensions()
            .get::<MatchedPath>()
            .map(|matched_path| matched_path.as_str());

        tracing::debug_span!("request", %method, %uri, matched_path)
    });

    Router::new()
        .nest("/api", api)
        .layer(cors::layer(allowed_origins))
        .layer(tracing_layer)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    allowed_origins: Vec<String>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine, &allowed_origins)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    allowed_origins: Vec<String>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, allowed_origins, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
