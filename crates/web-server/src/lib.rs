// In crates/web-server/src/lib.rs

use app_config::types::ServerSettings;
use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use database::Db;
use platform::Platform;
use serde_json::Value;
use tokio::net::TcpListener;
use types::{Procedure, ProcedureKind, RpcQuery, RpcResponse};

pub mod error;
pub mod procedures;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub platform: Platform,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // Browser frontends call the API from another origin.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/rpc", get(list_procedures_handler))
        .route("/rpc/{procedure}", get(query_handler).post(call_handler));

    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /api/rpc`.
async fn list_procedures_handler() -> Json<&'static [Procedure]> {
    Json(procedures::PROCEDURES)
}

/// The handler for `POST /api/rpc/{procedure}`.
///
/// The body is the procedure input. An empty body is read as `null`.
async fn call_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<RpcResponse<Value>>> {
    let procedure = procedures::find(&name).ok_or(Error::UnknownProcedure(name))?;
    let input = parse_input(&body)?;
    let result = procedures::dispatch(&state.platform, procedure.name, input).await?;
    Ok(Json(RpcResponse { result }))
}

/// The handler for `GET /api/rpc/{procedure}?input=...`. Queries only.
async fn query_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<RpcQuery>,
) -> Result<Json<RpcResponse<Value>>> {
    let procedure = procedures::find(&name).ok_or(Error::UnknownProcedure(name))?;
    if procedure.kind == ProcedureKind::Mutation {
        return Err(Error::MutationOverGet(procedure.name.to_string()));
    }
    let input = parse_input(query.input.unwrap_or_default().as_bytes())?;
    let result = procedures::dispatch(&state.platform, procedure.name, input).await?;
    Ok(Json(RpcResponse { result }))
}

fn parse_input(raw: &[u8]) -> Result<Value> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(raw)?)
}

/// The main entry point for running the web server.
///
/// Binds the configured address and serves the RPC router until the process
/// is terminated.
pub async fn run(settings: ServerSettings, db: Db) -> Result<()> {
    let app_state = AppState {
        platform: Platform::new(db),
    };
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on {}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_null() {
        assert_eq!(parse_input(b"").unwrap(), Value::Null);
        assert_eq!(parse_input(b"  \n").unwrap(), Value::Null);
        assert_eq!(parse_input(br#"{"id":"x"}"#).unwrap()["id"], "x");
        assert!(matches!(parse_input(b"{nope"), Err(Error::InvalidJson(_))));
    }
}
