//! HTTP API for an in-memory todo list.
//!
//! The collection is owned by a [`TodoStore`] created when the router is
//! built and handed to every handler through axum state. Nothing is persisted.

pub mod config;
pub mod error;
pub mod extract;
pub mod store;
pub mod types;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use config::{Config, DEFAULT_CORS_ORIGINS};
pub use error::ApiError;
pub use extract::JsonBody;
pub use store::TodoStore;
pub use types::{Message, TodoInput, TodoItem};

/// Router with an empty store and the default development origins.
pub fn app() -> Router {
    let origins = DEFAULT_CORS_ORIGINS.map(String::from);
    router(TodoStore::new(), &origins)
}

/// Router serving `store`, allowing browser calls from `cors_origins`.
pub fn router(store: TodoStore, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{todo_id}", put(update_todo).delete(delete_todo))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(store)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Any listed origin, any method and header, with credentials.
///
/// Methods and headers are mirrored from the preflight request because
/// wildcards are not allowed together with credentials. For the same reason a
/// `*` origin is dropped rather than handed to tower-http, which panics on it.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            if origin.trim() == "*" {
                tracing::warn!("ignoring wildcard CORS origin, credentials are enabled");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Serves `app` on `listener` until Ctrl-C.
pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => {
            tracing::error!(%err, "failed to listen for Ctrl-C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn root() -> Json<Message> {
    Json(Message::new("Todo API is running!"))
}

#[tracing::instrument(skip_all)]
async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<TodoItem>> {
    Json(store.list().await)
}

#[tracing::instrument(skip_all)]
async fn create_todo(
    State(store): State<TodoStore>,
    JsonBody(input): JsonBody<TodoInput>,
) -> Json<TodoItem> {
    Json(store.create(input).await)
}

/// The path id always wins; an `id` in the body is ignored.
#[tracing::instrument(skip(store, input))]
async fn update_todo(
    State(store): State<TodoStore>,
    Path(todo_id): Path<String>,
    JsonBody(input): JsonBody<TodoInput>,
) -> Result<Json<TodoItem>, ApiError> {
    store
        .update(&todo_id, input)
        .await
        .map(Json)
        .inspect_err(|_| tracing::warn!("update of unknown todo"))
}

#[tracing::instrument(skip(store))]
async fn delete_todo(
    State(store): State<TodoStore>,
    Path(todo_id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    store
        .delete(&todo_id)
        .await
        .map(|_| Json(Message::new("Todo deleted successfully")))
        .inspect_err(|_| tracing::warn!("delete of unknown todo"))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "detail": "Method Not Allowed" })),
    )
}
