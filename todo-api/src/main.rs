use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_api::{Config, TodoStore};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api=info,tower_http=info")),
        )
        .init();

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, origins = ?config.cors_origins, "listening");

    let app = todo_api::router(TodoStore::new(), &config.cors_origins);
    todo_api::run(listener, app).await
}
