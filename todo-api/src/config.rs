use clap::Parser;

/// Origins allowed to call the API from a browser during local development.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// Server settings. Each flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-api", version, about = "In-memory todo list HTTP API")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "TODO_API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allowed CORS origin. Repeat the flag or pass a comma separated list.
    #[arg(
        long = "cors-origin",
        env = "TODO_API_CORS_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_CORS_ORIGINS
    )]
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
