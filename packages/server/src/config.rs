//! Server configuration from command-line flags and `KAIGI_*` environment variables.

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "kaigi-server")]
#[command(about = "Signaling and room coordination server for peer-to-peer video meetings", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "KAIGI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "KAIGI_PORT", default_value = "8080")]
    pub port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "KAIGI_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,

    /// Keep at most this many chat messages per room (oldest dropped first)
    #[arg(long, env = "KAIGI_CHAT_HISTORY_LIMIT")]
    pub chat_history_limit: Option<usize>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "debug".to_string(),
            chat_history_limit: None,
        }
    }
}
