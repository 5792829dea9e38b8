//! Kaigi signaling server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaigi-server
//! cargo run --bin kaigi-server -- --host 0.0.0.0 --port 3000
//! ```

use clap::Parser;
use kaigi_server::{config::ServerConfig, ui::Server};
use kaigi_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Some(limit) = config.chat_history_limit {
        tracing::info!("Chat history limited to {} messages per room", limit);
    }

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
