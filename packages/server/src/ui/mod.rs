//! Signaling server: router, handlers and the event dispatcher.

pub mod dispatcher;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
