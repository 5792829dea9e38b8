//! Kaigi signaling server library.
//!
//! Coordinates rooms, host-controlled admission, peer-to-peer signaling relay,
//! screen sharing and chat for browser video meetings over WebSocket.

pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
