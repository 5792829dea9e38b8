//! Utilities shared by the Kaigi packages.

pub mod logger;
pub mod time;
