//! # Quill API
//!
//! Actix-web application: routing, the auth gate, handlers, and the state
//! they share. The binary in `main.rs` wires it to a listening socket.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
