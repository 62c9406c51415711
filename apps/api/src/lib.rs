//! # espetinho-api
//!
//! REST API for the Espetinho menu site and admin panel.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Menu site ──┐                                                          │
//! │              ├──► axum Router (3000) ──► routes/* ──► espetinho-db      │
//! │  Admin panel ┘        │                                   │             │
//! │                  TraceLayer, CORS                   SQLite (WAL)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary in `main.rs` only wires configuration, the database and the
//! router together; everything else lives here so tests can drive the
//! router in-process.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, AppResult, ErrorCode};
pub use routes::app;
pub use state::AppState;
