//! # HTTP Routes
//!
//! ```text
//! /api/status                      status.rs
//! /api/auth/{login,logout}         auth.rs
//! /api/produtos[/{id}]             products.rs
//! /api/categorias[/{id}[/...]]     categories.rs
//! /api/estoques[/{id}[/...]]       stock.rs
//! /api/pedidos[/...]               orders.rs
//! /api/estatisticas                orders.rs
//! /api/clientes[/{id}[/pedidos]]   customers.rs
//! ```
//!
//! Handlers parse, delegate to `espetinho-db`, and format. Every
//! multi-table write happens inside the db crate.

pub mod auth;
pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod status;
pub mod stock;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(status::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(stock::router())
        .merge(orders::router())
        .merge(customers::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
