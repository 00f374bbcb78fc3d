//! # api-adapters
//!
//! The web surface for Hromada: routing, request/response mapping, the chat
//! WebSocket, and prometheus metrics. Handlers translate between HTTP and
//! the service layer; they never make authorization decisions themselves.

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
pub mod metrics;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod state;
#[cfg(feature = "web-axum")]
pub mod views;
#[cfg(feature = "web-axum")]
pub mod ws;

#[cfg(feature = "web-axum")]
pub use router::build_router;
#[cfg(feature = "web-axum")]
mod router;
