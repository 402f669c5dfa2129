//! Web layer for the Paris data bridge.
//!
//! Exposes the destinations lookup over HTTP and republishes every
//! result on the message bus.

mod dto;
mod routes;
mod state;

pub use dto::ErrorResponse;
pub use routes::{AppError, create_router};
pub use state::AppState;
