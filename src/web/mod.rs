//! HTTP surface over the shopping list model.
//!
//! Handlers check out the caller's session, rehydrate its lists, apply one
//! operation, and write the records back. Responses are JSON view-models in
//! the shape a page renderer would consume.

pub mod app;
pub mod error;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod validation;

pub use app::build_router;
pub use error::{AppError, AppResult};
pub use session::CurrentSession;
pub use state::AppState;
