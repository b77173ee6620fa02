// ============================================================================
// Shopping Library
// ============================================================================

pub mod config;
pub mod core;
pub mod model;
pub mod session;
pub mod web;

// Re-export main types for convenience
pub use self::core::{Id, IdGenerator, Result, ShoppingError};
pub use model::{Item, ShoppingList, sort_items, sort_shopping_lists};
pub use session::{InMemorySessionStore, Seed, SessionId, SessionStore, ShoppingListRecord};
pub use web::{AppState, build_router};
