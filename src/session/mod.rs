pub mod records;
pub mod seed;
pub mod store;

pub use records::{ItemRecord, ShoppingListRecord, dehydrate, rehydrate};
pub use seed::{Seed, SeedError, SeedItem, SeedList};
pub use store::{
    DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS, InMemorySessionStore, SessionGuard, SessionId,
    SessionRecords, SessionStore,
};
