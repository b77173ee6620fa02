// ============================================================================
// src/core/id.rs - Identifier generation
// ============================================================================

use lazy_static::lazy_static;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier shared by items and shopping lists.
pub type Id = u64;

// Process-wide generator, created on first use and never reset
lazy_static! {
    static ref GLOBAL_IDS: Arc<IdGenerator> = Arc::new(IdGenerator::new());
}

/// Issues monotonically increasing identifiers starting at 1.
///
/// Items and lists draw from the same counter, so an id is unique across
/// both kinds of entity for the lifetime of the generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    current: AtomicU64,
}

impl IdGenerator {
    /// Fresh counter; the first call to [`IdGenerator::next`] returns 1.
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// The process-wide generator.
    pub fn global() -> Arc<IdGenerator> {
        Arc::clone(&GLOBAL_IDS)
    }

    pub fn next(&self) -> Id {
        self.current.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last id handed out, 0 when nothing has been issued yet.
    pub fn last_issued(&self) -> Id {
        self.current.load(Ordering::Relaxed)
    }
}
