use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

// Expose the in-memory store module
pub mod memory;

pub use memory::MemoryStore;

/// Monotonic id source shared by every collection in a store.
///
/// Seeded from the wall clock so ids stay ordered by creation time, but
/// advanced atomically so rapid sequential creations can never collide the
/// way raw millisecond timestamps would.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis() as u64)
    }

    /// Generator with a fixed starting point, for deterministic tests.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
