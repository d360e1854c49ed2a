//! Per-session correlation numbers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues strictly increasing correlation numbers. The counter starts at 1
/// and is bumped before use, so the first number handed out is 2.
#[derive(Debug)]
pub struct SequenceGenerator {
    last: AtomicU64,
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last number handed out (1 if none yet).
    #[cfg(test)]
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
