//! Shared "update dialog is on screen" flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to a single flag. Every clone observes the same value.
#[derive(Debug, Clone, Default)]
pub struct DialogPresence(Arc<AtomicBool>);

impl DialogPresence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set_open(&self, open: bool) {
        self.0.store(open, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = DialogPresence::new();
        let b = a.clone();
        assert!(!b.is_open());
        a.set_open(true);
        assert!(b.is_open());
        b.set_open(false);
        assert!(!a.is_open());
    }
}
