//! Context keys consulted by key bindings
//!
//! A motion capture flips these while it owns the keyboard: other bindings
//! check them to decide whether they apply (for example, Esc cancels the
//! capture instead of leaving insert mode).

use super::Subscription;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

pub mod keys {
    /// A text object motion is capturing raw input
    pub const CAPTURING: &str = "textObjects.capturing";
    /// Competing modal layers (normal mode bindings) are enabled
    pub const MODAL_LAYERS: &str = "editor.modalLayers";
    /// Typed characters are inserted into the buffer
    pub const TEXT_INPUT: &str = "editor.textInput";
}

/// Shared boolean context. Clones see the same values.
#[derive(Clone, Debug, Default)]
pub struct ContextKeys {
    values: Arc<Mutex<FxHashMap<&'static str, bool>>>,
}

impl ContextKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unset keys read as `false`
    pub fn get(&self, key: &str) -> bool {
        self.values.lock().get(key).copied().unwrap_or(false)
    }

    pub fn set(&self, key: &'static str, value: bool) {
        self.values.lock().insert(key, value);
    }

    /// Set a key until the returned subscription is released, then restore
    /// whatever it was before
    pub fn scoped(&self, key: &'static str, value: bool) -> Subscription {
        let previous = self.values.lock().insert(key, value);
        let values = self.values.clone();
        Subscription::new(move || {
            let mut values = values.lock();
            match previous {
                Some(previous) => values.insert(key, previous),
                None => values.remove(key),
            };
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_restores_previous_value() {
        let context = ContextKeys::new();
        context.set(keys::MODAL_LAYERS, true);

        let mut sub = context.scoped(keys::MODAL_LAYERS, false);
        let capture = context.scoped(keys::CAPTURING, true);
        assert!(!context.get(keys::MODAL_LAYERS));
        assert!(context.get(keys::CAPTURING));

        sub.release();
        drop(capture);
        assert!(context.get(keys::MODAL_LAYERS));
        assert!(!context.get(keys::CAPTURING));
    }
}
