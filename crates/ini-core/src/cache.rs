//! Syntax tree cache keyed by buffer version
//!
//! Each buffer owns one slot holding the last `(version, tree)` pair. A slot
//! is guarded by its own mutex, held only while checking the version and, on a
//! miss, parsing. Trees are returned as `Arc`s and need no locking afterwards:
//! they are immutable, and a newer version never mutates an older tree, it
//! only replaces the slot content.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::cst::SyntaxTree;
use crate::text::{BufferId, ContentChange, Snapshot, TextBuffer};

type Slot = Arc<Mutex<Option<Arc<SyntaxTree>>>>;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Buffers with a slot
    pub buffers: usize,
    /// Requests served from a slot
    pub hits: u64,
    /// Requests that parsed
    pub parses: u64,
}

impl CacheStats {
    /// Get the hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.parses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Associates each buffer with the tree of its latest parsed version
#[derive(Debug, Default)]
pub struct TreeCache {
    slots: DashMap<BufferId, Slot>,
    hits: AtomicU64,
    parses: AtomicU64,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree for `snapshot`, parsing at most once per version
    ///
    /// Requests for an older snapshot than the one stored are parsed but not
    /// stored, so the slot never goes back in time.
    pub fn get_tree(&self, snapshot: &Snapshot) -> Arc<SyntaxTree> {
        let slot = self.slot(snapshot.buffer_id());
        let mut stored = lock(&slot);

        if let Some(tree) = stored.as_ref()
            && tree.version() == snapshot.version()
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(
                buffer = %snapshot.buffer_id(),
                version = snapshot.version(),
                "Tree cache hit"
            );
            return Arc::clone(tree);
        }

        let tree = Arc::new(SyntaxTree::parse(snapshot));
        self.parses.fetch_add(1, Ordering::Relaxed);

        let has_newer = stored
            .as_ref()
            .is_some_and(|current| current.version() > snapshot.version());
        if has_newer {
            debug!(
                buffer = %snapshot.buffer_id(),
                version = snapshot.version(),
                "Parsed an outdated snapshot; keeping the newer cached tree"
            );
        } else {
            *stored = Some(Arc::clone(&tree));
        }

        tree
    }

    /// The tree for the buffer's current snapshot
    pub fn get_buffer_tree(&self, buffer: &TextBuffer) -> Arc<SyntaxTree> {
        self.get_tree(&buffer.snapshot())
    }

    /// The stored tree, without parsing
    pub fn cached(&self, buffer: BufferId) -> Option<Arc<SyntaxTree>> {
        let slot = self.slots.get(&buffer).map(|slot| Arc::clone(slot.value()))?;
        let stored = lock(&slot);
        stored.clone()
    }

    /// Drop the stored tree if `change` made it outdated
    pub fn invalidate(&self, change: &ContentChange) {
        if change.is_empty() {
            return;
        }
        let Some(slot) = self
            .slots
            .get(&change.buffer_id())
            .map(|slot| Arc::clone(slot.value()))
        else {
            return;
        };

        let mut stored = lock(&slot);
        if stored
            .as_ref()
            .is_some_and(|tree| tree.version() < change.after.version())
        {
            trace!(
                buffer = %change.buffer_id(),
                version = change.after.version(),
                "Invalidated cached tree"
            );
            *stored = None;
        }
    }

    /// Forget a buffer entirely, e.g. when it is closed
    pub fn evict(&self, buffer: BufferId) -> Option<Arc<SyntaxTree>> {
        let (_, slot) = self.slots.remove(&buffer)?;
        let mut stored = lock(&slot);
        stored.take()
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            buffers: self.slots.len(),
            hits: self.hits.load(Ordering::Relaxed),
            parses: self.parses.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, buffer: BufferId) -> Slot {
        Arc::clone(self.slots.entry(buffer).or_default().value())
    }
}

/// A panic while parsing leaves the slot content untouched, so a poisoned
/// lock is still safe to use
fn lock(slot: &Mutex<Option<Arc<SyntaxTree>>>) -> MutexGuard<'_, Option<Arc<SyntaxTree>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
