//! Concurrent sink for terminal symbol instances.

use crate::error::{LSystemError, Result};
use crate::instance::SymbolInstance;
use std::sync::{Mutex, MutexGuard, PoisonError};

const INITIAL_CAPACITY: usize = 100;

/// Append-only collection of terminal instances shared by all expansion tasks.
///
/// Arrival order reflects task scheduling, not grammar structure. Use
/// [`crate::materialize`] to recover the left-to-right order.
#[derive(Debug)]
pub struct OutputCollector {
    items: Mutex<Vec<SymbolInstance>>,
}

impl Default for OutputCollector {
    fn default() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }
}

impl OutputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(Vec::with_capacity(capacity.max(1))),
        }
    }

    /// Appends `instance`, doubling the backing storage when it is full.
    pub fn insert(&self, instance: SymbolInstance) -> Result<()> {
        let mut items = self.items.lock().map_err(|_| poisoned())?;
        if items.len() == items.capacity() {
            let grow_by = items.capacity();
            items.reserve_exact(grow_by);
        }
        items.push(instance);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock_recovering().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock_recovering().capacity()
    }

    /// Read-only views stay usable after a task panicked while holding the lock.
    fn lock_recovering(&self) -> MutexGuard<'_, Vec<SymbolInstance>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consumes the collector, returning instances in arrival order.
    pub fn into_inner(self) -> Result<Vec<SymbolInstance>> {
        self.items.into_inner().map_err(|_| poisoned())
    }

    /// Moves the collected instances out, leaving the collector empty.
    pub fn drain(&self) -> Result<Vec<SymbolInstance>> {
        let mut items = self.items.lock().map_err(|_| poisoned())?;
        Ok(std::mem::take(&mut *items))
    }
}

fn poisoned() -> LSystemError {
    LSystemError::ExpansionFailure("output collector lock poisoned".into())
}
