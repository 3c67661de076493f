//! Free-list of reusable buffers
//!
//! A buffer is exclusively owned between [`Pool::acquire`] and its release.
//! Releasing happens either explicitly through [`Pool::release`] or
//! implicitly when a [`Pooled`] guard is dropped without being taken.

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

pub struct Pool<T> {
    free: Mutex<Vec<T>>,
    max_idle: usize,
}

impl<T: Default> Pool<T> {
    /// Creates an empty pool that keeps at most `max_idle` released buffers
    pub fn new(max_idle: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Takes an idle buffer, or a fresh default one when none is idle
    pub fn acquire(&self) -> Pooled<'_, T> {
        let value = self
            .free
            .lock()
            .ok()
            .and_then(|mut free| free.pop())
            .unwrap_or_default();
        Pooled {
            pool: self,
            value: Some(value),
        }
    }

    /// Returns a buffer for reuse. Dropped instead when the pool is full.
    pub fn release(&self, value: T) {
        // A poisoned free-list only costs reuse
        if let Ok(mut free) = self.free.lock()
            && free.len() < self.max_idle
        {
            free.push(value);
        }
    }

    /// Number of idle buffers
    pub fn idle(&self) -> usize {
        self.free.lock().map(|free| free.len()).unwrap_or(0)
    }
}

/// Guard over an acquired buffer; hands it back to the pool on drop
pub struct Pooled<'a, T: Default> {
    pool: &'a Pool<T>,
    value: Option<T>,
}

impl<T: Default> Pooled<'_, T> {
    /// Keeps the buffer instead of returning it to the pool
    pub fn take(mut self) -> T {
        self.value.take().unwrap_or_default()
    }
}

impl<T: Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_ref().expect("pooled value present until drop")
    }
}

impl<T: Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().expect("pooled value present until drop")
    }
}

impl<T: Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}
