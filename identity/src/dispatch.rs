//! Bounded "run after current dispatch" queue for provider events.
//!
//! ORDERING CONTRACT
//! =================
//! - `push` never runs consumer code; it only stores the item and wakes the
//!   consumer. A provider callback that pushes therefore returns before any
//!   adapter logic sees the event.
//! - `pop` yields items in push order.
//! - When full, the oldest item is dropped. Queued items are session
//!   snapshots, so a newer one supersedes an older one.
//! - After `close`, remaining items still drain; then `pop` yields `None`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Notify;

pub const DEFAULT_DISPATCH_CAPACITY: usize = 16;

/// Single-consumer FIFO with drop-oldest overflow.
pub struct DispatchQueue<T> {
    inner: Arc<QueueInner<T>>,
}

struct QueueInner<T> {
    state: Mutex<QueueState<T>>,
    notify: Notify,
    capacity: usize,
}

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
    dropped: u64,
}

impl<T> Clone for DispatchQueue<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> DispatchQueue<T> {
    /// `capacity` is clamped to at least 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(QueueInner {
                state: Mutex::new(QueueState { items: VecDeque::with_capacity(capacity), closed: false, dropped: 0 }),
                notify: Notify::new(),
                capacity,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueState<T>> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue without running any consumer code. Returns `false` once closed.
    pub fn push(&self, item: T) -> bool {
        {
            let mut state = self.lock();
            if state.closed {
                return false;
            }
            if state.items.len() >= self.inner.capacity {
                state.items.pop_front();
                state.dropped += 1;
                tracing::warn!(capacity = self.inner.capacity, "dispatch queue full; dropped oldest event");
            }
            state.items.push_back(item);
        }
        self.inner.notify.notify_one();
        true
    }

    /// Next item in push order; `None` once closed and drained.
    pub async fn pop(&self) -> Option<T> {
        loop {
            {
                let mut state = self.lock();
                if let Some(item) = state.items.pop_front() {
                    return Some(item);
                }
                if state.closed {
                    return None;
                }
            }
            self.inner.notify.notified().await;
        }
    }

    /// Stop accepting items and wake the consumer.
    pub fn close(&self) {
        self.lock().closed = true;
        self.inner.notify.notify_one();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items discarded by overflow since creation.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;
