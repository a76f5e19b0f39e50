//! Global pointer listener for outside-click detection.
//!
//! A [`PointerHub`] fans pointer events out to subscribers. Each
//! [`Subscription`] removes its listener when dropped, so a panel that is
//! mounted and unmounted repeatedly never leaves listeners behind.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    SearchRegion,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn inside_search() -> Self {
        Self { target: PointerTarget::SearchRegion }
    }

    pub fn outside() -> Self {
        Self { target: PointerTarget::Outside }
    }

    pub fn is_outside(&self) -> bool {
        self.target == PointerTarget::Outside
    }
}

type Listener = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

#[derive(Clone, Default)]
pub struct PointerHub {
    listeners: Arc<Mutex<Listeners>>,
}

impl fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerHub").field("listeners", &self.listener_count()).finish()
    }
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock();
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.entries.push((id, Arc::new(listener)));

        Subscription { listeners: Arc::downgrade(&self.listeners), id }
    }

    pub fn dispatch(&self, event: &PointerEvent) {
        // Call outside the lock so listeners may subscribe or unsubscribe.
        let snapshot: Vec<Listener> =
            self.listeners.lock().entries.iter().map(|(_, l)| Arc::clone(l)).collect();

        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }
}

/// Keeps a listener attached until dropped.
#[must_use = "the listener is detached as soon as the subscription is dropped"]
#[derive(Debug)]
pub struct Subscription {
    listeners: Weak<Mutex<Listeners>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().entries.retain(|(id, _)| *id != self.id);
        }
    }
}
