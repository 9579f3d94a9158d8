//! Signal/slot notification.
//!
//! A [`Signal`] is a list of connected callbacks ("slots") invoked in
//! connection order whenever the signal is emitted. Controllers expose signals
//! so that a view can re-render after each state change without the
//! controller knowing anything about the view.
//!
//! Slots run synchronously on the emitting thread. They are collected before
//! being invoked, so a slot may connect, disconnect, or emit on the same
//! signal without deadlocking.
//!
//! # Example
//!
//! ```
//! use tabula_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle for one connected slot, passed back to [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct Inner<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

/// Change notification with any number of listeners.
///
/// Slots receive `&Args`; payload-free signals use `()`.
pub struct Signal<Args> {
    inner: Arc<Inner<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                connections: Mutex::new(SlotMap::with_key()),
                blocked: AtomicBool::new(false),
            }),
        }
    }

    /// Register `slot`. It runs after every slot registered before it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.inner.connections.lock().insert(Arc::new(slot))
    }

    /// Like [`connect`](Self::connect), but the slot lives only as long as
    /// the returned guard.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Returns `false` if `id` was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.connections.lock().remove(id).is_some()
    }

    pub fn disconnect_all(&self) {
        self.inner.connections.lock().clear();
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.lock().len()
    }

    /// Suppress emission. Emits while blocked are dropped, not queued.
    pub fn set_blocked(&self, blocked: bool) {
        self.inner.blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn is_blocked(&self) -> bool {
        self.inner.blocked.load(Ordering::SeqCst)
    }

    /// Call every slot with `args`.
    #[tracing::instrument(skip_all, target = "tabula_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "tabula_core::signal", "blocked");
            return;
        }

        let slots: Vec<Slot<Args>> = self.inner.connections.lock().values().cloned().collect();
        tracing::trace!(target: "tabula_core::signal", slots = slots.len(), "emit");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.inner.connections.lock().len())
            .field("blocked", &self.inner.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// Disconnects its slot on drop. Outliving the signal is harmless.
pub struct ConnectionGuard<Args> {
    signal: Weak<Inner<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner.connections.lock().remove(self.id);
        }
    }
}

impl<Args> std::fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}
