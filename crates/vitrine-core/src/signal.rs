//! Process-wide signal dispatcher.
//!
//! Viewport resizes, scroll movement and pointer motion arrive once from the
//! terminal and are fanned out here to every subscribed component. Components
//! subscribe when they mount and unsubscribe when they unmount, so there is a
//! single registration point and teardown order is deterministic.

use std::fmt;

use tracing::trace;

use crate::Viewport;

/// A viewport or input signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The terminal was resized.
    Resize(Viewport),
    /// The page scroll position changed (rows from the top of the page).
    Scroll(u32),
    /// The pointer moved to a cell.
    Pointer { column: u16, row: u16 },
}

impl Signal {
    pub const fn kind(&self) -> SignalKind {
        match self {
            Signal::Resize(_) => SignalKind::Resize,
            Signal::Scroll(_) => SignalKind::Scroll,
            Signal::Pointer { .. } => SignalKind::Pointer,
        }
    }
}

/// Discriminant of [`Signal`], used to pick which signals a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Resize,
    Scroll,
    Pointer,
}

/// Identifies one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Signal)>;

struct Subscription {
    id: SubscriptionId,
    kind: SignalKind,
    listener: Listener,
}

/// Fans signals out to listeners in subscription order.
///
/// Listeners must not call back into the dispatcher while it is dispatching.
#[derive(Default)]
pub struct SignalDispatcher {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl fmt::Debug for SignalDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalDispatcher")
            .field("next_id", &self.next_id)
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

impl SignalDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one kind of signal.
    pub fn subscribe(
        &mut self,
        kind: SignalKind,
        listener: impl FnMut(&Signal) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            listener: Box::new(listener),
        });
        trace!(?id, ?kind, "listener subscribed");
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        let removed = self.subscriptions.len() != before;
        if removed {
            trace!(?id, "listener unsubscribed");
        }
        removed
    }

    /// Deliver a signal to every listener of its kind. Returns how many ran.
    pub fn dispatch(&mut self, signal: &Signal) -> usize {
        let kind = signal.kind();
        let mut delivered = 0;
        for sub in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (sub.listener)(signal);
            delivered += 1;
        }
        delivered
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: SignalKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
