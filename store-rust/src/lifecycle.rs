use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Decides whether the result of an async call may still be applied.
///
/// Every fetch takes a ticket from a monotonic counter; only the holder of
/// the latest ticket may apply its result. Once disposed, nothing is applied.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    generation: AtomicU64,
    disposed: AtomicBool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Ticket(u64);

impl Lifecycle {
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently issued ticket.
    pub fn latest(&self) -> Ticket {
        Ticket(self.generation.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.is_live() && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn is_live(&self) -> bool {
        !self.disposed.load(Ordering::SeqCst)
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
}
