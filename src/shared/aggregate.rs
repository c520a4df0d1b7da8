use super::event::DomainEvent;

// ============================================================================
// Aggregate Root Capability
// ============================================================================
//
// Key Principles:
// 1. Aggregates record events, they never dispatch them
// 2. Only the aggregate's own logic may record an event
// 3. Infrastructure drains the events after a successful commit
//
// ============================================================================

/// Ordered list of events raised by an aggregate and not yet dispatched.
///
/// Aggregates keep this as a private field. Recording is crate-private so
/// only aggregate code can append to it.
#[derive(Debug, Clone)]
pub struct PendingEvents<E> {
    events: Vec<E>,
}

impl<E> PendingEvents<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn record(&mut self, event: E) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    /// Remove and return every pending event, leaving the list empty.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }
}

impl<E> Default for PendingEvents<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented by every aggregate root.
///
/// Type Parameters:
/// - `Id`: The strongly-typed identity of the aggregate
/// - `Event`: The domain event type the aggregate raises
pub trait AggregateRoot: Send + Sync {
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Debug;
    type Event: DomainEvent;

    fn id(&self) -> Self::Id;

    /// Events raised since the aggregate was loaded or created
    fn pending_events(&self) -> &[Self::Event];

    /// Drain-and-clear, called by the unit of work once changes are durable
    fn take_pending_events(&mut self) -> Vec<Self::Event>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_events_preserve_insertion_order() {
        let mut pending = PendingEvents::new();
        pending.record("first");
        pending.record("second");
        pending.record("third");

        assert_eq!(pending.as_slice(), &["first", "second", "third"]);
    }

    #[test]
    fn test_drain_clears_pending_events() {
        let mut pending = PendingEvents::new();
        pending.record(1);
        pending.record(2);

        let drained = pending.drain();

        assert_eq!(drained, vec![1, 2]);
        assert!(pending.as_slice().is_empty());
        assert!(pending.drain().is_empty());
    }
}
