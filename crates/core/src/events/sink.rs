//! Domain event sink trait and implementations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use super::DomainEvent;

/// Trait for receiving domain events.
///
/// Task and collection services emit through this trait after the external
/// collaborator has accepted a mutation.
///
/// `emit()` must not block, and a failed emit never undoes the mutation.
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    fn emit(&self, event: DomainEvent);

    /// Emit multiple domain events.
    ///
    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Writes each event to the `log` facade at debug level.
#[derive(Clone, Default)]
pub struct LoggingDomainEventSink;

impl DomainEventSink for LoggingDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        debug!("domain event: {:?}", event);
    }
}

/// Collects emitted events in memory.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<DomainEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.guard().clone()
    }

    /// Removes and returns all collected events.
    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.guard())
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.guard().push(event);
    }
}
