//! Observer registration for engine events
//!
//! Observers run synchronously, in registration order, after the mutation
//! that produced the event has fully completed.

use crate::core::{LocationState, MarkerId};
use crate::processing::sorter::SortOrder;
use crate::validation::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use std::fmt;

/// Observer callback type
pub type Observer = Box<dyn Fn(&EngineEvent)>;

/// Engine state changes observers can react to
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The filter changed and the view was rebuilt
    FilterChanged,
    FavoritesChanged {
        id: MarkerId,
        is_favorite: bool,
    },
    LocationChanged(LocationState),
    /// The dataset order changed
    ViewResorted {
        order: SortOrder,
    },
    /// A persistence write failed; in-memory state was kept
    PersistenceFailed {
        what: String,
    },
}

/// Observer registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverHandle(u32);

impl ObserverHandle {
    fn new(id: u32) -> Self {
        ObserverHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Registered observers keyed by ascending handle
#[derive(Default)]
pub struct ObserverRegistry {
    counter: u32,
    observers: BTreeMap<ObserverHandle, Observer>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Observer) -> ObserverHandle {
        self.counter += 1;
        let handle = ObserverHandle::new(self.counter);
        self.observers.insert(handle, observer);
        handle
    }

    pub fn unregister(&mut self, handle: ObserverHandle) -> EngineResult<()> {
        match self.observers.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(EngineError::InvalidRequest {
                reason: format!("unknown observer handle {}", handle.id()),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&self, event: &EngineEvent) {
        for observer in self.observers.values() {
            observer(event);
        }
    }

    pub fn notify_all(&self, events: &[EngineEvent]) {
        for event in events {
            self.notify(event);
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
