//! In-memory collaborators for testing and development

use crate::core::Coordinates;
use crate::platform::location::{LocationFix, LocationProvider, PermissionStatus};
use crate::platform::persistence::{PersistenceStore, FAVORITES_KEY, FILTER_KEY};
use crate::validation::error::PersistenceError;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
struct MemoryState {
    blobs: HashMap<String, String>,
    fail_writes: bool,
    fail_reads: bool,
    writes: usize,
}

/// Blob store held in memory
///
/// Clones share the same backing map, so a test can keep one handle while
/// the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with filter and favorites blobs
    pub fn with_blobs(filter: Option<&str>, favorites: Option<&str>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.borrow_mut();
            if let Some(blob) = filter {
                state.blobs.insert(FILTER_KEY.to_string(), blob.to_string());
            }
            if let Some(blob) = favorites {
                state.blobs.insert(FAVORITES_KEY.to_string(), blob.to_string());
            }
        }
        store
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, enable: bool) {
        self.state.borrow_mut().fail_writes = enable;
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, enable: bool) {
        self.state.borrow_mut().fail_reads = enable;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn blob(&self, key: &str) -> Option<String> {
        self.state.borrow().blobs.get(key).cloned()
    }

    fn read_key(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(PersistenceError::ReadFailed {
                key: key.to_string(),
                message: "simulated read failure".to_string(),
            });
        }
        Ok(state.blobs.get(key).cloned())
    }

    fn write_key(&self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(PersistenceError::WriteFailed {
                key: key.to_string(),
                message: "simulated write failure".to_string(),
            });
        }
        state.blobs.insert(key.to_string(), blob.to_string());
        state.writes += 1;
        Ok(())
    }
}

impl PersistenceStore for InMemoryStore {
    fn read_filter(&self) -> Result<Option<String>, PersistenceError> {
        self.read_key(FILTER_KEY)
    }

    fn write_filter(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.write_key(FILTER_KEY, blob)
    }

    fn read_favorites(&self) -> Result<Option<String>, PersistenceError> {
        self.read_key(FAVORITES_KEY)
    }

    fn write_favorites(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.write_key(FAVORITES_KEY, blob)
    }
}

/// Scripted location provider
///
/// Fixes are handed out in the order they were queued; once the queue is
/// empty every request times out.
#[derive(Debug, Clone)]
pub struct MockLocationProvider {
    permission: PermissionStatus,
    fixes: VecDeque<LocationFix>,
    permission_requests: usize,
    last_timeout: Option<Duration>,
}

impl MockLocationProvider {
    pub fn new(permission: PermissionStatus) -> Self {
        Self {
            permission,
            fixes: VecDeque::new(),
            permission_requests: 0,
            last_timeout: None,
        }
    }

    /// Provider that grants permission and reports one position
    pub fn at(lon: f64, lat: f64) -> Self {
        let mut provider = Self::new(PermissionStatus::Granted);
        provider.push_fix(lon, lat);
        provider
    }

    pub fn push_fix(&mut self, lon: f64, lat: f64) {
        self.fixes.push_back(LocationFix::Fix(Coordinates::new(lon, lat)));
    }

    pub fn push_timeout(&mut self) {
        self.fixes.push_back(LocationFix::TimedOut);
    }

    pub fn set_permission(&mut self, permission: PermissionStatus) {
        self.permission = permission;
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests
    }

    /// Timeout passed to the most recent `get_location` call
    pub fn last_timeout(&self) -> Option<Duration> {
        self.last_timeout
    }
}

impl LocationProvider for MockLocationProvider {
    fn request_permission(&mut self) -> PermissionStatus {
        self.permission_requests += 1;
        self.permission
    }

    fn get_location(&mut self, timeout: Duration) -> LocationFix {
        self.last_timeout = Some(timeout);
        self.fixes.pop_front().unwrap_or(LocationFix::TimedOut)
    }
}
