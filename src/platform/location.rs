//! Location permission and fix collaborator

use crate::core::Coordinates;
use std::time::Duration;

/// Outcome of a permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Outcome of a single location fetch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    Fix(Coordinates),
    /// No fix arrived within the allotted time
    TimedOut,
}

/// Platform location services
///
/// Implementations own the waiting: `get_location` must return no later
/// than `timeout`, yielding [`LocationFix::TimedOut`] if nothing arrived.
pub trait LocationProvider {
    fn request_permission(&mut self) -> PermissionStatus;

    fn get_location(&mut self, timeout: Duration) -> LocationFix;
}
