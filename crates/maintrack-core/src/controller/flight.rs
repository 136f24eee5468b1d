//! Single-flight guard for form submissions.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, TrackerError};

/// Allows at most one submission at a time.
///
/// ```rust
/// use maintrack_core::controller::SingleFlight;
///
/// let flight = SingleFlight::new();
/// let guard = flight.try_begin().unwrap();
/// assert!(flight.is_submitting());
/// assert!(flight.try_begin().is_err());
///
/// drop(guard);
/// assert!(!flight.is_submitting());
/// ```
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: AtomicBool,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a submission as started.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::SubmissionInFlight` while another guard from
    /// this instance is alive.
    pub fn try_begin(&self) -> Result<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| FlightGuard { flight: self })
            .map_err(|_| TrackerError::SubmissionInFlight)
    }

    pub fn is_submitting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Clears the submitting flag when dropped.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    flight: &'a SingleFlight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flight.busy.store(false, Ordering::Release);
    }
}
