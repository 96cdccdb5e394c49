//! Single-occupancy drawing surface slot.
//!
//! One render target exists per engine and must be exclusively owned by
//! whichever render call is currently executing. The slot turns an
//! accidental overlapping render (e.g. a preview issued mid-batch) into an
//! explicit error instead of corrupted pixels.

use std::sync::atomic::{AtomicBool, Ordering};

use certmill_common::{CertmillError, CertmillResult};

/// In-progress flag guarding the engine's drawing surface.
#[derive(Debug, Default)]
pub struct SurfaceSlot {
    in_flight: AtomicBool,
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the surface for one render call.
    ///
    /// Fails if a render is already in flight; the claim is released when
    /// the returned guard drops.
    pub fn acquire(&self) -> CertmillResult<SurfaceGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                CertmillError::render("A render is already in flight; the surface is single-occupancy")
            })?;
        Ok(SurfaceGuard { slot: self })
    }
}

/// Scoped claim on the drawing surface.
#[must_use = "dropping the guard releases the surface"]
pub struct SurfaceGuard<'a> {
    slot: &'a SurfaceSlot,
}

impl Drop for SurfaceGuard<'_> {
    fn drop(&mut self) {
        self.slot.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_while_held_fails() {
        let slot = SurfaceSlot::new();
        let guard = slot.acquire().unwrap();
        assert!(slot.acquire().is_err());
        drop(guard);
    }

    #[test]
    fn slot_is_released_when_guard_drops() {
        let slot = SurfaceSlot::new();
        drop(slot.acquire().unwrap());
        assert!(slot.acquire().is_ok());
    }
}
