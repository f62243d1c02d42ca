//! Trigger edge latch shared between the edge interrupt and the main context.
//!
//! The edge interrupt preempts the sequencing procedure at any point, so the
//! only state it touches is a handful of atomics in [`TriggerLatch`]:
//!
//! - the interrupt flag (set on an accepted edge)
//! - the mode tag (read to decide whether an edge is acceptable)
//! - a violation counter (edges seen while in Normal mode)
//!
//! The interrupt handler receives a [`TriggerMonitor`], a capability that
//! can do nothing but report a rising edge. Clearing the flag, changing the
//! mode tag, and draining violations are reserved to the owner of the
//! `TriggerLatch` (the [`WeldController`](crate::WeldController)).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use yag_trigger::monitor::{EdgeOutcome, TriggerLatch};
//! use yag_trigger::ModeKind;
//!
//! let latch = Arc::new(TriggerLatch::new());
//! let monitor = TriggerLatch::monitor(&latch);
//!
//! latch.set_mode(ModeKind::Spot);
//! assert_eq!(monitor.on_rising_edge(), EdgeOutcome::Latched);
//! assert!(latch.is_latched());
//! ```

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::mode::ModeKind;

/// What the monitor did with an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// Mode is Spot or Stitch; the flag is (now) set.
    Latched,
    /// Mode is Normal, where the sense line should be isolated. The flag was
    /// cleared and the violation counted.
    ContractViolation,
}

/// Atomically shared trigger state.
#[derive(Debug, Default)]
pub struct TriggerLatch {
    flag: AtomicBool,
    mode: AtomicU8,
    violations: AtomicU32,
}

impl TriggerLatch {
    /// New latch: flag clear, mode Normal, no violations.
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
            mode: AtomicU8::new(ModeKind::Normal as u8),
            violations: AtomicU32::new(0),
        }
    }

    /// Hand out the edge-only capability for this latch.
    pub fn monitor(this: &Arc<Self>) -> TriggerMonitor {
        TriggerMonitor {
            latch: Arc::clone(this),
        }
    }

    /// Whether an accepted edge is waiting to be consumed.
    #[inline]
    pub fn is_latched(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Consume the flag. Idempotent.
    #[inline]
    pub fn clear(&self) {
        self.flag.store(false, Ordering::Release);
    }

    /// Mode tag as seen by the interrupt.
    #[inline]
    pub fn mode(&self) -> ModeKind {
        ModeKind::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// Publish a new mode tag.
    #[inline]
    pub fn set_mode(&self, mode: ModeKind) {
        self.mode.store(mode as u8, Ordering::Release);
    }

    /// Return and reset the number of edges seen in Normal mode.
    #[inline]
    pub fn take_violations(&self) -> u32 {
        self.violations.swap(0, Ordering::AcqRel)
    }
}

/// Restricted handle given to the edge interrupt.
///
/// Cheap to clone and `Send + 'static`, so it can be moved into a platform
/// ISR closure.
#[derive(Clone, Debug)]
pub struct TriggerMonitor {
    latch: Arc<TriggerLatch>,
}

impl TriggerMonitor {
    /// Handle one rising edge on the sense line.
    ///
    /// Bounded work only: one atomic load and one store (plus a counter bump
    /// on the violation path). Safe to call from interrupt context.
    #[inline]
    pub fn on_rising_edge(&self) -> EdgeOutcome {
        match self.latch.mode() {
            ModeKind::Spot | ModeKind::Stitch => {
                self.latch.flag.store(true, Ordering::Release);
                EdgeOutcome::Latched
            }
            ModeKind::Normal => {
                self.latch.flag.store(false, Ordering::Release);
                self.latch.violations.fetch_add(1, Ordering::Relaxed);
                EdgeOutcome::ContractViolation
            }
        }
    }
}
