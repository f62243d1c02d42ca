//! Relay topology changes between Normal and the armed (Spot/Stitch) modes.
//!
//! # Ordering
//!
//! Connecting or disconnecting the sense line through relay4 produces a
//! transient that looks exactly like a trigger edge. Every transition
//! therefore follows
//!
//! ```text
//! disable edge interrupt -> move relay4 -> settle -> (re-enable)
//! ```
//!
//! and never reorders those steps.
//!
//! ## Into Normal
//!
//! ```text
//! disable irq | relay4 off, 100ms | relay3 off, 100ms | relay1+2 off, 100ms
//! ```
//!
//! ## Into Spot / Stitch
//!
//! ```text
//! relay1+2 on, relay3 off, 100ms | disable irq | relay4 on, 1000ms | enable irq
//! ```
//!
//! Any flag latched before the change is discarded while the interrupt is
//! off, so an edge from the previous mode never starts a procedure in the
//! next one.
//!
//! ## After a failed step
//!
//! A driver error part-way through leaves the relays in a mixed pattern.
//! [`fail_safe`] then drives passthrough step by step, relay4 first, and
//! keeps going past individual failures.

use alloc::sync::Arc;

use log::{debug, error, info, warn};

use crate::mode::ModeKind;
use crate::monitor::TriggerLatch;
use crate::rig::Rig;
use crate::timing::{SENSE_SETTLE_MS, SETTLE_MS};
use crate::traits::{Delay, RelayDriver, RelayId, TriggerInput};

/// Reconfigure for passthrough.
///
/// On return every relay is released, the sense line is isolated, edge
/// detection is off, and the latch reads Normal with its flag clear.
pub fn enter_normal<R, T, D>(rig: &mut Rig<R, T, D>, latch: &TriggerLatch) -> Result<(), R::Error>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    rig.trigger.disable_interrupt()?;
    debug!("trigger interrupt disabled");
    latch.clear();

    // Isolate the sense input first
    rig.relays.set(RelayId::Relay4, false)?;
    rig.hold(SETTLE_MS)?;
    rig.relays.set(RelayId::Relay3, false)?;
    rig.hold(SETTLE_MS)?;

    rig.relays.set(RelayId::Relay1, false)?;
    rig.relays.set(RelayId::Relay2, false)?;
    rig.hold(SETTLE_MS)?;

    latch.set_mode(ModeKind::Normal);
    info!("mode normal: trigger passthrough");
    Ok(())
}

/// Reconfigure for Spot or Stitch and install the edge monitor.
///
/// `kind` must be [`ModeKind::Spot`] or [`ModeKind::Stitch`]. The mode tag
/// is published before detection is enabled so that the first genuine edge
/// is accepted.
pub fn enter_armed<R, T, D>(
    rig: &mut Rig<R, T, D>,
    latch: &Arc<TriggerLatch>,
    kind: ModeKind,
) -> Result<(), R::Error>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    debug_assert!(kind != ModeKind::Normal);

    rig.relays.set(RelayId::Relay1, true)?;
    rig.relays.set(RelayId::Relay2, true)?;
    rig.relays.set(RelayId::Relay3, false)?;
    rig.hold(SETTLE_MS)?;

    rig.trigger.disable_interrupt()?;
    debug!("trigger interrupt disabled");
    rig.relays.set(RelayId::Relay4, true)?;
    rig.hold(SENSE_SETTLE_MS)?;

    latch.clear();
    latch.set_mode(kind);
    rig.trigger.enable_rising_edge(TriggerLatch::monitor(latch))?;
    debug!("trigger interrupt enabled (rising edge)");

    info!("mode {}: sense line connected", kind.as_str());
    Ok(())
}

/// Drive the power-on state: passthrough, interrupt off, flag clear.
pub fn boot_defaults<R, T, D>(rig: &mut Rig<R, T, D>, latch: &TriggerLatch) -> Result<(), R::Error>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    debug!("driving boot defaults");
    enter_normal(rig, latch)
}

/// Best-effort fall back to passthrough after a failed transition or
/// procedure.
///
/// The mode tag goes to Normal before anything else, so an edge arriving
/// while detection cannot be disabled is counted as a violation instead of
/// latched. Every step is attempted whatever the previous one returned.
/// Waits use the bare delay: re-arming is what may have failed.
///
/// Returns `true` when every step succeeded.
pub fn fail_safe<R, T, D>(rig: &mut Rig<R, T, D>, latch: &TriggerLatch) -> bool
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    latch.set_mode(ModeKind::Normal);
    let mut clean = rig.trigger.disable_interrupt().is_ok();
    latch.clear();

    clean &= rig.relays.set(RelayId::Relay4, false).is_ok();
    rig.delay.delay_ms(SETTLE_MS);
    clean &= rig.relays.set(RelayId::Relay3, false).is_ok();
    rig.delay.delay_ms(SETTLE_MS);
    clean &= rig.relays.set(RelayId::Relay1, false).is_ok();
    clean &= rig.relays.set(RelayId::Relay2, false).is_ok();
    rig.delay.delay_ms(SETTLE_MS);

    if clean {
        warn!("fell back to normal mode after a hardware error");
    } else {
        error!("fallback to normal incomplete: relays {:?}", rig.relays.snapshot());
    }
    clean
}
