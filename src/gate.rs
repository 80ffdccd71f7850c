//! Startup gating and one-shot latching for the primary handler.
//!
//! Both are small state machines with their states and transitions spelled
//! out, so the saturating and single-shot semantics hold by construction
//! rather than by counter comparisons.

/// Phase reported by [`StartupGate::poll`] for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatePhase {
    /// Still inside the startup phase; only the initializing report runs.
    Starting,

    /// Startup phase over; normal orchestration runs this tick and every
    /// tick after.
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Counting(u16),
    Ready,
}

/// Counted startup delay gate.
///
/// Reports [`GatePhase::Starting`] for exactly `threshold` polls, then
/// [`GatePhase::Ready`] forever. The transition happens on a single tick
/// boundary: the poll on which the count first reaches the threshold is the
/// first `Ready` poll. The counter never wraps - once ready, it stops.
#[derive(Debug)]
pub struct StartupGate {
    threshold: u16,
    state: GateState,
}

impl StartupGate {
    /// Creates a gate that stays in the startup phase for `threshold` ticks.
    pub const fn new(threshold: u16) -> Self {
        Self {
            threshold,
            state: GateState::Counting(0),
        }
    }

    /// Advances the gate by one tick and returns the phase for this tick.
    pub fn poll(&mut self) -> GatePhase {
        match self.state {
            GateState::Counting(ticks) if ticks < self.threshold => {
                self.state = GateState::Counting(ticks + 1);
                GatePhase::Starting
            }
            _ => {
                self.state = GateState::Ready;
                GatePhase::Ready
            }
        }
    }

    /// Returns true once the startup phase is over.
    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }
}

/// Single-shot latch: [`take`](ClearOnce::take) returns `true` exactly once.
///
/// Used for the one-time display clear on the first post-startup tick.
#[derive(Debug, Default)]
pub struct ClearOnce {
    fired: bool,
}

impl ClearOnce {
    /// Creates an armed latch.
    pub const fn new() -> Self {
        Self { fired: false }
    }

    /// Fires the latch. Returns `true` on the first call, `false` after.
    pub fn take(&mut self) -> bool {
        let armed = !self.fired;
        self.fired = true;
        armed
    }

    /// Returns true once the latch has fired.
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
