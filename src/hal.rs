//! Hardware abstraction traits for the orchestrator's collaborators.
//!
//! The core never touches hardware directly. Implement these traits for your
//! platform (GPIO, LCD driver, PWM peripheral, interrupt controller) and hand
//! the implementations to the handlers at construction. All methods are
//! infallible from the core's point of view: there is no caller to report to
//! inside an interrupt handler, so any hardware error must be absorbed by
//! the implementation itself.

use crate::settings::PwmSettings;
use crate::types::AppState;

/// A single on/off status indicator (e.g. a busy LED).
///
/// `on` and `off` must be idempotent and safe to call from interrupt context.
pub trait StatusLed {
    /// Drives the indicator high.
    fn on(&mut self);

    /// Drives the indicator low.
    fn off(&mut self);
}

/// A line-oriented text display.
pub trait TextDisplay {
    /// Clears one display row.
    fn clear_line(&mut self, line: u8);

    /// Writes text to one display row.
    fn write_line(&mut self, line: u8, text: &str);
}

/// Sink for application-level state reports.
pub trait StateSink {
    /// Reports the current application state. Fire and forget.
    fn update(&mut self, state: AppState);
}

/// The PWM computation engine.
///
/// Owns the duty-cycle algorithm; the core only sequences its calls. The
/// software step runs at the highest interrupt priority and must be short
/// enough not to starve lower-priority work.
pub trait PwmEngine {
    /// Refreshes and returns the current settings from the engine's
    /// backing source (knobs, commands, ...).
    fn fetch(&mut self) -> PwmSettings;

    /// Executes one hardware PWM update with the given settings.
    fn run_hardware(&mut self, settings: &PwmSettings);

    /// Executes one software PWM output step with the given settings.
    fn run_software(&mut self, settings: &PwmSettings);
}

/// Per-timer handle for acknowledging the timer's interrupt source.
///
/// Failing to acknowledge stalls the timer permanently - the one fatal
/// failure mode of this system. The handlers call this through an
/// [`AckGuard`](crate::handler::AckGuard) so it fires on every exit path,
/// exactly once per invocation.
pub trait InterruptAck {
    /// Acknowledges the pending interrupt for this timer.
    fn acknowledge(&mut self);
}

/// Opaque callback invoked once per primary tick, after the hardware PWM
/// step. Purpose is up to the application.
pub type TickCallback = fn();
