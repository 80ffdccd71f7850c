//! The four timer interrupt handlers.
//!
//! Each handler is the body of one timer's interrupt service routine: the
//! application wires `on_interrupt` into its vector table or HAL interrupt
//! binding. Handlers own their collaborators and share only the
//! [`SettingsCell`] by reference. They never return errors - there is no
//! caller inside an ISR - and they acknowledge their interrupt source on
//! every path through an [`AckGuard`] armed as the first action, so a missed
//! acknowledgment (which would stall the timer permanently) cannot be
//! expressed.
//!
//! Priority model: [`SoftPwmHandler`] runs at the highest priority and may
//! preempt [`TickHandler`] between any two of its steps. The shared record
//! crossing that boundary goes through the atomic [`SettingsCell`], so a
//! preempting snapshot is always exactly one published configuration.

use crate::gate::{ClearOnce, GatePhase, StartupGate};
use crate::hal::{InterruptAck, PwmEngine, StateSink, StatusLed, TextDisplay, TickCallback};
use crate::settings::SettingsCell;
use crate::types::AppState;
use crate::STARTUP_TICKS;

/// Display row showing the duty cycle, cleared once after startup.
pub const DISPLAY_DUTY_LINE: u8 = 2;

/// Display row showing the output frequency, cleared once after startup.
pub const DISPLAY_RATE_LINE: u8 = 3;

/// Scoped guard that acknowledges a timer's interrupt source when dropped.
///
/// Armed at the top of every handler so the acknowledgment fires exactly
/// once per invocation, on every exit path, as the last action.
pub struct AckGuard<'a, A: InterruptAck> {
    ack: &'a mut A,
}

impl<'a, A: InterruptAck> AckGuard<'a, A> {
    /// Arms the guard for one handler invocation.
    pub fn arm(ack: &'a mut A) -> Self {
        Self { ack }
    }
}

impl<A: InterruptAck> Drop for AckGuard<'_, A> {
    fn drop(&mut self) {
        self.ack.acknowledge();
    }
}

/// Primary periodic handler: startup gate plus per-tick orchestration.
///
/// For the first [`STARTUP_TICKS`] ticks only an `Initializing` state report
/// runs. From the tick the gate opens, every tick runs the full cycle:
/// one-time display clear, busy indicator on, settings fetch and publish,
/// display refresh, hardware PWM step, optional callback, busy indicator
/// off. The interrupt source is acknowledged unconditionally in both phases.
///
/// # Type Parameters
/// * `'c` - Lifetime of the shared settings cell
/// * `A` - Interrupt acknowledge handle
/// * `S` - Application state sink
/// * `D` - Text display
/// * `L` - Busy indicator
/// * `E` - PWM engine
pub struct TickHandler<'c, A, S, D, L, E>
where
    A: InterruptAck,
    S: StateSink,
    D: TextDisplay,
    L: StatusLed,
    E: PwmEngine,
{
    ack: A,
    sink: S,
    display: D,
    busy: L,
    engine: E,
    settings: &'c SettingsCell,
    gate: StartupGate,
    clear: ClearOnce,
    callback: Option<TickCallback>,
}

impl<'c, A, S, D, L, E> TickHandler<'c, A, S, D, L, E>
where
    A: InterruptAck,
    S: StateSink,
    D: TextDisplay,
    L: StatusLed,
    E: PwmEngine,
{
    /// Creates a handler with the default startup phase of [`STARTUP_TICKS`]
    /// ticks and no callback.
    pub fn new(ack: A, sink: S, display: D, busy: L, engine: E, settings: &'c SettingsCell) -> Self {
        Self {
            ack,
            sink,
            display,
            busy,
            engine,
            settings,
            gate: StartupGate::new(STARTUP_TICKS),
            clear: ClearOnce::new(),
            callback: None,
        }
    }

    /// Overrides the startup phase length in ticks.
    pub fn with_startup_ticks(mut self, ticks: u16) -> Self {
        self.gate = StartupGate::new(ticks);
        self
    }

    /// Sets the callback invoked once per tick after the hardware PWM step.
    pub fn with_callback(mut self, callback: TickCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Runs one invocation of the primary timer's interrupt handler.
    pub fn on_interrupt(&mut self) {
        let Self {
            ack,
            sink,
            display,
            busy,
            engine,
            settings,
            gate,
            clear,
            callback,
        } = self;
        let _ack = AckGuard::arm(ack);

        match gate.poll() {
            GatePhase::Starting => {
                sink.update(AppState::Initializing);
            }
            GatePhase::Ready => {
                if clear.take() {
                    display.clear_line(DISPLAY_DUTY_LINE);
                    display.clear_line(DISPLAY_RATE_LINE);
                }

                busy.on();

                let current = engine.fetch();
                settings.publish(current);

                display.write_line(DISPLAY_DUTY_LINE, &current.render_duty_line());
                display.write_line(DISPLAY_RATE_LINE, &current.render_rate_line());

                engine.run_hardware(&current);

                if let Some(callback) = callback {
                    callback();
                }

                busy.off();
            }
        }
    }

    /// Returns true once the startup phase is over.
    pub fn is_started(&self) -> bool {
        self.gate.is_ready()
    }
}

/// High-rate software PWM handler.
///
/// Runs at the highest interrupt priority and may preempt the
/// [`TickHandler`] mid-cycle. Each invocation takes one atomic snapshot of
/// the shared settings and executes one software PWM output step against it,
/// bracketed by its own busy indicator.
pub struct SoftPwmHandler<'c, A, L, E>
where
    A: InterruptAck,
    L: StatusLed,
    E: PwmEngine,
{
    ack: A,
    busy: L,
    engine: E,
    settings: &'c SettingsCell,
}

impl<'c, A, L, E> SoftPwmHandler<'c, A, L, E>
where
    A: InterruptAck,
    L: StatusLed,
    E: PwmEngine,
{
    /// Creates a handler reading from the shared settings cell.
    pub fn new(ack: A, busy: L, engine: E, settings: &'c SettingsCell) -> Self {
        Self {
            ack,
            busy,
            engine,
            settings,
        }
    }

    /// Runs one invocation of the software PWM timer's interrupt handler.
    pub fn on_interrupt(&mut self) {
        let _ack = AckGuard::arm(&mut self.ack);

        self.busy.on();
        let current = self.settings.snapshot();
        self.engine.run_software(&current);
        self.busy.off();
    }
}

/// Handler for a reserved timer channel: acknowledges its interrupt source
/// and nothing else.
pub struct IdleHandler<A: InterruptAck> {
    ack: A,
}

impl<A: InterruptAck> IdleHandler<A> {
    /// Creates an idle handler.
    pub fn new(ack: A) -> Self {
        Self { ack }
    }

    /// Runs one invocation: acknowledge only.
    pub fn on_interrupt(&mut self) {
        let _ack = AckGuard::arm(&mut self.ack);
    }
}
