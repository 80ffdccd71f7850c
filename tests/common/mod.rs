//! Shared test infrastructure for pwm-orchestrator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use pwm_orchestrator::{
    AppState, InterruptAck, PwmEngine, PwmSettings, SettingsCell, SoftPwmHandler, StateSink,
    StatusLed, TextDisplay, TickHandler,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ============================================================================
// Ordered event log
// ============================================================================

/// Everything the mocks observe, in invocation order. The log is
/// thread-local so parallel test threads do not interleave, and so the plain
/// `fn()` tick callback can record itself too.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Ack(&'static str),
    State(AppState),
    ClearLine(u8),
    WriteLine(u8, String),
    BusyOn(&'static str),
    BusyOff(&'static str),
    Fetch,
    RunHardware(PwmSettings),
    RunSoftware(PwmSettings),
    Callback,
}

thread_local! {
    static EVENTS: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

pub fn log(event: Event) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

/// Drains and returns all events logged so far on this thread.
pub fn take_events() -> Vec<Event> {
    EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}

/// Callback suitable for `TickHandler::with_callback` in tests.
pub fn logging_callback() {
    log(Event::Callback);
}

// ============================================================================
// Mock collaborators
// ============================================================================

/// Mock interrupt-acknowledge handle, labeled per timer.
pub struct MockAck(pub &'static str);

impl InterruptAck for MockAck {
    fn acknowledge(&mut self) {
        log(Event::Ack(self.0));
    }
}

/// Mock busy indicator, labeled per handler.
pub struct MockLed(pub &'static str);

impl StatusLed for MockLed {
    fn on(&mut self) {
        log(Event::BusyOn(self.0));
    }

    fn off(&mut self) {
        log(Event::BusyOff(self.0));
    }
}

pub struct MockDisplay;

impl TextDisplay for MockDisplay {
    fn clear_line(&mut self, line: u8) {
        log(Event::ClearLine(line));
    }

    fn write_line(&mut self, line: u8, text: &str) {
        log(Event::WriteLine(line, text.to_string()));
    }
}

pub struct MockSink;

impl StateSink for MockSink {
    fn update(&mut self, state: AppState) {
        log(Event::State(state));
    }
}

/// Mock PWM engine whose fetched settings can be changed mid-test through
/// the shared script handle.
pub struct MockEngine {
    script: Rc<Cell<PwmSettings>>,
}

impl MockEngine {
    pub fn new(initial: PwmSettings) -> (Self, Rc<Cell<PwmSettings>>) {
        let script = Rc::new(Cell::new(initial));
        (
            Self {
                script: script.clone(),
            },
            script,
        )
    }
}

impl PwmEngine for MockEngine {
    fn fetch(&mut self) -> PwmSettings {
        log(Event::Fetch);
        self.script.get()
    }

    fn run_hardware(&mut self, settings: &PwmSettings) {
        log(Event::RunHardware(*settings));
    }

    fn run_software(&mut self, settings: &PwmSettings) {
        log(Event::RunSoftware(*settings));
    }
}

// ============================================================================
// Handler construction helpers
// ============================================================================

pub type TestTickHandler =
    TickHandler<'static, MockAck, MockSink, MockDisplay, MockLed, MockEngine>;

pub type TestSoftPwmHandler = SoftPwmHandler<'static, MockAck, MockLed, MockEngine>;

/// Fresh settings cell with static lifetime, one per test.
pub fn settings_cell() -> &'static SettingsCell {
    Box::leak(Box::new(SettingsCell::default()))
}

pub fn tick_handler(
    cell: &'static SettingsCell,
    startup_ticks: u16,
    fetched: PwmSettings,
) -> (TestTickHandler, Rc<Cell<PwmSettings>>) {
    let (engine, script) = MockEngine::new(fetched);
    let handler = TickHandler::new(
        MockAck("tick"),
        MockSink,
        MockDisplay,
        MockLed("tick"),
        engine,
        cell,
    )
    .with_startup_ticks(startup_ticks);
    (handler, script)
}

pub fn soft_pwm_handler(cell: &'static SettingsCell) -> TestSoftPwmHandler {
    let (engine, _) = MockEngine::new(PwmSettings::DEFAULT);
    SoftPwmHandler::new(MockAck("soft"), MockLed("soft"), engine, cell)
}

// ============================================================================
// Helper settings
// ============================================================================

pub fn settings(duty: u8, freq: u16, channel: u8) -> PwmSettings {
    PwmSettings::new(duty, freq, channel).unwrap()
}
