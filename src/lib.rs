#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TickHandler`**: The primary periodic handler - startup gating plus the per-tick
//!   fetch/display/execute orchestration
//! - **`SoftPwmHandler`**: The high-rate, high-priority software PWM step handler
//! - **`IdleHandler`**: A reserved timer channel that only acknowledges its interrupt
//! - **`PwmSettings`** / **`SettingsCell`**: The shared settings record and its
//!   single-word atomic snapshot cell
//! - **`StartupGate`** / **`ClearOnce`**: The counted startup delay and the one-shot
//!   display-clear latch
//! - **`Schedule`**: The four-channel timer plan (periods and priorities)
//! - **`StatusLed`**, **`TextDisplay`**, **`StateSink`**, **`PwmEngine`**,
//!   **`InterruptAck`**: Traits to implement for your hardware
//!
//! Handlers never return errors and never skip interrupt acknowledgment: every
//! `on_interrupt` arms an [`AckGuard`] before doing anything else, so the
//! acknowledgment fires on every exit path.

pub mod gate;
pub mod hal;
pub mod handler;
pub mod schedule;
pub mod settings;
pub mod types;

pub use gate::{ClearOnce, GatePhase, StartupGate};
pub use hal::{InterruptAck, PwmEngine, StateSink, StatusLed, TextDisplay, TickCallback};
pub use handler::{AckGuard, IdleHandler, SoftPwmHandler, TickHandler};
pub use schedule::{Schedule, ScheduleBuilder, ScheduleError, TimerSlot};
pub use settings::{PwmSettings, SettingsCell};
pub use types::{AppState, SettingsError, TimerChannel};

/// Number of primary-timer ticks spent in the startup phase before normal
/// orchestration begins (149 ticks at 20 ms = 2.98 s).
pub const STARTUP_TICKS: u16 = 149;
