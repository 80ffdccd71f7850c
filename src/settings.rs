//! The shared PWM settings record and its atomic snapshot cell.
//!
//! The record is read and written from two interrupt priority levels: the
//! primary handler refreshes it once per tick, and the software PWM handler
//! reads it hundreds of times in between and may preempt the refresh at any
//! instruction boundary. Instead of an unguarded shared struct, the record
//! packs into a single `u32` held in a [`SettingsCell`], so publishing and
//! snapshotting are each one atomic word access and a reader can never
//! observe a half-written mix of two configurations.

use crate::types::SettingsError;
use core::fmt::Write;
use core::sync::atomic::{AtomicU32, Ordering};
use heapless::String;

/// Display row width for rendered settings lines.
pub const LINE_WIDTH: usize = 20;

/// One PWM configuration: duty cycle, output frequency and channel.
///
/// Always represents a valid configuration - construction is validated and
/// [`PwmSettings::DEFAULT`] is a valid all-off state, so the shared record is
/// never observable uninitialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmSettings {
    duty_percent: u8,
    frequency_hz: u16,
    channel: u8,
}

impl PwmSettings {
    /// All-off configuration: zero duty at 1 kHz on channel 0.
    pub const DEFAULT: Self = Self {
        duty_percent: 0,
        frequency_hz: 1_000,
        channel: 0,
    };

    /// Creates validated settings.
    ///
    /// # Errors
    /// * `DutyOutOfRange` - duty cycle above 100 percent
    pub fn new(duty_percent: u8, frequency_hz: u16, channel: u8) -> Result<Self, SettingsError> {
        if duty_percent > 100 {
            return Err(SettingsError::DutyOutOfRange { duty: duty_percent });
        }

        Ok(Self {
            duty_percent,
            frequency_hz,
            channel,
        })
    }

    /// Duty cycle in percent (0-100).
    pub fn duty_percent(&self) -> u8 {
        self.duty_percent
    }

    /// Output frequency in hertz.
    pub fn frequency_hz(&self) -> u16 {
        self.frequency_hz
    }

    /// Output channel index.
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Packs the record into one machine word.
    pub const fn pack(self) -> u32 {
        ((self.channel as u32) << 24) | ((self.duty_percent as u32) << 16) | self.frequency_hz as u32
    }

    /// Unpacks a record previously produced by [`PwmSettings::pack`].
    pub const fn unpack(word: u32) -> Self {
        Self {
            duty_percent: ((word >> 16) & 0xFF) as u8,
            frequency_hz: (word & 0xFFFF) as u16,
            channel: (word >> 24) as u8,
        }
    }

    /// Renders the duty cycle row for the text display.
    pub fn render_duty_line(&self) -> String<LINE_WIDTH> {
        let mut line = String::new();
        let _ = write!(line, "Duty {:>3} %", self.duty_percent);
        line
    }

    /// Renders the frequency row for the text display.
    pub fn render_rate_line(&self) -> String<LINE_WIDTH> {
        let mut line = String::new();
        let _ = write!(line, "Freq {:>5} Hz", self.frequency_hz);
        line
    }
}

impl Default for PwmSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Atomic snapshot cell for the settings record shared across priority levels.
///
/// The low-priority orchestrator calls [`publish`](SettingsCell::publish)
/// once per tick; the high-priority software PWM handler calls
/// [`snapshot`](SettingsCell::snapshot) at its own rate. Both are single
/// word-sized atomic accesses, so a snapshot is always exactly one published
/// record. Intended to live in a `static` shared by the two handlers.
pub struct SettingsCell(AtomicU32);

impl SettingsCell {
    /// Creates a cell holding the given initial settings.
    pub const fn new(initial: PwmSettings) -> Self {
        Self(AtomicU32::new(initial.pack()))
    }

    /// Atomically replaces the stored settings.
    pub fn publish(&self, settings: PwmSettings) {
        self.0.store(settings.pack(), Ordering::Release);
    }

    /// Atomically reads the stored settings.
    pub fn snapshot(&self) -> PwmSettings {
        PwmSettings::unpack(self.0.load(Ordering::Acquire))
    }
}

impl Default for SettingsCell {
    fn default() -> Self {
        Self::new(PwmSettings::DEFAULT)
    }
}
