//! Core types shared across handlers and configuration.

/// Application-level state reported through a [`StateSink`](crate::hal::StateSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppState {
    /// Startup phase in progress; normal orchestration has not begun.
    Initializing,

    /// Normal operation. Not reported by the core itself; available for
    /// application use alongside [`AppState::Initializing`].
    Running,
}

/// The four timer channels driving the system.
///
/// Each channel fires at its own fixed period and interrupt priority,
/// configured once at system start through a [`Schedule`](crate::schedule::Schedule).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerChannel {
    /// Primary periodic timer: startup gate plus per-tick orchestration.
    Primary,

    /// Reserved channel, handler acknowledges only.
    Aux1,

    /// Reserved channel, handler acknowledges only.
    Aux2,

    /// High-rate, high-priority software PWM timer.
    SoftPwm,
}

impl TimerChannel {
    /// All channels, in slot order.
    pub const ALL: [TimerChannel; 4] = [
        TimerChannel::Primary,
        TimerChannel::Aux1,
        TimerChannel::Aux2,
        TimerChannel::SoftPwm,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            TimerChannel::Primary => 0,
            TimerChannel::Aux1 => 1,
            TimerChannel::Aux2 => 2,
            TimerChannel::SoftPwm => 3,
        }
    }
}

/// Settings validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// Duty cycle above 100 percent.
    DutyOutOfRange {
        /// The rejected duty value.
        duty: u8,
    },
}

impl core::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SettingsError::DutyOutOfRange { duty } => {
                write!(f, "duty cycle must be 0-100 percent, got {}", duty)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SettingsError {}
