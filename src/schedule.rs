//! The four-channel timer plan: periods and interrupt priorities.
//!
//! The schedule is pure configuration - it is programmed into the timer
//! peripherals once at system start and never changes at runtime. The core
//! keeps it as a validated value so the priority relationship the handlers
//! rely on (software PWM outranks the primary timer) holds before any timer
//! is started.

use crate::types::TimerChannel;

/// One timer channel's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSlot {
    /// Firing period in microseconds.
    pub period_us: u32,

    /// Interrupt priority level; higher preempts lower.
    pub priority: u8,
}

/// Schedule validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleError {
    /// A channel was not configured.
    MissingSlot(TimerChannel),

    /// A channel has a zero period.
    ZeroPeriod(TimerChannel),

    /// The software PWM timer does not outrank the primary timer. The
    /// handlers' shared-settings contract assumes the software PWM step can
    /// preempt the orchestrator, never the reverse.
    PriorityInversion {
        /// Primary timer priority.
        primary: u8,
        /// Software PWM timer priority.
        soft_pwm: u8,
    },
}

impl core::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScheduleError::MissingSlot(channel) => {
                write!(f, "timer channel {:?} is not configured", channel)
            }
            ScheduleError::ZeroPeriod(channel) => {
                write!(f, "timer channel {:?} has a zero period", channel)
            }
            ScheduleError::PriorityInversion { primary, soft_pwm } => {
                write!(
                    f,
                    "software PWM priority {} must be above primary priority {}",
                    soft_pwm, primary
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScheduleError {}

/// Validated timer plan for all four channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    slots: [TimerSlot; 4],
}

impl Schedule {
    /// Creates a new schedule builder.
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::new()
    }

    /// Returns one channel's configuration.
    pub fn slot(&self, channel: TimerChannel) -> TimerSlot {
        self.slots[channel.index()]
    }

    /// Total startup-phase delay for a given gate threshold, in microseconds.
    ///
    /// With the default plan and the default threshold of 149 ticks this is
    /// 2.98 seconds.
    pub fn startup_delay_us(&self, ticks: u16) -> u64 {
        u64::from(self.slot(TimerChannel::Primary).period_us) * u64::from(ticks)
    }

    /// Software PWM invocations per primary tick, rounded down.
    pub fn soft_steps_per_tick(&self) -> u32 {
        let primary = self.slot(TimerChannel::Primary).period_us;
        let soft = self.slot(TimerChannel::SoftPwm).period_us;
        primary / soft
    }
}

impl Default for Schedule {
    /// 20 ms primary tick at priority 4, 35 us software PWM at priority 7,
    /// two reserved channels at priority 0.
    fn default() -> Self {
        Self {
            slots: [
                TimerSlot {
                    period_us: 20_000,
                    priority: 4,
                },
                TimerSlot {
                    period_us: 100_000,
                    priority: 0,
                },
                TimerSlot {
                    period_us: 100_000,
                    priority: 0,
                },
                TimerSlot {
                    period_us: 35,
                    priority: 7,
                },
            ],
        }
    }
}

/// Builder for a validated [`Schedule`].
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    slots: [Option<TimerSlot>; 4],
}

impl ScheduleBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures one channel.
    pub fn slot(mut self, channel: TimerChannel, period_us: u32, priority: u8) -> Self {
        self.slots[channel.index()] = Some(TimerSlot {
            period_us,
            priority,
        });
        self
    }

    /// Builds and validates the schedule.
    ///
    /// # Errors
    /// * `MissingSlot` - a channel was not configured
    /// * `ZeroPeriod` - a channel has a zero period
    /// * `PriorityInversion` - the software PWM timer does not outrank the
    ///   primary timer
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let mut slots = [TimerSlot {
            period_us: 0,
            priority: 0,
        }; 4];

        for channel in TimerChannel::ALL {
            let slot = self.slots[channel.index()].ok_or(ScheduleError::MissingSlot(channel))?;
            if slot.period_us == 0 {
                return Err(ScheduleError::ZeroPeriod(channel));
            }
            slots[channel.index()] = slot;
        }

        let primary = slots[TimerChannel::Primary.index()].priority;
        let soft_pwm = slots[TimerChannel::SoftPwm.index()].priority;
        if soft_pwm <= primary {
            return Err(ScheduleError::PriorityInversion { primary, soft_pwm });
        }

        Ok(Schedule { slots })
    }
}
