//! Session timer: lights a dedicated LED for a few seconds every time a fixed stretch of run time
//! has passed, as a reminder to take a break.
//!
//! The next interval is counted from the end of the previous flash, so flashes drift by the flash
//! duration each cycle.

use embassy_time::{Duration, Instant};

/// A transition of the session timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    FlashStarted,
    FlashEnded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Flashing { ends_at: Instant },
}

pub struct SessionTimer {
    interval: Duration,
    flash_duration: Duration,
    window_start: Instant,
    phase: Phase,
}

impl SessionTimer {
    /// Start counting the first interval at `now`.
    pub fn new(interval: Duration, flash_duration: Duration, now: Instant) -> Self {
        SessionTimer { interval, flash_duration, window_start: now, phase: Phase::Idle }
    }

    /// Whether the session LED should be lit.
    pub fn is_flashing(&self) -> bool {
        matches!(self.phase, Phase::Flashing { .. })
    }

    pub fn window_start(&self) -> Instant {
        self.window_start
    }

    /// When the current flash ends, if one is running.
    pub fn flash_end(&self) -> Option<Instant> {
        match self.phase {
            Phase::Idle => None,
            Phase::Flashing { ends_at } => Some(ends_at),
        }
    }

    /// Advance to `now`. Returns the transition that happened, if any.
    ///
    /// A flash can start and end in the same call when `flash_duration` is zero; that reports
    /// [SessionEvent::FlashEnded], since the LED ends up off.
    pub fn poll(&mut self, now: Instant) -> Option<SessionEvent> {
        let mut event = None;

        if self.phase == Phase::Idle && now.saturating_duration_since(self.window_start) >= self.interval {
            info!("session timer: flash started");
            self.phase = Phase::Flashing { ends_at: now + self.flash_duration };
            event = Some(SessionEvent::FlashStarted);
        }

        if let Phase::Flashing { ends_at } = self.phase {
            if now >= ends_at {
                info!("session timer: flash ended");
                self.phase = Phase::Idle;
                self.window_start = now;
                event = Some(SessionEvent::FlashEnded);
            }
        }

        event
    }
}
