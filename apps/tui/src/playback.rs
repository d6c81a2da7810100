//! Stepped playback for the animation map.
//!
//! Progress is a counter in `0..=100`. While a timer is armed, every elapsed
//! [`TICK`] advances it by one; reaching 100 disarms the timer. There is at
//! most one timer at any time.

use std::time::{Duration, Instant};

pub const TICK: Duration = Duration::from_millis(100);
pub const MAX_PROGRESS: u8 = 100;

/// A scheduled tick. Dropping the handle is the only way to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    next_due: Instant,
}

impl TimerHandle {
    fn armed_at(now: Instant) -> Self {
        Self {
            next_due: now + TICK,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Playback {
    progress: u8,
    timer: Option<TimerHandle>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn progress(&self) -> u8 {
        self.progress
    }

    pub const fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub const fn is_finished(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }

    /// Arms the timer. Does nothing when already running or finished.
    pub fn start(&mut self, now: Instant) {
        if self.timer.is_some() || self.is_finished() {
            return;
        }
        tracing::debug!(progress = self.progress, "playback started");
        self.timer = Some(TimerHandle::armed_at(now));
    }

    /// Pauses in place.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!(progress = self.progress, "playback stopped");
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Stops and rewinds to zero.
    pub fn reset(&mut self) {
        self.timer = None;
        self.progress = 0;
    }

    /// Applies every tick that fell due up to `now` and returns how many were
    /// applied.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut applied = 0;
        while let Some(timer) = self.timer {
            if now < timer.next_due {
                break;
            }
            self.progress = self.progress.saturating_add(1).min(MAX_PROGRESS);
            applied += 1;
            if self.is_finished() {
                tracing::debug!("playback finished");
                self.timer = None;
            } else {
                self.timer = Some(TimerHandle {
                    next_due: timer.next_due + TICK,
                });
            }
        }
        applied
    }

    pub const fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ticks_advance_only_once_due() {
        let start = Instant::now();
        let mut playback = Playback::new();
        playback.start(start);

        assert_eq!(playback.poll(start + Duration::from_millis(50)), 0);
        assert_eq!(playback.poll(start + Duration::from_millis(100)), 1);
        assert_eq!(playback.poll(start + Duration::from_millis(450)), 3);
        assert_eq!(playback.progress(), 4);
    }

    #[test]
    fn start_is_idempotent() {
        let start = Instant::now();
        let mut playback = Playback::new();
        playback.start(start);
        let armed = playback.timer();
        playback.start(start + Duration::from_millis(90));
        assert_eq!(playback.timer(), armed);

        playback.poll(start + Duration::from_millis(100));
        assert_eq!(playback.progress(), 1);
    }

    #[test]
    fn reaching_the_end_stops_automatically() {
        let start = Instant::now();
        let mut playback = Playback::new();
        playback.start(start);
        playback.poll(start + Duration::from_secs(60));

        assert_eq!(playback.progress(), MAX_PROGRESS);
        assert!(!playback.is_running());

        playback.start(start + Duration::from_secs(61));
        assert!(!playback.is_running());
    }

    #[test]
    fn stop_pauses_and_reset_rewinds() {
        let start = Instant::now();
        let mut playback = Playback::new();
        playback.start(start);
        playback.poll(start + Duration::from_millis(300));
        playback.stop();
        playback.poll(start + Duration::from_secs(5));
        assert_eq!(playback.progress(), 3);
        assert!(!playback.is_running());

        playback.toggle(start + Duration::from_secs(5));
        assert!(playback.is_running());

        playback.reset();
        assert_eq!(playback.progress(), 0);
        assert!(!playback.is_running());
    }

    proptest! {
        #[test]
        fn progress_is_monotone_and_bounded(steps in proptest::collection::vec(0u64..700, 1..40)) {
            let start = Instant::now();
            let mut playback = Playback::new();
            playback.start(start);
            let mut elapsed = 0;
            let mut last = playback.progress();
            for step in steps {
                elapsed += step;
                playback.poll(start + Duration::from_millis(elapsed));
                prop_assert!(playback.progress() >= last);
                prop_assert!(playback.progress() <= MAX_PROGRESS);
                last = playback.progress();
            }
        }
    }
}
