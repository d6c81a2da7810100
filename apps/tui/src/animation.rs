//! Pulse phases for the playback cursor ring and the title beacon.

use std::f64::consts::TAU;
use std::time::Duration;

/// Radians per second of the ring around the playback cursor.
pub const RING_SPEED: f64 = 6.0;
/// Radians per second of the title beacon ripples.
pub const BEACON_SPEED: f64 = 2.0;
const LONGEST_FRAME: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pulse {
    ring: f64,
    beacon: f64,
    paused: bool,
}

impl Pulse {
    /// Moves both phases forward by one frame. A frame longer than 250 ms
    /// (the terminal was suspended, the loop stalled) counts as 250 ms.
    pub fn advance(&mut self, frame: Duration) {
        if self.paused {
            return;
        }
        let seconds = frame.min(LONGEST_FRAME).as_secs_f64();
        self.ring = seconds.mul_add(RING_SPEED, self.ring) % TAU;
        self.beacon = seconds.mul_add(BEACON_SPEED, self.beacon) % TAU;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Phase of the cursor ring in `[0, 2*PI)`.
    pub const fn ring_phase(&self) -> f64 {
        self.ring
    }

    /// Phase of the beacon ripples in `[0, 2*PI)`.
    pub const fn beacon_phase(&self) -> f64 {
        self.beacon
    }
}

/// Radius of the ring drawn around the current playback position.
pub fn pulse_radius(phase: f64) -> f64 {
    phase.sin().mul_add(4.0, 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_grow_with_their_own_speeds() {
        let mut pulse = Pulse::default();
        pulse.advance(Duration::from_millis(100));
        assert!((pulse.ring_phase() - 0.6).abs() < 1e-9);
        assert!((pulse.beacon_phase() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn a_paused_pulse_ignores_frames() {
        let mut pulse = Pulse::default();
        pulse.advance(Duration::from_millis(100));
        pulse.toggle_pause();
        let frozen = pulse;
        pulse.advance(Duration::from_secs(3));
        assert_eq!(pulse, frozen);

        pulse.toggle_pause();
        pulse.advance(Duration::from_millis(50));
        assert!(pulse.ring_phase() > frozen.ring_phase());
    }

    #[test]
    fn a_stalled_loop_moves_the_ring_at_most_one_long_frame() {
        let mut pulse = Pulse::default();
        pulse.advance(Duration::from_secs(40));
        assert!((pulse.ring_phase() - 0.25 * RING_SPEED).abs() < 1e-9);
    }

    #[test]
    fn ring_radius_oscillates_between_8_and_16() {
        assert!((pulse_radius(0.0) - 12.0).abs() < 1e-9);
        assert!((pulse_radius(std::f64::consts::FRAC_PI_2) - 16.0).abs() < 1e-9);
        assert!((pulse_radius(-std::f64::consts::FRAC_PI_2) - 8.0).abs() < 1e-9);
    }
}
