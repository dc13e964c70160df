//! Racetrack - a top-down racing demo
//! Copyright (C) 2023 spazzylemons
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <http://www.gnu.org/licenses/>.

/// Milliseconds of wall time per simulated second.
const MSEC_PER_STEP_SECOND: f32 = 1200.0;
/// Largest frame delta fed to the simulation, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.05;

/// Turns platform milliseconds into a clamped simulation step.
pub struct FrameClock {
    prev_msec: u64,
}

impl FrameClock {
    pub fn new(now_msec: u64) -> Self {
        Self {
            prev_msec: now_msec,
        }
    }

    /// Return the delta for this frame and remember `now_msec`.
    /// A clock that runs backwards yields zero.
    pub fn frame_delta(&mut self, now_msec: u64) -> f32 {
        let elapsed = now_msec.saturating_sub(self.prev_msec);
        self.prev_msec = now_msec;
        (elapsed as f32 / MSEC_PER_STEP_SECOND).clamp(0.0, MAX_FRAME_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_elapsed_time() {
        let mut clock = FrameClock::new(1000);
        assert_eq!(clock.frame_delta(1012), 0.01);
        assert_eq!(clock.frame_delta(1012), 0.0);
    }

    #[test]
    fn clamps_stalls_and_backwards_clocks() {
        let mut clock = FrameClock::new(5000);
        assert_eq!(clock.frame_delta(9000), MAX_FRAME_DELTA);
        assert_eq!(clock.frame_delta(100), 0.0);
        // the backwards reading becomes the new baseline
        assert_eq!(clock.frame_delta(112), 0.01);
    }
}
