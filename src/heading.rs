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

use std::f32::consts::{PI, TAU};

/// Wrap an angle into (-PI, PI].
#[must_use]
pub fn wrap_angle(mut a: f32) -> f32 {
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}

/// Rotate `current` toward `target` along the shortest arc by at most
/// `max_step` radians. Lands exactly on `target` once it is within reach.
#[must_use]
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = wrap_angle(target - current);
    if diff.abs() <= max_step {
        return target;
    }
    wrap_angle(current + max_step.copysign(diff))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn wrap_stays_in_range_and_preserves_angle() {
        let mut a = -40.0;
        while a < 40.0 {
            let w = wrap_angle(a);
            assert!(w > -PI && w <= PI, "{a} wrapped to {w}");
            // equal mod 2pi
            let turns = (a - w) / TAU;
            assert!((turns - turns.round()).abs() < 1e-3, "{a} -> {w}");
            a += 0.37;
        }
    }

    #[test]
    fn wrap_boundaries() {
        assert_eq!(wrap_angle(PI), PI);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn rotate_snaps_when_close() {
        assert_eq!(rotate_towards(1.0, 1.05, 0.1), 1.05);
        assert_eq!(rotate_towards(PI, PI, 0.0), PI);
    }

    #[test]
    fn rotate_takes_shortest_arc() {
        // from just below PI to just above -PI is a short step across the seam
        let next = rotate_towards(PI - 0.1, -PI + 0.1, 0.05);
        assert!((next - (PI - 0.05)).abs() < 1e-5);
        let back = rotate_towards(-PI + 0.1, PI - 0.1, 0.05);
        assert!((back - (-PI + 0.05)).abs() < 1e-5);
    }

    #[test]
    fn rotate_converges_without_overshoot() {
        let step = 5.0 * 0.05;
        for &(start, target) in &[(PI, -FRAC_PI_2), (0.0, FRAC_PI_2), (FRAC_PI_2, PI), (-FRAC_PI_2, 0.0)] {
            let mut current = start;
            let initial = wrap_angle(target - current).abs();
            let bound = (initial / step).ceil() as usize;
            let mut steps = 0;
            while current != target {
                let before = wrap_angle(target - current).abs();
                current = rotate_towards(current, target, step);
                let after = wrap_angle(target - current).abs();
                assert!(after < before, "moved away from target");
                steps += 1;
                assert!(steps <= bound, "{start} -> {target} took too long");
            }
        }
    }
}
