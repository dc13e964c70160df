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

use crate::{
    car::Car,
    linalg::Vector,
    track::{ChicaneEffect, Direction, Side, TrackConfig},
};

/// Slack added to the half extents when deciding two cars share a lane.
const LANE_SLACK: f32 = 1.0;

/// Keep the player at a safe distance behind any car ahead of it in its lane.
/// Only the player's position is ever changed.
pub fn avoid_collisions<'a, I>(player: &mut Car, others: I, track: &TrackConfig)
where
    I: IntoIterator<Item = &'a Car>,
{
    let Some(direction) = player.direction() else {
        return;
    };
    let safe = track.safe_distance();
    let half = track.half_extents;
    for other in others {
        let p = &mut player.position;
        let c = other.position;
        if direction.is_horizontal() {
            if (p.y - c.y).abs() > half.y + LANE_SLACK {
                continue;
            }
            match direction {
                Direction::East if c.x > p.x && c.x - p.x < safe.x => {
                    if let Some(lane) = overtake_lane(track, Side::Bottom, p, c) {
                        p.y = lane;
                    } else {
                        p.x = c.x - safe.x;
                    }
                }
                Direction::West if c.x < p.x && p.x - c.x < safe.x => {
                    if let Some(lane) = overtake_lane(track, Side::Top, p, c) {
                        p.y = lane;
                    } else {
                        p.x = c.x + safe.x;
                    }
                }
                _ => {}
            }
        } else {
            if (p.x - c.x).abs() > half.x + LANE_SLACK {
                continue;
            }
            match direction {
                Direction::North if c.y > p.y && c.y - p.y < safe.y => p.y = c.y - safe.y,
                Direction::South if c.y < p.y && p.y - c.y < safe.y => p.y = c.y + safe.y,
                _ => {}
            }
        }
    }
}

/// The lane to slip into, if the player and the blocking car are both inside
/// an overtaking section and the player rides the inner lane there.
fn overtake_lane(track: &TrackConfig, side: Side, player: &Vector, blocker: Vector) -> Option<f32> {
    let half_h = track.half_extents.y;
    let edge = track.inner_edge(side);
    let in_lane = match side {
        Side::Bottom => player.y <= edge - half_h,
        Side::Top => player.y >= edge + half_h,
    };
    if !in_lane {
        return None;
    }
    track
        .overtaking
        .iter()
        .find(|s| s.side == side && s.spans(player.x) && s.spans(blocker.x))
        .map(|s| s.lane)
}

/// Walk the chicane table, shifting the player between lanes. Returns the
/// last tilt that applies, in radians.
pub fn shape_chicanes(player: &mut Car, track: &TrackConfig) -> Option<f32> {
    let mut tilt = None;
    for chicane in &track.chicanes {
        if !chicane.contains(player.position, &track.waypoints) {
            continue;
        }
        match chicane.effect {
            ChicaneEffect::Tilt { degrees } => tilt = Some(degrees.to_radians()),
            ChicaneEffect::Lane { y } => player.position.y = y,
        }
    }
    tilt
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn car(x: f32, y: f32, velocity: Vector) -> Car {
        Car {
            position: Vector::new(x, y),
            velocity,
            heading: 0.0,
            target_heading: 0.0,
            skin: 0,
        }
    }

    const EAST: Vector = Vector::new(1000.0, 0.0);
    const WEST: Vector = Vector::new(-1000.0, 0.0);

    #[test]
    fn pushes_back_within_safe_distance() {
        let track = TrackConfig::default();
        let blocker = car(1000.0, 325.0, Vector::new(500.0, 0.0));
        let mut player = car(1000.0 - 100.0, 325.0, EAST);
        avoid_collisions(&mut player, [&blocker], &track);
        assert_eq!(player.position, Vector::new(1000.0 - 115.0, 325.0));
    }

    #[test]
    fn no_push_beyond_safe_distance() {
        let track = TrackConfig::default();
        let blocker = car(1000.0, 325.0, Vector::new(500.0, 0.0));
        let mut player = car(1000.0 - 120.0, 325.0, EAST);
        avoid_collisions(&mut player, [&blocker], &track);
        assert_eq!(player.position, Vector::new(880.0, 325.0));
    }

    #[test]
    fn ignores_cars_in_other_lanes_and_behind() {
        let track = TrackConfig::default();
        let mut player = car(900.0, 325.0, EAST);
        let other_lane = car(950.0, 352.0, Vector::new(500.0, 0.0));
        let behind = car(850.0, 325.0, Vector::new(500.0, 0.0));
        avoid_collisions(&mut player, [&other_lane, &behind], &track);
        assert_eq!(player.position, Vector::new(900.0, 325.0));
    }

    #[test]
    fn overtakes_inside_section() {
        let track = TrackConfig::default();
        let blocker = car(800.0, 325.0, Vector::new(500.0, 0.0));
        let mut player = car(700.0, 325.0, EAST);
        avoid_collisions(&mut player, [&blocker], &track);
        assert_eq!(player.position, Vector::new(700.0, 375.0));

        let blocker = car(800.0, 875.0, Vector::new(-500.0, 0.0));
        let mut player = car(900.0, 875.0, WEST);
        avoid_collisions(&mut player, [&blocker], &track);
        assert_eq!(player.position, Vector::new(900.0, 825.0));
    }

    #[test]
    fn westbound_push_outside_section() {
        let track = TrackConfig::default();
        let blocker = car(400.0, 875.0, Vector::new(-500.0, 0.0));
        let mut player = car(450.0, 875.0, WEST);
        avoid_collisions(&mut player, [&blocker], &track);
        assert_eq!(player.position.x, 515.0);
    }

    #[test]
    fn vertical_push() {
        let track = TrackConfig::default();
        let blocker = car(1375.0, 600.0, Vector::new(0.0, 500.0));
        let mut player = car(1350.0, 560.0, Vector::new(0.0, 1000.0));
        avoid_collisions(&mut player, [&blocker], &track);
        assert_eq!(player.position, Vector::new(1350.0, 535.0));

        let blocker = car(225.0, 600.0, Vector::new(0.0, -500.0));
        let mut player = car(250.0, 640.0, Vector::new(0.0, -1000.0));
        avoid_collisions(&mut player, [&blocker], &track);
        assert_eq!(player.position, Vector::new(250.0, 665.0));
    }

    #[test]
    fn chicane_shapes_bottom_straight() {
        let track = TrackConfig::default();
        let mut player = car(700.0, 325.0, EAST);
        let tilt = shape_chicanes(&mut player, &track).unwrap();
        assert!((tilt - (PI + PI / 6.0)).abs() < 1e-5);
        assert_eq!(player.position.y, 325.0);

        let mut player = car(900.0, 325.0, EAST);
        assert_eq!(shape_chicanes(&mut player, &track), None);
        assert_eq!(player.position.y, 375.0);

        let mut player = car(1100.0, 375.0, EAST);
        let tilt = shape_chicanes(&mut player, &track).unwrap();
        assert!((tilt - (PI - PI / 6.0)).abs() < 1e-5);
        assert_eq!(player.position.y, 325.0);
    }

    #[test]
    fn chicane_shapes_top_straight() {
        let track = TrackConfig::default();
        let mut player = car(900.0, 875.0, WEST);
        let tilt = shape_chicanes(&mut player, &track).unwrap();
        assert!((tilt - PI / 6.0).abs() < 1e-5);

        let mut player = car(700.0, 875.0, WEST);
        shape_chicanes(&mut player, &track);
        assert_eq!(player.position.y, 825.0);

        let mut player = car(500.0, 825.0, WEST);
        let tilt = shape_chicanes(&mut player, &track).unwrap();
        assert!((tilt + PI / 6.0).abs() < 1e-5);
        assert_eq!(player.position.y, 875.0);
    }

    #[test]
    fn chicanes_leave_the_legs_alone() {
        let track = TrackConfig::default();
        let mut player = car(1350.0, 600.0, Vector::new(0.0, 1000.0));
        assert_eq!(shape_chicanes(&mut player, &track), None);
        assert_eq!(player.position, Vector::new(1350.0, 600.0));
    }
}
