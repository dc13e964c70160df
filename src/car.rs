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
    heading::rotate_towards,
    linalg::{Mtx, Vector},
    track::{Corner, Direction, StartSlot, TrackConfig},
};

/// Number of selectable car textures.
pub const SKIN_COUNT: u8 = 10;

/// Motion state shared by the player and the autonomous cars.
#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    pub position: Vector,
    /// Always axis-aligned.
    pub velocity: Vector,
    pub heading: f32,
    /// The heading the car is rotating toward.
    pub target_heading: f32,
    pub skin: u8,
}

impl Car {
    pub fn new(slot: &StartSlot, speed: f32) -> Self {
        let heading = slot.direction.heading();
        Self {
            position: slot.position,
            velocity: slot.direction.unit() * speed,
            heading,
            target_heading: heading,
            skin: slot.skin,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::of(self.velocity)
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Start turning toward the exit heading when close to `corner`.
    /// Returns true if the hint fired.
    pub fn hint_turn(&mut self, corner: &Corner, hint_reach: Vector) -> bool {
        if self.direction() == Some(corner.approach) && corner.contains(self.position, hint_reach)
        {
            self.target_heading = corner.heading();
            true
        } else {
            false
        }
    }

    /// Snap onto the next leg once the car has reached the corner boundary.
    /// Only fires while the car still travels in the approach direction.
    pub fn take_corner(
        &mut self,
        corner: &Corner,
        reach: Vector,
        half_extents: Vector,
        speed: f32,
    ) -> bool {
        if self.direction() != Some(corner.approach) || !corner.contains(self.position, reach) {
            return false;
        }
        self.position = corner.clamp(self.position, half_extents);
        self.velocity = corner.exit.unit() * speed;
        self.target_heading = corner.heading();
        true
    }

    pub fn steer(&mut self, max_step: f32) {
        self.heading = rotate_towards(self.heading, self.target_heading, max_step);
    }

    /// Model transform: place the sprite and rotate it to `rotation`.
    pub fn transform(&self, rotation: f32) -> Mtx {
        Mtx::translation(self.position) * Mtx::rotation(rotation)
    }
}

/// A car that laps on its own by following the corner table.
pub struct AutonomousCar {
    pub car: Car,
}

impl AutonomousCar {
    pub fn new(slot: &StartSlot, track: &TrackConfig) -> Self {
        Self {
            car: Car::new(slot, track.base_speed),
        }
    }

    /// Move along the current leg, then run the turn hints and corner snaps.
    pub fn drive(&mut self, track: &TrackConfig, corners: &[Corner], dt: f32) {
        self.car.advance(dt);
        let reach = track.autonomous_reach();
        let hint_reach = track.hint_reach(reach);
        for corner in corners {
            self.car.hint_turn(corner, hint_reach);
        }
        for corner in corners {
            self.car
                .take_corner(corner, reach, track.half_extents, track.base_speed);
        }
    }
}

/// The car under user control.
pub struct PlayerCar {
    pub car: Car,
    /// Rotation the sprite was drawn with on the last update.
    pub display_rotation: f32,
}

impl PlayerCar {
    pub fn new(track: &TrackConfig) -> Self {
        let car = Car::new(&track.player_start, track.player_speed());
        let display_rotation = car.heading;
        Self {
            car,
            display_rotation,
        }
    }

    pub fn next_skin(&mut self) {
        self.car.skin = (self.car.skin + 1) % SKIN_COUNT;
    }

    pub fn previous_skin(&mut self) {
        self.car.skin = (self.car.skin + SKIN_COUNT - 1) % SKIN_COUNT;
    }

    /// Run the corner table for the player. The heading snaps on a transition,
    /// and while inside a corner zone the corner's tilt is returned for display.
    pub fn take_corners(&mut self, track: &TrackConfig, corners: &[Corner]) -> Option<f32> {
        let mut tilt = None;
        for corner in corners {
            let reach = track.player_reach(corner);
            if self
                .car
                .take_corner(corner, reach, track.half_extents, track.player_speed())
            {
                self.car.heading = self.car.target_heading;
            }
            if corner.contains(self.car.position, reach) {
                tilt = Some(corner.tilt);
            }
        }
        tilt
    }

    pub fn transform(&self) -> Mtx {
        self.car.transform(self.display_rotation)
    }
}
