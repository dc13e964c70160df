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

pub mod avoidance;
pub mod lap;

use log::{debug, info};

use crate::{
    car::{AutonomousCar, PlayerCar},
    linalg::{Mtx, Vector},
    platform::{Buttons, Controls},
    render::{MeshId, RenderGraph, TextureSlot},
    track::{Corner, TrackConfig},
};

use self::{
    avoidance::{avoid_collisions, shape_chicanes},
    lap::LapCounter,
};

/// Ticks in one full background cycle. The first half shows the first
/// background.
const BACKDROP_PERIOD: u16 = 1000;

/// The whole simulation: track, roster, player and the lap display.
pub struct Race {
    track: TrackConfig,
    corners: [Corner; 4],
    projection: Mtx,
    cars: Vec<AutonomousCar>,
    player: PlayerCar,
    /// Cars only move while this is set.
    motion: bool,
    laps: LapCounter,
    backdrop: u16,
    /// Last cursor position, in world coordinates.
    cursor: Vector,
}

impl Race {
    pub fn new(track: TrackConfig) -> Self {
        let corners = track.corners();
        let projection = Mtx::ortho(
            track.world.min.x,
            track.world.max.x,
            track.world.min.y,
            track.world.max.y,
        );
        let cars = track
            .roster
            .iter()
            .map(|slot| AutonomousCar::new(slot, &track))
            .collect();
        let player = PlayerCar::new(&track);
        Self {
            track,
            corners,
            projection,
            cars,
            player,
            motion: false,
            laps: LapCounter::default(),
            backdrop: 0,
            cursor: Vector::ZERO,
        }
    }

    pub fn player(&self) -> &PlayerCar {
        &self.player
    }

    pub fn cars(&self) -> &[AutonomousCar] {
        &self.cars
    }

    pub fn laps(&self) -> u32 {
        self.laps.laps()
    }

    pub fn motion(&self) -> bool {
        self.motion
    }

    pub fn cursor(&self) -> Vector {
        self.cursor
    }

    /// Apply held buttons and the buttons pressed since the last frame.
    pub fn apply_controls(&mut self, controls: &Controls, pressed: Buttons) {
        let motion = controls.buttons.contains(Buttons::DRIVE);
        if motion != self.motion {
            debug!("motion {}", if motion { "enabled" } else { "disabled" });
            self.motion = motion;
        }
        if pressed.contains(Buttons::NEXT_SKIN) {
            self.player.next_skin();
            debug!("player skin {}", self.player.car.skin);
        }
        if pressed.contains(Buttons::PREV_SKIN) {
            self.player.previous_skin();
            debug!("player skin {}", self.player.car.skin);
        }
        if let Some((x, y)) = controls.cursor {
            self.set_cursor(x, y);
        }
    }

    /// Record the cursor from window pixel coordinates.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = self.track.window_to_world(x, y);
    }

    pub fn tick(&mut self, dt: f32) {
        let track = &self.track;
        let step = track.turn_speed * dt;

        for car in &mut self.cars {
            if self.motion {
                car.drive(track, &self.corners, dt);
            }
            car.car.steer(step);
        }

        let player = &mut self.player;
        player.display_rotation = player.car.heading;
        if self.motion {
            player.car.advance(dt);
            let corner_tilt = player.take_corners(track, &self.corners);
            avoid_collisions(&mut player.car, self.cars.iter().map(|c| &c.car), track);
            let chicane_tilt = shape_chicanes(&mut player.car, track);
            player.display_rotation = chicane_tilt.or(corner_tilt).unwrap_or(player.car.heading);
        }

        if self.laps.observe(player.car.position, &track.finish_line) {
            info!("lap {} complete", self.laps.laps());
        }

        self.backdrop = (self.backdrop + 1) % BACKDROP_PERIOD;
    }

    pub fn backdrop(&self) -> TextureSlot {
        if self.backdrop < BACKDROP_PERIOD / 2 {
            TextureSlot::Background(0)
        } else {
            TextureSlot::Background(1)
        }
    }

    pub fn render(&self, graph: &mut RenderGraph) {
        graph.draw(MeshId::Background, self.projection, self.backdrop());
        let (tens, ones) = self.laps.digits();
        graph.draw(MeshId::TensDigit, self.projection, TextureSlot::Digit(tens));
        graph.draw(MeshId::OnesDigit, self.projection, TextureSlot::Digit(ones));
        for car in &self.cars {
            let transform = self.projection * car.car.transform(car.car.heading);
            graph.draw(MeshId::Car, transform, TextureSlot::Skin(car.car.skin));
        }
        let transform = self.projection * self.player.transform();
        graph.draw(
            MeshId::Player,
            transform,
            TextureSlot::Skin(self.player.car.skin),
        );
    }
}
