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

use std::{error::Error, fmt};

use log::info;

pub mod assets;
pub mod car;
pub mod heading;
pub mod linalg;
pub mod logging;
pub mod platform;
pub mod race;
pub mod render;
pub mod settings;
pub mod timing;
pub mod track;

use platform::{Buttons, Controls, Impl, Platform, PlatformError, PlatformSettings};

use crate::{
    race::Race,
    render::{MeshSet, RenderGraph},
    settings::Settings,
    timing::FrameClock,
    track::TrackError,
};

pub const WINDOW_TITLE: &str = "RacingSimulation 2D";

#[derive(Debug)]
pub enum GameError {
    Track(TrackError),
    Platform(PlatformError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track(e) => e.fmt(f),
            Self::Platform(e) => e.fmt(f),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Track(e) => Some(e),
            Self::Platform(e) => Some(e),
        }
    }
}

impl From<TrackError> for GameError {
    fn from(e: TrackError) -> Self {
        Self::Track(e)
    }
}

impl From<PlatformError> for GameError {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

struct Game {
    /// The frame clock.
    clock: FrameClock,
    /// The simulation.
    race: Race,
    /// Controls seen on the previous frame.
    controls: Controls,
}

impl Game {
    fn new(race: Race, now_msec: u64) -> Self {
        Self {
            clock: FrameClock::new(now_msec),
            race,
            controls: Controls::default(),
        }
    }

    /// Returns the buttons pressed since the last frame. Key repeats count as
    /// fresh presses.
    fn update_controls(&mut self, controls: Controls) -> Buttons {
        let pressed = (controls.buttons & !self.controls.buttons) | controls.repeated;
        self.controls = controls;
        pressed
    }

    fn should_run(&self) -> bool {
        !self.controls.buttons.contains(Buttons::QUIT)
    }

    fn iteration(&mut self, controls: Controls, now_msec: u64) -> RenderGraph {
        let pressed = self.update_controls(controls);
        self.race.apply_controls(&controls, pressed);
        let dt = self.clock.frame_delta(now_msec);
        self.race.tick(dt);
        let mut graph = RenderGraph::default();
        self.race.render(&mut graph);
        graph
    }
}

/// Open the window and run the race until the window is closed or the quit
/// key is pressed.
pub fn run_game() -> Result<(), GameError> {
    let settings = Settings::from_env();
    let track = settings.load_track()?;
    let meshes = MeshSet::new(&track);
    let mut platform = Impl::init(&PlatformSettings {
        window: track.window,
        title: WINDOW_TITLE,
        meshes: &meshes,
        texture_dir: settings.texture_dir.clone(),
    })?;
    info!("starting race with {} cars", track.roster.len());

    let mut game = Game::new(Race::new(track), platform.time_msec());
    while platform.should_run() && game.should_run() {
        let controls = platform.poll();
        let graph = game.iteration(controls, platform.time_msec());
        platform.end_frame(&graph);
    }
    info!("race over after {} laps", game.race.laps());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::track::TrackConfig;

    use super::*;

    fn controls(buttons: Buttons) -> Controls {
        Controls {
            buttons,
            ..Controls::default()
        }
    }

    #[test]
    fn pressed_buttons_are_edges() {
        let mut game = Game::new(Race::new(TrackConfig::default()), 0);
        assert_eq!(
            game.update_controls(controls(Buttons::NEXT_SKIN)),
            Buttons::NEXT_SKIN
        );
        assert_eq!(
            game.update_controls(controls(Buttons::NEXT_SKIN | Buttons::DRIVE)),
            Buttons::DRIVE
        );
        assert_eq!(game.update_controls(controls(Buttons::empty())), Buttons::empty());
    }

    #[test]
    fn held_skin_key_repeats() {
        let mut game = Game::new(Race::new(TrackConfig::default()), 0);
        game.iteration(controls(Buttons::NEXT_SKIN), 0);
        assert_eq!(game.race.player().car.skin, 5);
        // held without a repeat event
        game.iteration(controls(Buttons::NEXT_SKIN), 0);
        assert_eq!(game.race.player().car.skin, 5);
        let repeat = Controls {
            buttons: Buttons::NEXT_SKIN,
            repeated: Buttons::NEXT_SKIN,
            cursor: None,
        };
        game.iteration(repeat, 0);
        game.iteration(repeat, 0);
        assert_eq!(game.race.player().car.skin, 7);
    }

    #[test]
    fn iteration_advances_by_frame_delta() {
        let mut game = Game::new(Race::new(TrackConfig::default()), 0);
        let graph = game.iteration(controls(Buttons::DRIVE), 12);
        assert_eq!(graph.calls().len(), 8);
        // 12 ms is a 0.01 step; the player drives at 1000 units per second
        assert_eq!(game.race.player().car.position.x, 360.0);
        assert!(game.should_run());
        game.iteration(controls(Buttons::QUIT), 24);
        assert!(!game.should_run());
    }
}
