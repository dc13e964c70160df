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

use std::{env, path::PathBuf};

use log::info;

use crate::track::{TrackConfig, TrackError};

pub const TRACK_VAR: &str = "RACETRACK_TRACK";
pub const TEXTURES_VAR: &str = "RACETRACK_TEXTURES";
const DEFAULT_TEXTURE_DIR: &str = "textures";

/// Where the track configuration comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackSource {
    Embedded,
    File(PathBuf),
}

/// Start-up settings read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub track: TrackSource,
    pub texture_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track: TrackSource::Embedded,
            texture_dir: PathBuf::from(DEFAULT_TEXTURE_DIR),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(env::var_os(TRACK_VAR), env::var_os(TEXTURES_VAR))
    }

    fn from_vars<T, U>(track: Option<T>, textures: Option<U>) -> Self
    where
        T: Into<PathBuf>,
        U: Into<PathBuf>,
    {
        let defaults = Self::default();
        Self {
            track: track.map_or(defaults.track, |p| TrackSource::File(p.into())),
            texture_dir: textures.map_or(defaults.texture_dir, Into::into),
        }
    }

    pub fn load_track(&self) -> Result<TrackConfig, TrackError> {
        match &self.track {
            TrackSource::Embedded => {
                info!("using the built-in track");
                TrackConfig::embedded()
            }
            TrackSource::File(path) => {
                info!("loading track from {}", path.display());
                TrackConfig::from_path(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn defaults_without_vars() {
        let settings = Settings::from_vars(None::<PathBuf>, None::<PathBuf>);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.texture_dir, Path::new("textures"));
    }

    #[test]
    fn vars_override_defaults() {
        let settings = Settings::from_vars(Some("custom.json"), Some("/opt/skins"));
        assert_eq!(settings.track, TrackSource::File("custom.json".into()));
        assert_eq!(settings.texture_dir, Path::new("/opt/skins"));
    }

    #[test]
    fn embedded_track_loads() {
        let track = Settings::default().load_track().unwrap();
        assert_eq!(track, TrackConfig::default());
    }

    #[test]
    fn missing_track_file_is_an_error() {
        let settings = Settings::from_vars(Some("/nonexistent/track.json"), None::<PathBuf>);
        assert!(matches!(settings.load_track(), Err(TrackError::Io(_))));
    }
}
