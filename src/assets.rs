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

use include_dir::{include_dir, Dir};

static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// A file bundled into the binary at compile time.
pub struct Asset {
    contents: &'static [u8],
}

impl Asset {
    #[must_use]
    pub fn load(name: &str) -> Option<Self> {
        let contents = ASSETS.get_file(name)?.contents();
        Some(Self { contents })
    }

    pub fn contents(&self) -> &'static [u8] {
        self.contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_track_is_present() {
        let asset = Asset::load("track.json").unwrap();
        assert!(!asset.contents().is_empty());
    }

    #[test]
    fn unknown_asset_is_none() {
        assert!(Asset::load("nope.bin").is_none());
    }
}
