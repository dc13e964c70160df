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

use crate::car::SKIN_COUNT;

const BACKGROUND_COUNT: u8 = 2;
const DIGIT_COUNT: u8 = 10;

/// A named texture. Slots whose file fails to load stay unbound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    Skin(u8),
    Background(u8),
    Digit(u8),
}

impl TextureSlot {
    pub const COUNT: usize = (SKIN_COUNT + BACKGROUND_COUNT + DIGIT_COUNT) as usize;

    /// Every slot, in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        let skins = (0..SKIN_COUNT).map(Self::Skin);
        let backgrounds = (0..BACKGROUND_COUNT).map(Self::Background);
        let digits = (0..DIGIT_COUNT).map(Self::Digit);
        skins.chain(backgrounds).chain(digits)
    }

    /// Dense index into the texture table. Out of range numbers wrap.
    pub fn index(self) -> usize {
        let (base, n, count) = match self {
            Self::Skin(n) => (0, n, SKIN_COUNT),
            Self::Background(n) => (SKIN_COUNT, n, BACKGROUND_COUNT),
            Self::Digit(n) => (SKIN_COUNT + BACKGROUND_COUNT, n, DIGIT_COUNT),
        };
        usize::from(base + n % count)
    }

    pub fn file_name(self) -> String {
        match self {
            Self::Skin(n) => format!("car{}.png", n + 1),
            Self::Background(n) => format!("track{}.png", n + 1),
            Self::Digit(n) => format!("{n}.png"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_unique() {
        let indices: Vec<_> = TextureSlot::all().map(TextureSlot::index).collect();
        assert_eq!(indices, (0..TextureSlot::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn file_names() {
        assert_eq!(TextureSlot::Skin(0).file_name(), "car1.png");
        assert_eq!(TextureSlot::Skin(9).file_name(), "car10.png");
        assert_eq!(TextureSlot::Background(1).file_name(), "track2.png");
        assert_eq!(TextureSlot::Digit(0).file_name(), "0.png");
    }
}
