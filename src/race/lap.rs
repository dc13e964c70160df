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

use crate::{linalg::Vector, track::FinishLine};

/// Counts laps by watching the player pass through the finish line band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LapCounter {
    laps: u32,
    /// Set once a lap has been counted; cleared when the player is back
    /// below the midline.
    crossed: bool,
}

impl LapCounter {
    pub fn laps(&self) -> u32 {
        self.laps
    }

    /// Feed the player's position. Returns true if a lap was completed.
    pub fn observe(&mut self, position: Vector, line: &FinishLine) -> bool {
        if position.x < line.min_x || position.x > line.max_x {
            return false;
        }
        if position.y <= line.midline {
            self.crossed = false;
            false
        } else if self.crossed {
            false
        } else {
            self.crossed = true;
            self.laps += 1;
            true
        }
    }

    /// The two digits shown on screen, tens first.
    pub fn digits(&self) -> (u8, u8) {
        let tens = (self.laps / 10 % 10) as u8;
        let ones = (self.laps % 10) as u8;
        (tens, ones)
    }
}
