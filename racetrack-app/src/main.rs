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

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = racetrack::logging::try_init() {
        eprintln!("logger already set: {e}");
    }
    racetrack::run_game()?;
    Ok(())
}
