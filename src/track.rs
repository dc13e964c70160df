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

use std::{
    f32::consts::{FRAC_PI_2, FRAC_PI_4, PI},
    fmt,
    path::Path,
};

use serde::Deserialize;

use crate::{assets::Asset, car::SKIN_COUNT, linalg::Vector};

/// Name of the embedded default track layout.
pub const DEFAULT_TRACK_ASSET: &str = "track.json";

/// A direction of travel along one of the track legs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    /// Unit vector of travel.
    pub fn unit(self) -> Vector {
        match self {
            Self::East => Vector::X_AXIS,
            Self::North => Vector::Y_AXIS,
            Self::West => -Vector::X_AXIS,
            Self::South => -Vector::Y_AXIS,
        }
    }

    /// Heading that points a car sprite along this direction.
    /// Car sprites face the negative x axis.
    pub fn heading(self) -> f32 {
        match self {
            Self::East => PI,
            Self::North => -FRAC_PI_2,
            Self::West => 0.0,
            Self::South => FRAC_PI_2,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    /// The direction of an axis-aligned velocity, if it is moving at all.
    pub fn of(velocity: Vector) -> Option<Self> {
        match (velocity.x, velocity.y) {
            (x, y) if y == 0.0 && x > 0.0 => Some(Self::East),
            (x, y) if y == 0.0 && x < 0.0 => Some(Self::West),
            (x, y) if x == 0.0 && y > 0.0 => Some(Self::North),
            (x, y) if x == 0.0 && y < 0.0 => Some(Self::South),
            _ => None,
        }
    }
}

/// The named points of the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waypoint {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
}

/// Positions of the named points. A-D are the outer corners counterclockwise
/// from the bottom left, E-G trigger the bottom chicane and H-J the top one.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Waypoints {
    pub a: Vector,
    pub b: Vector,
    pub c: Vector,
    pub d: Vector,
    pub e: Vector,
    pub f: Vector,
    pub g: Vector,
    pub h: Vector,
    pub i: Vector,
    pub j: Vector,
}

impl Default for Waypoints {
    fn default() -> Self {
        Self {
            a: Vector::new(200.0, 300.0),
            b: Vector::new(1400.0, 300.0),
            c: Vector::new(1400.0, 900.0),
            d: Vector::new(200.0, 900.0),
            e: Vector::new(750.0, 400.0),
            f: Vector::new(950.0, 400.0),
            g: Vector::new(1150.0, 400.0),
            h: Vector::new(1050.0, 800.0),
            i: Vector::new(850.0, 800.0),
            j: Vector::new(650.0, 800.0),
        }
    }
}

impl Waypoints {
    pub fn get(&self, name: Waypoint) -> Vector {
        match name {
            Waypoint::A => self.a,
            Waypoint::B => self.b,
            Waypoint::C => self.c,
            Waypoint::D => self.d,
            Waypoint::E => self.e,
            Waypoint::F => self.f,
            Waypoint::G => self.g,
            Waypoint::H => self.h,
            Waypoint::I => self.i,
            Waypoint::J => self.j,
        }
    }
}

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Bounds {
    pub min: Vector,
    pub max: Vector,
}

impl Bounds {
    pub fn size(&self) -> Vector {
        self.max - self.min
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct WindowSize {
    pub width: u16,
    pub height: u16,
}

/// The x band and y midline of the finish line.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct FinishLine {
    pub min_x: f32,
    pub max_x: f32,
    pub midline: f32,
}

/// Which straight of the loop a section sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bottom,
    Top,
}

/// A stretch of straight where the player may slip into the inner lane
/// instead of queueing behind a slower car.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct OvertakeSection {
    pub side: Side,
    pub min_x: f32,
    pub max_x: f32,
    /// The y coordinate to move the player to.
    pub lane: f32,
}

impl OvertakeSection {
    pub fn spans(&self, x: f32) -> bool {
        x > self.min_x && x < self.max_x
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChicaneEffect {
    /// Override the player's display rotation, in degrees.
    Tilt { degrees: f32 },
    /// Move the player onto a lane.
    Lane { y: f32 },
}

/// One piece of the lane-narrowing shaping applied to the player.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Chicane {
    pub side: Side,
    pub min_x: f32,
    pub max_x: f32,
    /// The waypoint whose y coordinate bounds this piece.
    pub bound: Waypoint,
    pub effect: ChicaneEffect,
}

impl Chicane {
    pub fn contains(&self, position: Vector, waypoints: &Waypoints) -> bool {
        let bound = waypoints.get(self.bound).y;
        let beyond = match self.side {
            Side::Bottom => position.y < bound,
            Side::Top => position.y > bound,
        };
        position.x > self.min_x && position.x < self.max_x && beyond
    }
}

/// Where and how a car starts the race.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct StartSlot {
    pub position: Vector,
    pub direction: Direction,
    pub skin: u8,
}

/// The entire track layout and tuning, loaded once at startup.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub window: WindowSize,
    pub world: Bounds,
    pub waypoints: Waypoints,
    /// Half width and half height of every car.
    pub half_extents: Vector,
    /// Extra gap kept between the player and the car ahead.
    pub clearance: f32,
    pub base_speed: f32,
    pub player_speed_factor: f32,
    /// Radians per second.
    pub turn_speed: f32,
    /// How far before a corner the early turn hint begins.
    pub turn_ahead: f32,
    pub finish_line: FinishLine,
    pub overtaking: Vec<OvertakeSection>,
    pub chicanes: Vec<Chicane>,
    pub player_start: StartSlot,
    /// The autonomous cars, in update order.
    pub roster: Vec<StartSlot>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        let tilt = |degrees| ChicaneEffect::Tilt { degrees };
        let lane = |y| ChicaneEffect::Lane { y };
        let slot = |x, y, direction, skin| StartSlot {
            position: Vector::new(x, y),
            direction,
            skin,
        };
        let chicane = |side, min_x, max_x, bound, effect| Chicane {
            side,
            min_x,
            max_x,
            bound,
            effect,
        };
        Self {
            window: WindowSize {
                width: 800,
                height: 600,
            },
            world: Bounds {
                min: Vector::ZERO,
                max: Vector::new(1600.0, 1200.0),
            },
            waypoints: Waypoints::default(),
            half_extents: Vector::new(50.0, 25.0),
            clearance: 15.0,
            base_speed: 500.0,
            player_speed_factor: 2.0,
            turn_speed: 5.0,
            turn_ahead: 35.0,
            finish_line: FinishLine {
                min_x: 790.0,
                max_x: 810.0,
                midline: 500.0,
            },
            overtaking: vec![
                OvertakeSection {
                    side: Side::Bottom,
                    min_x: 600.0,
                    max_x: 1000.0,
                    lane: 375.0,
                },
                OvertakeSection {
                    side: Side::Top,
                    min_x: 600.0,
                    max_x: 1000.0,
                    lane: 825.0,
                },
            ],
            chicanes: vec![
                chicane(Side::Bottom, 600.0, 800.0, Waypoint::E, tilt(210.0)),
                chicane(Side::Top, 800.0, 1000.0, Waypoint::H, tilt(30.0)),
                chicane(Side::Bottom, 800.0, 1000.0, Waypoint::F, lane(375.0)),
                chicane(Side::Top, 600.0, 800.0, Waypoint::I, lane(825.0)),
                chicane(Side::Bottom, 1000.0, 1200.0, Waypoint::G, tilt(150.0)),
                chicane(Side::Top, 400.0, 600.0, Waypoint::J, tilt(-30.0)),
                chicane(Side::Bottom, 1000.0, 1200.0, Waypoint::F, lane(325.0)),
                chicane(Side::Top, 400.0, 600.0, Waypoint::I, lane(875.0)),
            ],
            player_start: slot(350.0, 325.0, Direction::East, 4),
            roster: vec![
                slot(600.0, 325.0, Direction::East, 0),
                slot(1375.0, 450.0, Direction::North, 1),
                slot(950.0, 875.0, Direction::West, 2),
                slot(225.0, 750.0, Direction::South, 3),
            ],
        }
    }
}

#[derive(Debug)]
pub enum TrackError {
    /// The embedded layout is missing from the asset bundle.
    MissingAsset(&'static str),
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// The layout parsed but describes an unusable track.
    Invalid(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsset(name) => write!(f, "track asset {name} is missing"),
            Self::Io(e) => write!(f, "failed to read track file: {e}"),
            Self::Parse(e) => write!(f, "failed to parse track: {e}"),
            Self::Invalid(reason) => write!(f, "invalid track: {reason}"),
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl TrackConfig {
    /// Load the layout bundled with the game.
    pub fn embedded() -> Result<Self, TrackError> {
        let asset = Asset::load(DEFAULT_TRACK_ASSET)
            .ok_or(TrackError::MissingAsset(DEFAULT_TRACK_ASSET))?;
        Self::parse(asset.contents())
    }

    pub fn from_path(path: &Path) -> Result<Self, TrackError> {
        let contents = std::fs::read(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &[u8]) -> Result<Self, TrackError> {
        let config: Self = serde_json::from_slice(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        let invalid = |reason: &str| Err(TrackError::Invalid(reason.into()));
        let size = self.world.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return invalid("world bounds are empty");
        }
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window has no area");
        }
        if self.half_extents.x <= 0.0 || self.half_extents.y <= 0.0 {
            return invalid("cars must have a positive size");
        }
        if self.base_speed <= 0.0 || self.player_speed_factor <= 0.0 {
            return invalid("speeds must be positive");
        }
        if self.turn_speed <= 0.0 {
            return invalid("turn speed must be positive");
        }
        // the hint has to start before the snap, or cars would pop around corners
        if self.turn_ahead <= 0.0 {
            return invalid("turn_ahead must be positive");
        }
        if self.finish_line.min_x > self.finish_line.max_x {
            return invalid("finish line band is reversed");
        }
        if self
            .roster
            .iter()
            .chain(std::iter::once(&self.player_start))
            .any(|slot| slot.skin >= SKIN_COUNT)
        {
            return invalid("start slot uses an unknown skin");
        }
        let w = &self.waypoints;
        if !(w.a.x < w.b.x && w.d.x < w.c.x && w.a.y < w.d.y && w.b.y < w.c.y) {
            return invalid("corners A-D must run counterclockwise from the bottom left");
        }
        if self.lane_width(Side::Bottom) <= self.half_extents.y
            || self.lane_width(Side::Top) <= self.half_extents.y
        {
            return invalid("inner lanes are narrower than a car");
        }
        Ok(())
    }

    /// Center-to-center distance kept between the player and a car ahead.
    pub fn safe_distance(&self) -> Vector {
        self.half_extents * 2.0 + Vector::new(self.clearance, self.clearance)
    }

    pub fn player_speed(&self) -> f32 {
        self.base_speed * self.player_speed_factor
    }

    /// The y coordinate separating the outer lane from the infield.
    pub fn inner_edge(&self, side: Side) -> f32 {
        match side {
            Side::Bottom => self.waypoints.e.y,
            Side::Top => self.waypoints.h.y,
        }
    }

    /// Distance from the corner line to the inner edge on a straight.
    pub fn lane_width(&self, side: Side) -> f32 {
        match side {
            Side::Bottom => self.inner_edge(side) - self.waypoints.a.y,
            Side::Top => self.waypoints.d.y - self.inner_edge(side),
        }
    }

    /// Map a window pixel (origin top left) to world coordinates.
    pub fn window_to_world(&self, x: i32, y: i32) -> Vector {
        let size = self.world.size();
        let wx = self.world.min.x + x as f32 * size.x / f32::from(self.window.width);
        let wy = self.world.max.y - y as f32 * size.y / f32::from(self.window.height);
        Vector::new(wx, wy)
    }

    /// The corner table, in evaluation order.
    pub fn corners(&self) -> [Corner; 4] {
        let w = &self.waypoints;
        [
            Corner {
                name: Waypoint::B,
                point: w.b,
                outward: Vector::new(1.0, -1.0),
                side: Side::Bottom,
                approach: Direction::East,
                exit: Direction::North,
                tilt: FRAC_PI_4,
            },
            Corner {
                name: Waypoint::C,
                point: w.c,
                outward: Vector::new(1.0, 1.0),
                side: Side::Top,
                approach: Direction::North,
                exit: Direction::West,
                tilt: -FRAC_PI_4,
            },
            Corner {
                name: Waypoint::D,
                point: w.d,
                outward: Vector::new(-1.0, 1.0),
                side: Side::Top,
                approach: Direction::West,
                exit: Direction::South,
                tilt: FRAC_PI_4,
            },
            Corner {
                name: Waypoint::A,
                point: w.a,
                outward: Vector::new(-1.0, -1.0),
                side: Side::Bottom,
                approach: Direction::South,
                exit: Direction::East,
                tilt: -FRAC_PI_4,
            },
        ]
    }

    /// How far into the track a corner's snap zone reaches for autonomous cars.
    pub fn autonomous_reach(&self) -> Vector {
        self.half_extents
    }

    /// The player rides the inner lane, so its zone stretches across it.
    pub fn player_reach(&self, corner: &Corner) -> Vector {
        Vector::new(
            self.half_extents.x,
            self.lane_width(corner.side) - self.half_extents.y,
        )
    }

    /// The zone in which the early turn hint fires.
    pub fn hint_reach(&self, reach: Vector) -> Vector {
        reach + Vector::new(self.turn_ahead, self.turn_ahead)
    }
}

/// One entry of the corner table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    pub name: Waypoint,
    pub point: Vector,
    /// Signs pointing away from the track interior on each axis.
    pub outward: Vector,
    pub side: Side,
    /// Direction a car travels while approaching.
    pub approach: Direction,
    /// Direction a car travels after turning.
    pub exit: Direction,
    /// Diagonal display rotation shown by the player while rounding the corner.
    pub tilt: f32,
}

impl Corner {
    /// True if `position` lies within `reach` of the corner on both axes,
    /// measured toward the interior of the track.
    pub fn contains(&self, position: Vector, reach: Vector) -> bool {
        let d = position - self.point;
        self.outward.x * d.x >= -reach.x && self.outward.y * d.y >= -reach.y
    }

    /// The boundary position on the approach axis for a car of the given size.
    pub fn clamp(&self, mut position: Vector, half_extents: Vector) -> Vector {
        if self.approach.is_horizontal() {
            position.x = self.point.x - self.outward.x * half_extents.x;
        } else {
            position.y = self.point.y - self.outward.y * half_extents.y;
        }
        position
    }

    /// Heading after the corner.
    pub fn heading(&self) -> f32 {
        self.exit.heading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_track_matches_defaults() {
        let track = TrackConfig::embedded().unwrap();
        assert_eq!(track, TrackConfig::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let track = TrackConfig::parse(br#"{ "base_speed": 250.0 }"#).unwrap();
        assert_eq!(track.base_speed, 250.0);
        assert_eq!(track.waypoints, Waypoints::default());
    }

    #[test]
    fn rejects_non_positive_turn_ahead() {
        let err = TrackConfig::parse(br#"{ "turn_ahead": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TrackError::Invalid(_)));
    }

    #[test]
    fn rejects_garbage() {
        let err = TrackConfig::parse(b"{ not json").unwrap_err();
        assert!(matches!(err, TrackError::Parse(_)));
    }

    #[test]
    fn derived_distances() {
        let track = TrackConfig::default();
        assert_eq!(track.safe_distance(), Vector::new(115.0, 65.0));
        assert_eq!(track.player_speed(), 1000.0);
        assert_eq!(track.lane_width(Side::Bottom), 100.0);
        assert_eq!(track.lane_width(Side::Top), 100.0);
    }

    #[test]
    fn corner_zones_match_layout() {
        let track = TrackConfig::default();
        let [b, c, d, a] = track.corners();
        let reach = track.autonomous_reach();
        assert!(b.contains(Vector::new(1350.0, 325.0), reach));
        assert!(!b.contains(Vector::new(1349.0, 325.0), reach));
        assert!(!b.contains(Vector::new(1350.0, 326.0), reach));
        assert!(c.contains(Vector::new(1350.0, 875.0), reach));
        assert!(d.contains(Vector::new(250.0, 875.0), reach));
        assert!(a.contains(Vector::new(250.0, 325.0), reach));
        assert!(!a.contains(Vector::new(251.0, 325.0), reach));
        // the player's zone spans its inner lane
        assert_eq!(track.player_reach(&b), Vector::new(50.0, 75.0));
        assert!(b.contains(Vector::new(1360.0, 375.0), track.player_reach(&b)));
        assert!(c.contains(Vector::new(1360.0, 825.0), track.player_reach(&c)));
    }

    #[test]
    fn clamp_uses_approach_axis() {
        let track = TrackConfig::default();
        let half = track.half_extents;
        let [b, c, d, a] = track.corners();
        assert_eq!(b.clamp(Vector::new(1362.0, 325.0), half), Vector::new(1350.0, 325.0));
        assert_eq!(c.clamp(Vector::new(1375.0, 880.0), half), Vector::new(1375.0, 875.0));
        assert_eq!(d.clamp(Vector::new(240.0, 875.0), half), Vector::new(250.0, 875.0));
        assert_eq!(a.clamp(Vector::new(225.0, 310.0), half), Vector::new(225.0, 325.0));
    }

    #[test]
    fn hint_zone_is_strictly_larger_than_snap_zone() {
        let track = TrackConfig::default();
        for corner in track.corners() {
            for reach in [track.autonomous_reach(), track.player_reach(&corner)] {
                let hint = track.hint_reach(reach);
                assert!(hint.x > reach.x && hint.y > reach.y, "{:?}", corner.name);
                // halfway between the two zone edges
                let depth = reach + Vector::new(track.turn_ahead, track.turn_ahead) * 0.5;
                let p = corner.point
                    - Vector::new(corner.outward.x * depth.x, corner.outward.y * depth.y);
                assert!(corner.contains(p, hint), "{:?}", corner.name);
                assert!(!corner.contains(p, reach), "{:?}", corner.name);
            }
        }
    }

    #[test]
    fn directions_round_trip_through_velocity() {
        for dir in [Direction::East, Direction::North, Direction::West, Direction::South] {
            assert_eq!(Direction::of(dir.unit() * 500.0), Some(dir));
        }
        assert_eq!(Direction::of(Vector::ZERO), None);
        assert_eq!(Direction::of(Vector::new(1.0, 1.0)), None);
    }

    #[test]
    fn window_mapping() {
        let track = TrackConfig::default();
        assert_eq!(track.window_to_world(0, 0), Vector::new(0.0, 1200.0));
        assert_eq!(track.window_to_world(800, 600), Vector::new(1600.0, 0.0));
        assert_eq!(track.window_to_world(400, 150), Vector::new(800.0, 900.0));
    }
}
