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

use crate::{linalg::Vector, track::TrackConfig};

/// Floats per vertex: position (4), color (3), texture coordinate (2).
pub const VERTEX_FLOATS: usize = 9;
pub const INDICES_PER_QUAD: usize = 6;

/// Screen area of the lap counter digits, in world units.
const TENS_DIGIT: (Vector, Vector) = (Vector::new(29.0, 20.0), Vector::new(125.0, 105.0));
const ONES_DIGIT: (Vector, Vector) = (Vector::new(125.0, 20.0), Vector::new(217.0, 105.0));

const GROUND_SHADE: f32 = 0.8;
const CAR_SHADE: f32 = 0.3;
const PLAYER_SHADE: f32 = 0.5;

/// The vertex buffers the platform has to upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshBuffer {
    Ground,
    Car,
}

/// A quad inside one of the mesh buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshId {
    Background,
    TensDigit,
    OnesDigit,
    Car,
    Player,
}

impl MeshId {
    pub fn buffer(self) -> MeshBuffer {
        match self {
            Self::Background | Self::TensDigit | Self::OnesDigit => MeshBuffer::Ground,
            Self::Car | Self::Player => MeshBuffer::Car,
        }
    }

    /// Offset of this quad's first index in its buffer.
    pub fn first_index(self) -> usize {
        let quad = match self {
            Self::Background | Self::Car => 0,
            Self::TensDigit | Self::Player => 1,
            Self::OnesDigit => 2,
        };
        quad * INDICES_PER_QUAD
    }
}

/// Interleaved vertices and triangle indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append an axis-aligned quad covering the whole texture.
    pub fn quad(&mut self, min: Vector, max: Vector, shade: f32) {
        let base = (self.vertices.len() / VERTEX_FLOATS) as u32;
        let corners = [
            (min.x, min.y, 0.0, 0.0),
            (max.x, min.y, 1.0, 0.0),
            (max.x, max.y, 1.0, 1.0),
            (min.x, max.y, 0.0, 1.0),
        ];
        for (x, y, u, v) in corners {
            self.vertices
                .extend_from_slice(&[x, y, 0.0, 1.0, shade, shade, shade, u, v]);
        }
        self.indices
            .extend([0, 1, 2, 2, 3, 0].iter().map(|i| base + i));
    }
}

/// All static geometry of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshSet {
    pub ground: MeshData,
    pub car: MeshData,
}

impl MeshSet {
    pub fn new(track: &TrackConfig) -> Self {
        let mut ground = MeshData::default();
        ground.quad(track.world.min, track.world.max, GROUND_SHADE);
        ground.quad(TENS_DIGIT.0, TENS_DIGIT.1, GROUND_SHADE);
        ground.quad(ONES_DIGIT.0, ONES_DIGIT.1, GROUND_SHADE);

        let half = track.half_extents;
        let mut car = MeshData::default();
        car.quad(-half, half, CAR_SHADE);
        car.quad(-half, half, PLAYER_SHADE);

        Self { ground, car }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_holds_three_quads() {
        let meshes = MeshSet::new(&TrackConfig::default());
        assert_eq!(meshes.ground.vertices.len(), 12 * VERTEX_FLOATS);
        assert_eq!(meshes.ground.indices[12..], [8, 9, 10, 10, 11, 8]);
        // background spans the world
        assert_eq!(&meshes.ground.vertices[2 * VERTEX_FLOATS..][..2], &[1600.0, 1200.0]);
    }

    #[test]
    fn car_quad_is_centered() {
        let meshes = MeshSet::new(&TrackConfig::default());
        assert_eq!(&meshes.car.vertices[..2], &[-50.0, -25.0]);
        assert_eq!(meshes.car.indices.len(), 2 * INDICES_PER_QUAD);
        // the player's copy is lighter
        assert_eq!(meshes.car.vertices[4 * VERTEX_FLOATS + 4], PLAYER_SHADE);
    }

    #[test]
    fn mesh_ids_index_their_quads() {
        let meshes = MeshSet::new(&TrackConfig::default());
        for id in [
            MeshId::Background,
            MeshId::TensDigit,
            MeshId::OnesDigit,
            MeshId::Car,
            MeshId::Player,
        ] {
            let data = match id.buffer() {
                MeshBuffer::Ground => &meshes.ground,
                MeshBuffer::Car => &meshes.car,
            };
            assert!(id.first_index() + INDICES_PER_QUAD <= data.indices.len());
        }
    }
}
