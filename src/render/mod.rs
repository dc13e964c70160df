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

pub mod mesh;
pub mod texture;

use crate::linalg::Mtx;

pub use self::{
    mesh::{MeshData, MeshId, MeshSet},
    texture::TextureSlot,
};

/// A single textured quad to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    /// Full clip-space transform, projection included.
    pub transform: Mtx,
    pub texture: TextureSlot,
}

/// Everything to draw for one frame, back to front.
#[derive(Default)]
pub struct RenderGraph {
    calls: Vec<DrawCall>,
}

impl RenderGraph {
    pub fn draw(&mut self, mesh: MeshId, transform: Mtx, texture: TextureSlot) {
        self.calls.push(DrawCall {
            mesh,
            transform,
            texture,
        });
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }
}
