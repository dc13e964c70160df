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

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::Deserialize;

macro_rules! auto_assign {
    ($name:ident, $func:ident, $assign_func:ident, $t:ty, $u:ty) => {
        impl $name<$u> for $t {
            type Output = $t;

            fn $func(mut self, rhs: $u) -> $t {
                self.$assign_func(rhs);
                self
            }
        }
    };
}

/// A point or displacement in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const X_AXIS: Self = Self::new(1.0, 0.0);
    pub const Y_AXIS: Self = Self::new(0.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True if at most one component is nonzero.
    pub fn is_axis_aligned(&self) -> bool {
        self.x == 0.0 || self.y == 0.0
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }
}

impl AddAssign<Vector> for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

auto_assign! { Add, add, add_assign, Vector, Vector }

impl SubAssign<Vector> for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

auto_assign! { Sub, sub, sub_assign, Vector, Vector }

impl MulAssign<f32> for Vector {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

auto_assign! { Mul, mul, mul_assign, Vector, f32 }

impl DivAssign<f32> for Vector {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

auto_assign! { Div, div, div_assign, Vector, f32 }

/// A 4x4 transform, stored column-major to match what OpenGL expects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mtx {
    pub cols: [[f32; 4]; 4],
}

impl Mtx {
    #[rustfmt::skip]
    pub const IDENT: Self = Self::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const fn new(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Orthographic projection of the given rectangle onto clip space, with
    /// the depth range fixed to [-1, 1].
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        let mut m = Self::IDENT;
        m.cols[0][0] = 2.0 / (right - left);
        m.cols[1][1] = 2.0 / (top - bottom);
        m.cols[2][2] = -1.0;
        m.cols[3][0] = -(right + left) / (right - left);
        m.cols[3][1] = -(top + bottom) / (top - bottom);
        m
    }

    pub fn translation(offset: Vector) -> Self {
        let mut m = Self::IDENT;
        m.cols[3][0] = offset.x;
        m.cols[3][1] = offset.y;
        m
    }

    /// Rotation around the Z axis (counterclockwise for positive angles).
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut m = Self::IDENT;
        m.cols[0][0] = cos;
        m.cols[0][1] = sin;
        m.cols[1][0] = -sin;
        m.cols[1][1] = cos;
        m
    }

    /// Transform a point, treating it as lying on the z = 0 plane.
    pub fn transform_point(&self, p: Vector) -> Vector {
        let c = &self.cols;
        let x = c[0][0] * p.x + c[1][0] * p.y + c[3][0];
        let y = c[0][1] * p.x + c[1][1] * p.y + c[3][1];
        Vector::new(x, y)
    }

    /// Flatten for uploading as a uniform.
    pub fn as_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, col) in self.cols.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(col);
        }
        out
    }
}

impl Default for Mtx {
    fn default() -> Self {
        Self::IDENT
    }
}

impl MulAssign<Mtx> for Mtx {
    fn mul_assign(&mut self, rhs: Mtx) {
        let lhs = self.cols;
        let mut cols = [[0.0; 4]; 4];
        for (j, col) in cols.iter_mut().enumerate() {
            for (i, cell) in col.iter_mut().enumerate() {
                *cell = (0..4).map(|k| lhs[k][i] * rhs.cols[j][k]).sum();
            }
        }
        self.cols = cols;
    }
}

auto_assign! { Mul, mul, mul_assign, Mtx, Mtx }

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn assert_close(a: Vector, b: Vector) {
        let d = a - b;
        assert!(d.x.abs() < 1e-3 && d.y.abs() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn ortho_maps_world_corners_to_clip_space() {
        let proj = Mtx::ortho(0.0, 1600.0, 0.0, 1200.0);
        assert_close(proj.transform_point(Vector::ZERO), Vector::new(-1.0, -1.0));
        assert_close(
            proj.transform_point(Vector::new(1600.0, 1200.0)),
            Vector::new(1.0, 1.0),
        );
        assert_close(
            proj.transform_point(Vector::new(800.0, 600.0)),
            Vector::ZERO,
        );
    }

    #[test]
    fn translate_then_rotate_applies_rotation_first() {
        let m = Mtx::translation(Vector::new(10.0, 20.0)) * Mtx::rotation(FRAC_PI_2);
        assert_close(m.transform_point(Vector::X_AXIS), Vector::new(10.0, 21.0));
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mtx::rotation(0.3) * Mtx::IDENT;
        assert_eq!(m, Mtx::rotation(0.3));
        assert_eq!(Mtx::IDENT.as_array()[15], 1.0);
    }

    #[test]
    fn axis_alignment() {
        assert!(Vector::new(500.0, 0.0).is_axis_aligned());
        assert!(Vector::new(0.0, -500.0).is_axis_aligned());
        assert!(!Vector::new(1.0, 1.0).is_axis_aligned());
    }
}
