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

use std::{error::Error, fmt, path::PathBuf};

use bitflags::bitflags;

use crate::{
    render::{MeshSet, RenderGraph},
    track::WindowSize,
};

bitflags! {
    #[derive(Default)]
    pub struct Buttons: u8 {
        /// Cars move while held.
        const DRIVE     = 1 << 0;
        const NEXT_SKIN = 1 << 1;
        const PREV_SKIN = 1 << 2;
        const QUIT      = 1 << 3;
        /// Buttons that act again on key repeat.
        const SKIN = Self::NEXT_SKIN.bits | Self::PREV_SKIN.bits;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub buttons: Buttons,
    /// Buttons whose key auto-repeated since the last poll.
    pub repeated: Buttons,
    /// Cursor position in window pixels, if it moved since the last poll.
    pub cursor: Option<(i32, i32)>,
}

/// What the platform needs to know to open its window and upload the scene.
pub struct PlatformSettings<'a> {
    pub window: WindowSize,
    pub title: &'a str,
    pub meshes: &'a MeshSet,
    pub texture_dir: PathBuf,
}

#[derive(Debug)]
pub enum PlatformError {
    /// SDL or one of its subsystems failed to start.
    Init(String),
    Window(String),
    Context(String),
    Shader(String),
    Link(String),
    MissingUniform(&'static str),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "failed to initialize SDL: {e}"),
            Self::Window(e) => write!(f, "failed to create window: {e}"),
            Self::Context(e) => write!(f, "failed to create GL context: {e}"),
            Self::Shader(e) => write!(f, "failed to compile shader: {e}"),
            Self::Link(e) => write!(f, "failed to link shader program: {e}"),
            Self::MissingUniform(name) => write!(f, "shader uniform {name} not found"),
        }
    }
}

impl Error for PlatformError {}

pub trait Platform {
    fn init(settings: &PlatformSettings<'_>) -> Result<Self, PlatformError>
    where
        Self: Sized;

    fn should_run(&self) -> bool;

    fn time_msec(&self) -> u64;

    fn poll(&mut self) -> Controls;

    fn end_frame(&mut self, graph: &RenderGraph);
}

pub mod sdl;

pub type Impl = sdl::SdlPlatform;
