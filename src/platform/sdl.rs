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

use std::{ffi::CString, mem::size_of, path::Path, time::Instant};

use log::{error, info};
use sdl2::{
    event::{Event, WindowEvent},
    image::{InitFlag, LoadSurface, Sdl2ImageContext},
    keyboard::Keycode,
    mouse::MouseButton,
    pixels::PixelFormatEnum,
    surface::Surface,
    video::GLProfile,
};

use crate::{
    linalg::Mtx,
    render::{
        mesh::{MeshBuffer, INDICES_PER_QUAD, VERTEX_FLOATS},
        MeshData, RenderGraph, TextureSlot,
    },
};

use super::{Buttons, Controls, Platform, PlatformError, PlatformSettings};

#[allow(clippy::too_many_arguments)]
#[allow(clippy::style)]
#[allow(clippy::pedantic)]
mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

struct Shader {
    id: gl::types::GLuint,
}

impl Shader {
    fn new(ty: gl::types::GLenum) -> Self {
        Self {
            id: unsafe { gl::CreateShader(ty) },
        }
    }

    fn source(&self, source: &str) {
        let strings = [source.as_ptr() as *const gl::types::GLchar];
        let lengths = [source.len() as gl::types::GLint];
        unsafe {
            gl::ShaderSource(self.id, 1, strings.as_ptr(), lengths.as_ptr());
        }
    }

    fn compile(&self) -> Result<(), String> {
        unsafe {
            gl::CompileShader(self.id);
            // check success of the compilation
            let mut success: gl::types::GLint = 0;
            gl::GetShaderiv(self.id, gl::COMPILE_STATUS, &mut success);
            if success == 0 {
                let mut length: gl::types::GLint = 0;
                gl::GetShaderiv(self.id, gl::INFO_LOG_LENGTH, &mut length);
                let mut buffer = vec![0u8; length.max(1) as usize];
                gl::GetShaderInfoLog(
                    self.id,
                    length,
                    std::ptr::null_mut(),
                    buffer.as_mut_ptr() as *mut gl::types::GLchar,
                );
                // drop null terminator
                buffer.pop();
                Err(String::from_utf8(buffer).unwrap_or_else(|_| String::from("GL error")))
            } else {
                Ok(())
            }
        }
    }

    fn build(ty: gl::types::GLenum, source: &str) -> Result<Self, PlatformError> {
        let shader = Self::new(ty);
        shader.source(source);
        shader.compile().map_err(PlatformError::Shader)?;
        Ok(shader)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

struct Program {
    id: gl::types::GLuint,
}

impl Program {
    fn new() -> Self {
        Self {
            id: unsafe { gl::CreateProgram() },
        }
    }

    fn attach(&self, shader: &Shader) {
        unsafe {
            gl::AttachShader(self.id, shader.id);
        }
    }

    fn link(&self) -> Result<(), String> {
        unsafe {
            gl::LinkProgram(self.id);
            let mut success: gl::types::GLint = 0;
            gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut success);
            if success == 0 {
                let mut length: gl::types::GLint = 0;
                gl::GetProgramiv(self.id, gl::INFO_LOG_LENGTH, &mut length);
                let mut buffer = vec![0u8; length.max(1) as usize];
                gl::GetProgramInfoLog(
                    self.id,
                    length,
                    std::ptr::null_mut(),
                    buffer.as_mut_ptr() as *mut gl::types::GLchar,
                );
                buffer.pop();
                Err(String::from_utf8(buffer).unwrap_or_else(|_| String::from("GL error")))
            } else {
                Ok(())
            }
        }
    }

    fn use_program(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    fn get_uniform(&self, name: &'static str) -> Result<Uniform, PlatformError> {
        let cstr = CString::new(name).map_err(|_| PlatformError::MissingUniform(name))?;
        let location = unsafe { gl::GetUniformLocation(self.id, cstr.as_ptr()) };
        if location == -1 {
            Err(PlatformError::MissingUniform(name))
        } else {
            Ok(Uniform { location })
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

struct VAO {
    id: gl::types::GLuint,
}

impl VAO {
    fn new() -> Self {
        let mut id: gl::types::GLuint = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        Self { id }
    }

    fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    fn enable(index: gl::types::GLuint) {
        unsafe {
            gl::EnableVertexAttribArray(index);
        }
    }

    fn attrib_ptr(
        index: gl::types::GLuint,
        size: gl::types::GLint,
        ty: gl::types::GLenum,
        normalized: bool,
        stride: gl::types::GLsizei,
        offset: usize,
    ) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                size,
                ty,
                normalized.into(),
                stride,
                offset as *const std::ffi::c_void,
            );
        }
    }
}

impl Drop for VAO {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

struct VBO {
    id: gl::types::GLuint,
}

impl VBO {
    fn new() -> Self {
        let mut id: gl::types::GLuint = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
        }
        Self { id }
    }

    fn bind(&self, target: gl::types::GLenum) {
        unsafe {
            gl::BindBuffer(target, self.id);
        }
    }

    fn data<T>(target: gl::types::GLenum, ptr: &[T], usage: gl::types::GLenum) {
        unsafe {
            gl::BufferData(
                target,
                (size_of::<T>() * ptr.len()) as _,
                ptr.as_ptr() as *const std::ffi::c_void,
                usage,
            );
        }
    }
}

impl Drop for VBO {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

struct Uniform {
    location: gl::types::GLint,
}

impl Uniform {
    fn mat4(&self, m: &Mtx) {
        let cols = m.as_array();
        unsafe {
            gl::UniformMatrix4fv(self.location, 1, gl::FALSE, cols.as_ptr());
        }
    }

    fn int(&self, value: i32) {
        unsafe {
            gl::Uniform1i(self.location, value);
        }
    }
}

/// An uploaded mesh with its element buffer.
struct GpuMesh {
    vao: VAO,
    _vbo: VBO,
    _ebo: VBO,
}

impl GpuMesh {
    fn upload(data: &MeshData) -> Self {
        let vao = VAO::new();
        vao.bind();
        let vbo = VBO::new();
        vbo.bind(gl::ARRAY_BUFFER);
        VBO::data(gl::ARRAY_BUFFER, &data.vertices, gl::STATIC_DRAW);
        let ebo = VBO::new();
        ebo.bind(gl::ELEMENT_ARRAY_BUFFER);
        VBO::data(gl::ELEMENT_ARRAY_BUFFER, &data.indices, gl::STATIC_DRAW);

        let float = size_of::<f32>();
        let stride = (VERTEX_FLOATS * float) as gl::types::GLsizei;
        // position, color, texture coordinate
        for (index, size, offset) in [(0, 4, 0), (1, 3, 4), (2, 2, 7)] {
            VAO::attrib_ptr(index, size, gl::FLOAT, false, stride, offset * float);
            VAO::enable(index);
        }

        Self {
            vao,
            _vbo: vbo,
            _ebo: ebo,
        }
    }

    fn draw_quad(&self, first_index: usize) {
        self.vao.bind();
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                INDICES_PER_QUAD as _,
                gl::UNSIGNED_INT,
                (first_index * size_of::<u32>()) as *const std::ffi::c_void,
            );
        }
    }
}

struct Texture {
    id: gl::types::GLuint,
}

impl Texture {
    fn load(path: &Path) -> Result<Self, String> {
        let surface = Surface::from_file(path)?.convert_format(PixelFormatEnum::RGBA32)?;
        let width = surface.width() as gl::types::GLsizei;
        let height = surface.height() as gl::types::GLsizei;
        let row_length = (surface.pitch() / 4) as gl::types::GLint;

        let mut id: gl::types::GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
        }
        let texture = Self { id };
        texture.bind();
        unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as _);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as _);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as _);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as _);
        }
        surface.with_lock(|pixels| unsafe {
            gl::PixelStorei(gl::UNPACK_ROW_LENGTH, row_length);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as _,
                width,
                height,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const std::ffi::c_void,
            );
            gl::PixelStorei(gl::UNPACK_ROW_LENGTH, 0);
        });
        Ok(texture)
    }

    fn bind(&self) {
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

/// Load every texture slot. Slots that fail to load are left unbound.
fn load_textures(dir: &Path) -> Vec<Option<Texture>> {
    TextureSlot::all()
        .map(|slot| {
            let path = dir.join(slot.file_name());
            match Texture::load(&path) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    error!("failed to load texture {}: {e}", path.display());
                    None
                }
            }
        })
        .collect()
}

pub struct SdlPlatform {
    // GL objects come first so they are dropped while the context is alive.
    textures: Vec<Option<Texture>>,
    ground: GpuMesh,
    car: GpuMesh,
    matrix: Uniform,
    use_texture: Uniform,
    program: Program,

    _gl_ctx: sdl2::video::GLContext,
    window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    _image: Sdl2ImageContext,

    epoch: Instant,

    should_run: bool,

    /// Buttons currently held.
    buttons: Buttons,
    /// Auto-repeats seen since the last poll.
    repeated: Buttons,
    /// Latest cursor position reported since the last poll.
    cursor: Option<(i32, i32)>,
}

static KEYBOARD_MAPPING: [(Keycode, Buttons); 3] = [
    (Keycode::Right, Buttons::NEXT_SKIN),
    (Keycode::Left, Buttons::PREV_SKIN),
    (Keycode::Escape, Buttons::QUIT),
];

fn get_keycode_bitmask(keycode: Keycode) -> Buttons {
    for (k, b) in &KEYBOARD_MAPPING {
        if *k == keycode {
            return *b;
        }
    }
    Buttons::empty()
}

impl SdlPlatform {
    fn mesh(&self, buffer: MeshBuffer) -> &GpuMesh {
        match buffer {
            MeshBuffer::Ground => &self.ground,
            MeshBuffer::Car => &self.car,
        }
    }

    fn pump_events(&mut self) {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::Window {
                    win_event: WindowEvent::Close,
                    ..
                } => {
                    self.should_run = false;
                }

                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat,
                    ..
                } => {
                    let button = get_keycode_bitmask(keycode);
                    if repeat {
                        self.repeated |= button & Buttons::SKIN;
                    }
                    self.buttons |= button;
                }

                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    self.buttons &= !get_keycode_bitmask(keycode);
                }

                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Right,
                    ..
                } => {
                    self.buttons |= Buttons::DRIVE;
                }

                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Right,
                    ..
                } => {
                    self.buttons &= !Buttons::DRIVE;
                }

                Event::MouseMotion { x, y, .. } => {
                    self.cursor = Some((x, y));
                }

                _ => {}
            }
        }
    }
}

impl Platform for SdlPlatform {
    fn init(settings: &PlatformSettings<'_>) -> Result<Self, PlatformError> {
        let ctx = sdl2::init().map_err(PlatformError::Init)?;
        let video = ctx.video().map_err(PlatformError::Init)?;
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video
            .window(
                settings.title,
                settings.window.width.into(),
                settings.window.height.into(),
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| PlatformError::Window(e.to_string()))?;
        let gl_ctx = window
            .gl_create_context()
            .map_err(PlatformError::Context)?;
        gl::load_with(|s| video.gl_get_proc_address(s).cast());

        let image = sdl2::image::init(InitFlag::PNG).map_err(PlatformError::Init)?;
        let event_pump = ctx.event_pump().map_err(PlatformError::Init)?;

        let vertex = Shader::build(
            gl::VERTEX_SHADER,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shader/vertex.glsl")),
        )?;
        let fragment = Shader::build(
            gl::FRAGMENT_SHADER,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shader/fragment.glsl")),
        )?;

        let program = Program::new();
        program.attach(&vertex);
        program.attach(&fragment);
        program.link().map_err(PlatformError::Link)?;
        program.use_program();

        let matrix = program.get_uniform("myMatrix")?;
        let use_texture = program.get_uniform("useTexture")?;
        // every texture is drawn from unit 0
        program.get_uniform("myTexture")?.int(0);

        let ground = GpuMesh::upload(&settings.meshes.ground);
        let car = GpuMesh::upload(&settings.meshes.car);

        unsafe {
            gl::ClearColor(1.0, 1.0, 1.0, 1.0);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::ActiveTexture(gl::TEXTURE0);
        }

        let textures = load_textures(&settings.texture_dir);
        let loaded = textures.iter().filter(|t| t.is_some()).count();
        info!("loaded {loaded} of {} textures", textures.len());

        Ok(Self {
            textures,
            ground,
            car,
            matrix,
            use_texture,
            program,

            _gl_ctx: gl_ctx,
            window,
            event_pump,
            _image: image,

            epoch: Instant::now(),

            should_run: true,

            buttons: Buttons::empty(),
            repeated: Buttons::empty(),
            cursor: None,
        })
    }

    fn should_run(&self) -> bool {
        self.should_run
    }

    fn time_msec(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn poll(&mut self) -> Controls {
        Controls {
            buttons: self.buttons,
            repeated: std::mem::take(&mut self.repeated),
            cursor: self.cursor.take(),
        }
    }

    fn end_frame(&mut self, graph: &RenderGraph) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.program.use_program();
        for call in graph.calls() {
            self.matrix.mat4(&call.transform);
            match self.textures.get(call.texture.index()).and_then(Option::as_ref) {
                Some(texture) => {
                    texture.bind();
                    self.use_texture.int(1);
                }
                None => self.use_texture.int(0),
            }
            self.mesh(call.mesh.buffer())
                .draw_quad(call.mesh.first_index());
        }
        self.window.gl_swap_window();
        // accept events
        self.pump_events();
    }
}
