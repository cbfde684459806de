use std::{ffi::CStr, panic::Location, ptr};

use gl::types::{GLchar, GLint, GLsizei};
use nalgebra_glm::Vec4;

use crate::{buffer::BufferElementType, config::PolygonMode, shader::ShaderStage};

pub fn clear_error() {
    while unsafe { gl::GetError() } != gl::NO_ERROR {}
}

#[track_caller]
pub fn check_error() {
    let error = unsafe { gl::GetError() };
    if error != gl::NO_ERROR {
        log::error!("GL error {:#06x} at {}", error, Location::caller());
    }
}

macro_rules! check {
    ($call:expr) => {{
        #[cfg(debug_assertions)]
        {
            clear_error();
            let x = $call;
            check_error();
            x
        }

        #[cfg(not(debug_assertions))]
        {
            $call
        }
    }};
}

/// The GL calls the renderer issues, one method per entry point.
///
/// Handles are the raw GL object names.
pub trait Device {
    fn create_shader(&mut self, stage: ShaderStage) -> u32;
    fn shader_source(&mut self, shader: u32, source: &CStr);
    fn compile_shader(&mut self, shader: u32);
    fn compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&mut self, shader: u32);

    fn create_program(&mut self) -> u32;
    fn attach_shader(&mut self, program: u32, shader: u32);
    fn link_program(&mut self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&mut self, program: u32);
    fn delete_program(&mut self, program: u32);

    fn gen_vertex_array(&mut self) -> u32;
    fn bind_vertex_array(&mut self, vertex_array: u32);
    fn delete_vertex_array(&mut self, vertex_array: u32);

    fn gen_buffer(&mut self) -> u32;
    fn bind_array_buffer(&mut self, buffer: u32);
    /// Copies `data` into the bound array buffer with static-draw usage.
    fn array_buffer_data(&mut self, data: &[u8]);
    fn delete_buffer(&mut self, buffer: u32);

    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        count: u32,
        ty: BufferElementType,
        normalized: bool,
        stride: u32,
        offset: u32,
    );
    fn enable_vertex_attrib_array(&mut self, index: u32);

    fn clear_color(&mut self, color: &Vec4);
    fn clear(&mut self);
    fn polygon_mode(&mut self, mode: PolygonMode);
    fn draw_triangles(&mut self, first: u32, count: u32);
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
}

/// [`Device`] backed by the loaded `gl` function pointers.
///
/// Only valid while the context created by `GlWindow` is current.
#[derive(Debug, Default)]
pub struct GlDevice;

impl GlDevice {
    fn info_log(len: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
        let mut message = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        fetch(len, &mut written, message.as_mut_ptr() as *mut GLchar);
        message.truncate(written.max(0) as usize);

        String::from_utf8_lossy(&message).trim_end().to_owned()
    }
}

impl Device for GlDevice {
    fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        check!(unsafe { gl::CreateShader(stage.kind()) })
    }

    fn shader_source(&mut self, shader: u32, source: &CStr) {
        check!(unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null()) })
    }

    fn compile_shader(&mut self, shader: u32) {
        check!(unsafe { gl::CompileShader(shader) })
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut result = gl::FALSE as GLint;
        check!(unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut result) });
        result == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        check!(unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) });

        Self::info_log(len, |len, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, len, written, buf)
        })
    }

    fn delete_shader(&mut self, shader: u32) {
        check!(unsafe { gl::DeleteShader(shader) })
    }

    fn create_program(&mut self) -> u32 {
        check!(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        check!(unsafe { gl::AttachShader(program, shader) })
    }

    fn link_program(&mut self, program: u32) {
        check!(unsafe { gl::LinkProgram(program) })
    }

    fn link_status(&self, program: u32) -> bool {
        let mut status = gl::FALSE as GLint;
        check!(unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) });
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        check!(unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) });

        Self::info_log(len, |len, written, buf| unsafe {
            gl::GetProgramInfoLog(program, len, written, buf)
        })
    }

    fn use_program(&mut self, program: u32) {
        check!(unsafe { gl::UseProgram(program) })
    }

    fn delete_program(&mut self, program: u32) {
        check!(unsafe { gl::DeleteProgram(program) })
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let mut id = 0;
        check!(unsafe { gl::GenVertexArrays(1, &mut id) });
        id
    }

    fn bind_vertex_array(&mut self, vertex_array: u32) {
        check!(unsafe { gl::BindVertexArray(vertex_array) })
    }

    fn delete_vertex_array(&mut self, vertex_array: u32) {
        check!(unsafe { gl::DeleteVertexArrays(1, &vertex_array) })
    }

    fn gen_buffer(&mut self) -> u32 {
        let mut id = 0;
        check!(unsafe { gl::GenBuffers(1, &mut id) });
        id
    }

    fn bind_array_buffer(&mut self, buffer: u32) {
        check!(unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer) })
    }

    fn array_buffer_data(&mut self, data: &[u8]) {
        check!(unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as isize,
                data.as_ptr() as *const _,
                gl::STATIC_DRAW,
            )
        })
    }

    fn delete_buffer(&mut self, buffer: u32) {
        check!(unsafe { gl::DeleteBuffers(1, &buffer) })
    }

    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        count: u32,
        ty: BufferElementType,
        normalized: bool,
        stride: u32,
        offset: u32,
    ) {
        check!(unsafe {
            gl::VertexAttribPointer(
                index,
                count as GLint,
                ty as u32,
                normalized as u8,
                stride as GLsizei,
                offset as usize as *const _,
            )
        })
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        check!(unsafe { gl::EnableVertexAttribArray(index) })
    }

    fn clear_color(&mut self, color: &Vec4) {
        check!(unsafe { gl::ClearColor(color.x, color.y, color.z, color.w) })
    }

    fn clear(&mut self) {
        check!(unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) })
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
        check!(unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode as u32) })
    }

    fn draw_triangles(&mut self, first: u32, count: u32) {
        check!(unsafe { gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei) })
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        check!(unsafe { gl::Viewport(x, y, width, height) })
    }
}

#[cfg(test)]
pub mod testing {
    //! An in-memory [`Device`] that records every call and tracks which
    //! handles are alive.

    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum Handle {
        Shader(u32),
        Program(u32),
        VertexArray(u32),
        Buffer(u32),
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Create(Handle),
        Delete(Handle),
        Compile(u32),
        Attach { program: u32, shader: u32 },
        Link(u32),
        UseProgram(u32),
        BindVertexArray(u32),
        BindArrayBuffer(u32),
        BufferData(Vec<u8>),
        VertexAttribPointer {
            index: u32,
            count: u32,
            ty: BufferElementType,
            normalized: bool,
            stride: u32,
            offset: u32,
        },
        EnableVertexAttribArray(u32),
        ClearColor([f32; 4]),
        Clear,
        PolygonMode(PolygonMode),
        DrawTriangles { first: u32, count: u32 },
        Viewport(i32, i32, i32, i32),
    }

    #[derive(Debug, Default)]
    pub struct RecordingDevice {
        pub calls: Vec<Call>,
        live: BTreeMap<u32, Handle>,
        sources: BTreeMap<u32, String>,
        compiled: BTreeMap<u32, bool>,
        next_id: u32,
        compile_failure: Option<(String, String)>,
        link_failure: Option<String>,
    }

    impl RecordingDevice {
        pub fn new() -> Self {
            Self::default()
        }

        /// Any shader whose source contains `needle` fails to compile with `log`.
        pub fn failing_compile(mut self, needle: &str, log: &str) -> Self {
            self.compile_failure = Some((needle.to_owned(), log.to_owned()));
            self
        }

        pub fn failing_link(mut self, log: &str) -> Self {
            self.link_failure = Some(log.to_owned());
            self
        }

        pub fn live_handles(&self) -> Vec<Handle> {
            self.live.values().copied().collect()
        }

        pub fn created(&self) -> Vec<Handle> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Create(handle) => Some(*handle),
                    _ => None,
                })
                .collect()
        }

        pub fn deleted(&self) -> Vec<Handle> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Delete(handle) => Some(*handle),
                    _ => None,
                })
                .collect()
        }

        fn create(&mut self, make: fn(u32) -> Handle) -> u32 {
            self.next_id += 1;
            let handle = make(self.next_id);
            self.live.insert(self.next_id, handle);
            self.calls.push(Call::Create(handle));
            self.next_id
        }

        fn delete(&mut self, handle: Handle) {
            let id = match handle {
                Handle::Shader(id)
                | Handle::Program(id)
                | Handle::VertexArray(id)
                | Handle::Buffer(id) => id,
            };
            match self.live.remove(&id) {
                Some(live) if live == handle => self.calls.push(Call::Delete(handle)),
                _ => panic!("deleting {:?} which is not alive", handle),
            }
        }
    }

    impl Device for RecordingDevice {
        fn create_shader(&mut self, _stage: ShaderStage) -> u32 {
            self.create(Handle::Shader)
        }

        fn shader_source(&mut self, shader: u32, source: &CStr) {
            self.sources
                .insert(shader, source.to_string_lossy().into_owned());
        }

        fn compile_shader(&mut self, shader: u32) {
            let source = self.sources.get(&shader).cloned().unwrap_or_default();
            let ok = match &self.compile_failure {
                Some((needle, _)) => !source.contains(needle.as_str()),
                None => true,
            };
            self.compiled.insert(shader, ok);
            self.calls.push(Call::Compile(shader));
        }

        fn compile_status(&self, shader: u32) -> bool {
            self.compiled.get(&shader).copied().unwrap_or(false)
        }

        fn shader_info_log(&self, shader: u32) -> String {
            match (&self.compile_failure, self.compile_status(shader)) {
                (Some((_, log)), false) => log.clone(),
                _ => String::new(),
            }
        }

        fn delete_shader(&mut self, shader: u32) {
            self.delete(Handle::Shader(shader))
        }

        fn create_program(&mut self) -> u32 {
            self.create(Handle::Program)
        }

        fn attach_shader(&mut self, program: u32, shader: u32) {
            self.calls.push(Call::Attach { program, shader });
        }

        fn link_program(&mut self, program: u32) {
            self.calls.push(Call::Link(program));
        }

        fn link_status(&self, _program: u32) -> bool {
            self.link_failure.is_none()
        }

        fn program_info_log(&self, _program: u32) -> String {
            self.link_failure.clone().unwrap_or_default()
        }

        fn use_program(&mut self, program: u32) {
            self.calls.push(Call::UseProgram(program));
        }

        fn delete_program(&mut self, program: u32) {
            self.delete(Handle::Program(program))
        }

        fn gen_vertex_array(&mut self) -> u32 {
            self.create(Handle::VertexArray)
        }

        fn bind_vertex_array(&mut self, vertex_array: u32) {
            self.calls.push(Call::BindVertexArray(vertex_array));
        }

        fn delete_vertex_array(&mut self, vertex_array: u32) {
            self.delete(Handle::VertexArray(vertex_array))
        }

        fn gen_buffer(&mut self) -> u32 {
            self.create(Handle::Buffer)
        }

        fn bind_array_buffer(&mut self, buffer: u32) {
            self.calls.push(Call::BindArrayBuffer(buffer));
        }

        fn array_buffer_data(&mut self, data: &[u8]) {
            self.calls.push(Call::BufferData(data.to_vec()));
        }

        fn delete_buffer(&mut self, buffer: u32) {
            self.delete(Handle::Buffer(buffer))
        }

        fn vertex_attrib_pointer(
            &mut self,
            index: u32,
            count: u32,
            ty: BufferElementType,
            normalized: bool,
            stride: u32,
            offset: u32,
        ) {
            self.calls.push(Call::VertexAttribPointer {
                index,
                count,
                ty,
                normalized,
                stride,
                offset,
            });
        }

        fn enable_vertex_attrib_array(&mut self, index: u32) {
            self.calls.push(Call::EnableVertexAttribArray(index));
        }

        fn clear_color(&mut self, color: &Vec4) {
            self.calls
                .push(Call::ClearColor([color.x, color.y, color.z, color.w]));
        }

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn polygon_mode(&mut self, mode: PolygonMode) {
            self.calls.push(Call::PolygonMode(mode));
        }

        fn draw_triangles(&mut self, first: u32, count: u32) {
            self.calls.push(Call::DrawTriangles { first, count });
        }

        fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
            self.calls.push(Call::Viewport(x, y, width, height));
        }
    }
}
