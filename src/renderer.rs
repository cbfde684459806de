use nalgebra_glm::{Vec3, Vec4};

use crate::{
    buffer::{BufferElementType, VertexBuffer, VertexBufferLayout},
    config::{Config, PolygonMode},
    device::Device,
    error::{Error, Result},
    geometry,
    input::InputState,
    shader::{Shader, ShaderSources},
    vertex_array::VertexArray,
    window::{Surface, SurfaceEvent},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Running,
    Terminated,
}

#[derive(Debug)]
struct Mesh {
    va: VertexArray,
    vb: VertexBuffer,
    vertex_count: u32,
}

/// Owns the shader program and the triangle's vertex array and buffer, and
/// draws them once per frame.
pub struct FrameRenderer<D: Device> {
    device: D,
    clear_color: Vec4,
    polygon_mode: PolygonMode,
    shader: Option<Shader>,
    mesh: Option<Mesh>,
    input: InputState,
    lifecycle: Lifecycle,
}

impl<D: Device> FrameRenderer<D> {
    pub fn new(device: D, config: &Config) -> Self {
        Self {
            device,
            clear_color: config.clear_color,
            polygon_mode: config.polygon_mode,
            shader: None,
            mesh: None,
            input: InputState::new(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    #[cfg(test)]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[cfg(test)]
    pub fn device(&self) -> &D {
        &self.device
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.lifecycle == Lifecycle::Terminated {
            return Err(Error::Terminated);
        }

        Ok(())
    }

    pub fn build_program(&mut self, sources: &ShaderSources) -> Result<()> {
        self.ensure_alive()?;
        if self.shader.is_some() {
            return Err(Error::AlreadyCreated("shader program"));
        }

        self.shader = Some(Shader::build(&mut self.device, sources)?);

        Ok(())
    }

    pub fn upload_geometry(&mut self, vertices: &[Vec3]) -> Result<()> {
        self.ensure_alive()?;
        if self.mesh.is_some() {
            return Err(Error::AlreadyCreated("vertex array"));
        }
        if vertices.is_empty() {
            return Err(Error::EmptyGeometry);
        }

        for v in vertices.iter().filter(|v| !geometry::in_ndc(v)) {
            log::warn!(
                "vertex ({}, {}, {}) lies outside normalized device coordinates and will be clipped",
                v.x,
                v.y,
                v.z
            );
        }

        let positions = geometry::positions(vertices);

        let mut va = VertexArray::new(&mut self.device);
        va.bind(&mut self.device);

        let vb = VertexBuffer::new(&mut self.device, &positions);

        let mut layout = VertexBufferLayout::new();
        layout.push(BufferElementType::Float, 3, false);
        va.add_buffer(&mut self.device, &vb, &layout);

        va.unbind(&mut self.device);
        vb.unbind(&mut self.device);

        self.mesh = Some(Mesh {
            va,
            vb,
            vertex_count: vertices.len() as u32,
        });

        Ok(())
    }

    /// The viewport covers the lower-left quarter of the framebuffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.device
            .viewport(0, 0, (width / 2) as i32, (height / 2) as i32);
    }

    pub fn render_frame(&mut self) -> Result<()> {
        self.ensure_alive()?;

        let shader = self.shader.as_ref().ok_or(Error::NotReady("shader program"))?;
        let mesh = self.mesh.as_ref().ok_or(Error::NotReady("vertex array"))?;

        self.device.clear_color(&self.clear_color);
        self.device.clear();

        shader.bind(&mut self.device);
        mesh.va.bind(&mut self.device);
        self.device.polygon_mode(self.polygon_mode);
        self.device.draw_triangles(0, mesh.vertex_count);

        Ok(())
    }

    /// Renders until the surface reports a close request or Escape is held.
    /// Returns the number of frames presented.
    pub fn run(&mut self, surface: &mut impl Surface) -> Result<u64> {
        self.ensure_alive()?;
        if self.shader.is_none() {
            return Err(Error::NotReady("shader program"));
        }
        if self.mesh.is_none() {
            return Err(Error::NotReady("vertex array"));
        }

        self.lifecycle = Lifecycle::Running;
        let initial_size = surface.framebuffer_size();
        let mut frames = 0;

        loop {
            for event in surface.poll_events() {
                if let SurfaceEvent::Resized { width, height } = event {
                    // Some platforms report the creation size as a resize;
                    // the viewport only changes on a real resize.
                    if frames > 0 || (width, height) != initial_size {
                        self.resize(width, height);
                    }
                }
                self.input.apply(&event);
            }

            self.input.process();
            if self.input.should_close() {
                break;
            }

            self.render_frame()?;
            surface.present()?;
            frames += 1;
        }

        log::debug!("render loop exited after {} frames", frames);

        Ok(frames)
    }

    /// Releases the vertex array, vertex buffer and program. Safe to call again.
    pub fn shutdown(&mut self) {
        if let Some(mesh) = self.mesh.take() {
            mesh.va.delete(&mut self.device);
            mesh.vb.delete(&mut self.device);
        }

        if let Some(shader) = self.shader.take() {
            shader.delete(&mut self.device);
        }

        if self.lifecycle != Lifecycle::Terminated {
            log::debug!("renderer shut down");
            self.lifecycle = Lifecycle::Terminated;
        }
    }
}

impl<D: Device> Drop for FrameRenderer<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
