use glutin::{
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    platform::run_return::EventLoopExtRunReturn,
    window::WindowBuilder,
    Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext,
};

use crate::{
    config::WindowConfig,
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    CloseRequested,
    /// New framebuffer size in physical pixels.
    Resized { width: u32, height: u32 },
    Key {
        key: VirtualKeyCode,
        state: ElementState,
    },
    Focused(bool),
}

impl SurfaceEvent {
    pub fn from_window_event(event: &WindowEvent<'_>) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(Self::CloseRequested),
            WindowEvent::Resized(size) => Some(Self::resized(*size)),
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                Some(Self::resized(**new_inner_size))
            }
            WindowEvent::Focused(focused) => Some(Self::Focused(*focused)),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(key),
                        state,
                        ..
                    },
                ..
            } => Some(Self::Key {
                key: *key,
                state: *state,
            }),
            _ => None,
        }
    }

    fn resized(size: PhysicalSize<u32>) -> Self {
        Self::Resized {
            width: size.width,
            height: size.height,
        }
    }
}

/// Where frames are presented and window events come from.
pub trait Surface {
    /// Drains pending events without blocking.
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;

    fn present(&mut self) -> Result<()>;

    /// Current framebuffer size in physical pixels.
    fn framebuffer_size(&self) -> (u32, u32);
}

/// A glutin window with a current OpenGL context and loaded `gl` functions.
pub struct GlWindow {
    event_loop: EventLoop<()>,
    context: WindowedContext<PossiblyCurrent>,
}

impl GlWindow {
    pub fn create(config: &WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new();

        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let (major, minor) = config.gl_version;
        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, (major, minor)))
            .with_gl_profile(GlProfile::Core)
            .with_vsync(config.vsync)
            .build_windowed(window, &event_loop)
            .map_err(Error::WindowCreation)?;

        let context = unsafe { context.make_current() }.map_err(|(_, err)| Error::MakeCurrent(err))?;

        gl::load_with(|symbol| context.get_proc_address(symbol));

        if !Self::functions_loaded() {
            return Err(Error::FunctionLoad);
        }

        log::info!(
            "created {}x{} window with OpenGL {}.{} core context",
            config.width,
            config.height,
            major,
            minor
        );

        Ok(Self {
            event_loop,
            context,
        })
    }

    fn functions_loaded() -> bool {
        gl::Viewport::is_loaded()
            && gl::CreateShader::is_loaded()
            && gl::CreateProgram::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::GenBuffers::is_loaded()
            && gl::PolygonMode::is_loaded()
            && gl::DrawArrays::is_loaded()
    }
}

impl Surface for GlWindow {
    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let window_id = self.context.window().id();
        let mut events = Vec::new();

        self.event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, window_id: id } if id == window_id => {
                    events.extend(SurfaceEvent::from_window_event(&event));
                }
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });

        for event in &events {
            if let SurfaceEvent::Resized { width, height } = *event {
                self.context.resize(PhysicalSize::new(width, height));
            }
        }

        events
    }

    fn present(&mut self) -> Result<()> {
        self.context.swap_buffers().map_err(Error::Present)
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.context.window().inner_size();
        (size.width, size.height)
    }
}
