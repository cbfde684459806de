use std::{ffi::CString, fmt};

use crate::{
    device::Device,
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn kind(self) -> u32 {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// A successfully linked shader program.
#[derive(Debug)]
pub struct Shader {
    id: u32,
}

impl Shader {
    pub fn build(device: &mut impl Device, sources: &ShaderSources) -> Result<Self> {
        let vs = Self::compile_shader(device, &sources.vertex, ShaderStage::Vertex)?;
        let fs = match Self::compile_shader(device, &sources.fragment, ShaderStage::Fragment) {
            Ok(fs) => fs,
            Err(err) => {
                device.delete_shader(vs);
                return Err(err);
            }
        };

        let id = Self::create_program(device, vs, fs);

        device.delete_shader(vs);
        device.delete_shader(fs);

        let id = id?;
        log::debug!("linked shader program {}", id);

        Ok(Self { id })
    }

    fn compile_shader(device: &mut impl Device, source: &str, stage: ShaderStage) -> Result<u32> {
        let src = CString::new(source)?;

        let id = device.create_shader(stage);
        device.shader_source(id, &src);
        device.compile_shader(id);

        if !device.compile_status(id) {
            let log = non_empty(device.shader_info_log(id));
            device.delete_shader(id);

            return Err(Error::ShaderCompile { stage, log });
        }

        Ok(id)
    }

    fn create_program(device: &mut impl Device, vs: u32, fs: u32) -> Result<u32> {
        let program = device.create_program();

        device.attach_shader(program, vs);
        device.attach_shader(program, fs);
        device.link_program(program);

        if !device.link_status(program) {
            let log = non_empty(device.program_info_log(program));
            device.delete_program(program);

            return Err(Error::ProgramLink { log });
        }

        Ok(program)
    }

    #[cfg(test)]
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bind(&self, device: &mut impl Device) {
        device.use_program(self.id)
    }

    pub fn delete(self, device: &mut impl Device) {
        device.delete_program(self.id)
    }
}

fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        "(no info log)".to_owned()
    } else {
        log
    }
}
