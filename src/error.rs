use std::ffi::NulError;

use thiserror::Error;

use crate::shader::ShaderStage;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create window: {0}")]
    WindowCreation(#[source] glutin::CreationError),

    #[error("failed to make context current: {0}")]
    MakeCurrent(#[source] glutin::ContextError),

    #[error("failed to load OpenGL function pointers")]
    FunctionLoad,

    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link:\n{log}")]
    ProgramLink { log: String },

    #[error("shader source contains an interior nul byte")]
    Nul(#[from] NulError),

    #[error("cannot upload empty geometry")]
    EmptyGeometry,

    #[error("{0} has already been created")]
    AlreadyCreated(&'static str),

    #[error("{0} has not been created yet")]
    NotReady(&'static str),

    #[error("renderer has been shut down")]
    Terminated,

    #[error("failed to present frame: {0}")]
    Present(#[source] glutin::ContextError),
}
