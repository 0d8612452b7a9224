//! Ownership wrappers around the SDL2 and OpenGL objects the viewer uses.
//!
//! Every wrapper releases its GL names in `Drop`, so resources are freed on
//! every exit path, including early setup failures.

mod app;
mod mesh;
mod shader;

pub use app::App;
pub use mesh::GpuMesh;
pub use shader::ShaderProgram;

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while bringing up the window, GL context or shaders.
/// Propagated to the entry point; nothing is retried.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to read shader file {}: {source}", path.display())]
    ShaderFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("shader program link failed: {0}")]
    ProgramLink(String),
}
