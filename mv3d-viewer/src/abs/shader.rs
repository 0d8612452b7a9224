//! OpenGL shaders.
//!
//! [`Shader`] compiles a single stage, [`ShaderProgram`] links stages into a
//! program and sets uniforms through the [`Uniform`] trait. Uniform
//! locations are cached per program instance, populated lazily on first use.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use glow::HasContext;

use super::SetupError;

/// Represents an individual OpenGL shader stage.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a shader from source. Failure carries the GL info log.
    pub fn new(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        source: &str,
    ) -> Result<Self, SetupError> {
        unsafe {
            let shader = gl.create_shader(shader_type).map_err(SetupError::ShaderCompile)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(SetupError::ShaderCompile(log));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }

    /// Reads the source from disk, then compiles it.
    pub fn from_file(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        path: &Path,
    ) -> Result<Self, SetupError> {
        let source = std::fs::read_to_string(path).map_err(|e| SetupError::ShaderFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::new(gl, shader_type, &source)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be written to a uniform location.
pub trait Uniform {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_f32(Some(location), *self);
        }
    }
}

impl Uniform for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_3_f32(Some(location), self.x, self.y, self.z);
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref());
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}

/// An OpenGL shader program composed of multiple stages.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
    // Name-to-location cache, owned by this instance. Absent uniforms (or
    // ones the GL compiler optimized away) cache as None and stay silent.
    uniform_locations: RefCell<HashMap<String, Option<glow::UniformLocation>>>,
}

impl ShaderProgram {
    /// Links a program from already-compiled stages.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, SetupError> {
        unsafe {
            let program = gl.create_program().map_err(SetupError::ProgramLink)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(SetupError::ProgramLink(log));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
                uniform_locations: RefCell::new(HashMap::new()),
            })
        }
    }

    /// Reads, compiles and links the vertex and fragment stages from disk.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, SetupError> {
        let vertex = Shader::from_file(gl, glow::VERTEX_SHADER, vertex_path)?;
        let fragment = Shader::from_file(gl, glow::FRAGMENT_SHADER, fragment_path)?;
        Self::new(gl, &[&vertex, &fragment])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.uniform_location(name) {
            value.set_uniform(&self.gl, &location);
        }
    }

    fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(cached) = self.uniform_locations.borrow().get(name) {
            return cached.clone();
        }
        let location = unsafe { self.gl.get_uniform_location(self.id, name) };
        self.uniform_locations
            .borrow_mut()
            .insert(name.to_string(), location.clone());
        location
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
