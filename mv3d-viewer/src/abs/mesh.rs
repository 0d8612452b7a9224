//! GPU-side vertex buffers.
//!
//! [`GpuMesh`] owns one VAO and one VBO holding interleaved
//! position/color/normal data and draws it with `glDrawArrays`. The GL names
//! are released in `Drop`, so replacing a mesh frees the old buffer set
//! before the new one exists.

use std::sync::Arc;

use glow::HasContext;
use mv3d_core::vertex::VERTEX_COMPONENTS;

/// A vertex buffer living on the GPU, drawn non-indexed.
pub struct GpuMesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: usize,
}

impl GpuMesh {
    /// Uploads interleaved vertex data (9 floats per vertex) into a fresh
    /// VAO/VBO pair. GL object allocation failure is a fatal condition, not
    /// a recoverable one.
    pub fn new(gl: &Arc<glow::Context>, vertices: &[f32], draw_mode: u32) -> Self {
        debug_assert!(vertices.len() % VERTEX_COMPONENTS == 0);
        unsafe {
            let vao = gl.create_vertex_array().unwrap();
            let vbo = gl.create_buffer().unwrap();

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    vertices.as_ptr() as *const u8,
                    vertices.len() * std::mem::size_of::<f32>(),
                ),
                glow::STATIC_DRAW,
            );

            vertex_attribs(gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                vertex_count: vertices.len() / VERTEX_COMPONENTS,
            }
        }
    }

    /// Draws the whole buffer.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl
                .draw_arrays(self.draw_mode, 0, self.vertex_count as i32);
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

/// Attribute pointers for the shared interleaved layout: position at
/// location 0, color at 1, normal at 2, stride of 9 floats.
unsafe fn vertex_attribs(gl: &glow::Context) {
    let float_size = std::mem::size_of::<f32>() as i32;
    let stride = VERTEX_COMPONENTS as i32 * float_size;
    unsafe {
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * float_size);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 6 * float_size);
        gl.enable_vertex_attrib_array(2);
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
