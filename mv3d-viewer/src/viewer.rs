//! The viewer session: owns the window, shader program, GPU buffers, camera
//! and light, and drives the render loop.

use std::path::Path;

use glam::Mat4;
use glow::HasContext;
use log::{debug, info};
use mv3d_core::camera::{self, Camera, Light};
use mv3d_core::mesh::Mesh;
use mv3d_core::vertex;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use crate::abs::{App, GpuMesh, SetupError, ShaderProgram};

const WINDOW_TITLE: &str = "mv3d";
const BACKGROUND: [f32; 3] = [0.2, 0.2, 0.2];
const LINE_WIDTH: f32 = 3.0;
const VERTEX_SHADER_PATH: &str = "shaders/vertex.glsl";
const FRAGMENT_SHADER_PATH: &str = "shaders/fragment.glsl";

/// Window options resolved by the CLI layer.
pub struct ViewerOptions {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

/// A viewer session for one loaded mesh.
///
/// Construction brings up the whole GL stack and uploads both buffer sets;
/// a `Viewer` that exists can always render. Dropping it tears down buffers,
/// program and window in that order.
pub struct Viewer {
    app: App,
    shader: ShaderProgram,
    model_buffer: GpuMesh,
    axes_buffer: GpuMesh,
    mesh: Mesh,
    camera: Camera,
    light: Light,
    width: u32,
    height: u32,
}

impl Viewer {
    /// Creates the window and GL context, compiles the shader pair and
    /// uploads the mesh and axis gizmo buffers.
    pub fn new(mesh: Mesh, options: &ViewerOptions) -> Result<Self, SetupError> {
        let app = App::new(
            WINDOW_TITLE,
            options.width,
            options.height,
            options.fullscreen,
            options.vsync,
        )?;
        unsafe {
            app.gl.enable(glow::DEPTH_TEST);
        }

        let shader = ShaderProgram::from_files(
            &app.gl,
            Path::new(VERTEX_SHADER_PATH),
            Path::new(FRAGMENT_SHADER_PATH),
        )?;

        let model_buffer = GpuMesh::new(&app.gl, &vertex::mesh_vertices(&mesh), glow::TRIANGLES);
        let axes_buffer = GpuMesh::new(&app.gl, &vertex::axis_vertices(), glow::LINES);
        info!(
            "uploaded {} triangles ({} vertices)",
            mesh.triangle_count(),
            model_buffer.vertex_count()
        );

        let (width, height) = app.window.drawable_size();
        Ok(Self {
            app,
            shader,
            model_buffer,
            axes_buffer,
            mesh,
            camera: Camera::new(),
            light: Light::default(),
            width,
            height,
        })
    }

    /// Runs until the window is closed or Escape is pressed.
    pub fn run(&mut self) {
        'running: loop {
            // Input is drained here and only here, before the frame that
            // observes it; nothing mutates camera state mid-draw.
            for event in self.app.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => break 'running,
                    Event::Window {
                        win_event: WindowEvent::Resized(..),
                        ..
                    } => {
                        // Resize events carry logical window dimensions; the
                        // viewport works in physical pixels, so re-query the
                        // drawable size instead of trusting the event payload.
                        let (w, h) = self.app.window.drawable_size();
                        self.width = w;
                        self.height = h;
                        unsafe {
                            self.app.gl.viewport(0, 0, w as i32, h as i32);
                        }
                    }
                    Event::MouseWheel { y, .. } => {
                        self.camera.zoom(y as f32);
                        debug!("camera moved to {}", self.camera.position);
                    }
                    _ => {}
                }
            }

            self.render();
            self.app.window.gl_swap_window();
        }
    }

    fn render(&self) {
        let gl = &self.app.gl;
        unsafe {
            gl.clear_color(BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.shader.use_program();
        self.push_frame_uniforms();

        // Axes live in world space, unscaled.
        unsafe {
            gl.line_width(LINE_WIDTH);
        }
        self.shader.set_uniform("u_model", Mat4::IDENTITY);
        self.axes_buffer.draw();

        self.shader
            .set_uniform("u_model", camera::model_matrix(&self.mesh));
        self.model_buffer.draw();
    }

    fn push_frame_uniforms(&self) {
        let aspect_ratio = self.width as f32 / self.height as f32;
        self.shader.set_uniform("u_view", self.camera.view_matrix());
        self.shader
            .set_uniform("u_projection", camera::projection_matrix(aspect_ratio));

        self.shader.set_uniform("u_light_pos", self.light.position);
        self.shader.set_uniform("u_light_color", self.light.color);
        self.shader.set_uniform("u_view_pos", self.camera.position);
        self.shader
            .set_uniform("u_ambient_strength", self.light.ambient_strength);
        self.shader
            .set_uniform("u_specular_strength", self.light.specular_strength);
        self.shader.set_uniform("u_shininess", self.light.shininess);
    }
}
