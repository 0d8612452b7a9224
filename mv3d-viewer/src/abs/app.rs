//! SDL2 and OpenGL application management.
//!
//! The [`App`] struct encapsulates the SDL2 window, the OpenGL 3.3 core
//! context and the event pump. All input arrives through the event pump,
//! polled once at the top of each frame; there are no callbacks.

use std::sync::Arc;

use log::warn;
use sdl2::video::{GLProfile, SwapInterval};

use super::SetupError;

/// The SDL2 window plus its OpenGL context, created once per session.
pub struct App {
    // Held so SDL and the GL context outlive the window and the loader.
    _sdl: sdl2::Sdl,
    _video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    _gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates the window and GL context. The width and height options are
    /// ignored when `fullscreen` is set; the desktop mode is used instead.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
        fullscreen: bool,
        vsync: bool,
    ) -> Result<Self, SetupError> {
        let sdl = sdl2::init().map_err(SetupError::Sdl)?;
        let video_subsystem = sdl.video().map_err(SetupError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let (width, height) = if fullscreen {
            let mode = video_subsystem
                .current_display_mode(0)
                .map_err(SetupError::Window)?;
            (mode.w as u32, mode.h as u32)
        } else {
            (width, height)
        };

        let mut window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| SetupError::Window(e.to_string()))?;
        if fullscreen {
            window
                .set_fullscreen(sdl2::video::FullscreenType::Desktop)
                .map_err(SetupError::Window)?;
        }

        let gl_context = window.gl_create_context().map_err(SetupError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(SetupError::Context)?;

        let interval = if vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            warn!("could not set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(SetupError::Sdl)?;

        Ok(Self {
            _sdl: sdl,
            _video_subsystem: video_subsystem,
            window,
            _gl_context: gl_context,
            gl: Arc::new(gl),
            event_pump,
        })
    }
}
