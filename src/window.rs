/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Real OpenGL contexts, created through SDL2.
//!
//! The window is never shown: it only exists because SDL can't create a
//! context without one.

use crate::options::GLContextVersion;
use sdl2::video::GLProfile;
use std::ffi::c_void;

pub struct Window {
    // Declared first so that it is dropped before the window.
    gl_ctx: Option<sdl2::video::GLContext>,
    window: sdl2::video::Window,
    video_ctx: sdl2::VideoSubsystem,
    _sdl_ctx: sdl2::Sdl,
}

impl Window {
    pub fn new(title: &str, version: GLContextVersion) -> Result<Window, String> {
        let sdl_ctx = sdl2::init()?;
        let video_ctx = sdl_ctx.video()?;

        // The context version must be set before the window is created.
        // https://wiki.libsdl.org/SDL2/SDL_GLattr
        let attr = video_ctx.gl_attr();
        match version {
            // Whatever the driver gives us by default.
            GLContextVersion::GL10 => (),
            GLContextVersion::GL21Compat => {
                attr.set_context_version(2, 1);
                attr.set_context_profile(GLProfile::Compatibility);
            }
            GLContextVersion::GL32Core => {
                attr.set_context_version(3, 2);
                attr.set_context_profile(GLProfile::Core);
            }
            GLContextVersion::GLES11 => {
                attr.set_context_version(1, 1);
                attr.set_context_profile(GLProfile::GLES);
            }
            GLContextVersion::GLES20 => {
                attr.set_context_version(2, 0);
                attr.set_context_profile(GLProfile::GLES);
            }
        }

        let window = video_ctx
            .window(title, 64, 64)
            .hidden()
            .opengl()
            .build()
            .map_err(|e| format!("Couldn't create window: {}", e))?;

        Ok(Window {
            gl_ctx: None,
            window,
            video_ctx,
            _sdl_ctx: sdl_ctx,
        })
    }

    /// Create a context of the version requested in [Window::new] and make it
    /// current on this thread.
    pub fn create_gl_context(&mut self) -> Result<(), String> {
        let gl_ctx = self
            .window
            .gl_create_context()
            .map_err(|e| format!("Couldn't create OpenGL context: {}", e))?;
        self.window.gl_make_current(&gl_ctx)?;
        self.gl_ctx = Some(gl_ctx);
        Ok(())
    }

    /// Loader for [crate::gl10::GL10::load_with]. Only meaningful while the
    /// context is current.
    pub fn gl_get_proc_address(&self, name: &str) -> *const c_void {
        self.video_ctx.gl_get_proc_address(name) as *const c_void
    }
}
