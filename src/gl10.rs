/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Typed front end for the OpenGL 1.0 command set.
//!
//! [GL10] owns the [EntryPointTable] of one context. Each method is named
//! after the GL command it calls, takes typed arguments in place of raw enums
//! where the set of valid values is small, and borrows slices only for the
//! duration of the call. There is no validation beyond what is needed to keep
//! the driver inside the caller's buffers; the driver is trusted to reject
//! everything else, and its error flag is checked according to
//! [ErrorChecking].
//!
//! All methods are `unsafe`: the context the table was resolved for must be
//! current on this thread.

mod enums;
pub mod params;
pub mod pixels;

pub use enums::*;

use crate::dispatch::gl_raw;
use crate::dispatch::gl_raw::types::*;
use crate::dispatch::registry::{commands, Command};
use crate::dispatch::{
    query_capabilities, resolve, Api, Capabilities, EntryPointTable, ResolveMode, ResolveReport,
};
use crate::error::{DriverError, GLError};
use crate::options::{ErrorChecking, Options};
use params::GET_PARAMS;
use pixels::{image_size, PixelStore};
use std::ffi::{c_void, CStr};

/// Upper bound on how many stale errors are drained at once. A lost context
/// may report errors indefinitely.
const MAX_STALE_ERRORS: usize = 32;

fn check_buffer(name: &'static str, required: usize, provided: usize) -> Result<(), GLError> {
    if provided < required {
        Err(GLError::BufferTooSmall {
            name,
            required,
            provided,
        })
    } else {
        Ok(())
    }
}

fn gl_bool(value: bool) -> GLboolean {
    if value {
        gl_raw::TRUE
    } else {
        gl_raw::FALSE
    }
}

pub struct GL10 {
    table: EntryPointTable,
    error_checking: ErrorChecking,
    suppress_errors: bool,
    disabled_extensions: Vec<String>,
}

impl GL10 {
    pub fn new(options: &Options) -> Self {
        GL10 {
            table: EntryPointTable::new(),
            error_checking: options.error_checking,
            suppress_errors: options.suppress_errors,
            disabled_extensions: options.disabled_extensions.clone(),
        }
    }

    /// Ask the current context what it supports, then resolve the table
    /// against that.
    ///
    /// # Safety
    /// A context must be current on this thread, and `loader` must return
    /// addresses valid for it.
    pub unsafe fn load_with<F>(
        &mut self,
        mut loader: F,
        mode: ResolveMode,
    ) -> Result<ResolveReport, String>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let capabilities = query_capabilities(&mut loader)?;
        Ok(self.load_with_capabilities(loader, capabilities, mode))
    }

    /// Resolve the table against capabilities the caller already knows.
    /// Disabled extensions are removed from `capabilities` first.
    pub fn load_with_capabilities<F>(
        &mut self,
        loader: F,
        mut capabilities: Capabilities,
        mode: ResolveMode,
    ) -> ResolveReport
    where
        F: FnMut(&str) -> *const c_void,
    {
        for extension in &self.disabled_extensions {
            if capabilities.hide_extension(extension) {
                log!("Disabled extension {}", extension);
            }
        }
        resolve(&mut self.table, loader, &capabilities, mode)
    }

    pub fn table(&self) -> &EntryPointTable {
        &self.table
    }

    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.table.capabilities()
    }

    /// Forget all entry points, e.g. because the context is being destroyed.
    /// Calling any command afterwards panics until the table is resolved
    /// again.
    pub fn teardown(&mut self) {
        self.table.reset();
    }

    /// "version / vendor / renderer" of the context the table was resolved
    /// against.
    pub fn driver_description(&self) -> String {
        match self.table.capabilities() {
            Some(capabilities) => format!(
                "{} / {} / {}",
                capabilities.version, capabilities.vendor, capabilities.renderer
            ),
            None => "(not resolved)".to_string(),
        }
    }

    /// Report the oldest error the driver is holding, if any.
    pub unsafe fn check_errors(&self) -> Result<(), GLError> {
        let get_error = self.table.function::<commands::GetError>()?;
        match DriverError::from_code(get_error()) {
            Some(error) => {
                log_dbg!("Driver reported {}", error);
                Err(error.into())
            }
            None => Ok(()),
        }
    }

    /// Discard errors the driver is still holding. Returns how many there
    /// were.
    pub unsafe fn clear_errors(&self) -> usize {
        let Ok(get_error) = self.table.function::<commands::GetError>() else {
            return 0;
        };
        let mut count = 0;
        while count < MAX_STALE_ERRORS && get_error() != gl_raw::NO_ERROR {
            count += 1;
        }
        if count > 0 {
            log_dbg!("Discarded {} stale errors", count);
        }
        count
    }

    /// Call a command through the table, with the configured error checking
    /// around it.
    unsafe fn call<C: Command, R>(&self, call: impl FnOnce(C::Pointer) -> R) -> Result<R, GLError> {
        let function = self.table.function::<C>()?;
        let checking = self.error_checking.enabled();
        if checking && self.suppress_errors {
            self.clear_errors();
        }
        let result = call(function);
        if checking {
            self.check_errors()?;
        }
        Ok(result)
    }

    /// Call a query that writes `count` values straight into `out`.
    unsafe fn get_values<C: Command, T>(
        &self,
        count: usize,
        out: &mut [T],
        call: impl FnOnce(C::Pointer, *mut T),
    ) -> Result<(), GLError> {
        check_buffer(C::ENTRY_POINT.name(), count, out.len())?;
        self.call::<C, _>(|function| call(function, out.as_mut_ptr()))
    }

    /// [Self::get_values] for the `glGet*v` family, which can be asked about
    /// anything in [GET_PARAMS].
    unsafe fn get_state<C: Command, T>(
        &self,
        pname: GLenum,
        out: &mut [T],
        call: impl FnOnce(C::Pointer, GLenum, *mut T),
    ) -> Result<(), GLError> {
        let name = C::ENTRY_POINT.name();
        let count = GET_PARAMS
            .count(pname)
            .ok_or(GLError::UnknownQuery { name, pname })?;
        self.get_values::<C, _>(count, out, |function, data| call(function, pname, data))
    }

    fn has_pixel_store_offsets(&self) -> bool {
        // Row length and skipping are missing from OpenGL ES before 3.0, and
        // querying them would raise GL_INVALID_ENUM.
        self.table
            .capabilities()
            .map_or(true, |capabilities| match capabilities.version.api {
                Api::GL => true,
                Api::GLES2 => capabilities.version.major >= 3,
                Api::GLES1 | Api::GLSC2 => false,
            })
    }

    /// Query the current pack (for reads) or unpack (for uploads) state.
    unsafe fn pixel_store(&self, pack: bool) -> Result<PixelStore, GLError> {
        use PixelStoreParameter as P;
        let [alignment, row_length, skip_rows, skip_pixels] = if pack {
            [P::PackAlignment, P::PackRowLength, P::PackSkipRows, P::PackSkipPixels]
        } else {
            [
                P::UnpackAlignment,
                P::UnpackRowLength,
                P::UnpackSkipRows,
                P::UnpackSkipPixels,
            ]
        };
        let get = |pname: PixelStoreParameter| -> Result<GLint, GLError> {
            let mut value = [0];
            self.GetIntegerv(pname.raw(), &mut value)?;
            Ok(value[0])
        };

        let mut store = PixelStore {
            alignment: get(alignment)?,
            ..Default::default()
        };
        if self.has_pixel_store_offsets() {
            store.row_length = get(row_length)?;
            store.skip_rows = get(skip_rows)?;
            store.skip_pixels = get(skip_pixels)?;
        }
        Ok(store)
    }

    // Generic state manipulation
    pub unsafe fn GetError(&self) -> Result<Option<DriverError>, GLError> {
        let get_error = self.table.function::<commands::GetError>()?;
        Ok(DriverError::from_code(get_error()))
    }
    pub unsafe fn Enable(&self, cap: Capability) -> Result<(), GLError> {
        self.call::<commands::Enable, _>(|f| f(cap.raw()))
    }
    pub unsafe fn Disable(&self, cap: Capability) -> Result<(), GLError> {
        self.call::<commands::Disable, _>(|f| f(cap.raw()))
    }
    pub unsafe fn IsEnabled(&self, cap: Capability) -> Result<bool, GLError> {
        let enabled = self.call::<commands::IsEnabled, _>(|f| f(cap.raw()))?;
        Ok(enabled != gl_raw::FALSE)
    }
    pub unsafe fn GetBooleanv(&self, pname: GLenum, params: &mut [bool]) -> Result<(), GLError> {
        // bool and GLboolean don't share a representation the driver may
        // write, so go through a GLboolean buffer of the same length.
        let mut values = vec![gl_raw::FALSE; params.len()];
        self.get_state::<commands::GetBooleanv, _>(pname, &mut values, |f, pname, data| {
            f(pname, data)
        })?;
        for (param, &value) in params.iter_mut().zip(values.iter()) {
            *param = value != gl_raw::FALSE;
        }
        Ok(())
    }
    pub unsafe fn GetDoublev(&self, pname: GLenum, params: &mut [GLdouble]) -> Result<(), GLError> {
        self.get_state::<commands::GetDoublev, _>(pname, params, |f, pname, data| f(pname, data))
    }
    pub unsafe fn GetFloatv(&self, pname: GLenum, params: &mut [GLfloat]) -> Result<(), GLError> {
        self.get_state::<commands::GetFloatv, _>(pname, params, |f, pname, data| f(pname, data))
    }
    pub unsafe fn GetIntegerv(&self, pname: GLenum, params: &mut [GLint]) -> Result<(), GLError> {
        self.get_state::<commands::GetIntegerv, _>(pname, params, |f, pname, data| f(pname, data))
    }
    pub unsafe fn GetString(&self, name: StringName) -> Result<Option<String>, GLError> {
        let string = self.call::<commands::GetString, _>(|f| f(name.raw()))?;
        if string.is_null() {
            return Ok(None);
        }
        Ok(Some(
            CStr::from_ptr(string.cast()).to_string_lossy().into_owned(),
        ))
    }
    pub unsafe fn Hint(&self, target: HintTarget, mode: HintMode) -> Result<(), GLError> {
        self.call::<commands::Hint, _>(|f| f(target.raw(), mode.raw()))
    }
    pub unsafe fn Finish(&self) -> Result<(), GLError> {
        self.call::<commands::Finish, _>(|f| f())
    }
    pub unsafe fn Flush(&self) -> Result<(), GLError> {
        self.call::<commands::Flush, _>(|f| f())
    }

    // Rasterization
    pub unsafe fn CullFace(&self, mode: Face) -> Result<(), GLError> {
        self.call::<commands::CullFace, _>(|f| f(mode.raw()))
    }
    pub unsafe fn FrontFace(&self, mode: FrontFaceDirection) -> Result<(), GLError> {
        self.call::<commands::FrontFace, _>(|f| f(mode.raw()))
    }
    pub unsafe fn LineWidth(&self, width: GLfloat) -> Result<(), GLError> {
        self.call::<commands::LineWidth, _>(|f| f(width))
    }
    pub unsafe fn PointSize(&self, size: GLfloat) -> Result<(), GLError> {
        self.call::<commands::PointSize, _>(|f| f(size))
    }
    pub unsafe fn PolygonMode(&self, face: Face, mode: PolygonMode) -> Result<(), GLError> {
        self.call::<commands::PolygonMode, _>(|f| f(face.raw(), mode.raw()))
    }
    pub unsafe fn Viewport(
        &self,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
    ) -> Result<(), GLError> {
        self.call::<commands::Viewport, _>(|f| f(x, y, width, height))
    }
    pub unsafe fn DepthRange(&self, near: GLclampd, far: GLclampd) -> Result<(), GLError> {
        self.call::<commands::DepthRange, _>(|f| f(near, far))
    }

    // Per-fragment operations
    pub unsafe fn Scissor(
        &self,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
    ) -> Result<(), GLError> {
        self.call::<commands::Scissor, _>(|f| f(x, y, width, height))
    }
    pub unsafe fn BlendFunc(
        &self,
        sfactor: BlendFactor,
        dfactor: BlendFactor,
    ) -> Result<(), GLError> {
        self.call::<commands::BlendFunc, _>(|f| f(sfactor.raw(), dfactor.raw()))
    }
    pub unsafe fn LogicOp(&self, opcode: LogicOp) -> Result<(), GLError> {
        self.call::<commands::LogicOp, _>(|f| f(opcode.raw()))
    }
    pub unsafe fn StencilFunc(
        &self,
        func: CompareFunc,
        ref_: GLint,
        mask: GLuint,
    ) -> Result<(), GLError> {
        self.call::<commands::StencilFunc, _>(|f| f(func.raw(), ref_, mask))
    }
    pub unsafe fn StencilOp(
        &self,
        fail: StencilOp,
        zfail: StencilOp,
        zpass: StencilOp,
    ) -> Result<(), GLError> {
        self.call::<commands::StencilOp, _>(|f| f(fail.raw(), zfail.raw(), zpass.raw()))
    }
    pub unsafe fn DepthFunc(&self, func: CompareFunc) -> Result<(), GLError> {
        self.call::<commands::DepthFunc, _>(|f| f(func.raw()))
    }

    // Framebuffers
    pub unsafe fn DrawBuffer(&self, buf: ColorBuffer) -> Result<(), GLError> {
        self.call::<commands::DrawBuffer, _>(|f| f(buf.raw()))
    }
    pub unsafe fn ReadBuffer(&self, src: ColorBuffer) -> Result<(), GLError> {
        self.call::<commands::ReadBuffer, _>(|f| f(src.raw()))
    }
    pub unsafe fn Clear(&self, mask: ClearMask) -> Result<(), GLError> {
        self.call::<commands::Clear, _>(|f| f(mask.bits()))
    }
    pub unsafe fn ClearColor(
        &self,
        red: GLclampf,
        green: GLclampf,
        blue: GLclampf,
        alpha: GLclampf,
    ) -> Result<(), GLError> {
        self.call::<commands::ClearColor, _>(|f| f(red, green, blue, alpha))
    }
    pub unsafe fn ClearStencil(&self, s: GLint) -> Result<(), GLError> {
        self.call::<commands::ClearStencil, _>(|f| f(s))
    }
    pub unsafe fn ClearDepth(&self, depth: GLclampd) -> Result<(), GLError> {
        self.call::<commands::ClearDepth, _>(|f| f(depth))
    }
    pub unsafe fn ColorMask(
        &self,
        red: bool,
        green: bool,
        blue: bool,
        alpha: bool,
    ) -> Result<(), GLError> {
        self.call::<commands::ColorMask, _>(|f| {
            f(gl_bool(red), gl_bool(green), gl_bool(blue), gl_bool(alpha))
        })
    }
    pub unsafe fn DepthMask(&self, flag: bool) -> Result<(), GLError> {
        self.call::<commands::DepthMask, _>(|f| f(gl_bool(flag)))
    }
    pub unsafe fn StencilMask(&self, mask: GLuint) -> Result<(), GLError> {
        self.call::<commands::StencilMask, _>(|f| f(mask))
    }
    pub unsafe fn ReadPixels(
        &self,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: PixelFormat,
        type_: PixelType,
        pixels: &mut [u8],
    ) -> Result<(), GLError> {
        let required = image_size(width, height, format, type_, &self.pixel_store(true)?);
        check_buffer("glReadPixels", required, pixels.len())?;
        self.call::<commands::ReadPixels, _>(|f| {
            f(
                x,
                y,
                width,
                height,
                format.raw(),
                type_.raw(),
                pixels.as_mut_ptr().cast(),
            )
        })
    }

    // Pixel storage
    pub unsafe fn PixelStoref(
        &self,
        pname: PixelStoreParameter,
        param: GLfloat,
    ) -> Result<(), GLError> {
        self.call::<commands::PixelStoref, _>(|f| f(pname.raw(), param))
    }
    pub unsafe fn PixelStorei(
        &self,
        pname: PixelStoreParameter,
        param: GLint,
    ) -> Result<(), GLError> {
        self.call::<commands::PixelStorei, _>(|f| f(pname.raw(), param))
    }

    // Textures
    pub unsafe fn TexParameterf(
        &self,
        target: TextureTarget,
        pname: TextureParameter,
        param: GLfloat,
    ) -> Result<(), GLError> {
        self.call::<commands::TexParameterf, _>(|f| f(target.raw(), pname.raw(), param))
    }
    pub unsafe fn TexParameteri(
        &self,
        target: TextureTarget,
        pname: TextureParameter,
        param: GLint,
    ) -> Result<(), GLError> {
        self.call::<commands::TexParameteri, _>(|f| f(target.raw(), pname.raw(), param))
    }
    pub unsafe fn TexParameterfv(
        &self,
        target: TextureTarget,
        pname: TextureParameter,
        params: &[GLfloat],
    ) -> Result<(), GLError> {
        check_buffer("glTexParameterfv", pname.count(), params.len())?;
        self.call::<commands::TexParameterfv, _>(|f| {
            f(target.raw(), pname.raw(), params.as_ptr())
        })
    }
    pub unsafe fn TexParameteriv(
        &self,
        target: TextureTarget,
        pname: TextureParameter,
        params: &[GLint],
    ) -> Result<(), GLError> {
        check_buffer("glTexParameteriv", pname.count(), params.len())?;
        self.call::<commands::TexParameteriv, _>(|f| {
            f(target.raw(), pname.raw(), params.as_ptr())
        })
    }
    pub unsafe fn GetTexParameterfv(
        &self,
        target: TextureTarget,
        pname: TextureParameter,
        params: &mut [GLfloat],
    ) -> Result<(), GLError> {
        self.get_values::<commands::GetTexParameterfv, _>(pname.count(), params, |f, data| {
            f(target.raw(), pname.raw(), data)
        })
    }
    pub unsafe fn GetTexParameteriv(
        &self,
        target: TextureTarget,
        pname: TextureParameter,
        params: &mut [GLint],
    ) -> Result<(), GLError> {
        self.get_values::<commands::GetTexParameteriv, _>(pname.count(), params, |f, data| {
            f(target.raw(), pname.raw(), data)
        })
    }
    pub unsafe fn GetTexLevelParameterfv(
        &self,
        target: TextureTarget,
        level: GLint,
        pname: LevelParameter,
        params: &mut [GLfloat],
    ) -> Result<(), GLError> {
        self.get_values::<commands::GetTexLevelParameterfv, _>(1, params, |f, data| {
            f(target.raw(), level, pname.raw(), data)
        })
    }
    pub unsafe fn GetTexLevelParameteriv(
        &self,
        target: TextureTarget,
        level: GLint,
        pname: LevelParameter,
        params: &mut [GLint],
    ) -> Result<(), GLError> {
        self.get_values::<commands::GetTexLevelParameteriv, _>(1, params, |f, data| {
            f(target.raw(), level, pname.raw(), data)
        })
    }
    /// `pixels` may be [None] to allocate the level without uploading
    /// anything.
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn TexImage1D(
        &self,
        target: TextureTarget,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        border: GLint,
        format: PixelFormat,
        type_: PixelType,
        pixels: Option<&[u8]>,
    ) -> Result<(), GLError> {
        let pixels = match pixels {
            Some(pixels) => {
                let store = self.pixel_store(false)?;
                check_buffer(
                    "glTexImage1D",
                    image_size(width, 1, format, type_, &store),
                    pixels.len(),
                )?;
                pixels.as_ptr().cast()
            }
            None => std::ptr::null(),
        };
        self.call::<commands::TexImage1D, _>(|f| {
            f(
                target.raw(),
                level,
                internalformat,
                width,
                border,
                format.raw(),
                type_.raw(),
                pixels,
            )
        })
    }
    /// `pixels` may be [None] to allocate the level without uploading
    /// anything.
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn TexImage2D(
        &self,
        target: TextureTarget,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: PixelFormat,
        type_: PixelType,
        pixels: Option<&[u8]>,
    ) -> Result<(), GLError> {
        let pixels = match pixels {
            Some(pixels) => {
                let store = self.pixel_store(false)?;
                check_buffer(
                    "glTexImage2D",
                    image_size(width, height, format, type_, &store),
                    pixels.len(),
                )?;
                pixels.as_ptr().cast()
            }
            None => std::ptr::null(),
        };
        self.call::<commands::TexImage2D, _>(|f| {
            f(
                target.raw(),
                level,
                internalformat,
                width,
                height,
                border,
                format.raw(),
                type_.raw(),
                pixels,
            )
        })
    }
    pub unsafe fn GetTexImage(
        &self,
        target: TextureTarget,
        level: GLint,
        format: PixelFormat,
        type_: PixelType,
        pixels: &mut [u8],
    ) -> Result<(), GLError> {
        let mut width = [0];
        let mut height = [0];
        self.GetTexLevelParameteriv(target, level, LevelParameter::Width, &mut width)?;
        self.GetTexLevelParameteriv(target, level, LevelParameter::Height, &mut height)?;
        let store = self.pixel_store(true)?;
        check_buffer(
            "glGetTexImage",
            image_size(width[0], height[0], format, type_, &store),
            pixels.len(),
        )?;
        self.call::<commands::GetTexImage, _>(|f| {
            f(
                target.raw(),
                level,
                format.raw(),
                type_.raw(),
                pixels.as_mut_ptr().cast(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::mock::{self, MockConfig};
    use crate::dispatch::{ApiVersion, EntryPoint};

    fn options(error_checking: ErrorChecking) -> Options {
        Options {
            error_checking,
            ..Default::default()
        }
    }

    fn loaded(config: MockConfig, options: &Options) -> GL10 {
        mock::install(config);
        let mut gl = GL10::new(options);
        unsafe { gl.load_with(mock::get_proc_address, ResolveMode::Rebind) }.unwrap();
        mock::take_calls();
        gl
    }

    #[test]
    fn typed_arguments_reach_the_driver() {
        let gl = loaded(MockConfig::new("2.1 Mesa 23.1.4"), &options(ErrorChecking::Never));
        unsafe {
            gl.Clear(ClearMask::COLOR | ClearMask::DEPTH).unwrap();
            gl.PolygonMode(Face::FrontAndBack, PolygonMode::Line).unwrap();
            gl.Viewport(0, 0, 640, 480).unwrap();
            gl.ColorMask(true, false, true, false).unwrap();
        }
        assert_eq!(
            mock::take_calls(),
            [
                "glClear(0x4100)",
                "glPolygonMode(0x408, 0x1b01)",
                "glViewport(0, 0, 640, 480)",
                "glColorMask(1, 0, 1, 0)",
            ]
        );
    }

    #[test]
    fn error_checking_policy() {
        let gl = loaded(MockConfig::new("2.1"), &options(ErrorChecking::Never));
        mock::queue_error(gl_raw::INVALID_OPERATION);
        unsafe { gl.Finish() }.unwrap();
        assert_eq!(mock::take_calls(), ["glFinish()"]);

        let gl = loaded(MockConfig::new("2.1"), &options(ErrorChecking::Always));
        mock::queue_error(gl_raw::INVALID_OPERATION);
        assert_eq!(
            unsafe { gl.Finish() },
            Err(GLError::Driver(DriverError::InvalidOperation))
        );
        assert_eq!(mock::take_calls(), ["glFinish()", "glGetError()"]);

        unsafe { gl.Enable(Capability::Blend) }.unwrap();
        assert!(unsafe { gl.IsEnabled(Capability::Blend) }.unwrap());
        assert!(!unsafe { gl.IsEnabled(Capability::Fog) }.unwrap());
    }

    #[test]
    fn suppressed_errors_are_not_blamed_on_the_next_call() {
        let options = Options {
            error_checking: ErrorChecking::Always,
            suppress_errors: true,
            ..Default::default()
        };
        let gl = loaded(MockConfig::new("2.1"), &options);
        mock::queue_error(gl_raw::INVALID_VALUE);
        mock::queue_error(gl_raw::OUT_OF_MEMORY);
        unsafe { gl.Flush() }.unwrap();
        assert_eq!(
            mock::take_calls(),
            [
                "glGetError()",
                "glGetError()",
                "glGetError()",
                "glFlush()",
                "glGetError()"
            ]
        );
        assert_eq!(unsafe { gl.GetError() }, Ok(None));
    }

    #[test]
    fn short_buffers_never_reach_the_driver() {
        let gl = loaded(MockConfig::new("2.1"), &options(ErrorChecking::Never));

        let mut pixels = vec![0u8; 4 * 4 * 4 - 1];
        assert_eq!(
            unsafe {
                gl.ReadPixels(
                    0,
                    0,
                    4,
                    4,
                    PixelFormat::RGBA,
                    PixelType::UnsignedByte,
                    &mut pixels,
                )
            },
            Err(GLError::BufferTooSmall {
                name: "glReadPixels",
                required: 64,
                provided: 63
            })
        );
        assert!(!mock::take_calls().iter().any(|call| call.starts_with("glReadPixels")));

        assert_eq!(
            unsafe {
                gl.TexParameterfv(
                    TextureTarget::Texture2D,
                    TextureParameter::BorderColor,
                    &[0.0, 0.0, 0.0],
                )
            },
            Err(GLError::BufferTooSmall {
                name: "glTexParameterfv",
                required: 4,
                provided: 3
            })
        );
        assert!(mock::take_calls().is_empty());
    }

    #[test]
    fn pixel_transfers_follow_pack_state() {
        let gl = loaded(MockConfig::new("2.1"), &options(ErrorChecking::Always));
        unsafe {
            gl.PixelStorei(PixelStoreParameter::PackAlignment, 1).unwrap();
            let mut pixels = vec![0u8; 3 * 2 * 3];
            gl.ReadPixels(
                0,
                0,
                3,
                2,
                PixelFormat::RGB,
                PixelType::UnsignedByte,
                &mut pixels,
            )
            .unwrap();
            assert!(pixels.iter().all(|&byte| byte == mock::FILL_BYTE));

            let image = vec![7u8; 2 * 2 * 4];
            gl.TexImage2D(
                TextureTarget::Texture2D,
                0,
                gl_raw::RGBA as GLint,
                2,
                2,
                0,
                PixelFormat::RGBA,
                PixelType::UnsignedByte,
                Some(&image),
            )
            .unwrap();
            let mut width = [0];
            gl.GetTexLevelParameteriv(
                TextureTarget::Texture2D,
                0,
                LevelParameter::Width,
                &mut width,
            )
            .unwrap();
            assert_eq!(width, [2]);

            let mut readback = vec![0u8; 16];
            gl.GetTexImage(
                TextureTarget::Texture2D,
                0,
                PixelFormat::RGBA,
                PixelType::UnsignedByte,
                &mut readback,
            )
            .unwrap();
            assert!(readback.iter().all(|&byte| byte == mock::FILL_BYTE));
        }
    }

    #[test]
    fn scalar_queries() {
        let gl = loaded(MockConfig::new("2.1"), &options(ErrorChecking::Always));
        unsafe {
            gl.ClearColor(0.25, 0.5, 0.75, 1.0).unwrap();
            let mut color = [0.0; 4];
            gl.GetFloatv(gl_raw::COLOR_CLEAR_VALUE, &mut color).unwrap();
            assert_eq!(color, [0.25, 0.5, 0.75, 1.0]);

            // Longer slices are left alone past the values the query has.
            let mut long = [-1; 20];
            gl.GetIntegerv(gl_raw::UNPACK_ALIGNMENT, &mut long).unwrap();
            assert_eq!(long[0], 4);
            assert_eq!(long[1..], [-1; 19]);

            let mut flags = [true];
            gl.GetBooleanv(gl_raw::DEPTH_WRITEMASK, &mut flags).unwrap();
            gl.DepthMask(false).unwrap();
            gl.GetBooleanv(gl_raw::DEPTH_WRITEMASK, &mut flags).unwrap();
            assert_eq!(flags, [false]);

            assert_eq!(
                gl.GetString(StringName::Vendor).unwrap().as_deref(),
                Some("gldispatch")
            );
        }
    }

    #[test]
    fn state_queries_are_sized_by_parameter() {
        let gl = loaded(MockConfig::new("2.1"), &options(ErrorChecking::Always));
        unsafe {
            let mut matrix = [-1.0; 20];
            gl.GetFloatv(gl_raw::MODELVIEW_MATRIX, &mut matrix).unwrap();
            assert_eq!(matrix[..4], [1.0, 0.0, 0.0, 0.0]);
            assert_eq!(matrix[15], 1.0);
            assert_eq!(matrix[16..], [-1.0; 4]);
            mock::take_calls();

            let mut color = [0.0];
            assert_eq!(
                gl.GetFloatv(gl_raw::COLOR_CLEAR_VALUE, &mut color),
                Err(GLError::BufferTooSmall {
                    name: "glGetFloatv",
                    required: 4,
                    provided: 1
                })
            );
            let mut flags = [false; 3];
            assert_eq!(
                gl.GetBooleanv(gl_raw::COLOR_WRITEMASK, &mut flags),
                Err(GLError::BufferTooSmall {
                    name: "glGetBooleanv",
                    required: 4,
                    provided: 3
                })
            );

            // GL_COMPRESSED_TEXTURE_FORMATS may return any number of values.
            let mut formats = [0; 16];
            assert_eq!(
                gl.GetIntegerv(0x86A3, &mut formats),
                Err(GLError::UnknownQuery {
                    name: "glGetIntegerv",
                    pname: 0x86A3
                })
            );
            assert!(mock::take_calls().is_empty());

            let mut border = [0; 3];
            assert_eq!(
                gl.GetTexParameteriv(
                    TextureTarget::Texture2D,
                    TextureParameter::BorderColor,
                    &mut border,
                ),
                Err(GLError::BufferTooSmall {
                    name: "glGetTexParameteriv",
                    required: 4,
                    provided: 3
                })
            );
            assert!(mock::take_calls().is_empty());
        }
    }

    #[test]
    fn gles2_has_no_row_length() {
        let gl = loaded(MockConfig::new("OpenGL ES 2.0"), &options(ErrorChecking::Always));
        let mut pixels = vec![0u8; 4];
        unsafe {
            gl.ReadPixels(0, 0, 1, 1, PixelFormat::RGBA, PixelType::UnsignedByte, &mut pixels)
                .unwrap();
        }
        let calls = mock::take_calls();
        assert!(calls.contains(&format!("glGetIntegerv({:#x}, ptr)", gl_raw::PACK_ALIGNMENT)));
        assert!(!calls.contains(&format!("glGetIntegerv({:#x}, ptr)", gl_raw::PACK_ROW_LENGTH)));
    }

    #[test]
    fn teardown_and_description() {
        let mut gl = loaded(
            MockConfig::new("4.6.0 NVIDIA 535.54.03").with_renderer("GeForce GTX 1080/PCIe/SSE2"),
            &Options::default(),
        );
        assert_eq!(
            gl.driver_description(),
            "OpenGL 4.6 / gldispatch / GeForce GTX 1080/PCIe/SSE2"
        );
        assert_eq!(
            gl.capabilities().map(|c| c.version),
            Some(ApiVersion::new(Api::GL, 4, 6))
        );
        gl.teardown();
        assert!(!gl.table().is_available(EntryPoint::Clear));
        assert_eq!(gl.driver_description(), "(not resolved)");
    }
}
