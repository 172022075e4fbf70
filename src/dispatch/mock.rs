/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! A software stand-in for an OpenGL driver.
//!
//! The mock exports real `extern "system"` functions for every entry point in
//! the registry, so tables can be resolved and called through exactly as
//! with a real driver. It keeps a small amount of state (enough for queries
//! to return what was set, and for image transfers to know their size) and
//! records every call as a string like `glClear(0x4000)`.
//!
//! Like a real context, the mock is per-thread: [install] configures it for
//! the calling thread only, and other threads see nothing of it.

use super::gl_raw;
use super::gl_raw::types::*;
use super::resolver::{CONTEXT_PROFILE_MASK, NUM_EXTENSIONS};
use crate::gl10::pixels::{image_size, PixelStore};
use crate::gl10::{PixelFormat, PixelStoreParameter, PixelType, TextureParameter};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::{c_void, CString};

/// What image reads fill the caller's buffer with.
pub const FILL_BYTE: u8 = 0x5A;

/// Describes the driver to pretend to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockConfig {
    /// `GL_VERSION` string.
    pub version: String,
    pub vendor: String,
    pub renderer: String,
    pub extensions: Vec<String>,
    /// Names the loader claims not to know.
    pub missing: Vec<String>,
    /// Extra names the loader knows, and the entry point each one is really
    /// for, e.g. `("glPolygonModeNV", "glPolygonMode")`.
    pub aliases: Vec<(String, String)>,
    /// What `GL_CONTEXT_PROFILE_MASK` reports. Querying it raises
    /// `GL_INVALID_ENUM` if this is [None].
    pub profile_mask: Option<GLint>,
}

impl MockConfig {
    pub fn new(version: &str) -> Self {
        MockConfig {
            version: version.to_string(),
            vendor: "gldispatch".to_string(),
            renderer: "gldispatch mock driver".to_string(),
            extensions: Vec::new(),
            missing: Vec::new(),
            aliases: Vec::new(),
            profile_mask: None,
        }
    }

    pub fn with_renderer(mut self, renderer: &str) -> Self {
        self.renderer = renderer.to_string();
        self
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions
            .extend(extensions.iter().map(|extension| extension.to_string()));
        self
    }

    pub fn without_symbol(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }

    pub fn with_alias(mut self, alias: &str, target: &str) -> Self {
        self.aliases.push((alias.to_string(), target.to_string()));
        self
    }

    pub fn with_profile_mask(mut self, mask: GLint) -> Self {
        self.profile_mask = Some(mask);
        self
    }
}

struct MockDriver {
    config: MockConfig,
    calls: Vec<String>,
    errors: VecDeque<GLenum>,
    strings: HashMap<GLenum, CString>,
    extension_strings: Vec<CString>,
    state: HashMap<GLenum, Vec<f64>>,
    enabled: HashSet<GLenum>,
    texture_parameters: HashMap<(GLenum, GLenum), Vec<f64>>,
    texture_levels: HashMap<(GLenum, GLint), (GLsizei, GLsizei)>,
}

impl MockDriver {
    fn new(config: MockConfig) -> Self {
        fn c_string(string: &str) -> CString {
            CString::new(string).unwrap_or_default()
        }

        let strings = HashMap::from([
            (gl_raw::VERSION, c_string(&config.version)),
            (gl_raw::VENDOR, c_string(&config.vendor)),
            (gl_raw::RENDERER, c_string(&config.renderer)),
            (gl_raw::EXTENSIONS, c_string(&config.extensions.join(" "))),
        ]);
        let extension_strings = config
            .extensions
            .iter()
            .map(|extension| c_string(extension))
            .collect();

        let mut state: HashMap<GLenum, Vec<f64>> = HashMap::from([
            (gl_raw::PACK_ALIGNMENT, vec![4.0]),
            (gl_raw::UNPACK_ALIGNMENT, vec![4.0]),
            (gl_raw::LINE_WIDTH, vec![1.0]),
            (gl_raw::POINT_SIZE, vec![1.0]),
            (gl_raw::VIEWPORT, vec![0.0; 4]),
            (gl_raw::SCISSOR_BOX, vec![0.0; 4]),
            (gl_raw::COLOR_CLEAR_VALUE, vec![0.0; 4]),
            (gl_raw::DEPTH_CLEAR_VALUE, vec![1.0]),
            (gl_raw::STENCIL_CLEAR_VALUE, vec![0.0]),
            (gl_raw::DEPTH_RANGE, vec![0.0, 1.0]),
            (gl_raw::COLOR_WRITEMASK, vec![1.0; 4]),
            (gl_raw::DEPTH_WRITEMASK, vec![1.0]),
            (gl_raw::STENCIL_WRITEMASK, vec![u32::MAX as f64]),
            (gl_raw::MAX_TEXTURE_SIZE, vec![2048.0]),
            (
                gl_raw::MODELVIEW_MATRIX,
                (0..16).map(|i| if i % 5 == 0 { 1.0 } else { 0.0 }).collect(),
            ),
            (NUM_EXTENSIONS, vec![config.extensions.len() as f64]),
        ]);
        for pname in [
            gl_raw::PACK_ROW_LENGTH,
            gl_raw::PACK_SKIP_ROWS,
            gl_raw::PACK_SKIP_PIXELS,
            gl_raw::PACK_SWAP_BYTES,
            gl_raw::PACK_LSB_FIRST,
            gl_raw::UNPACK_ROW_LENGTH,
            gl_raw::UNPACK_SKIP_ROWS,
            gl_raw::UNPACK_SKIP_PIXELS,
            gl_raw::UNPACK_SWAP_BYTES,
            gl_raw::UNPACK_LSB_FIRST,
        ] {
            state.insert(pname, vec![0.0]);
        }
        if let Some(mask) = config.profile_mask {
            state.insert(CONTEXT_PROFILE_MASK, vec![mask as f64]);
        }

        MockDriver {
            config,
            calls: Vec::new(),
            errors: VecDeque::new(),
            strings,
            extension_strings,
            state,
            enabled: HashSet::from([gl_raw::DITHER]),
            texture_parameters: HashMap::new(),
            texture_levels: HashMap::new(),
        }
    }

    fn raise(&mut self, error: GLenum) {
        self.errors.push_back(error);
    }

    fn state_value(&self, pname: GLenum) -> GLint {
        self.state
            .get(&pname)
            .and_then(|values| values.first())
            .map_or(0, |&value| value as GLint)
    }

    /// Bytes an image read of this size touches, given the pack state.
    /// [None] (after raising an error) for invalid formats.
    fn read_size(
        &mut self,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
    ) -> Option<usize> {
        let (Some(format), Some(type_)) =
            (PixelFormat::from_raw(format), PixelType::from_raw(type_))
        else {
            self.raise(gl_raw::INVALID_ENUM);
            return None;
        };
        let store = PixelStore {
            alignment: self.state_value(gl_raw::PACK_ALIGNMENT),
            row_length: self.state_value(gl_raw::PACK_ROW_LENGTH),
            skip_rows: self.state_value(gl_raw::PACK_SKIP_ROWS),
            skip_pixels: self.state_value(gl_raw::PACK_SKIP_PIXELS),
        };
        Some(image_size(width, height, format, type_, &store))
    }
}

thread_local! {
    static DRIVER: RefCell<Option<MockDriver>> = const { RefCell::new(None) };
}

fn with_driver<R>(f: impl FnOnce(&mut MockDriver) -> R) -> Option<R> {
    DRIVER.with(|driver| driver.borrow_mut().as_mut().map(f))
}

/// Make the mock the current "context" on this thread, replacing any earlier
/// one.
pub fn install(config: MockConfig) {
    DRIVER.with(|driver| *driver.borrow_mut() = Some(MockDriver::new(config)));
}

pub fn uninstall() {
    DRIVER.with(|driver| *driver.borrow_mut() = None);
}

/// The loader for the mock. Returns null for unknown names, and for
/// everything if no mock is installed on this thread.
pub fn get_proc_address(name: &str) -> *const c_void {
    let target = with_driver(|driver| {
        if driver.config.missing.iter().any(|missing| missing == name) {
            return None;
        }
        Some(
            driver
                .config
                .aliases
                .iter()
                .find(|(alias, _)| alias == name)
                .map_or_else(|| name.to_string(), |(_, target)| target.clone()),
        )
    })
    .flatten();
    target
        .and_then(|target| export(&target))
        .unwrap_or(std::ptr::null())
}

/// Calls made on this thread so far. Calls through an alias are recorded
/// under the name of the entry point they alias.
pub fn calls() -> Vec<String> {
    with_driver(|driver| driver.calls.clone()).unwrap_or_default()
}

pub fn take_calls() -> Vec<String> {
    with_driver(|driver| std::mem::take(&mut driver.calls)).unwrap_or_default()
}

/// Make the next `glGetError` return `error` (after any already queued).
pub fn queue_error(error: GLenum) {
    with_driver(|driver| driver.raise(error));
}

trait Describe {
    fn describe(&self) -> String;
}
impl Describe for GLenum {
    fn describe(&self) -> String {
        format!("{:#x}", self)
    }
}
impl Describe for GLint {
    fn describe(&self) -> String {
        self.to_string()
    }
}
impl Describe for GLfloat {
    fn describe(&self) -> String {
        self.to_string()
    }
}
impl Describe for GLdouble {
    fn describe(&self) -> String {
        self.to_string()
    }
}
impl Describe for GLboolean {
    fn describe(&self) -> String {
        self.to_string()
    }
}
impl<T> Describe for *const T {
    fn describe(&self) -> String {
        "ptr".to_string()
    }
}
impl<T> Describe for *mut T {
    fn describe(&self) -> String {
        "ptr".to_string()
    }
}

fn record(name: &str, args: &[String]) {
    with_driver(|driver| driver.calls.push(format!("{}({})", name, args.join(", "))));
}

fn set_state(pname: GLenum, values: &[f64]) {
    with_driver(|driver| driver.state.insert(pname, values.to_vec()));
}

/// Values of a state variable, or nothing (after raising an error) if the
/// mock doesn't know it.
fn query(pname: GLenum) -> Vec<f64> {
    with_driver(|driver| match driver.state.get(&pname) {
        Some(values) => values.clone(),
        None => {
            driver.raise(gl_raw::INVALID_ENUM);
            Vec::new()
        }
    })
    .unwrap_or_default()
}

unsafe fn write_values<T>(out: *mut T, values: &[f64], convert: impl Fn(f64) -> T) {
    for (i, &value) in values.iter().enumerate() {
        out.add(i).write(convert(value));
    }
}

fn parameter_count(pname: GLenum) -> usize {
    TextureParameter::from_raw(pname).map_or(1, TextureParameter::count)
}

fn set_texture_parameter(target: GLenum, pname: GLenum, values: Vec<f64>) {
    with_driver(|driver| {
        if TextureParameter::from_raw(pname).is_none() {
            driver.raise(gl_raw::INVALID_ENUM);
        } else {
            driver.texture_parameters.insert((target, pname), values);
        }
    });
}

fn texture_parameter(target: GLenum, pname: GLenum) -> Vec<f64> {
    with_driver(|driver| {
        if TextureParameter::from_raw(pname).is_none() {
            driver.raise(gl_raw::INVALID_ENUM);
            return Vec::new();
        }
        driver
            .texture_parameters
            .get(&(target, pname))
            .cloned()
            .unwrap_or_else(|| vec![0.0; parameter_count(pname)])
    })
    .unwrap_or_default()
}

fn level_parameter(target: GLenum, level: GLint, pname: GLenum) -> Vec<f64> {
    with_driver(|driver| {
        let (width, height) = driver
            .texture_levels
            .get(&(target, level))
            .copied()
            .unwrap_or((0, 0));
        match pname {
            gl_raw::TEXTURE_WIDTH => vec![width as f64],
            gl_raw::TEXTURE_HEIGHT => vec![height as f64],
            gl_raw::TEXTURE_INTERNAL_FORMAT | gl_raw::TEXTURE_BORDER => vec![0.0],
            _ => {
                driver.raise(gl_raw::INVALID_ENUM);
                Vec::new()
            }
        }
    })
    .unwrap_or_default()
}

fn pixel_store(pname: GLenum, param: GLint) {
    use PixelStoreParameter as P;
    with_driver(|driver| {
        let valid = match P::from_raw(pname) {
            Some(P::PackAlignment | P::UnpackAlignment) => [1, 2, 4, 8].contains(&param),
            Some(_) => param >= 0,
            None => {
                driver.raise(gl_raw::INVALID_ENUM);
                return;
            }
        };
        if valid {
            driver.state.insert(pname, vec![param as f64]);
        } else {
            driver.raise(gl_raw::INVALID_VALUE);
        }
    });
}

fn fill(pixels: *mut c_void, size: Option<usize>) {
    if let Some(size) = size {
        if !pixels.is_null() {
            unsafe { std::ptr::write_bytes(pixels.cast::<u8>(), FILL_BYTE, size) };
        }
    }
}

fn string_pointer(string: Option<&CString>) -> *const GLubyte {
    string.map_or(std::ptr::null(), |string| string.as_ptr().cast())
}

macro_rules! mock_functions {
    ($(
        $name:literal => fn $fn_name:ident($($arg:ident: $ty:ty),*) $(-> $ret:ty)? $body:block
    )*) => {
        $(
            #[allow(clippy::too_many_arguments)]
            extern "system" fn $fn_name($($arg: $ty),*) $(-> $ret)? {
                record($name, &[$(Describe::describe(&$arg)),*]);
                $body
            }
        )*

        fn export(name: &str) -> Option<*const c_void> {
            match name {
                $($name => Some(($fn_name as extern "system" fn($($ty),*) $(-> $ret)?) as *const c_void),)*
                _ => None,
            }
        }
    };
}

mock_functions! {
    "glCullFace" => fn CullFace(mode: GLenum) {}
    "glFrontFace" => fn FrontFace(mode: GLenum) {}
    "glHint" => fn Hint(target: GLenum, mode: GLenum) {}
    "glLineWidth" => fn LineWidth(width: GLfloat) {
        set_state(gl_raw::LINE_WIDTH, &[width as f64]);
    }
    "glPointSize" => fn PointSize(size: GLfloat) {
        set_state(gl_raw::POINT_SIZE, &[size as f64]);
    }
    "glPolygonMode" => fn PolygonMode(face: GLenum, mode: GLenum) {}
    "glScissor" => fn Scissor(x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        set_state(gl_raw::SCISSOR_BOX, &[x as f64, y as f64, width as f64, height as f64]);
    }
    "glTexParameterf" => fn TexParameterf(target: GLenum, pname: GLenum, param: GLfloat) {
        set_texture_parameter(target, pname, vec![param as f64]);
    }
    "glTexParameterfv" => fn TexParameterfv(target: GLenum, pname: GLenum, params: *const GLfloat) {
        let params = unsafe { std::slice::from_raw_parts(params, parameter_count(pname)) };
        set_texture_parameter(target, pname, params.iter().map(|&p| p as f64).collect());
    }
    "glTexParameteri" => fn TexParameteri(target: GLenum, pname: GLenum, param: GLint) {
        set_texture_parameter(target, pname, vec![param as f64]);
    }
    "glTexParameteriv" => fn TexParameteriv(target: GLenum, pname: GLenum, params: *const GLint) {
        let params = unsafe { std::slice::from_raw_parts(params, parameter_count(pname)) };
        set_texture_parameter(target, pname, params.iter().map(|&p| p as f64).collect());
    }
    "glTexImage1D" => fn TexImage1D(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void
    ) {
        with_driver(|driver| driver.texture_levels.insert((target, level), (width, 1)));
    }
    "glTexImage2D" => fn TexImage2D(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void
    ) {
        with_driver(|driver| driver.texture_levels.insert((target, level), (width, height)));
    }
    "glDrawBuffer" => fn DrawBuffer(buf: GLenum) {}
    "glClear" => fn Clear(mask: GLbitfield) {}
    "glClearColor" => fn ClearColor(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        set_state(
            gl_raw::COLOR_CLEAR_VALUE,
            &[red as f64, green as f64, blue as f64, alpha as f64],
        );
    }
    "glClearStencil" => fn ClearStencil(s: GLint) {
        set_state(gl_raw::STENCIL_CLEAR_VALUE, &[s as f64]);
    }
    "glClearDepth" => fn ClearDepth(depth: GLdouble) {
        set_state(gl_raw::DEPTH_CLEAR_VALUE, &[depth]);
    }
    "glStencilMask" => fn StencilMask(mask: GLuint) {
        set_state(gl_raw::STENCIL_WRITEMASK, &[mask as f64]);
    }
    "glColorMask" => fn ColorMask(red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean) {
        set_state(
            gl_raw::COLOR_WRITEMASK,
            &[red as f64, green as f64, blue as f64, alpha as f64],
        );
    }
    "glDepthMask" => fn DepthMask(flag: GLboolean) {
        set_state(gl_raw::DEPTH_WRITEMASK, &[flag as f64]);
    }
    "glDisable" => fn Disable(cap: GLenum) {
        with_driver(|driver| {
            if cap == 0 {
                driver.raise(gl_raw::INVALID_ENUM);
            } else {
                driver.enabled.remove(&cap);
            }
        });
    }
    "glEnable" => fn Enable(cap: GLenum) {
        with_driver(|driver| {
            if cap == 0 {
                driver.raise(gl_raw::INVALID_ENUM);
            } else {
                driver.enabled.insert(cap);
            }
        });
    }
    "glFinish" => fn Finish() {}
    "glFlush" => fn Flush() {}
    "glBlendFunc" => fn BlendFunc(sfactor: GLenum, dfactor: GLenum) {}
    "glLogicOp" => fn LogicOp(opcode: GLenum) {}
    "glStencilFunc" => fn StencilFunc(func: GLenum, ref_: GLint, mask: GLuint) {}
    "glStencilOp" => fn StencilOp(fail: GLenum, zfail: GLenum, zpass: GLenum) {}
    "glDepthFunc" => fn DepthFunc(func: GLenum) {}
    "glPixelStoref" => fn PixelStoref(pname: GLenum, param: GLfloat) {
        pixel_store(pname, param as GLint);
    }
    "glPixelStorei" => fn PixelStorei(pname: GLenum, param: GLint) {
        pixel_store(pname, param);
    }
    "glReadBuffer" => fn ReadBuffer(src: GLenum) {}
    "glReadPixels" => fn ReadPixels(
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *mut c_void
    ) {
        let size = with_driver(|driver| driver.read_size(width, height, format, type_)).flatten();
        fill(pixels, size);
    }
    "glGetBooleanv" => fn GetBooleanv(pname: GLenum, data: *mut GLboolean) {
        let values = query(pname);
        unsafe { write_values(data, &values, |value| (value != 0.0) as GLboolean) };
    }
    "glGetDoublev" => fn GetDoublev(pname: GLenum, data: *mut GLdouble) {
        let values = query(pname);
        unsafe { write_values(data, &values, |value| value) };
    }
    "glGetError" => fn GetError() -> GLenum {
        with_driver(|driver| driver.errors.pop_front())
            .flatten()
            .unwrap_or(gl_raw::NO_ERROR)
    }
    "glGetFloatv" => fn GetFloatv(pname: GLenum, data: *mut GLfloat) {
        let values = query(pname);
        unsafe { write_values(data, &values, |value| value as GLfloat) };
    }
    "glGetIntegerv" => fn GetIntegerv(pname: GLenum, data: *mut GLint) {
        let values = query(pname);
        unsafe { write_values(data, &values, |value| value as GLint) };
    }
    "glGetString" => fn GetString(name: GLenum) -> *const GLubyte {
        with_driver(|driver| {
            let string = string_pointer(driver.strings.get(&name));
            if string.is_null() {
                driver.raise(gl_raw::INVALID_ENUM);
            }
            string
        })
        .unwrap_or(std::ptr::null())
    }
    "glGetTexImage" => fn GetTexImage(
        target: GLenum,
        level: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *mut c_void
    ) {
        let size = with_driver(|driver| {
            let (width, height) = driver
                .texture_levels
                .get(&(target, level))
                .copied()
                .unwrap_or((0, 0));
            driver.read_size(width, height, format, type_)
        })
        .flatten();
        fill(pixels, size);
    }
    "glGetTexParameterfv" => fn GetTexParameterfv(target: GLenum, pname: GLenum, params: *mut GLfloat) {
        let values = texture_parameter(target, pname);
        unsafe { write_values(params, &values, |value| value as GLfloat) };
    }
    "glGetTexParameteriv" => fn GetTexParameteriv(target: GLenum, pname: GLenum, params: *mut GLint) {
        let values = texture_parameter(target, pname);
        unsafe { write_values(params, &values, |value| value as GLint) };
    }
    "glGetTexLevelParameterfv" => fn GetTexLevelParameterfv(
        target: GLenum,
        level: GLint,
        pname: GLenum,
        params: *mut GLfloat
    ) {
        let values = level_parameter(target, level, pname);
        unsafe { write_values(params, &values, |value| value as GLfloat) };
    }
    "glGetTexLevelParameteriv" => fn GetTexLevelParameteriv(
        target: GLenum,
        level: GLint,
        pname: GLenum,
        params: *mut GLint
    ) {
        let values = level_parameter(target, level, pname);
        unsafe { write_values(params, &values, |value| value as GLint) };
    }
    "glIsEnabled" => fn IsEnabled(cap: GLenum) -> GLboolean {
        let enabled = with_driver(|driver| driver.enabled.contains(&cap)).unwrap_or(false);
        if enabled {
            gl_raw::TRUE
        } else {
            gl_raw::FALSE
        }
    }
    "glDepthRange" => fn DepthRange(near: GLdouble, far: GLdouble) {
        set_state(gl_raw::DEPTH_RANGE, &[near, far]);
    }
    "glViewport" => fn Viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        set_state(gl_raw::VIEWPORT, &[x as f64, y as f64, width as f64, height as f64]);
    }
    "glGetStringi" => fn GetStringi(name: GLenum, index: GLuint) -> *const GLubyte {
        with_driver(|driver| {
            if name != gl_raw::EXTENSIONS {
                driver.raise(gl_raw::INVALID_ENUM);
                return std::ptr::null();
            }
            let string = string_pointer(driver.extension_strings.get(index as usize));
            if string.is_null() {
                driver.raise(gl_raw::INVALID_VALUE);
            }
            string
        })
        .unwrap_or(std::ptr::null())
    }
}
