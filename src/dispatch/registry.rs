/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The static registry of entry points: every OpenGL 1.0 command, the
//! features that guarantee it, and any alternate names it can be bound
//! through.
//!
//! Everything here is data. The resolver is the only consumer of the
//! requirements, and it never consults them again once a table is resolved.

use super::gl_raw::types::*;
use super::version::{Api, ApiVersion};
use std::ffi::c_void;

/// A set of [Api]s a [Requirement] applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiSet(u8);

impl ApiSet {
    pub const GL: ApiSet = ApiSet(1 << 0);
    pub const GLES1: ApiSet = ApiSet(1 << 1);
    pub const GLES2: ApiSet = ApiSet(1 << 2);
    pub const GLSC2: ApiSet = ApiSet(1 << 3);

    pub const fn contains(self, api: Api) -> bool {
        let bit = match api {
            Api::GL => Self::GL.0,
            Api::GLES1 => Self::GLES1.0,
            Api::GLES2 => Self::GLES2.0,
            Api::GLSC2 => Self::GLSC2.0,
        };
        self.0 & bit != 0
    }
}

/// A feature (API version or extension) that guarantees an entry point is
/// present, for the APIs in `apis`. If the feature exports the command under
/// a different name, that name is `entry_point`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub feature: &'static str,
    pub apis: ApiSet,
    pub entry_point: Option<&'static str>,
}

pub const fn gl(feature: &'static str) -> Requirement {
    Requirement {
        feature,
        apis: ApiSet::GL,
        entry_point: None,
    }
}
pub const fn gles1(feature: &'static str) -> Requirement {
    Requirement {
        apis: ApiSet::GLES1,
        ..gl(feature)
    }
}
pub const fn gles2(feature: &'static str) -> Requirement {
    Requirement {
        apis: ApiSet::GLES2,
        ..gl(feature)
    }
}
pub const fn glsc2(feature: &'static str) -> Requirement {
    Requirement {
        apis: ApiSet::GLSC2,
        ..gl(feature)
    }
}

impl Requirement {
    pub const fn entry_point(self, name: &'static str) -> Requirement {
        Requirement {
            entry_point: Some(name),
            ..self
        }
    }

    pub fn is_version(&self) -> bool {
        ApiVersion::parse_feature(self.feature).is_some()
    }

    /// The vendor part of an extension name, e.g. `NV` for
    /// `GL_NV_polygon_mode`. [None] for versions.
    pub fn vendor(&self) -> Option<&'static str> {
        if self.is_version() {
            return None;
        }
        let rest = self.feature.strip_prefix("GL_")?;
        rest.split_once('_').map(|(vendor, _)| vendor)
    }

    /// Resolution order: core versions, then extensions every vendor ships,
    /// then vendor-specific extensions.
    pub fn priority(&self) -> u8 {
        match self.vendor() {
            None => 0,
            Some("ARB" | "KHR" | "OES" | "EXT") => 1,
            Some(_) => 2,
        }
    }
}

/// Static description of an entry point.
#[derive(Debug)]
pub struct EntryPointDesc {
    pub id: EntryPoint,
    /// The symbolic name, which is also the primary name to resolve.
    pub name: &'static str,
    /// Native signature, for diagnostics.
    pub signature: &'static str,
    pub requirements: &'static [Requirement],
}

impl EntryPointDesc {
    /// The capability to name when this entry point turns out to be
    /// unavailable: the first requirement that applies to `api`, or failing
    /// that, the first requirement.
    pub fn expected_capability(&self, api: Api) -> &'static str {
        self.requirements
            .iter()
            .find(|requirement| requirement.apis.contains(api))
            .or_else(|| self.requirements.first())
            .map_or("(none)", |requirement| requirement.feature)
    }
}

/// Ties a type to an entry point and its native signature, so that a
/// resolved address can be turned into a callable function pointer.
///
/// # Safety
/// `Pointer` must be the `unsafe extern "system" fn` type matching the native
/// signature of `ENTRY_POINT`. All implementations are generated below.
pub unsafe trait Command {
    const ENTRY_POINT: EntryPoint;
    type Pointer: Copy;
}

macro_rules! entry_points {
    (
        $(
            $id:ident = $name:literal, fn($($arg:ident: $ty:ty),*) $(-> $ret:ty)?, $requirements:expr;
        )*
    ) => {
        /// Identifies an entry point in [ENTRY_POINTS] and in an
        /// [EntryPointTable](super::EntryPointTable).
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum EntryPoint {
            $($id,)*
        }

        impl EntryPoint {
            pub const ALL: &'static [EntryPoint] = &[$(EntryPoint::$id,)*];
        }

        /// Indexed by `EntryPoint as usize`.
        pub static ENTRY_POINTS: &[EntryPointDesc] = &[
            $(EntryPointDesc {
                id: EntryPoint::$id,
                name: $name,
                signature: stringify!(fn($($arg: $ty),*) $(-> $ret)?),
                requirements: $requirements,
            },)*
        ];

        /// One type per entry point. See [Command].
        pub mod commands {
            use super::*;
            $(
                pub enum $id {}
                unsafe impl Command for $id {
                    const ENTRY_POINT: EntryPoint = EntryPoint::$id;
                    type Pointer = unsafe extern "system" fn($($ty),*) $(-> $ret)?;
                }
            )*
        }
    };
}

const EVERY_API: &[Requirement] = &[
    gl("GL_VERSION_1_0"),
    gles1("GL_VERSION_ES_CM_1_0"),
    gles2("GL_ES_VERSION_2_0"),
    glsc2("GL_SC_VERSION_2_0"),
];
const GL_AND_GLES: &[Requirement] = &[
    gl("GL_VERSION_1_0"),
    gles1("GL_VERSION_ES_CM_1_0"),
    gles2("GL_ES_VERSION_2_0"),
];
const GL_AND_GLES1: &[Requirement] = &[gl("GL_VERSION_1_0"), gles1("GL_VERSION_ES_CM_1_0")];
const GL_ONLY: &[Requirement] = &[gl("GL_VERSION_1_0")];

entry_points! {
    CullFace = "glCullFace", fn(mode: GLenum), EVERY_API;
    FrontFace = "glFrontFace", fn(mode: GLenum), EVERY_API;
    Hint = "glHint", fn(target: GLenum, mode: GLenum), EVERY_API;
    LineWidth = "glLineWidth", fn(width: GLfloat), EVERY_API;
    PointSize = "glPointSize", fn(size: GLfloat), GL_AND_GLES1;
    PolygonMode = "glPolygonMode", fn(face: GLenum, mode: GLenum), &[
        gl("GL_VERSION_1_0"),
        gles2("GL_NV_polygon_mode").entry_point("glPolygonModeNV"),
    ];
    Scissor = "glScissor", fn(x: GLint, y: GLint, width: GLsizei, height: GLsizei), EVERY_API;
    TexParameterf = "glTexParameterf", fn(target: GLenum, pname: GLenum, param: GLfloat), EVERY_API;
    TexParameterfv = "glTexParameterfv", fn(target: GLenum, pname: GLenum, params: *const GLfloat), EVERY_API;
    TexParameteri = "glTexParameteri", fn(target: GLenum, pname: GLenum, param: GLint), EVERY_API;
    TexParameteriv = "glTexParameteriv", fn(target: GLenum, pname: GLenum, params: *const GLint), EVERY_API;
    TexImage1D = "glTexImage1D", fn(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void
    ), GL_ONLY;
    TexImage2D = "glTexImage2D", fn(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void
    ), GL_AND_GLES;
    DrawBuffer = "glDrawBuffer", fn(buf: GLenum), GL_ONLY;
    Clear = "glClear", fn(mask: GLbitfield), EVERY_API;
    ClearColor = "glClearColor", fn(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat), EVERY_API;
    ClearStencil = "glClearStencil", fn(s: GLint), EVERY_API;
    ClearDepth = "glClearDepth", fn(depth: GLdouble), GL_ONLY;
    StencilMask = "glStencilMask", fn(mask: GLuint), EVERY_API;
    ColorMask = "glColorMask", fn(red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean), EVERY_API;
    DepthMask = "glDepthMask", fn(flag: GLboolean), EVERY_API;
    Disable = "glDisable", fn(cap: GLenum), EVERY_API;
    Enable = "glEnable", fn(cap: GLenum), EVERY_API;
    Finish = "glFinish", fn(), EVERY_API;
    Flush = "glFlush", fn(), EVERY_API;
    BlendFunc = "glBlendFunc", fn(sfactor: GLenum, dfactor: GLenum), EVERY_API;
    LogicOp = "glLogicOp", fn(opcode: GLenum), GL_AND_GLES1;
    StencilFunc = "glStencilFunc", fn(func: GLenum, ref_: GLint, mask: GLuint), EVERY_API;
    StencilOp = "glStencilOp", fn(fail: GLenum, zfail: GLenum, zpass: GLenum), EVERY_API;
    DepthFunc = "glDepthFunc", fn(func: GLenum), EVERY_API;
    PixelStoref = "glPixelStoref", fn(pname: GLenum, param: GLfloat), GL_ONLY;
    PixelStorei = "glPixelStorei", fn(pname: GLenum, param: GLint), EVERY_API;
    ReadBuffer = "glReadBuffer", fn(src: GLenum), &[gl("GL_VERSION_1_0"), gles2("GL_ES_VERSION_3_0")];
    ReadPixels = "glReadPixels", fn(
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *mut c_void
    ), GL_AND_GLES;
    GetBooleanv = "glGetBooleanv", fn(pname: GLenum, data: *mut GLboolean), EVERY_API;
    GetDoublev = "glGetDoublev", fn(pname: GLenum, data: *mut GLdouble), GL_ONLY;
    GetError = "glGetError", fn() -> GLenum, EVERY_API;
    GetFloatv = "glGetFloatv", fn(pname: GLenum, data: *mut GLfloat), EVERY_API;
    GetIntegerv = "glGetIntegerv", fn(pname: GLenum, data: *mut GLint), EVERY_API;
    GetString = "glGetString", fn(name: GLenum) -> *const GLubyte, EVERY_API;
    GetTexImage = "glGetTexImage", fn(
        target: GLenum,
        level: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *mut c_void
    ), GL_ONLY;
    GetTexParameterfv = "glGetTexParameterfv", fn(target: GLenum, pname: GLenum, params: *mut GLfloat), EVERY_API;
    GetTexParameteriv = "glGetTexParameteriv", fn(target: GLenum, pname: GLenum, params: *mut GLint), EVERY_API;
    GetTexLevelParameterfv = "glGetTexLevelParameterfv", fn(
        target: GLenum,
        level: GLint,
        pname: GLenum,
        params: *mut GLfloat
    ), &[gl("GL_VERSION_1_0"), gles2("GL_ES_VERSION_3_1")];
    GetTexLevelParameteriv = "glGetTexLevelParameteriv", fn(
        target: GLenum,
        level: GLint,
        pname: GLenum,
        params: *mut GLint
    ), &[gl("GL_VERSION_1_0"), gles2("GL_ES_VERSION_3_1")];
    IsEnabled = "glIsEnabled", fn(cap: GLenum) -> GLboolean, EVERY_API;
    DepthRange = "glDepthRange", fn(near: GLdouble, far: GLdouble), GL_ONLY;
    Viewport = "glViewport", fn(x: GLint, y: GLint, width: GLsizei, height: GLsizei), EVERY_API;
    // Only used to list extensions on contexts where GL_EXTENSIONS can't be
    // read with glGetString.
    GetStringi = "glGetStringi", fn(name: GLenum, index: GLuint) -> *const GLubyte, &[
        gl("GL_VERSION_3_0"),
        gles2("GL_ES_VERSION_3_0"),
    ];
}

impl EntryPoint {
    /// Entry points needed to find out what the context supports. These are
    /// resolved by their primary name before anything else is known.
    pub const BOOTSTRAP: &'static [EntryPoint] = &[
        EntryPoint::GetError,
        EntryPoint::GetString,
        EntryPoint::GetIntegerv,
    ];

    pub fn desc(self) -> &'static EntryPointDesc {
        &ENTRY_POINTS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.desc().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_id() {
        assert_eq!(ENTRY_POINTS.len(), EntryPoint::ALL.len());
        for (i, desc) in ENTRY_POINTS.iter().enumerate() {
            assert_eq!(desc.id as usize, i);
            assert!(desc.name.starts_with("gl"));
            assert!(!desc.requirements.is_empty(), "{} has no requirements", desc.name);
        }
        assert_eq!(EntryPoint::Clear.name(), "glClear");
        assert_eq!(EntryPoint::GetStringi.name(), "glGetStringi");
    }

    #[test]
    fn requirement_vendors() {
        assert_eq!(gl("GL_VERSION_1_0").vendor(), None);
        assert_eq!(gles2("GL_NV_polygon_mode").vendor(), Some("NV"));
        assert_eq!(gl("GL_ARB_robustness").priority(), 1);
        assert_eq!(gl("GL_EXT_texture_lod_bias").priority(), 1);
        assert_eq!(gl("GL_AMD_interleaved_elements").priority(), 2);
        assert_eq!(gl("GL_VERSION_2_1").priority(), 0);
    }

    #[test]
    fn expected_capability() {
        let desc = EntryPoint::PolygonMode.desc();
        assert_eq!(desc.expected_capability(Api::GL), "GL_VERSION_1_0");
        assert_eq!(desc.expected_capability(Api::GLES2), "GL_NV_polygon_mode");
        // Nothing applies to GLES 1, so the first requirement is named.
        assert_eq!(desc.expected_capability(Api::GLES1), "GL_VERSION_1_0");
    }

    #[test]
    fn signatures_are_recorded() {
        assert!(EntryPoint::GetError.desc().signature.contains("GLenum"));
        assert!(EntryPoint::Viewport.desc().signature.contains("height"));
    }
}
