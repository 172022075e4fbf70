/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Typed enum parameters for OpenGL 1.0 commands.
//!
//! Only parameters with a small, closed set of values get a type here. Query
//! names for the `glGet*` family are left as raw [GLenum]s, there are far too
//! many of them.

#![allow(clippy::upper_case_acronyms)]

use crate::dispatch::gl_raw as gl;
use crate::dispatch::gl_raw::types::{GLbitfield, GLenum};

macro_rules! gl_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $value:path,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const fn raw(self) -> GLenum {
                match self {
                    $(Self::$variant => $value,)*
                }
            }

            pub fn from_raw(raw: GLenum) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

gl_enum! {
    pub enum Face {
        Front = gl::FRONT,
        Back = gl::BACK,
        FrontAndBack = gl::FRONT_AND_BACK,
    }
}

gl_enum! {
    pub enum FrontFaceDirection {
        CW = gl::CW,
        CCW = gl::CCW,
    }
}

gl_enum! {
    pub enum HintTarget {
        PerspectiveCorrection = gl::PERSPECTIVE_CORRECTION_HINT,
        PointSmooth = gl::POINT_SMOOTH_HINT,
        LineSmooth = gl::LINE_SMOOTH_HINT,
        PolygonSmooth = gl::POLYGON_SMOOTH_HINT,
        Fog = gl::FOG_HINT,
    }
}

gl_enum! {
    pub enum HintMode {
        Fastest = gl::FASTEST,
        Nicest = gl::NICEST,
        DontCare = gl::DONT_CARE,
    }
}

gl_enum! {
    pub enum PolygonMode {
        Point = gl::POINT,
        Line = gl::LINE,
        Fill = gl::FILL,
    }
}

gl_enum! {
    /// Server-side capabilities for `glEnable`, `glDisable` and `glIsEnabled`.
    pub enum Capability {
        AlphaTest = gl::ALPHA_TEST,
        AutoNormal = gl::AUTO_NORMAL,
        Blend = gl::BLEND,
        ColorMaterial = gl::COLOR_MATERIAL,
        CullFace = gl::CULL_FACE,
        DepthTest = gl::DEPTH_TEST,
        Dither = gl::DITHER,
        Fog = gl::FOG,
        Light0 = gl::LIGHT0,
        Lighting = gl::LIGHTING,
        LineSmooth = gl::LINE_SMOOTH,
        LineStipple = gl::LINE_STIPPLE,
        Normalize = gl::NORMALIZE,
        PointSmooth = gl::POINT_SMOOTH,
        PolygonSmooth = gl::POLYGON_SMOOTH,
        PolygonStipple = gl::POLYGON_STIPPLE,
        ScissorTest = gl::SCISSOR_TEST,
        StencilTest = gl::STENCIL_TEST,
        Texture1D = gl::TEXTURE_1D,
        Texture2D = gl::TEXTURE_2D,
    }
}

gl_enum! {
    pub enum CompareFunc {
        Never = gl::NEVER,
        Less = gl::LESS,
        Equal = gl::EQUAL,
        LEqual = gl::LEQUAL,
        Greater = gl::GREATER,
        NotEqual = gl::NOTEQUAL,
        GEqual = gl::GEQUAL,
        Always = gl::ALWAYS,
    }
}

gl_enum! {
    pub enum BlendFactor {
        Zero = gl::ZERO,
        One = gl::ONE,
        SrcColor = gl::SRC_COLOR,
        OneMinusSrcColor = gl::ONE_MINUS_SRC_COLOR,
        DstColor = gl::DST_COLOR,
        OneMinusDstColor = gl::ONE_MINUS_DST_COLOR,
        SrcAlpha = gl::SRC_ALPHA,
        OneMinusSrcAlpha = gl::ONE_MINUS_SRC_ALPHA,
        DstAlpha = gl::DST_ALPHA,
        OneMinusDstAlpha = gl::ONE_MINUS_DST_ALPHA,
        SrcAlphaSaturate = gl::SRC_ALPHA_SATURATE,
    }
}

gl_enum! {
    pub enum StencilOp {
        Keep = gl::KEEP,
        Zero = gl::ZERO,
        Replace = gl::REPLACE,
        Incr = gl::INCR,
        Decr = gl::DECR,
        Invert = gl::INVERT,
    }
}

gl_enum! {
    pub enum LogicOp {
        Clear = gl::CLEAR,
        And = gl::AND,
        AndReverse = gl::AND_REVERSE,
        Copy = gl::COPY,
        AndInverted = gl::AND_INVERTED,
        Noop = gl::NOOP,
        Xor = gl::XOR,
        Or = gl::OR,
        Nor = gl::NOR,
        Equiv = gl::EQUIV,
        Invert = gl::INVERT,
        OrReverse = gl::OR_REVERSE,
        CopyInverted = gl::COPY_INVERTED,
        OrInverted = gl::OR_INVERTED,
        Nand = gl::NAND,
        Set = gl::SET,
    }
}

gl_enum! {
    /// Color buffers for `glDrawBuffer` and `glReadBuffer`.
    pub enum ColorBuffer {
        FrontLeft = gl::FRONT_LEFT,
        FrontRight = gl::FRONT_RIGHT,
        BackLeft = gl::BACK_LEFT,
        BackRight = gl::BACK_RIGHT,
        Front = gl::FRONT,
        Back = gl::BACK,
        Left = gl::LEFT,
        Right = gl::RIGHT,
        FrontAndBack = gl::FRONT_AND_BACK,
    }
}

gl_enum! {
    pub enum PixelFormat {
        ColorIndex = gl::COLOR_INDEX,
        StencilIndex = gl::STENCIL_INDEX,
        DepthComponent = gl::DEPTH_COMPONENT,
        Red = gl::RED,
        Green = gl::GREEN,
        Blue = gl::BLUE,
        Alpha = gl::ALPHA,
        RGB = gl::RGB,
        RGBA = gl::RGBA,
        Luminance = gl::LUMINANCE,
        LuminanceAlpha = gl::LUMINANCE_ALPHA,
    }
}

gl_enum! {
    pub enum PixelType {
        UnsignedByte = gl::UNSIGNED_BYTE,
        Byte = gl::BYTE,
        Bitmap = gl::BITMAP,
        UnsignedShort = gl::UNSIGNED_SHORT,
        Short = gl::SHORT,
        UnsignedInt = gl::UNSIGNED_INT,
        Int = gl::INT,
        Float = gl::FLOAT,
    }
}

gl_enum! {
    pub enum TextureTarget {
        Texture1D = gl::TEXTURE_1D,
        Texture2D = gl::TEXTURE_2D,
    }
}

gl_enum! {
    pub enum TextureParameter {
        MinFilter = gl::TEXTURE_MIN_FILTER,
        MagFilter = gl::TEXTURE_MAG_FILTER,
        WrapS = gl::TEXTURE_WRAP_S,
        WrapT = gl::TEXTURE_WRAP_T,
        BorderColor = gl::TEXTURE_BORDER_COLOR,
    }
}

impl TextureParameter {
    /// How many values the parameter has.
    pub fn count(self) -> usize {
        match self {
            TextureParameter::BorderColor => 4,
            _ => 1,
        }
    }
}

gl_enum! {
    /// Per-mipmap-level parameters for `glGetTexLevelParameter*`.
    pub enum LevelParameter {
        Width = gl::TEXTURE_WIDTH,
        Height = gl::TEXTURE_HEIGHT,
        InternalFormat = gl::TEXTURE_INTERNAL_FORMAT,
        Border = gl::TEXTURE_BORDER,
    }
}

gl_enum! {
    pub enum PixelStoreParameter {
        UnpackSwapBytes = gl::UNPACK_SWAP_BYTES,
        UnpackLsbFirst = gl::UNPACK_LSB_FIRST,
        UnpackRowLength = gl::UNPACK_ROW_LENGTH,
        UnpackSkipRows = gl::UNPACK_SKIP_ROWS,
        UnpackSkipPixels = gl::UNPACK_SKIP_PIXELS,
        UnpackAlignment = gl::UNPACK_ALIGNMENT,
        PackSwapBytes = gl::PACK_SWAP_BYTES,
        PackLsbFirst = gl::PACK_LSB_FIRST,
        PackRowLength = gl::PACK_ROW_LENGTH,
        PackSkipRows = gl::PACK_SKIP_ROWS,
        PackSkipPixels = gl::PACK_SKIP_PIXELS,
        PackAlignment = gl::PACK_ALIGNMENT,
    }
}

gl_enum! {
    pub enum StringName {
        Vendor = gl::VENDOR,
        Renderer = gl::RENDERER,
        Version = gl::VERSION,
        Extensions = gl::EXTENSIONS,
    }
}

/// Buffers to clear with `glClear`. Combine with `|`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClearMask(GLbitfield);

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask(gl::COLOR_BUFFER_BIT);
    pub const DEPTH: ClearMask = ClearMask(gl::DEPTH_BUFFER_BIT);
    pub const STENCIL: ClearMask = ClearMask(gl::STENCIL_BUFFER_BIT);
    pub const ACCUM: ClearMask = ClearMask(gl::ACCUM_BUFFER_BIT);

    pub const fn bits(self) -> GLbitfield {
        self.0
    }
}

impl std::ops::BitOr for ClearMask {
    type Output = ClearMask;

    fn bitor(self, other: ClearMask) -> ClearMask {
        ClearMask(self.0 | other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values() {
        assert_eq!(Face::FrontAndBack.raw(), 0x0408);
        assert_eq!(PolygonMode::from_raw(0x1B01), Some(PolygonMode::Line));
        assert_eq!(PolygonMode::from_raw(0x1234), None);
        assert_eq!(PixelType::Bitmap.raw(), 0x1A00);
        assert_eq!((ClearMask::COLOR | ClearMask::DEPTH).bits(), 0x4100);
    }
}
