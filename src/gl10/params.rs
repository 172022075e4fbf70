/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! How many values each `glGet*` state query writes.

use crate::dispatch::gl_raw;
use crate::dispatch::gl_raw::types::GLenum;
use crate::dispatch::resolver::{CONTEXT_PROFILE_MASK, NUM_EXTENSIONS};

pub struct ParamTable(pub &'static [(GLenum, usize)]);

impl ParamTable {
    /// Number of values written for `pname`, or [None] if it isn't in the
    /// table.
    pub fn count(&self, pname: GLenum) -> Option<usize> {
        self.0
            .iter()
            .find(|&&(candidate, _)| candidate == pname)
            .map(|&(_, count)| count)
    }
}

/// Table of `glGetBooleanv`/`glGetDoublev`/`glGetFloatv`/`glGetIntegerv`
/// parameters understood by an OpenGL 1.0 context, plus the two newer ones
/// needed to read extensions and the profile.
pub const GET_PARAMS: ParamTable = ParamTable(&[
    // Enables
    (gl_raw::ALPHA_TEST, 1),
    (gl_raw::AUTO_NORMAL, 1),
    (gl_raw::BLEND, 1),
    (gl_raw::COLOR_MATERIAL, 1),
    (gl_raw::CULL_FACE, 1),
    (gl_raw::DEPTH_TEST, 1),
    (gl_raw::DITHER, 1),
    (gl_raw::FOG, 1),
    (gl_raw::LIGHTING, 1),
    (gl_raw::LINE_SMOOTH, 1),
    (gl_raw::LINE_STIPPLE, 1),
    (gl_raw::NORMALIZE, 1),
    (gl_raw::POINT_SMOOTH, 1),
    (gl_raw::POLYGON_SMOOTH, 1),
    (gl_raw::POLYGON_STIPPLE, 1),
    (gl_raw::SCISSOR_TEST, 1),
    (gl_raw::STENCIL_TEST, 1),
    (gl_raw::TEXTURE_1D, 1),
    (gl_raw::TEXTURE_2D, 1),
    // Rasterization
    (gl_raw::CULL_FACE_MODE, 1),
    (gl_raw::FRONT_FACE, 1),
    (gl_raw::POLYGON_MODE, 2),
    (gl_raw::LINE_WIDTH, 1),
    (gl_raw::LINE_WIDTH_RANGE, 2),
    (gl_raw::LINE_WIDTH_GRANULARITY, 1),
    (gl_raw::POINT_SIZE, 1),
    (gl_raw::POINT_SIZE_RANGE, 2),
    (gl_raw::POINT_SIZE_GRANULARITY, 1),
    (gl_raw::VIEWPORT, 4),
    (gl_raw::MAX_VIEWPORT_DIMS, 2),
    (gl_raw::DEPTH_RANGE, 2),
    // Per-fragment operations
    (gl_raw::SCISSOR_BOX, 4),
    (gl_raw::BLEND_SRC, 1),
    (gl_raw::BLEND_DST, 1),
    (gl_raw::LOGIC_OP_MODE, 1),
    (gl_raw::DEPTH_FUNC, 1),
    (gl_raw::STENCIL_FUNC, 1),
    (gl_raw::STENCIL_VALUE_MASK, 1),
    (gl_raw::STENCIL_REF, 1),
    (gl_raw::STENCIL_FAIL, 1),
    (gl_raw::STENCIL_PASS_DEPTH_FAIL, 1),
    (gl_raw::STENCIL_PASS_DEPTH_PASS, 1),
    // Framebuffers
    (gl_raw::DRAW_BUFFER, 1),
    (gl_raw::READ_BUFFER, 1),
    (gl_raw::COLOR_CLEAR_VALUE, 4),
    (gl_raw::DEPTH_CLEAR_VALUE, 1),
    (gl_raw::STENCIL_CLEAR_VALUE, 1),
    (gl_raw::COLOR_WRITEMASK, 4),
    (gl_raw::DEPTH_WRITEMASK, 1),
    (gl_raw::STENCIL_WRITEMASK, 1),
    (gl_raw::DOUBLEBUFFER, 1),
    (gl_raw::STEREO, 1),
    (gl_raw::RED_BITS, 1),
    (gl_raw::GREEN_BITS, 1),
    (gl_raw::BLUE_BITS, 1),
    (gl_raw::ALPHA_BITS, 1),
    (gl_raw::DEPTH_BITS, 1),
    (gl_raw::STENCIL_BITS, 1),
    (gl_raw::SUBPIXEL_BITS, 1),
    // Pixel storage
    (gl_raw::PACK_ALIGNMENT, 1),
    (gl_raw::PACK_ROW_LENGTH, 1),
    (gl_raw::PACK_SKIP_ROWS, 1),
    (gl_raw::PACK_SKIP_PIXELS, 1),
    (gl_raw::PACK_SWAP_BYTES, 1),
    (gl_raw::PACK_LSB_FIRST, 1),
    (gl_raw::UNPACK_ALIGNMENT, 1),
    (gl_raw::UNPACK_ROW_LENGTH, 1),
    (gl_raw::UNPACK_SKIP_ROWS, 1),
    (gl_raw::UNPACK_SKIP_PIXELS, 1),
    (gl_raw::UNPACK_SWAP_BYTES, 1),
    (gl_raw::UNPACK_LSB_FIRST, 1),
    // Textures
    (gl_raw::MAX_TEXTURE_SIZE, 1),
    // Hints
    (gl_raw::PERSPECTIVE_CORRECTION_HINT, 1),
    (gl_raw::POINT_SMOOTH_HINT, 1),
    (gl_raw::LINE_SMOOTH_HINT, 1),
    (gl_raw::POLYGON_SMOOTH_HINT, 1),
    (gl_raw::FOG_HINT, 1),
    // Fixed-function state
    (gl_raw::MATRIX_MODE, 1),
    (gl_raw::MODELVIEW_MATRIX, 16),
    (gl_raw::PROJECTION_MATRIX, 16),
    (gl_raw::TEXTURE_MATRIX, 16),
    (gl_raw::CURRENT_COLOR, 4),
    (gl_raw::CURRENT_NORMAL, 3),
    (gl_raw::CURRENT_TEXTURE_COORDS, 4),
    (gl_raw::FOG_COLOR, 4),
    (gl_raw::FOG_DENSITY, 1),
    (gl_raw::FOG_START, 1),
    (gl_raw::FOG_END, 1),
    (gl_raw::FOG_MODE, 1),
    // Newer than OpenGL 1.0
    (NUM_EXTENSIONS, 1),
    (CONTEXT_PROFILE_MASK, 1),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(GET_PARAMS.count(gl_raw::UNPACK_ALIGNMENT), Some(1));
        assert_eq!(GET_PARAMS.count(gl_raw::DEPTH_RANGE), Some(2));
        assert_eq!(GET_PARAMS.count(gl_raw::COLOR_CLEAR_VALUE), Some(4));
        assert_eq!(GET_PARAMS.count(gl_raw::MODELVIEW_MATRIX), Some(16));
        // GL_COMPRESSED_TEXTURE_FORMATS has a context-dependent count.
        assert_eq!(GET_PARAMS.count(0x86A3), None);
    }

    #[test]
    fn no_duplicates() {
        for (i, &(pname, _)) in GET_PARAMS.0.iter().enumerate() {
            assert!(
                !GET_PARAMS.0[i + 1..].iter().any(|&(other, _)| other == pname),
                "{:#x} is listed twice",
                pname
            );
        }
    }
}
