/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! How much memory an image transfer touches.
//!
//! This follows the unpacking rules in section 3.6.3 of the OpenGL 1.0
//! specification (packing for `glReadPixels` and `glGetTexImage` mirrors
//! them).

use super::enums::{PixelFormat, PixelType};
use crate::dispatch::gl_raw::types::{GLint, GLsizei};

/// The subset of pack or unpack state that affects image size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelStore {
    pub alignment: GLint,
    pub row_length: GLint,
    pub skip_rows: GLint,
    pub skip_pixels: GLint,
}

impl Default for PixelStore {
    fn default() -> Self {
        PixelStore {
            alignment: 4,
            row_length: 0,
            skip_rows: 0,
            skip_pixels: 0,
        }
    }
}

pub fn components(format: PixelFormat) -> usize {
    match format {
        PixelFormat::RGBA => 4,
        PixelFormat::RGB => 3,
        PixelFormat::LuminanceAlpha => 2,
        _ => 1,
    }
}

/// Size of one component in bytes, or [None] for [PixelType::Bitmap].
pub fn component_size(type_: PixelType) -> Option<usize> {
    match type_ {
        PixelType::Bitmap => None,
        PixelType::UnsignedByte | PixelType::Byte => Some(1),
        PixelType::UnsignedShort | PixelType::Short => Some(2),
        PixelType::UnsignedInt | PixelType::Int | PixelType::Float => Some(4),
    }
}

/// Number of bytes, counted from the start of the buffer, that a transfer of
/// a `width` by `height` image may read or write. Negative or zero sizes
/// touch nothing (the driver rejects the former).
///
/// Saturates at [usize::MAX] rather than overflowing.
pub fn image_size(
    width: GLsizei,
    height: GLsizei,
    format: PixelFormat,
    type_: PixelType,
    store: &PixelStore,
) -> usize {
    if width <= 0 || height <= 0 {
        return 0;
    }
    let width = width as usize;
    let height = height as usize;
    let alignment = store.alignment.max(1) as usize;
    let row_length = if store.row_length > 0 {
        store.row_length as usize
    } else {
        width
    };
    let skip_rows = store.skip_rows.max(0) as usize;
    let skip_pixels = store.skip_pixels.max(0) as usize;

    let size = match component_size(type_) {
        Some(size) => {
            let group = components(format) * size;
            let row = if size >= alignment {
                row_length.checked_mul(group)
            } else {
                // Round each row up to a multiple of the alignment.
                row_length
                    .checked_mul(group)
                    .map(|bytes| bytes.div_ceil(alignment) * alignment)
            };
            let last_row = skip_pixels
                .checked_add(width)
                .and_then(|pixels| pixels.checked_mul(group));
            row.zip(last_row).and_then(|(row, last_row)| {
                (skip_rows + height - 1)
                    .checked_mul(row)?
                    .checked_add(last_row)
            })
        }
        // One bit per pixel, rows padded to the alignment.
        None => {
            let row = row_length.div_ceil(8 * alignment) * alignment;
            (skip_rows + height - 1)
                .checked_mul(row)
                .and_then(|rows| rows.checked_add((skip_pixels + width).div_ceil(8)))
        }
    };
    size.unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(
        width: GLsizei,
        height: GLsizei,
        format: PixelFormat,
        type_: PixelType,
        store: PixelStore,
    ) -> usize {
        image_size(width, height, format, type_, &store)
    }

    #[test]
    fn alignment() {
        let aligned_4 = PixelStore::default();
        let aligned_1 = PixelStore {
            alignment: 1,
            ..Default::default()
        };
        let aligned_8 = PixelStore {
            alignment: 8,
            ..Default::default()
        };

        // 9-byte rows are padded to 12 bytes, except for the last one.
        assert_eq!(size(3, 2, PixelFormat::RGB, PixelType::UnsignedByte, aligned_4), 21);
        assert_eq!(size(3, 2, PixelFormat::RGB, PixelType::UnsignedByte, aligned_1), 18);
        assert_eq!(size(4, 4, PixelFormat::RGBA, PixelType::UnsignedByte, aligned_4), 64);
        // 12-byte float rows are padded to 16 bytes.
        assert_eq!(size(1, 2, PixelFormat::RGB, PixelType::Float, aligned_8), 28);
        assert_eq!(size(2, 1, PixelFormat::LuminanceAlpha, PixelType::Short, aligned_8), 8);
    }

    #[test]
    fn row_length_and_skipping() {
        let store = PixelStore {
            row_length: 8,
            ..Default::default()
        };
        assert_eq!(size(2, 2, PixelFormat::RGBA, PixelType::UnsignedByte, store), 40);

        let store = PixelStore {
            skip_rows: 1,
            skip_pixels: 2,
            ..Default::default()
        };
        assert_eq!(size(2, 2, PixelFormat::RGBA, PixelType::UnsignedByte, store), 32);
    }

    #[test]
    fn bitmaps() {
        let aligned_1 = PixelStore {
            alignment: 1,
            ..Default::default()
        };
        assert_eq!(size(10, 3, PixelFormat::ColorIndex, PixelType::Bitmap, aligned_1), 6);
        assert_eq!(
            size(10, 3, PixelFormat::ColorIndex, PixelType::Bitmap, PixelStore::default()),
            10
        );
    }

    #[test]
    fn degenerate_sizes() {
        let store = PixelStore::default();
        assert_eq!(size(0, 10, PixelFormat::RGBA, PixelType::Float, store), 0);
        assert_eq!(size(10, -1, PixelFormat::RGBA, PixelType::Float, store), 0);
        // Overflows on every host, and must not wrap around.
        assert_eq!(
            size(GLsizei::MAX, GLsizei::MAX, PixelFormat::RGBA, PixelType::Float, store),
            usize::MAX
        );
    }
}
