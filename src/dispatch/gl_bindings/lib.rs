/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! This package contains OpenGL types and constants generated with the
//! `gl_generator` crate.

#[allow(warnings)]
pub mod gl11compat {
    include!(concat!(env!("OUT_DIR"), "/gl11compat.rs"));
}
