/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Native entry point resolution and the per-context dispatch table.
//!
//! OpenGL functions can't be linked against like normal library functions:
//! their addresses have to be looked up at runtime, per context, through
//! whatever loader the platform provides, and which ones exist depends on the
//! version and extensions of the context. This module is organized as
//! follows:
//!
//! - [registry] is the static description of every entry point: its name,
//!   native signature, and the versions and extensions that provide it
//!   (possibly under another name).
//! - [version] and [capabilities] describe what a context supports.
//! - [resolver] looks up every entry point for a context through the loader
//!   and fills in an [EntryPointTable], after [query_capabilities] has asked
//!   the context about itself.
//! - [table] holds the result. It is owned by one context and can't leave the
//!   thread it was resolved on.
//! - [mock] is a software stand-in for a driver, for use in tests and by the
//!   command-line tool when there is no GPU.
//! - [gl_raw] provides types and constants generated from the Khronos API
//!   headers. There are deliberately no function bindings: all calls go
//!   through a table.
//!
//! The typed front end for OpenGL 1.0 is in [crate::gl10].
//!
//! Useful resources:
//! - [The OpenGL registry](https://github.com/KhronosGroup/OpenGL-Registry),
//!   particularly `xml/gl.xml`, which is where the requirements come from.
//! - [OpenGL 1.0 specification](https://registry.khronos.org/OpenGL/specs/gl/glspec10.pdf)
//! - [NV_polygon_mode](https://registry.khronos.org/OpenGL/extensions/NV/NV_polygon_mode.txt),
//!   the usual example of a command reaching OpenGL ES under another name.

pub mod capabilities;
pub mod mock;
pub mod registry;
pub mod resolver;
pub mod table;
pub mod version;

pub use gldispatch_gl_bindings::gl11compat as gl_raw;

pub use capabilities::{Capabilities, Profile};
pub use registry::{EntryPoint, Requirement};
pub use resolver::{query_capabilities, resolve, ResolveMode, ResolveReport};
pub use table::{EntryPointTable, SlotState};
pub use version::{Api, ApiVersion};
