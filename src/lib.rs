/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! gldispatch resolves OpenGL entry points at runtime and calls through them.
//!
//! A "context" here always means an OpenGL (or OpenGL ES) rendering context,
//! as created by the platform layer. Entry point addresses are only valid for
//! the context they were looked up for, so each context gets its own table
//! (see [dispatch]), and the typed OpenGL 1.0 API ([gl10::GL10]) owns one.
//!
//! The command-line tool resolves a table for a context (real, with the
//! `sdl2` feature, or the [mock](dispatch::mock) driver) and reports what was
//! found.

// Allow items in the crate to have non-snake-case names, so GL commands can
// keep their GL names.
#![allow(non_snake_case)]

#[macro_use]
mod log;
pub mod dispatch;
pub mod error;
pub mod gl10;
pub mod options;
#[cfg(feature = "sdl2")]
mod window;

use dispatch::mock::{self, MockConfig};
use dispatch::{ResolveMode, ResolveReport};
use gl10::GL10;
use options::Options;

/// Current version, from `Cargo.toml`.
const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
Usage:
    gldispatch [options]

Creates an OpenGL context, resolves every entry point gldispatch knows about
for it, and prints a report of what was found.

Special options:
    --help
        Display this help text.

    --mock
        Use the built-in mock driver instead of a real context. This is the
        default if gldispatch was built without the sdl2 feature.

    --mock-version=...
        GL_VERSION string for the mock driver to report, e.g.
        --mock-version=\"OpenGL ES 2.0\". Implies --mock.

    --mock-extensions=...
        Comma-separated extensions for the mock driver to report, e.g.
        --mock-extensions=GL_NV_polygon_mode,GL_OES_depth24. Implies --mock.
";

pub fn main<T: Iterator<Item = String>>(mut args: T) -> Result<(), String> {
    echo!("gldispatch {}", VERSION);

    let _ = args.next(); // skip argv[0]

    let mut options = Options::default();
    let mut use_mock = !cfg!(feature = "sdl2");
    let mut mock_config = MockConfig::new("2.1 gldispatch");

    for arg in args {
        if arg == "--help" {
            echo!("{}", USAGE);
            echo!("{}", options::DOCUMENTATION);
            return Ok(());
        } else if arg == "--mock" {
            use_mock = true;
        } else if let Some(version) = arg.strip_prefix("--mock-version=") {
            mock_config.version = version.to_string();
            use_mock = true;
        } else if let Some(extensions) = arg.strip_prefix("--mock-extensions=") {
            let extensions: Vec<&str> = extensions
                .split(',')
                .filter(|extension| !extension.is_empty())
                .collect();
            mock_config = mock_config.with_extensions(&extensions);
            use_mock = true;
        } else if options.parse_argument(&arg)? {
            // Already applied.
        } else {
            echo!("{}", USAGE);
            echo!("{}", options::DOCUMENTATION);
            return Err(format!("Unexpected argument: {:?}", arg));
        }
    }

    let mut gl = GL10::new(&options);
    if use_mock {
        mock::install(mock_config);
        let report = unsafe { gl.load_with(mock::get_proc_address, ResolveMode::Rebind) }?;
        print_report(&gl, &report);
    } else {
        report_real(&mut gl, &options)?;
    }
    gl.teardown();
    Ok(())
}

#[cfg(feature = "sdl2")]
fn report_real(gl: &mut GL10, options: &Options) -> Result<(), String> {
    let mut window = window::Window::new("gldispatch", options.context_version)?;
    window.create_gl_context()?;
    let report = unsafe {
        gl.load_with(|name| window.gl_get_proc_address(name), ResolveMode::Rebind)
    }?;
    print_report(gl, &report);
    Ok(())
}

#[cfg(not(feature = "sdl2"))]
fn report_real(_gl: &mut GL10, _options: &Options) -> Result<(), String> {
    Err("gldispatch was built without the sdl2 feature, so only --mock is available".to_string())
}

fn print_report(gl: &GL10, report: &ResolveReport) {
    println!("Context: {}", gl.driver_description());
    if let Some(capabilities) = gl.capabilities() {
        println!(
            "Profile: {:?}, {} extensions{}",
            capabilities.profile,
            capabilities.extensions().count(),
            if capabilities.is_software_renderer() {
                " (software renderer)"
            } else {
                ""
            }
        );
    }
    println!(
        "Resolved: {}/{}",
        report.resolved.len(),
        dispatch::registry::ENTRY_POINTS.len()
    );
    if !report.unavailable.is_empty() {
        println!("Unavailable:");
        for (name, capability) in &report.unavailable {
            println!("    {} (expected to be provided by {})", name, capability);
        }
    }
    if !report.alternates.is_empty() {
        println!("Bound through alternate names:");
        for (name, bound_name) in &report.alternates {
            println!("    {} -> {}", name, bound_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> impl Iterator<Item = String> {
        args.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn mock_report() {
        assert_eq!(
            main(args(&[
                "gldispatch",
                "--mock-version=OpenGL ES 2.0",
                "--mock-extensions=GL_NV_polygon_mode",
            ])),
            Ok(())
        );
        assert!(main(args(&["gldispatch", "--mock", "--no-such-option"])).is_err());
    }
}
