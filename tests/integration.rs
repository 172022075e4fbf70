/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! End-to-end tests: resolve tables against the mock driver and call through
//! them with the typed API.

use gldispatch::dispatch::mock::{self, MockConfig};
use gldispatch::dispatch::{gl_raw, Api, ApiVersion, EntryPoint, Profile, ResolveMode, SlotState};
use gldispatch::error::GLError;
use gldispatch::gl10::{ClearMask, Face, PolygonMode, GL10};
use gldispatch::options::{ErrorChecking, Options};

fn checked_options() -> Options {
    Options {
        error_checking: ErrorChecking::Always,
        ..Default::default()
    }
}

fn load(config: MockConfig, options: &Options) -> GL10 {
    mock::install(config);
    let mut gl = GL10::new(options);
    unsafe { gl.load_with(mock::get_proc_address, ResolveMode::Rebind) }.unwrap();
    mock::take_calls();
    gl
}

#[test]
fn gles2_without_polygon_mode() {
    let gl = load(MockConfig::new("OpenGL ES 2.0 Mesa 23.1.4"), &checked_options());

    unsafe { gl.Clear(ClearMask::COLOR) }.unwrap();
    assert_eq!(
        unsafe { gl.PolygonMode(Face::FrontAndBack, PolygonMode::Line) },
        Err(GLError::FeatureUnavailable {
            name: "glPolygonMode",
            capability: "GL_NV_polygon_mode"
        })
    );
    assert_eq!(
        unsafe { gl.PolygonMode(Face::FrontAndBack, PolygonMode::Line) }
            .unwrap_err()
            .to_string(),
        "glPolygonMode is unavailable (expected to be provided by GL_NV_polygon_mode)"
    );
    // The unavailable command never reached the driver.
    assert_eq!(mock::take_calls(), ["glClear(0x4000)", "glGetError()"]);
}

#[test]
fn gles2_polygon_mode_through_extension() {
    let gl = load(
        MockConfig::new("OpenGL ES 3.2 NVIDIA 535.54.03")
            .with_extensions(&["GL_NV_polygon_mode"])
            .with_alias("glPolygonModeNV", "glPolygonMode"),
        &checked_options(),
    );
    assert_eq!(
        gl.table().bound_name(EntryPoint::PolygonMode),
        Some("glPolygonModeNV")
    );
    unsafe { gl.PolygonMode(Face::Front, PolygonMode::Point) }.unwrap();
    assert_eq!(
        mock::take_calls(),
        ["glPolygonMode(0x404, 0x1b00)", "glGetError()"]
    );
}

#[test]
fn disabled_extensions_are_hidden() {
    let options = Options {
        disabled_extensions: vec!["GL_NV_polygon_mode".to_string()],
        ..checked_options()
    };
    let gl = load(
        MockConfig::new("OpenGL ES 3.2")
            .with_extensions(&["GL_NV_polygon_mode", "GL_OES_depth24"])
            .with_alias("glPolygonModeNV", "glPolygonMode"),
        &options,
    );
    let capabilities = gl.capabilities().unwrap();
    assert!(!capabilities.has_extension("GL_NV_polygon_mode"));
    assert!(capabilities.has_extension("GL_OES_depth24"));
    assert_eq!(
        gl.table().state(EntryPoint::PolygonMode),
        SlotState::Unavailable {
            capability: "GL_NV_polygon_mode"
        }
    );
}

#[test]
fn resolving_again_is_idempotent() {
    mock::install(MockConfig::new("2.1 Mesa 23.1.4").with_extensions(&["GL_EXT_abgr"]));
    let mut gl = GL10::new(&checked_options());

    let first = unsafe { gl.load_with(mock::get_proc_address, ResolveMode::Reuse) }.unwrap();
    assert!(!first.skipped);
    assert_eq!(first.unavailable, [("glGetStringi", "GL_VERSION_3_0")]);
    let states: Vec<_> = gl.table().iter().collect();

    let second = unsafe { gl.load_with(mock::get_proc_address, ResolveMode::Reuse) }.unwrap();
    assert!(second.skipped);
    let third = unsafe { gl.load_with(mock::get_proc_address, ResolveMode::Rebind) }.unwrap();
    assert!(!third.skipped);
    assert_eq!(third, first);
    assert_eq!(gl.table().iter().collect::<Vec<_>>(), states);
}

#[test]
fn core_profile_and_indexed_extensions() {
    let gl = load(
        MockConfig::new("4.6.0 NVIDIA 535.54.03")
            .with_extensions(&["GL_ARB_debug_output", "GL_KHR_debug"])
            .with_profile_mask(0x1),
        &checked_options(),
    );
    let capabilities = gl.capabilities().unwrap();
    assert_eq!(capabilities.profile, Profile::Core);
    assert_eq!(capabilities.version.api, Api::GL);
    assert_eq!(
        capabilities.extensions().collect::<Vec<_>>(),
        ["GL_ARB_debug_output", "GL_KHR_debug"]
    );
    assert!(gl.table().is_available(EntryPoint::GetStringi));
}

#[test]
fn missing_bootstrap_command_fails_loading() {
    mock::install(MockConfig::new("2.1").without_symbol("glGetError"));
    let mut gl = GL10::new(&Options::default());
    let error = unsafe { gl.load_with(mock::get_proc_address, ResolveMode::Rebind) }.unwrap_err();
    assert!(error.contains("glGetError"), "{}", error);
    assert!(gl.capabilities().is_none());
}

#[test]
fn webgl_context() {
    let gl = load(
        MockConfig::new("WebGL 2.0 (OpenGL ES 3.0 Chromium)"),
        &checked_options(),
    );
    let capabilities = gl.capabilities().unwrap();
    assert_eq!(capabilities.profile, Profile::WebGL);
    assert_eq!(capabilities.version, ApiVersion::new(Api::GLES2, 3, 0));
    assert!(gl.table().is_available(EntryPoint::GetStringi));
    assert!(!gl.table().is_available(EntryPoint::ClearDepth));
}

#[test]
fn bootstrap_needs_no_float_queries() {
    let gl = load(
        MockConfig::new("2.1").without_symbol("glGetFloatv"),
        &checked_options(),
    );
    assert!(gl.capabilities().is_some());
    assert_eq!(
        unsafe { gl.GetFloatv(gl_raw::LINE_WIDTH, &mut [0.0]) },
        Err(GLError::FeatureUnavailable {
            name: "glGetFloatv",
            capability: "GL_VERSION_1_0"
        })
    );
}

#[test]
fn missing_symbol_is_unavailable_not_fatal() {
    let gl = load(
        MockConfig::new("2.1").without_symbol("glLogicOp"),
        &checked_options(),
    );
    assert!(!gl.table().is_available(EntryPoint::LogicOp));
    assert!(gl.table().is_available(EntryPoint::BlendFunc));
    assert!(matches!(
        unsafe { gl.LogicOp(gldispatch::gl10::LogicOp::Xor) },
        Err(GLError::FeatureUnavailable {
            name: "glLogicOp",
            capability: "GL_VERSION_1_0"
        })
    ));
}

#[test]
fn tables_are_per_thread() {
    let gles = load(MockConfig::new("OpenGL ES 2.0"), &checked_options());

    let handle = std::thread::spawn(|| {
        let gl = load(MockConfig::new("2.1"), &checked_options());
        unsafe { gl.PolygonMode(Face::Back, PolygonMode::Fill) }.unwrap();
        gl.capabilities().unwrap().version.api
    });
    assert_eq!(handle.join().unwrap(), Api::GL);

    // Nothing the other thread did is visible here.
    assert!(!gles.table().is_available(EntryPoint::PolygonMode));
    assert!(mock::take_calls().is_empty());
}
