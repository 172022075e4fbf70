/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Resolution of entry point addresses through a platform loader.
//!
//! The loader is whatever the platform layer provides for looking up GL
//! symbols in the current context: `SDL_GL_GetProcAddress`,
//! `eglGetProcAddress`, `wglGetProcAddress` and so on. Some of these return
//! small integers rather than null for unknown symbols, so those are treated
//! as failures too (see [is_valid_address]).

use super::capabilities::{Capabilities, Profile};
use super::gl_raw;
use super::gl_raw::types::*;
use super::registry::{commands, Command, EntryPoint, EntryPointDesc, ENTRY_POINTS};
use super::table::{EntryPointTable, SlotState};
use super::version::{Api, ApiVersion};
use std::ffi::{c_void, CStr};
use std::ptr::NonNull;

// Not in OpenGL 1.0, so gl_generator doesn't give us these.
pub(crate) const NUM_EXTENSIONS: GLenum = 0x821D;
pub(crate) const CONTEXT_PROFILE_MASK: GLenum = 0x9126;
pub(crate) const CONTEXT_CORE_PROFILE_BIT: GLint = 0x1;

/// What to do if the table has already been resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveMode {
    /// Do nothing if the table was resolved against equal capabilities.
    Reuse,
    /// Always look everything up again, overwriting the table.
    Rebind,
}

/// Summary of a call to [resolve].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Nothing was done because of [ResolveMode::Reuse].
    pub skipped: bool,
    pub resolved: Vec<&'static str>,
    /// Symbolic name and expected capability of each unavailable entry point.
    pub unavailable: Vec<(&'static str, &'static str)>,
    /// Symbolic name and bound name of each entry point that was found under
    /// an alternate name.
    pub alternates: Vec<(&'static str, &'static str)>,
}

/// Whether a loader result looks like a real function address. Null, `1`,
/// `2`, `3` and `-1` are all used by some loader to mean "not found".
pub fn is_valid_address(address: *const c_void) -> bool {
    !matches!(address as usize, 0 | 1 | 2 | 3 | usize::MAX)
}

/// The names to try for an entry point, in order. Empty if no requirement is
/// met by `capabilities`.
pub fn candidate_names(desc: &EntryPointDesc, capabilities: &Capabilities) -> Vec<&'static str> {
    let supported: Vec<_> = desc
        .requirements
        .iter()
        .filter(|requirement| capabilities.satisfies(requirement))
        .collect();

    let mut names = Vec::new();

    // Only the newest version matters: anything an older version exports
    // under another name is normally still exported by the newer one.
    if let Some(version) = supported
        .iter()
        .filter_map(|&requirement| {
            ApiVersion::parse_feature(requirement.feature).map(|v| (v, requirement))
        })
        .max_by_key(|(v, _)| (v.major, v.minor))
        .map(|(_, requirement)| requirement)
    {
        names.push(version.entry_point.unwrap_or(desc.name));
    }

    let mut extensions: Vec<_> = supported
        .iter()
        .filter(|requirement| !requirement.is_version())
        .collect();
    extensions.sort_by_key(|requirement| requirement.priority());
    for requirement in extensions {
        let name = requirement.entry_point.unwrap_or(desc.name);
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

fn resolve_one<F>(desc: &EntryPointDesc, loader: &mut F, capabilities: &Capabilities) -> SlotState
where
    F: FnMut(&str) -> *const c_void,
{
    for name in candidate_names(desc, capabilities) {
        let address = loader(name);
        if !is_valid_address(address) {
            continue;
        }
        if let Some(address) = NonNull::new(address as *mut c_void) {
            return SlotState::Resolved {
                address,
                bound_name: name,
            };
        }
    }
    SlotState::Unavailable {
        capability: desc.expected_capability(capabilities.version.api),
    }
}

/// Resolve every entry point in the registry into `table`.
///
/// `loader` must return addresses of functions with the native signatures
/// the registry declares, valid for the context `capabilities` describes,
/// since they will later be called through the table.
pub fn resolve<F>(
    table: &mut EntryPointTable,
    mut loader: F,
    capabilities: &Capabilities,
    mode: ResolveMode,
) -> ResolveReport
where
    F: FnMut(&str) -> *const c_void,
{
    if mode == ResolveMode::Reuse && table.capabilities() == Some(capabilities) {
        log_dbg!("Table already resolved for {}, reusing it", capabilities.version);
        return ResolveReport {
            skipped: true,
            ..Default::default()
        };
    }

    let mut report = ResolveReport::default();
    for desc in ENTRY_POINTS {
        let state = resolve_one(desc, &mut loader, capabilities);
        match state {
            SlotState::Resolved { bound_name, .. } => {
                report.resolved.push(desc.name);
                if bound_name != desc.name {
                    log_dbg!("{} bound through {}", desc.name, bound_name);
                    report.alternates.push((desc.name, bound_name));
                }
            }
            SlotState::Unavailable { capability } => {
                log_dbg!("{} is unavailable (needs {})", desc.name, capability);
                report.unavailable.push((desc.name, capability));
            }
            SlotState::Unresolved => unreachable!(),
        }
        table.set(desc.id, state);
    }
    table.set_resolved_against(Some(capabilities.clone()));

    log!(
        "Resolved {}/{} entry points for {} ({} unavailable, {} through alternate names)",
        report.resolved.len(),
        ENTRY_POINTS.len(),
        capabilities.version,
        report.unavailable.len(),
        report.alternates.len()
    );
    report
}

/// Look up a bootstrap command by its primary name, before anything is known
/// about the context.
unsafe fn bootstrap_function<C, F>(loader: &mut F) -> Result<C::Pointer, String>
where
    C: Command,
    F: FnMut(&str) -> *const c_void,
{
    let name = C::ENTRY_POINT.name();
    let address = loader(name);
    if !is_valid_address(address) {
        return Err(format!(
            "Couldn't load {}, which is needed to query the context",
            name
        ));
    }
    assert_eq!(
        std::mem::size_of::<C::Pointer>(),
        std::mem::size_of::<*const c_void>()
    );
    Ok(std::mem::transmute_copy::<*const c_void, C::Pointer>(&address))
}

unsafe fn read_string(
    get_string: <commands::GetString as Command>::Pointer,
    name: GLenum,
) -> Option<String> {
    let string = get_string(name);
    if string.is_null() {
        None
    } else {
        Some(
            CStr::from_ptr(string.cast())
                .to_string_lossy()
                .into_owned(),
        )
    }
}

/// Ask the current context what it is: version, profile, vendor, renderer
/// and extensions.
///
/// # Safety
/// A context must be current on this thread, and `loader` must return
/// addresses valid for it.
pub unsafe fn query_capabilities<F>(mut loader: F) -> Result<Capabilities, String>
where
    F: FnMut(&str) -> *const c_void,
{
    for &entry_point in EntryPoint::BOOTSTRAP {
        let name = entry_point.name();
        if !is_valid_address(loader(name)) {
            return Err(format!(
                "Couldn't load {}, which is needed to query the context",
                name
            ));
        }
    }
    let get_error = bootstrap_function::<commands::GetError, _>(&mut loader)?;
    let get_string = bootstrap_function::<commands::GetString, _>(&mut loader)?;
    let get_integerv = bootstrap_function::<commands::GetIntegerv, _>(&mut loader)?;

    let drain_errors = || {
        for _ in 0..32 {
            if get_error() == gl_raw::NO_ERROR {
                break;
            }
        }
    };
    drain_errors();

    let version_string = read_string(get_string, gl_raw::VERSION)
        .ok_or_else(|| "glGetString(GL_VERSION) returned null, is a context current?".to_string())?;
    let version = ApiVersion::parse(&version_string)?;
    let vendor = read_string(get_string, gl_raw::VENDOR).unwrap_or_default();
    let renderer = read_string(get_string, gl_raw::RENDERER).unwrap_or_default();

    let mut capabilities = Capabilities::new(version, Vec::<String>::new())
        .with_driver_strings(&vendor, &renderer);

    if version_string.contains("WebGL") {
        capabilities = capabilities.with_profile(Profile::WebGL);
    } else if version.api == Api::GL && (version.major, version.minor) >= (3, 2) {
        let mut mask: GLint = 0;
        get_integerv(CONTEXT_PROFILE_MASK, &mut mask);
        if mask & CONTEXT_CORE_PROFILE_BIT != 0 {
            capabilities = capabilities.with_profile(Profile::Core);
        }
    }

    // GL_EXTENSIONS can't be passed to glGetString in a core profile.
    if version.api == Api::GL && version.major >= 3 {
        let get_stringi = bootstrap_function::<commands::GetStringi, _>(&mut loader)?;
        let mut count: GLint = 0;
        get_integerv(NUM_EXTENSIONS, &mut count);
        for i in 0..count.max(0) {
            let extension = get_stringi(gl_raw::EXTENSIONS, i as GLuint);
            if !extension.is_null() {
                let extension = CStr::from_ptr(extension.cast()).to_string_lossy();
                capabilities.add_extension_string(&extension);
            }
        }
    } else if let Some(extensions) = read_string(get_string, gl_raw::EXTENSIONS) {
        capabilities.add_extension_string(&extensions);
    }

    drain_errors();

    log!(
        "Context is {} ({:?} profile), {} / {}, {} extensions",
        capabilities.version,
        capabilities.profile,
        vendor,
        renderer,
        capabilities.extensions().count()
    );
    Ok(capabilities)
}
