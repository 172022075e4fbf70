/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! What a context reports about itself: version, profile and extensions.

use super::registry::Requirement;
use super::version::{Api, ApiVersion};
use std::collections::BTreeSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    Core,
    Compatibility,
    /// The only profile of OpenGL ES 1.x that gldispatch supports.
    Common,
    WebGL,
}

/// The capability set of a context. Two contexts with equal capabilities
/// resolve to the same entry point states, which is what
/// [super::ResolveMode::Reuse] relies on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub version: ApiVersion,
    pub profile: Profile,
    pub vendor: String,
    pub renderer: String,
    extensions: BTreeSet<String>,
}

impl Capabilities {
    pub fn new<I, S>(version: ApiVersion, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let profile = match version.api {
            Api::GLES1 => Profile::Common,
            _ => Profile::Compatibility,
        };
        Capabilities {
            version,
            profile,
            vendor: String::new(),
            renderer: String::new(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_driver_strings(mut self, vendor: &str, renderer: &str) -> Self {
        self.vendor = vendor.to_string();
        self.renderer = renderer.to_string();
        self
    }

    /// Add the extensions from a space-separated `GL_EXTENSIONS` string.
    pub fn add_extension_string(&mut self, extensions: &str) {
        self.extensions
            .extend(extensions.split_whitespace().map(str::to_string));
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Pretend the context lacks an extension. Returns `false` if it didn't
    /// have it in the first place.
    pub fn hide_extension(&mut self, name: &str) -> bool {
        self.extensions.remove(name)
    }

    /// Whether the renderer rasterizes on the CPU.
    pub fn is_software_renderer(&self) -> bool {
        ["llvmpipe", "softpipe", "SwiftShader"]
            .iter()
            .any(|name| self.renderer.contains(name))
    }

    /// Whether a requirement is met: it must apply to this context's API
    /// family, and either name a version no later than the context's, or
    /// name an extension the context has.
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        if !requirement.apis.contains(self.version.api) {
            return false;
        }
        match ApiVersion::parse_feature(requirement.feature) {
            Some(version) => self.version.provides(&version),
            None => self.has_extension(requirement.feature),
        }
    }
}
