/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Parsing and management of user-configurable options, e.g. for driver
//! error checking.

pub const DOCUMENTATION: &str = "\
Error checking options:
    --gl-error-checking=...
        Whether to call glGetError after every command and report what it
        returns. One of:

            never       Never check. Driver errors go unnoticed.
            debug       Check in debug builds only.
            always      Always check.

        The default is debug.

    --gl-suppress-errors
        Before every checked command, discard any errors the driver is still
        holding from earlier commands, so that only errors raised by the
        command itself are reported. Has no effect if error checking is off.

Resolution options:
    --gl-disable-extension=...
        Pretend the driver doesn't support an extension, e.g.
        --gl-disable-extension=GL_NV_polygon_mode. Entry points only provided
        by that extension become unavailable. This is useful for exercising
        fallback code paths.

        To disable several extensions, use several '--gl-disable-extension='
        arguments.

Context options:
    --gl-context=...
        The kind of context to create when a real context is needed. One of:

            gl10        OpenGL 1.0 (whatever the driver's default is)
            gl21compat  OpenGL 2.1 compatibility profile
            gl32core    OpenGL 3.2 core profile
            gles11      OpenGL ES 1.1
            gles20      OpenGL ES 2.0

        The default is gl21compat.
";

/// When to check the driver's error flag after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorChecking {
    Never,
    /// Only if `debug_assertions` are enabled.
    Debug,
    Always,
}

impl ErrorChecking {
    pub fn enabled(self) -> bool {
        match self {
            ErrorChecking::Never => false,
            ErrorChecking::Debug => cfg!(debug_assertions),
            ErrorChecking::Always => true,
        }
    }
}

/// Labels for the kinds of context that can be requested from the platform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum GLContextVersion {
    GL10,
    GL21Compat,
    GL32Core,
    GLES11,
    GLES20,
}

impl GLContextVersion {
    /// Convert from short name used for command-line arguments. Returns [Err]
    /// if name is not recognized.
    pub fn from_short_name(name: &str) -> Result<Self, ()> {
        match name {
            "gl10" => Ok(Self::GL10),
            "gl21compat" => Ok(Self::GL21Compat),
            "gl32core" => Ok(Self::GL32Core),
            "gles11" => Ok(Self::GLES11),
            "gles20" => Ok(Self::GLES20),
            _ => Err(()),
        }
    }
}

/// Struct containing all user-configurable options.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub error_checking: ErrorChecking,
    pub suppress_errors: bool,
    pub disabled_extensions: Vec<String>,
    pub context_version: GLContextVersion,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            error_checking: ErrorChecking::Debug,
            suppress_errors: false,
            disabled_extensions: Vec::new(),
            context_version: GLContextVersion::GL21Compat,
        }
    }
}

impl Options {
    /// Parse the command-line argument syntax for an option. Returns `Ok(true)`
    /// if the option was valid and has been applied, and `Ok(false)` if the
    /// option was not recognized.
    pub fn parse_argument(&mut self, arg: &str) -> Result<bool, String> {
        if let Some(value) = arg.strip_prefix("--gl-error-checking=") {
            self.error_checking = match value {
                "never" => ErrorChecking::Never,
                "debug" => ErrorChecking::Debug,
                "always" => ErrorChecking::Always,
                _ => return Err(format!("Unknown error checking mode {:?}", value)),
            };
        } else if arg == "--gl-suppress-errors" {
            self.suppress_errors = true;
        } else if let Some(value) = arg.strip_prefix("--gl-disable-extension=") {
            if !value.starts_with("GL_") {
                return Err(format!("{:?} is not an OpenGL extension name", value));
            }
            self.disabled_extensions.push(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--gl-context=") {
            self.context_version = GLContextVersion::from_short_name(value)
                .map_err(|_| format!("Unrecognized context version {:?}", value))?;
        } else {
            return Ok(false);
        };
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let mut options = Options::default();
        assert_eq!(options.parse_argument("--gl-error-checking=always"), Ok(true));
        assert_eq!(options.parse_argument("--gl-suppress-errors"), Ok(true));
        assert_eq!(
            options.parse_argument("--gl-disable-extension=GL_NV_polygon_mode"),
            Ok(true)
        );
        assert_eq!(options.parse_argument("--gl-context=gles20"), Ok(true));
        assert_eq!(options.parse_argument("--landscape-left"), Ok(false));

        assert_eq!(options.error_checking, ErrorChecking::Always);
        assert!(options.suppress_errors);
        assert_eq!(options.disabled_extensions, ["GL_NV_polygon_mode"]);
        assert_eq!(options.context_version, GLContextVersion::GLES20);

        assert!(options.parse_argument("--gl-error-checking=sometimes").is_err());
        assert!(options.parse_argument("--gl-disable-extension=NV_polygon_mode").is_err());
        assert!(options.parse_argument("--gl-context=vulkan").is_err());
    }

    #[test]
    fn error_checking_policy() {
        assert!(!ErrorChecking::Never.enabled());
        assert!(ErrorChecking::Always.enabled());
        assert_eq!(ErrorChecking::Debug.enabled(), cfg!(debug_assertions));
    }
}
