/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Errors reported by dispatched calls.

use crate::dispatch::gl_raw;
use crate::dispatch::gl_raw::types::GLenum;
use std::fmt;

/// A code from the driver's sticky error flag, other than `GL_NO_ERROR`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DriverError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    /// Something newer than OpenGL 1.0, e.g.
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`, or garbage from a broken driver.
    Unknown(GLenum),
}

impl DriverError {
    /// Returns [None] for `GL_NO_ERROR`.
    pub fn from_code(code: GLenum) -> Option<Self> {
        Some(match code {
            gl_raw::NO_ERROR => return None,
            gl_raw::INVALID_ENUM => DriverError::InvalidEnum,
            gl_raw::INVALID_VALUE => DriverError::InvalidValue,
            gl_raw::INVALID_OPERATION => DriverError::InvalidOperation,
            gl_raw::STACK_OVERFLOW => DriverError::StackOverflow,
            gl_raw::STACK_UNDERFLOW => DriverError::StackUnderflow,
            gl_raw::OUT_OF_MEMORY => DriverError::OutOfMemory,
            other => DriverError::Unknown(other),
        })
    }

    pub fn code(self) -> GLenum {
        match self {
            DriverError::InvalidEnum => gl_raw::INVALID_ENUM,
            DriverError::InvalidValue => gl_raw::INVALID_VALUE,
            DriverError::InvalidOperation => gl_raw::INVALID_OPERATION,
            DriverError::StackOverflow => gl_raw::STACK_OVERFLOW,
            DriverError::StackUnderflow => gl_raw::STACK_UNDERFLOW,
            DriverError::OutOfMemory => gl_raw::OUT_OF_MEMORY,
            DriverError::Unknown(code) => code,
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverError::InvalidEnum => "GL_INVALID_ENUM",
            DriverError::InvalidValue => "GL_INVALID_VALUE",
            DriverError::InvalidOperation => "GL_INVALID_OPERATION",
            DriverError::StackOverflow => "GL_STACK_OVERFLOW",
            DriverError::StackUnderflow => "GL_STACK_UNDERFLOW",
            DriverError::OutOfMemory => "GL_OUT_OF_MEMORY",
            DriverError::Unknown(code) => return write!(f, "unknown GL error {:#x}", code),
        };
        write!(f, "{} ({:#x})", name, self.code())
    }
}

impl std::error::Error for DriverError {}

/// Error from a dispatched call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GLError {
    /// The entry point was never resolved for this context. `capability` is
    /// the version or extension that was expected to provide it, so callers
    /// can log it or fall back to another code path.
    FeatureUnavailable {
        name: &'static str,
        capability: &'static str,
    },
    /// The driver raised its error flag during the call.
    Driver(DriverError),
    /// A slice is too short for the data the driver would read or write. The
    /// native call was not made.
    BufferTooSmall {
        name: &'static str,
        required: usize,
        provided: usize,
    },
    /// The number of values a state query writes isn't known for `pname`, so
    /// no buffer could be sized for it. The native call was not made.
    UnknownQuery { name: &'static str, pname: GLenum },
}

impl fmt::Display for GLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GLError::FeatureUnavailable { name, capability } => write!(
                f,
                "{} is unavailable (expected to be provided by {})",
                name, capability
            ),
            GLError::Driver(error) => write!(f, "driver reported {}", error),
            GLError::BufferTooSmall {
                name,
                required,
                provided,
            } => write!(
                f,
                "{} needs a buffer of {} bytes or elements, {} given",
                name, required, provided
            ),
            GLError::UnknownQuery { name, pname } => write!(
                f,
                "{} doesn't know how many values {:#x} has",
                name, pname
            ),
        }
    }
}

impl std::error::Error for GLError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GLError::Driver(error) => Some(error),
            _ => None,
        }
    }
}

impl From<DriverError> for GLError {
    fn from(error: DriverError) -> Self {
        GLError::Driver(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(DriverError::from_code(0), None);
        assert_eq!(DriverError::from_code(0x0500), Some(DriverError::InvalidEnum));
        assert_eq!(DriverError::from_code(0x0505), Some(DriverError::OutOfMemory));
        assert_eq!(
            DriverError::from_code(0x0506),
            Some(DriverError::Unknown(0x0506))
        );
        assert_eq!(DriverError::StackUnderflow.code(), 0x0504);
    }

    #[test]
    fn messages() {
        let error = GLError::FeatureUnavailable {
            name: "glPolygonMode",
            capability: "GL_NV_polygon_mode",
        };
        assert_eq!(
            error.to_string(),
            "glPolygonMode is unavailable (expected to be provided by GL_NV_polygon_mode)"
        );
        assert_eq!(
            GLError::from(DriverError::InvalidValue).to_string(),
            "driver reported GL_INVALID_VALUE (0x501)"
        );
        assert_eq!(
            GLError::UnknownQuery {
                name: "glGetIntegerv",
                pname: 0x86A3
            }
            .to_string(),
            "glGetIntegerv doesn't know how many values 0x86a3 has"
        );
    }
}
