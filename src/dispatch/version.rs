/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! API families and versions, as reported by `GL_VERSION` and as named by
//! registry features like `GL_VERSION_1_0`.

/// An API family. Versions are only comparable within one family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Api {
    /// Desktop OpenGL, any profile.
    GL,
    /// OpenGL ES 1.x.
    GLES1,
    /// OpenGL ES 2.0 and later.
    GLES2,
    /// OpenGL SC 2.0.
    GLSC2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiVersion {
    pub api: Api,
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
}

impl ApiVersion {
    pub const fn new(api: Api, major: u32, minor: u32) -> Self {
        ApiVersion {
            api,
            major,
            minor,
            revision: 0,
        }
    }

    /// Parse a `GL_VERSION` string, e.g. `"4.6.0 NVIDIA 535.54.03"`,
    /// `"OpenGL ES 3.2 Mesa 23.1.4"` or `"WebGL 2.0 (OpenGL ES 3.0 Chromium)"`.
    pub fn parse(string: &str) -> Result<Self, String> {
        let (major, mut minor, revision) = find_version_number(string)
            .ok_or_else(|| format!("Unrecognized GL_VERSION string {:?}", string))?;

        // Some drivers report e.g. "1.10" for 1.1.
        if minor >= 10 && minor % 10 == 0 {
            minor /= 10;
        }

        let api = if string.contains("ES") {
            if major == 1 {
                Api::GLES1
            } else {
                Api::GLES2
            }
        } else {
            Api::GL
        };

        // The first number in a WebGL 2 string is the WebGL version, but the
        // feature set is that of OpenGL ES 3.0.
        let major = if string.contains("WebGL 2") { 3 } else { major };

        Ok(ApiVersion {
            api,
            major,
            minor,
            revision,
        })
    }

    /// Parse a registry feature name like `GL_VERSION_2_1`,
    /// `GL_ES_VERSION_3_0`, `GL_VERSION_ES_CM_1_0` or `GL_SC_VERSION_2_0`.
    /// Returns [None] for anything else (i.e. extension names).
    pub fn parse_feature(feature: &str) -> Option<Self> {
        if feature == "GL_VERSION_ES_CM_1_0" {
            return Some(ApiVersion::new(Api::GLES1, 1, 0));
        }

        let (api, numbers) = if let Some(rest) = feature.strip_prefix("GL_VERSION_") {
            (Api::GL, rest)
        } else if let Some(rest) = feature.strip_prefix("GL_ES_VERSION_") {
            (Api::GLES2, rest)
        } else if let Some(rest) = feature.strip_prefix("GL_SC_VERSION_") {
            (Api::GLSC2, rest)
        } else {
            return None;
        };

        let (major, minor) = numbers.split_once('_')?;
        Some(ApiVersion::new(api, major.parse().ok()?, minor.parse().ok()?))
    }

    /// Whether this version provides everything `required` does: same API
    /// family, and the same or a later version.
    pub fn provides(&self, required: &ApiVersion) -> bool {
        self.api == required.api && (self.major, self.minor) >= (required.major, required.minor)
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.api {
            Api::GL => "OpenGL",
            Api::GLES1 | Api::GLES2 => "OpenGL ES",
            Api::GLSC2 => "OpenGL SC",
        };
        write!(f, "{} {}.{}", prefix, self.major, self.minor)
    }
}

/// Find the first `major.minor[.revision]` in a string.
fn find_version_number(string: &str) -> Option<(u32, u32, u32)> {
    let bytes = string.as_bytes();
    let digits_at = |start: usize| -> usize {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut i = 0;
    while i < bytes.len() {
        let major_len = digits_at(i);
        if major_len == 0 {
            i += 1;
            continue;
        }
        let dot = i + major_len;
        let minor_len = if bytes.get(dot) == Some(&b'.') {
            digits_at(dot + 1)
        } else {
            0
        };
        if minor_len == 0 {
            i = dot;
            continue;
        }

        let major = string[i..dot].parse().ok()?;
        let minor_end = dot + 1 + minor_len;
        let minor = string[dot + 1..minor_end].parse().ok()?;
        let revision_len = if bytes.get(minor_end) == Some(&b'.') {
            digits_at(minor_end + 1)
        } else {
            0
        };
        let revision = if revision_len > 0 {
            string[minor_end + 1..minor_end + 1 + revision_len]
                .parse()
                .ok()?
        } else {
            0
        };
        return Some((major, minor, revision));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_version_strings() {
        let v = ApiVersion::parse("4.6.0 NVIDIA 535.54.03").unwrap();
        assert_eq!(
            v,
            ApiVersion {
                api: Api::GL,
                major: 4,
                minor: 6,
                revision: 0
            }
        );

        let v = ApiVersion::parse("2.1 Metal - 83.1").unwrap();
        assert_eq!((v.api, v.major, v.minor), (Api::GL, 2, 1));

        let v = ApiVersion::parse("OpenGL ES 3.2 Mesa 23.1.4").unwrap();
        assert_eq!((v.api, v.major, v.minor), (Api::GLES2, 3, 2));

        let v = ApiVersion::parse("OpenGL ES-CM 1.1").unwrap();
        assert_eq!((v.api, v.major, v.minor), (Api::GLES1, 1, 1));

        let v = ApiVersion::parse("WebGL 2.0 (OpenGL ES 3.0 Chromium)").unwrap();
        assert_eq!((v.api, v.major, v.minor), (Api::GLES2, 3, 0));

        let v = ApiVersion::parse("1.10").unwrap();
        assert_eq!((v.major, v.minor), (1, 1));

        let v = ApiVersion::parse("3.3.14761 Compatibility Profile Context").unwrap();
        assert_eq!((v.major, v.minor, v.revision), (3, 3, 14761));

        assert!(ApiVersion::parse("no numbers here").is_err());
        assert!(ApiVersion::parse("version 4").is_err());
    }

    #[test]
    fn parse_features() {
        assert_eq!(
            ApiVersion::parse_feature("GL_VERSION_1_0"),
            Some(ApiVersion::new(Api::GL, 1, 0))
        );
        assert_eq!(
            ApiVersion::parse_feature("GL_ES_VERSION_3_1"),
            Some(ApiVersion::new(Api::GLES2, 3, 1))
        );
        assert_eq!(
            ApiVersion::parse_feature("GL_VERSION_ES_CM_1_0"),
            Some(ApiVersion::new(Api::GLES1, 1, 0))
        );
        assert_eq!(
            ApiVersion::parse_feature("GL_SC_VERSION_2_0"),
            Some(ApiVersion::new(Api::GLSC2, 2, 0))
        );
        assert_eq!(ApiVersion::parse_feature("GL_NV_polygon_mode"), None);
    }

    #[test]
    fn provides() {
        let es32 = ApiVersion::new(Api::GLES2, 3, 2);
        assert!(es32.provides(&ApiVersion::new(Api::GLES2, 2, 0)));
        assert!(es32.provides(&ApiVersion::new(Api::GLES2, 3, 1)));
        assert!(!es32.provides(&ApiVersion::new(Api::GL, 1, 0)));
        assert!(!ApiVersion::new(Api::GLES2, 2, 0).provides(&ApiVersion::new(Api::GLES2, 3, 0)));
    }
}
