// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object storage backends for rendered MemeForge assets.
//!
//! Two implementations of the [`ObjectStore`] seam: a local filesystem
//! store for standalone/offline mode and an S3-compatible HTTP gateway
//! client for networked deployments.

pub mod fs;
pub mod http;

pub use fs::FsObjectStore;
pub use http::HttpObjectStore;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters percent-encoded in object names when building URLs.
const OBJECT_NAME: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'?')
    .add(b'/')
    .add(b'\\')
    .add(b'{')
    .add(b'}');

/// Percent-encode an object name for use as a URL path segment.
pub(crate) fn encode_object_name(object_name: &str) -> String {
    utf8_percent_encode(object_name, OBJECT_NAME).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_with_spaces_are_encoded() {
        assert_eq!(
            encode_object_name("Acme Payroll_drake_1.png"),
            "Acme%20Payroll_drake_1.png"
        );
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(encode_object_name("acme_drake_1.png"), "acme_drake_1.png");
    }
}
