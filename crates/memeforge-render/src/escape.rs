// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caption escaping for the memegen-style templating API.
//!
//! The API uses `-`, `_`, and `/` as path syntax, so literal occurrences
//! must be rewritten BEFORE percent-encoding: `-` becomes `--`, `_`
//! becomes `__`, and `/` becomes `~s`. Percent-encoding alone is not
//! enough because the API decodes the path and would then re-interpret
//! the delimiters.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters percent-encoded within a caption path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\');

/// Escape one caption for inclusion as a URL path segment.
///
/// Delimiter rewriting happens first, then percent-encoding; the two
/// steps compose injectively for the delimiter characters.
pub fn escape_caption(text: &str) -> String {
    let rewritten = text
        .replace('-', "--")
        .replace('_', "__")
        .replace('/', "~s");
    utf8_percent_encode(&rewritten, SEGMENT).to_string()
}

/// Join escaped captions into the API path, slot order preserved.
///
/// Zero captions yield the API's blank-slot placeholder so the path
/// still resolves to a renderable image.
pub fn caption_path(texts: &[String]) -> String {
    if texts.is_empty() {
        return "_".to_string();
    }
    texts
        .iter()
        .map(|t| escape_caption(t))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of the API's delimiter convention, used to verify the
    /// escape round trip.
    fn unescape_caption(escaped: &str) -> String {
        let decoded = percent_encoding::percent_decode_str(escaped)
            .decode_utf8()
            .unwrap()
            .to_string();
        decoded
            .replace("~s", "/")
            .replace("__", "_")
            .replace("--", "-")
    }

    #[test]
    fn dash_doubles() {
        assert_eq!(escape_caption("to-do"), "to--do");
    }

    #[test]
    fn underscore_doubles() {
        assert_eq!(escape_caption("snake_case"), "snake__case");
    }

    #[test]
    fn slash_becomes_tilde_s() {
        assert_eq!(escape_caption("24/7 support"), "24~s7%20support");
    }

    #[test]
    fn delimiters_rewritten_before_percent_encoding() {
        // The space is percent-encoded but the dash rewrite stays literal,
        // proving rewrite-then-encode order.
        assert_eq!(escape_caption("pay-day loans"), "pay--day%20loans");
    }

    #[test]
    fn escape_round_trips_through_inverse_convention() {
        for original in [
            "plain text",
            "to-do list",
            "snake_case_caption",
            "24/7 support",
            "mixed-_/case",
            "---",
            "___",
        ] {
            assert_eq!(
                unescape_caption(&escape_caption(original)),
                original,
                "round trip failed for {original:?}"
            );
        }
    }

    #[test]
    fn distinct_captions_never_collide() {
        let inputs = [
            "a-b", "a--b", "a_b", "a__b", "a/b", "a b", "ab", "a%20b", "a?b",
        ];
        let mut seen = std::collections::HashSet::new();
        for input in inputs {
            assert!(
                seen.insert(escape_caption(input)),
                "collision on {input:?}"
            );
        }
    }

    #[test]
    fn zero_captions_yield_placeholder_segment() {
        assert_eq!(caption_path(&[]), "_");
    }

    #[test]
    fn captions_join_in_slot_order() {
        let texts = vec!["top text".to_string(), "bottom-text".to_string()];
        assert_eq!(caption_path(&texts), "top%20text/bottom--text");
    }
}
