//! # Content Codec
//!
//! Note bodies are never stored as typed. They go through two steps:
//!
//! 1. [`validate`]: length and emptiness checks, then stripping of executable
//!    HTML constructs. This runs once, on the way in.
//! 2. [`encode`]: a reversible Base64 transform of the UTF-8 bytes. The stored
//!    `content` field of a [`Note`](crate::model::Note) is always the encoded form.
//!
//! [`decode`] reverses step 2. It never fails: anything that is not a product of
//! [`encode`] decodes to [`CORRUPTED_NOTE`], so one damaged entry cannot keep the
//! rest of a domain's list from rendering or exporting.
//!
//! ## Not Encryption
//!
//! The encoding is obfuscation, not confidentiality. Anyone with the store file
//! can read every note. Swapping in real cryptography would make existing stores
//! undecodable, so it is deliberately not done here.
//!
//! ## Sanitization
//!
//! | Pattern | Example |
//! |---------|---------|
//! | script blocks | `<script>alert(1)</script>` |
//! | `javascript:` URIs | `javascript:void(0)` |
//! | inline event-handler prefixes | `onclick =` |
//!
//! Matching is case-insensitive and lossy: benign text such as `onion = 3`
//! loses its `onion =` part. Stripping is repeated until nothing matches, so
//! re-validating already-validated text returns it unchanged.

use crate::error::{NotesError, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;

/// Shown in place of a note whose stored content cannot be decoded.
pub const CORRUPTED_NOTE: &str = "[Corrupted note]";

/// Maximum note length, in characters.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Decoder that accepts input with or without trailing `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script regex"));
static JAVASCRIPT_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid uri regex"));
static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on[0-9a-z_]+\s*=").expect("valid handler regex"));

/// Encode plain text for storage.
///
/// Every Rust string is valid UTF-8, so there is no fault path: the function
/// always produces the Base64 form and never blocks note creation.
pub fn encode(plain_text: &str) -> String {
    STANDARD.encode(plain_text.as_bytes())
}

/// Decode stored content back into plain text.
///
/// Returns [`CORRUPTED_NOTE`] when the input is not valid Base64 or the bytes
/// are not valid UTF-8.
pub fn decode(stored_text: &str) -> String {
    match try_decode(stored_text) {
        Ok(text) => text,
        Err(reason) => {
            tracing::warn!(error = %reason, "stored note content cannot be decoded");
            CORRUPTED_NOTE.to_string()
        }
    }
}

/// Like [`decode`], but reports why decoding failed instead of substituting
/// the sentinel.
pub fn try_decode(stored_text: &str) -> std::result::Result<String, String> {
    let bytes = LENIENT
        .decode(stored_text)
        .map_err(|e| format!("not valid base64: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("not valid utf-8: {}", e))
}

/// Check and sanitize user-supplied note content.
///
/// Errors with [`NotesError::InvalidContent`] when the input is longer than
/// [`MAX_CONTENT_LENGTH`] characters, blank, or blank once executable
/// constructs are removed. Returns the trimmed, sanitized text otherwise.
pub fn validate(content: &str) -> Result<String> {
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(NotesError::InvalidContent(format!(
            "note content too long (max {} characters)",
            MAX_CONTENT_LENGTH
        )));
    }

    if content.trim().is_empty() {
        return Err(NotesError::InvalidContent(
            "note content cannot be empty".to_string(),
        ));
    }

    let sanitized = sanitize(content);
    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        return Err(NotesError::InvalidContent(
            "note content is empty after removing scripts".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

fn sanitize(content: &str) -> String {
    let mut current = content.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(text, "");
    let text = JAVASCRIPT_URI.replace_all(&text, "");
    EVENT_HANDLER.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_utf8_base64() {
        assert_eq!(encode("hello"), "aGVsbG8=");
        assert_eq!(encode("é"), "w6k=");
    }

    #[test]
    fn round_trips_multibyte_text() {
        let samples = [
            "hello",
            "Grüße aus Köln",
            "日本語のメモ",
            "emoji 🦀🎉 mixed",
            "line one\nline two\ttabbed",
            "",
        ];
        for sample in samples {
            assert_eq!(decode(&encode(sample)), sample);
        }
    }

    #[test]
    fn round_trips_generated_text() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5173_6e6f);
        for round in 0..200 {
            let len = match round {
                0 => 0,
                1 => MAX_CONTENT_LENGTH,
                _ => rng.gen_range(1..=MAX_CONTENT_LENGTH),
            };
            let text: String = (0..len).map(|_| rng.gen::<char>()).collect();
            assert_eq!(decode(&encode(&text)), text, "round {round}, {len} chars");
        }
    }

    #[test]
    fn try_decode_reports_failures() {
        assert_eq!(try_decode("aGVsbG8=").unwrap(), "hello");
        assert!(try_decode("%%%").unwrap_err().contains("base64"));
        assert!(try_decode(&STANDARD.encode([0xff])).unwrap_err().contains("utf-8"));
    }

    #[test]
    fn round_trips_long_text() {
        let long: String = "ab€🦀".repeat(2_500);
        assert_eq!(long.chars().count(), MAX_CONTENT_LENGTH);
        assert_eq!(decode(&encode(&long)), long);
    }

    #[test]
    fn decode_tolerates_missing_padding() {
        assert_eq!(decode("aGVsbG8"), "hello");
    }

    #[test]
    fn decode_invalid_base64_returns_sentinel() {
        assert_eq!(decode("not-valid-base-encoding"), CORRUPTED_NOTE);
        assert_eq!(decode("%%%"), CORRUPTED_NOTE);
    }

    #[test]
    fn decode_invalid_utf8_returns_sentinel() {
        let stored = STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert_eq!(decode(&stored), CORRUPTED_NOTE);
    }

    #[test]
    fn validate_trims_plain_text() {
        assert_eq!(validate("  buy milk \n").unwrap(), "buy milk");
    }

    #[test]
    fn validate_rejects_blank() {
        assert!(matches!(validate(""), Err(NotesError::InvalidContent(_))));
        assert!(matches!(
            validate("   \n\t "),
            Err(NotesError::InvalidContent(_))
        ));
    }

    #[test]
    fn validate_rejects_too_long() {
        let at_limit = "x".repeat(MAX_CONTENT_LENGTH);
        assert!(validate(&at_limit).is_ok());

        let over = "x".repeat(MAX_CONTENT_LENGTH + 1);
        match validate(&over) {
            Err(NotesError::InvalidContent(msg)) => assert!(msg.contains("too long")),
            other => panic!("expected InvalidContent, got {:?}", other),
        }
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let wide = "é".repeat(MAX_CONTENT_LENGTH);
        assert!(wide.len() > MAX_CONTENT_LENGTH);
        assert!(validate(&wide).is_ok());
    }

    #[test]
    fn validate_strips_script_blocks() {
        let out = validate("before<script type=\"x\">alert(1)\n</script>after").unwrap();
        assert_eq!(out, "beforeafter");

        let upper = validate("a<SCRIPT>x</SCRIPT>b").unwrap();
        assert_eq!(upper, "ab");
    }

    #[test]
    fn validate_strips_javascript_uris_and_handlers() {
        assert_eq!(
            validate("<a href=\"JavaScript:go()\">x</a>").unwrap(),
            "<a href=\"go()\">x</a>"
        );
        assert_eq!(
            validate("<img src=x onerror = \"boom()\">").unwrap(),
            "<img src=x  \"boom()\">"
        );
    }

    #[test]
    fn validate_rejects_content_that_is_only_script() {
        assert!(matches!(
            validate("<script>steal()</script>"),
            Err(NotesError::InvalidContent(_))
        ));
    }

    #[test]
    fn validate_is_idempotent_on_nested_patterns() {
        let inputs = [
            "jajavascript:vascript:alert(1)",
            "<scr<script>x</script>ipt>y</script>z",
            "ononclick=click= ok",
            "plain note",
            "  padded  ",
        ];
        for input in inputs {
            let once = validate(input).unwrap();
            let twice = validate(&once).unwrap();
            assert_eq!(once, twice, "input: {input}");
        }
    }

    #[test]
    fn validate_removes_reassembled_patterns() {
        assert_eq!(validate("jajavascript:vascript:run").unwrap(), "run");
    }
}
