//! Lossy text repair.
//!
//! Every byte sequence that ends up in user-facing text (provider bodies, tool
//! output, subprocess diagnostics) goes through [`repair_bytes`]. Invalid UTF-8
//! is replaced with U+FFFD instead of being rejected, so a corrupt payload
//! degrades to replacement characters and never to an error.

use std::borrow::Cow;

/// Decode `bytes` as UTF-8, substituting U+FFFD for every invalid sequence.
///
/// Borrows when the input is already valid.
pub fn repair_bytes(bytes: &[u8]) -> Cow<'_, str> {
    let repaired = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = repaired {
        log::debug!(
            "replaced invalid UTF-8 in a {}-byte payload",
            bytes.len()
        );
    }
    repaired
}
