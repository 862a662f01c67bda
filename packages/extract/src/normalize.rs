//! Tenant name normalization.
//!
//! Raw tenant spans pulled out of bill text carry bill-type suffixes,
//! underscores from file-style tokens and stray punctuation. The pipeline
//! here turns them into a stable display name that is safe to embed in a
//! filename.

use crate::corrections;

/// Case-insensitive markers after which a tenant span is noise.
const NOISE_MARKERS: &[&str] = &["electric", "_bill"];

/// Normalizes a raw tenant span.
///
/// The pipeline:
/// 1. Truncate at the first noise marker (`Electric`, `_Bill`)
/// 2. Replace underscores with spaces
/// 3. Trim
/// 4. Drop everything except alphanumerics, whitespace, `'`, `&` and `-`
/// 5. Trim
/// 6. Apply the first matching known-name correction
///
/// Steps 1-5 repeat until the value stops changing, so the result is
/// idempotent. An empty result means no tenant was found.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut cleaned = scrub(raw);

    // Dropping punctuation can splice a marker back together ("Elec.tric").
    loop {
        let again = scrub(&cleaned);
        if again == cleaned {
            break;
        }
        cleaned = again;
    }

    corrections::correct(&cleaned).map_or(cleaned, str::to_owned)
}

/// Steps 1-5 of [`normalize`].
fn scrub(raw: &str) -> String {
    let truncated = truncate_at_noise(raw).replace('_', " ");

    truncated
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '\'' | '&' | '-'))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Cuts `raw` at the earliest case-insensitive occurrence of any noise
/// marker.
fn truncate_at_noise(raw: &str) -> &str {
    let lower = raw.to_ascii_lowercase();
    NOISE_MARKERS
        .iter()
        .filter_map(|marker| lower.find(marker))
        .min()
        .map_or(raw, |idx| &raw[..idx])
}
