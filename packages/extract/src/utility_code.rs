//! Utility/vendor code detection.
//!
//! Electric headers carry short circuit and vendor codes ("MHC", "CIC")
//! in the same `suite-name` shape as real tenants. A candidate that looks
//! like one of those is never used as a tenant name.

/// Internal vendor/circuit codes seen on bill headers.
const UTILITY_CODES: &[&str] = &["MHC", "CIC", "NBC", "MRC", "CRC", "DPS"];

/// Names this short are codes, not businesses.
const MAX_CODE_LEN: usize = 3;

/// Returns `true` if `name` is a known utility code (case-insensitive) or
/// is at most three characters long.
#[must_use]
pub fn looks_like_utility_code(name: &str) -> bool {
    if name.chars().count() <= MAX_CODE_LEN {
        return true;
    }
    let upper = name.to_uppercase();
    UTILITY_CODES.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_known_codes_in_any_case() {
        for code in UTILITY_CODES {
            assert!(looks_like_utility_code(code));
            assert!(looks_like_utility_code(&code.to_lowercase()));
        }
    }

    #[test]
    fn flags_short_strings() {
        assert!(looks_like_utility_code(""));
        assert!(looks_like_utility_code("A"));
        assert!(looks_like_utility_code("Joe"));
    }

    #[test]
    fn accepts_business_names() {
        assert!(!looks_like_utility_code("Trader Joes"));
        assert!(!looks_like_utility_code("Cafe Dulce"));
        assert!(!looks_like_utility_code("UVIB"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(looks_like_utility_code("Çaé"));
        assert!(!looks_like_utility_code("Çaée"));
    }
}
