//! Known tenant name corrections.
//!
//! Bill files often carry tenant names with the spaces squeezed out
//! ("TraderJoes") or with extra suffixes ("RoskiEyeInst"). These entries
//! map such fragments to the display name used for output files.

/// Ordered `(fragment, canonical)` pairs. The first fragment found
/// (case-insensitively) anywhere in a name replaces the whole name, so
/// order matters.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("CreditUnion", "Credit Union"),
    ("CafeDulce", "Cafe Dulce"),
    ("RoskiEyeInst", "RoskiEye"),
    ("JimmyJohn", "Jimmy Johns"),
    ("BankofAmerica", "Bank of America"),
    ("TraderJoes", "Trader Joes"),
    ("CorePowerYoga", "CorePower Yoga"),
];

/// Returns the canonical name for the first correction whose fragment
/// occurs in `name`, if any.
#[must_use]
pub fn correct(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    CORRECTIONS
        .iter()
        .find(|(fragment, _)| lower.contains(&fragment.to_lowercase()))
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrects_squeezed_names() {
        assert_eq!(correct("TraderJoes"), Some("Trader Joes"));
        assert_eq!(correct("bankofamerica atm"), Some("Bank of America"));
    }

    #[test]
    fn first_entry_wins() {
        assert_eq!(correct("CafeDulce CreditUnion"), Some("Credit Union"));
    }

    #[test]
    fn leaves_unknown_names_alone() {
        assert_eq!(correct("Blue Bottle Coffee"), None);
    }

    #[test]
    fn canonical_names_are_stable() {
        for (_, canonical) in CORRECTIONS {
            assert_eq!(correct(canonical), None, "{canonical} re-matches a fragment");
        }
    }
}
