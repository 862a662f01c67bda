//! Ordered suite/tenant rule tables.
//!
//! Each bill category has a list of regex rules that capture a suite token
//! (3-4 digits plus an optional letter) followed by a hyphen and a tenant
//! span. Rules are tried in priority order; a structural match whose
//! tenant normalizes to nothing or to a utility code is a miss for that
//! rule, and evaluation moves on to the next one.

use std::sync::LazyLock;

use bill_splitter_bill_models::BillCategory;
use regex::Regex;

use crate::normalize::normalize;
use crate::utility_code::looks_like_utility_code;

/// A single extraction rule: a named regex whose first capture group is
/// the suite and second is the raw tenant span.
#[derive(Debug)]
pub struct LineRule {
    /// Short identifier used in logs.
    pub name: &'static str,
    regex: Regex,
}

impl LineRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("valid regex"),
        }
    }

    /// Applies the rule to the first structural match in `haystack`.
    ///
    /// Returns `None` if nothing matches or the captured tenant is
    /// rejected.
    #[must_use]
    pub fn try_match(&self, haystack: &str) -> Option<LineMatch> {
        let caps = self.regex.captures(haystack)?;
        let suite = caps.get(1)?.as_str();
        let raw_tenant = caps.get(2)?.as_str();
        let tenant = normalize(raw_tenant);

        if tenant.is_empty() || looks_like_utility_code(&tenant) {
            log::trace!("Rule '{}' rejected tenant {raw_tenant:?}", self.name);
            return None;
        }

        Some(LineMatch {
            suite: suite.to_owned(),
            tenant,
            rule: self.name,
        })
    }
}

/// An accepted suite/tenant pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// Suite token as captured.
    pub suite: String,
    /// Normalized tenant name.
    pub tenant: String,
    /// Name of the rule that produced the match.
    pub rule: &'static str,
}

/// Electric rules: explicit bill-file tokens first, then an explicit
/// `Electric Bill` marker, then a bare `suite-name` token.
static ELECTRIC_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        LineRule::new(
            "electric_bill_file",
            r"(?i)(\d{3,4}[A-Z]?)-([^_\n]+)_Electric_Bill",
        ),
        LineRule::new(
            "electric_bill_marker",
            r"(?i)(\d{3,4}[A-Z]?)-([^E\n]+)\s*Electric\s+Bill",
        ),
        LineRule::new("electric_bare", r"(?i)(\d{3,4}[A-Z]?)-([A-Za-z][^-\n]*)"),
    ]
});

/// Water rules: the pair sits inside consumption rows, possibly glued to a
/// preceding dollar amount, with optional spaces around the hyphen.
///
/// The amount prefix only consumes a two-decimal figure so that it cannot
/// swallow the leading digit of a four-digit suite. Only spaces and tabs
/// count as whitespace, so a pair never reaches into the next line of the
/// page.
static WATER_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        LineRule::new(
            "water_spaced",
            r"(?:\$?[\d,]*\.\d{2})?(\d{3,4}[A-Z]?)[ \t]*-[ \t]*([A-Za-z][A-Za-z0-9 \t&']+)",
        ),
        LineRule::new(
            "water_tight",
            r"(?:\$?[\d,]*\.\d{2})?(\d{3,4}[A-Z]?)-([A-Za-z][A-Za-z0-9 \t&']+)",
        ),
    ]
});

/// Returns the ordered rule table for `category`.
#[must_use]
pub fn rules(category: BillCategory) -> &'static [LineRule] {
    match category {
        BillCategory::Electric => &ELECTRIC_RULES,
        BillCategory::Water => &WATER_RULES,
    }
}

/// Extracts a suite/tenant pair from `line` using the rules for
/// `category`, in priority order.
#[must_use]
pub fn match_line(line: &str, category: BillCategory) -> Option<LineMatch> {
    rules(category).iter().find_map(|rule| rule.try_match(line))
}
