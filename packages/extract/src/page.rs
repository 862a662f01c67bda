//! Per-page extraction strategies.
//!
//! Electric bills carry a predictable vendor header, so the suite/tenant
//! line is searched for in a small window after each header line
//! ([`AnchorRule`]). Water bills bury the pair inside consumption rows, so
//! the whole page text is scanned with every water rule instead.

use std::sync::LazyLock;

use bill_splitter_bill_models::BillCategory;
use regex::Regex;

use crate::ExtractError;
use crate::config::AnchorConfig;
use crate::line_matcher::{LineMatch, match_line};

/// A line that could hold an electric `suite-tenant` token.
static ELECTRIC_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3,4}[A-Z]?-[A-Za-z]").expect("valid regex"));

/// Word a fallback electric line must contain.
const ELECTRIC_WORD: &str = "Electric";

/// Locates electric header lines and the candidate lines that follow them.
#[derive(Debug, Clone)]
pub struct AnchorRule {
    vendor_marker: String,
    facility_marker: String,
    window: usize,
    candidate_offset: usize,
    line_marker: String,
    skip_line: Option<Regex>,
}

impl AnchorRule {
    /// Builds the rule from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Config`] if the configuration is out of
    /// range, or [`ExtractError::Regex`] if the skip pattern does not
    /// compile.
    pub fn from_config(config: &AnchorConfig) -> Result<Self, ExtractError> {
        config.validate()?;

        let skip_line = if config.skip_line_pattern.is_empty() {
            None
        } else {
            Some(Regex::new(&config.skip_line_pattern)?)
        };

        Ok(Self {
            vendor_marker: config.vendor_marker.to_uppercase(),
            facility_marker: config.facility_marker.to_uppercase(),
            window: config.window,
            candidate_offset: config.candidate_offset,
            line_marker: config.line_marker.clone(),
            skip_line,
        })
    }

    /// Returns `true` if `line` contains both header markers.
    #[must_use]
    pub fn is_anchor(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        upper.contains(&self.vendor_marker) && upper.contains(&self.facility_marker)
    }

    /// Returns `true` if the line right after an anchor is a utility-code
    /// line that must not be parsed.
    fn skips(&self, offset: usize, line: &str) -> bool {
        offset == 1 && self.skip_line.as_ref().is_some_and(|re| re.is_match(line))
    }

    /// Returns `true` if the line at `offset` should be run through the
    /// electric rules.
    fn is_candidate(&self, offset: usize, line: &str) -> bool {
        offset == self.candidate_offset
            || (!self.line_marker.is_empty() && line.contains(&self.line_marker))
    }

    /// Searches the window after every anchor line, in order.
    #[must_use]
    pub fn scan(&self, lines: &[&str]) -> Option<LineMatch> {
        for (i, line) in lines.iter().enumerate() {
            if !self.is_anchor(line) {
                continue;
            }

            for offset in 1..=self.window {
                let Some(candidate) = lines.get(i + offset) else {
                    break;
                };
                if self.skips(offset, candidate) {
                    continue;
                }
                if self.is_candidate(offset, candidate)
                    && let Some(found) = match_line(candidate, BillCategory::Electric)
                {
                    return Some(found);
                }
            }
        }

        None
    }
}

impl Default for AnchorRule {
    fn default() -> Self {
        Self::from_config(&AnchorConfig::default()).expect("valid default anchor rule")
    }
}

/// Finds the suite/tenant pair on one page, or `None` if every strategy
/// misses.
#[must_use]
pub fn find_pair(text: &str, category: BillCategory, anchor: &AnchorRule) -> Option<LineMatch> {
    match category {
        BillCategory::Electric => scan_electric(text, anchor),
        BillCategory::Water => scan_water(text),
    }
}

/// Anchor-then-scan, falling back to any line that mentions `Electric` and
/// holds a `suite-name` token.
fn scan_electric(text: &str, anchor: &AnchorRule) -> Option<LineMatch> {
    let lines: Vec<&str> = text.lines().collect();

    if let Some(found) = anchor.scan(&lines) {
        return Some(found);
    }

    lines
        .iter()
        .filter(|line| ELECTRIC_PAIR_RE.is_match(line) && line.contains(ELECTRIC_WORD))
        .find_map(|line| match_line(line, BillCategory::Electric))
}

/// Runs each water rule across the whole page text.
fn scan_water(text: &str) -> Option<LineMatch> {
    match_line(text, BillCategory::Water)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ELECTRIC_PAGE: &str = "\
USC Village FPM Account 0042
UVIB4-MHC-Electric
1234A-Trader Joes_Electric_Bill
Service period 04/01/2025 - 04/30/2025
Total due $1,204.18";

    #[test]
    fn finds_pair_two_lines_after_anchor() {
        let found = find_pair(ELECTRIC_PAGE, BillCategory::Electric, &AnchorRule::default())
            .unwrap();
        assert_eq!(found.suite, "1234A");
        assert_eq!(found.tenant, "Trader Joes");
    }

    #[test]
    fn anchor_markers_are_case_insensitive() {
        let rule = AnchorRule::default();
        assert!(rule.is_anchor("usc village / fpm"));
        assert!(!rule.is_anchor("USC Village"));
    }

    #[test]
    fn skips_utility_code_line_after_anchor() {
        let page = "USC FPM\nUVIBX-MHCX-200-Gap Kids Electric Bill\nnothing here";
        // The first line carries the marker but is a code line, so it is
        // skipped and the fallback scan is what finds the pair.
        let rule = AnchorRule::default();
        let lines: Vec<&str> = page.lines().collect();
        assert_eq!(rule.scan(&lines), None);

        let found = find_pair(page, BillCategory::Electric, &rule).unwrap();
        assert_eq!(found.suite, "200");
        assert_eq!(found.tenant, "Gap Kids");
    }

    #[test]
    fn skip_rule_can_be_disabled() {
        let config = AnchorConfig {
            skip_line_pattern: String::new(),
            ..AnchorConfig::default()
        };
        let rule = AnchorRule::from_config(&config).unwrap();
        let lines = ["USC FPM", "UVIBX-MHCX-200-Gap Kids Electric Bill"];
        let found = rule.scan(&lines).unwrap();
        assert_eq!(found.tenant, "Gap Kids");
    }

    #[test]
    fn marker_line_inside_window_is_tried() {
        let page = "USC FPM\nheader\nmeter 88812\n455-Blue Bottle Electric Bill";
        let rule = AnchorRule::default();
        let lines: Vec<&str> = page.lines().collect();
        let found = rule.scan(&lines).unwrap();
        assert_eq!(found.suite, "455");
        assert_eq!(found.tenant, "Blue Bottle");
    }

    #[test]
    fn window_stops_at_page_end() {
        let rule = AnchorRule::default();
        assert_eq!(rule.scan(&["USC FPM"]), None);
        assert_eq!(rule.scan(&["USC FPM", "x"]), None);
    }

    #[test]
    fn lines_outside_window_are_ignored_by_anchor_scan() {
        let lines = ["USC FPM", "a", "b", "c", "d", "300-Sunrise Bakery"];
        assert_eq!(AnchorRule::default().scan(&lines), None);
    }

    #[test]
    fn later_anchor_is_used_when_first_misses() {
        let page = "USC FPM\n-\n-\nUSC FPM\n-\n610-Lemonade LA";
        let found = find_pair(page, BillCategory::Electric, &AnchorRule::default()).unwrap();
        assert_eq!(found.suite, "610");
        assert_eq!(found.tenant, "Lemonade LA");
    }

    #[test]
    fn fallback_requires_electric_word() {
        let page = "Statement\n300-Sunrise Bakery\n";
        assert_eq!(
            find_pair(page, BillCategory::Electric, &AnchorRule::default()),
            None
        );

        let page = "Statement\n300-Sunrise Bakery_Electric_Bill\n";
        let found = find_pair(page, BillCategory::Electric, &AnchorRule::default()).unwrap();
        assert_eq!(found.tenant, "Sunrise Bakery");
    }

    #[test]
    fn fallback_skips_utility_code_candidates() {
        let page = "1000-MHC-Electric\n1000-NBC Electric Bill\n725-Roski Eye Electric Bill";
        let found = find_pair(page, BillCategory::Electric, &AnchorRule::default()).unwrap();
        assert_eq!(found.suite, "725");
    }

    #[test]
    fn water_scans_whole_text() {
        let page = "Consumption\nMeter  Prior  Current\n$12.40 1105 - Cafe Dulce";
        let found = find_pair(page, BillCategory::Water, &AnchorRule::default()).unwrap();
        assert_eq!(found.suite, "1105");
        assert_eq!(found.tenant, "Cafe Dulce");
    }

    #[test]
    fn water_pair_inside_consumption_rows() {
        let page = "\
LADWP Water Services
Meter  Prior  Current  Charge
$45.00 1105 - Cafe Dulce
Meter 88 Prior 1200
Amount due $45.00";
        let found = find_pair(page, BillCategory::Water, &AnchorRule::default()).unwrap();
        assert_eq!(found.suite, "1105");
        assert_eq!(found.tenant, "Cafe Dulce");

        let page = "1105 - Cafe Dulce\nMeter 88 Prior 1200\nAmount due $45.00";
        let found = find_pair(page, BillCategory::Water, &AnchorRule::default()).unwrap();
        assert_eq!(found.tenant, "Cafe Dulce");
    }

    #[test]
    fn water_without_pair_misses() {
        let page = "Water usage summary\nTotal gallons 4,500\nAmount due $88.10";
        assert_eq!(
            find_pair(page, BillCategory::Water, &AnchorRule::default()),
            None
        );
    }
}
