//! Extractor configuration.
//!
//! Everything here has a default matching the electric and water layouts
//! the extractor was built against. A TOML file can override the electric
//! anchor rule and the output filename prefix:
//!
//! ```toml
//! filename_prefix = "USC Village"
//!
//! [anchor]
//! vendor_marker = "USC"
//! facility_marker = "FPM"
//! window = 4
//! candidate_offset = 2
//! line_marker = "Electric Bill"
//! skip_line_pattern = "[A-Z]{4,}-[A-Z]{3,}-"
//! ```

use serde::{Deserialize, Serialize};

use crate::ExtractError;

/// Default prefix of every output filename.
pub const DEFAULT_FILENAME_PREFIX: &str = "USC Village";

/// Top-level extractor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Text placed before the suite in every output filename.
    pub filename_prefix: String,
    /// Electric header anchor rule.
    pub anchor: AnchorConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_owned(),
            anchor: AnchorConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parses a configuration from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Config`] if the TOML is malformed or a value
    /// is out of range.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ExtractError> {
        let config: Self =
            toml::de::from_str(toml_str).map_err(|e| ExtractError::Config(e.to_string()))?;
        config.anchor.validate()?;
        Ok(config)
    }
}

/// How electric bill headers are located and which following lines are
/// searched for the suite/tenant pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorConfig {
    /// Vendor marker an anchor line must contain (case-insensitive).
    pub vendor_marker: String,
    /// Facility marker an anchor line must also contain (case-insensitive).
    pub facility_marker: String,
    /// Number of lines after the anchor to examine.
    pub window: usize,
    /// Offset (from the anchor) of the line that is always tried.
    pub candidate_offset: usize,
    /// Any line in the window containing this text is also tried.
    pub line_marker: String,
    /// Regex for a utility-code line directly after the anchor that is
    /// skipped. Empty disables the skip.
    pub skip_line_pattern: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            vendor_marker: "USC".to_owned(),
            facility_marker: "FPM".to_owned(),
            window: 4,
            candidate_offset: 2,
            line_marker: "Electric Bill".to_owned(),
            skip_line_pattern: "[A-Z]{4,}-[A-Z]{3,}-".to_owned(),
        }
    }
}

impl AnchorConfig {
    /// Checks that the markers are non-empty and the candidate offset
    /// falls inside the window.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.vendor_marker.trim().is_empty() || self.facility_marker.trim().is_empty() {
            return Err(ExtractError::Config(
                "anchor markers must not be empty".to_owned(),
            ));
        }
        if self.window == 0 {
            return Err(ExtractError::Config(
                "anchor window must be at least 1".to_owned(),
            ));
        }
        if self.candidate_offset == 0 || self.candidate_offset > self.window {
            return Err(ExtractError::Config(format!(
                "candidate_offset {} must be between 1 and window {}",
                self.candidate_offset, self.window
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ExtractorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.filename_prefix, "USC Village");
        assert_eq!(config.anchor.window, 4);
    }

    #[test]
    fn overrides_individual_keys() {
        let config = ExtractorConfig::from_toml_str(
            r#"
            filename_prefix = "Harbor Plaza"

            [anchor]
            vendor_marker = "SCE"
            skip_line_pattern = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.filename_prefix, "Harbor Plaza");
        assert_eq!(config.anchor.vendor_marker, "SCE");
        assert_eq!(config.anchor.facility_marker, "FPM");
        assert!(config.anchor.skip_line_pattern.is_empty());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ExtractorConfig::from_toml_str("prefix = \"x\"").unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }

    #[test]
    fn rejects_offset_outside_window() {
        let err = ExtractorConfig::from_toml_str("[anchor]\nwindow = 2\ncandidate_offset = 3")
            .unwrap_err();
        assert!(err.to_string().contains("candidate_offset 3"));
    }

    #[test]
    fn rejects_empty_marker() {
        let err = ExtractorConfig::from_toml_str("[anchor]\nvendor_marker = \" \"").unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }
}
