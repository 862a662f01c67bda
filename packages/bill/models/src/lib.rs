#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bill record, category and filename assignment types.
//!
//! A batch document holds one tenant bill per page. Extraction turns every
//! page into exactly one [`BillRecord`]; filename resolution pairs each
//! record with a unique output name as a [`FilenameAssignment`].

use std::str::FromStr as _;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Tenant name used when no tenant could be identified on a page.
pub const PLACEHOLDER_TENANT: &str = "Unknown";

/// Prefix of the suite placeholder (`Page<N>`).
pub const PLACEHOLDER_SUITE_PREFIX: &str = "Page";

/// The utility layout a batch document follows.
///
/// Each category selects a different page extraction strategy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "PascalCase")]
#[strum(ascii_case_insensitive)]
pub enum BillCategory {
    /// Electric bills with a multi-line vendor header
    Electric,
    /// Water bills with the suite embedded in consumption data
    Water,
}

impl BillCategory {
    /// Returns all supported categories.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Electric, Self::Water]
    }

    /// Parses a category name case-insensitively, ignoring surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UnrecognizedCategoryError`] if the value names no known
    /// category.
    pub fn parse(value: &str) -> Result<Self, UnrecognizedCategoryError> {
        Self::from_str(value.trim()).map_err(|_| UnrecognizedCategoryError {
            value: value.to_owned(),
        })
    }
}

/// Error returned when a category name is not one of the supported
/// literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedCategoryError {
    /// The value that was provided.
    pub value: String,
}

impl std::fmt::Display for UnrecognizedCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized bill category '{}': expected 'electric' or 'water'",
            self.value
        )
    }
}

impl std::error::Error for UnrecognizedCategoryError {}

/// One bill extracted from one page of a batch document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    /// 1-based page number within the batch.
    pub page: u32,
    /// Suite identifier (e.g. `"1234A"`), or `Page<N>` for placeholders.
    pub suite: String,
    /// Normalized tenant name, or [`PLACEHOLDER_TENANT`].
    pub tenant: String,
    /// Layout the page was extracted with.
    pub bill_type: BillCategory,
    /// Caller-supplied billing period label (e.g. `"May 2025"`).
    pub period: String,
}

impl BillRecord {
    /// Creates the fallback record for a page nothing could be extracted
    /// from.
    #[must_use]
    pub fn placeholder(page: u32, bill_type: BillCategory, period: &str) -> Self {
        Self {
            page,
            suite: format!("{PLACEHOLDER_SUITE_PREFIX}{page}"),
            tenant: PLACEHOLDER_TENANT.to_owned(),
            bill_type,
            period: period.to_owned(),
        }
    }

    /// Returns `true` if this record is the fallback for its page.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.tenant == PLACEHOLDER_TENANT
            && self.suite == format!("{PLACEHOLDER_SUITE_PREFIX}{}", self.page)
    }

    /// Key used to detect repeated suite/tenant pairs within a batch.
    #[must_use]
    pub fn collision_key(&self) -> String {
        format!("{}-{}", self.suite, self.tenant)
    }
}

/// A [`BillRecord`] paired with its resolved output filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilenameAssignment<'a> {
    /// The record this filename was resolved for.
    pub record: &'a BillRecord,
    /// Filename, unique within the batch.
    pub filename: String,
    /// 0 for the first occurrence of a suite/tenant key, incrementing for
    /// each repeat.
    pub collision_index: u32,
}

/// Files resolved for one suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteGroup {
    /// Suite identifier shared by every file in the group.
    pub suite: String,
    /// Tenant of the first file in the group.
    pub tenant: String,
    /// `(page, filename)` pairs in page order.
    pub files: Vec<(u32, String)>,
}

/// Identified vs. placeholder counts for a batch, plus files grouped by
/// suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Total number of records in the batch.
    pub total: usize,
    /// Records with an extracted suite and tenant.
    pub identified: usize,
    /// Records that fell back to the placeholder.
    pub placeholders: usize,
    /// Suite groups ordered by suite length, then suite.
    pub suites: Vec<SuiteGroup>,
}
