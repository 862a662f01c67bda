//! Output filename resolution.
//!
//! Every record becomes
//! `"<prefix> - <suite>-<tenant> <Type> - <period>.pdf"`. Characters that
//! are illegal on common filesystems become underscores and whitespace
//! runs collapse to one space. Repeated suite/tenant pairs get a
//! ` (N)` suffix before the extension, numbered in page order.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use bill_splitter_bill_models::{BillRecord, FilenameAssignment};
use regex::Regex;

use crate::config::{DEFAULT_FILENAME_PREFIX, ExtractorConfig};

const EXTENSION: &str = ".pdf";

/// Characters not allowed in filenames on Windows or POSIX.
static ILLEGAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid regex"));

/// Regex to collapse whitespace runs into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Builds unique output filenames for a batch of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameResolver {
    prefix: String,
}

impl Default for FilenameResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME_PREFIX)
    }
}

impl FilenameResolver {
    /// Creates a resolver that starts every filename with `prefix`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
        }
    }

    /// Creates a resolver using the configured filename prefix.
    #[must_use]
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(&config.filename_prefix)
    }

    /// Returns the sanitized filename for `record` before collision
    /// handling.
    #[must_use]
    pub fn base_filename(&self, record: &BillRecord) -> String {
        let raw = format!(
            "{} - {}-{} {} - {}{EXTENSION}",
            self.prefix, record.suite, record.tenant, record.bill_type, record.period
        );
        sanitize(&raw)
    }

    /// Assigns a filename to every record, in order.
    ///
    /// The Nth occurrence (N >= 2) of a `suite-tenant` key gets ` (N)`
    /// before the extension. If two different keys sanitize to the same
    /// name, the suffix keeps increasing until the name is unused, so
    /// filenames are always unique within the batch. `collision_index`
    /// always counts occurrences of the record's own key.
    ///
    /// Records must be in page order for the numbering to be stable.
    #[must_use]
    pub fn resolve<'a>(&self, records: &'a [BillRecord]) -> Vec<FilenameAssignment<'a>> {
        let mut occurrences: BTreeMap<String, u32> = BTreeMap::new();
        let mut issued: BTreeSet<String> = BTreeSet::new();
        let mut assignments = Vec::with_capacity(records.len());

        for record in records {
            let base = self.base_filename(record);
            let key = record.collision_key();

            let occurrence = occurrences.entry(key).or_insert(0);
            *occurrence += 1;
            let occurrence = *occurrence;

            // The suffix may run ahead of the key's own count when another
            // key already took the name.
            let mut suffix = occurrence;
            let mut filename = numbered(&base, suffix);
            while issued.contains(&filename) {
                suffix += 1;
                filename = numbered(&base, suffix);
            }

            if suffix > 1 {
                log::debug!("Page {}: duplicate name resolved to {filename}", record.page);
            }

            issued.insert(filename.clone());
            assignments.push(FilenameAssignment {
                record,
                filename,
                collision_index: occurrence - 1,
            });
        }

        assignments
    }
}

/// Replaces filesystem-illegal characters with `_` and collapses
/// whitespace.
#[must_use]
pub fn sanitize(filename: &str) -> String {
    let replaced = ILLEGAL_CHARS_RE.replace_all(filename, "_");
    WHITESPACE_RE.replace_all(&replaced, " ").into_owned()
}

/// Inserts ` (N)` before the extension for N >= 2.
fn numbered(base: &str, occurrence: u32) -> String {
    if occurrence <= 1 {
        return base.to_owned();
    }
    base.strip_suffix(EXTENSION).map_or_else(
        || format!("{base} ({occurrence})"),
        |stem| format!("{stem} ({occurrence}){EXTENSION}"),
    )
}

/// Resolves filenames with the default prefix.
#[must_use]
pub fn resolve(records: &[BillRecord]) -> Vec<FilenameAssignment<'_>> {
    FilenameResolver::default().resolve(records)
}
