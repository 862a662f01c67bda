#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tenant bill identification for batch utility documents.
//!
//! A property manager receives one document holding every tenant's bill,
//! one bill per page. This crate works out, from each page's text alone,
//! which suite and tenant the page belongs to, and names the output file
//! for it.
//!
//! The pipeline is pure and synchronous:
//!
//! 1. [`extract_batch`] runs [`extract_page`] over every page in order.
//!    Every page yields exactly one [`BillRecord`]; pages nothing can be
//!    read from get a `Page<N>` / `Unknown` placeholder.
//! 2. [`resolve`] turns the records into unique filenames.
//! 3. [`summarize`] counts identified and placeholder records.

pub mod config;
pub mod corrections;
pub mod filename;
pub mod line_matcher;
pub mod normalize;
pub mod page;
pub mod progress;
pub mod summary;
pub mod utility_code;

use std::sync::LazyLock;

pub use bill_splitter_bill_models::{
    BatchSummary, BillCategory, BillRecord, FilenameAssignment, SuiteGroup,
    UnrecognizedCategoryError,
};
pub use config::ExtractorConfig;
pub use filename::{FilenameResolver, resolve};
pub use summary::summarize;

use crate::page::AnchorRule;
use crate::progress::ProgressCallback;

/// Errors that can occur while configuring or running extraction.
///
/// A page that cannot be identified is not an error; it becomes a
/// placeholder record.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The bill category name is not supported.
    #[error(transparent)]
    Category(#[from] UnrecognizedCategoryError),

    /// Page numbers start at 1.
    #[error("Invalid page number {0}: pages are numbered from 1")]
    InvalidPageNumber(u32),

    /// The batch has more pages than a page number can address.
    #[error("Batch has too many pages: {0}")]
    TooManyPages(usize),

    /// A configured regex pattern failed to compile.
    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    /// The configuration is malformed or out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Parses a bill category name (`"electric"` or `"water"`, any case).
///
/// # Errors
///
/// Returns [`ExtractError::Category`] for any other value.
pub fn parse_category(value: &str) -> Result<BillCategory, ExtractError> {
    Ok(BillCategory::parse(value)?)
}

/// Extracts bill records using a configured anchor rule.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    anchor: AnchorRule,
}

static DEFAULT_EXTRACTOR: LazyLock<Extractor> = LazyLock::new(Extractor::default);

impl Extractor {
    /// Creates an extractor from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the anchor configuration is invalid.
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            anchor: AnchorRule::from_config(&config.anchor)?,
        })
    }

    /// Extracts the record for one page.
    ///
    /// Always returns exactly one record for a valid page number; when no
    /// strategy finds a suite and tenant the record is a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidPageNumber`] if `page` is 0.
    pub fn extract_page(
        &self,
        text: &str,
        category: BillCategory,
        period: &str,
        page: u32,
    ) -> Result<BillRecord, ExtractError> {
        if page == 0 {
            return Err(ExtractError::InvalidPageNumber(page));
        }

        let Some(found) = page::find_pair(text, category, &self.anchor) else {
            log::warn!("Page {page}: no {category} suite/tenant found, using placeholder");
            return Ok(BillRecord::placeholder(page, category, period));
        };

        log::debug!(
            "Page {page}: suite {} tenant {:?} (rule '{}')",
            found.suite,
            found.tenant,
            found.rule
        );

        Ok(BillRecord {
            page,
            suite: found.suite,
            tenant: found.tenant,
            bill_type: category,
            period: period.to_owned(),
        })
    }

    /// Extracts one record per page, in page order, numbering pages from 1.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::TooManyPages`] if the page count does not fit
    /// a page number.
    pub fn extract_batch<S: AsRef<str>>(
        &self,
        pages: &[S],
        category: BillCategory,
        period: &str,
    ) -> Result<Vec<BillRecord>, ExtractError> {
        self.extract_batch_with_progress(pages, category, period, &progress::NullProgress)
    }

    /// Same as [`Self::extract_batch`], reporting each page to `progress`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::TooManyPages`] if the page count does not fit
    /// a page number.
    pub fn extract_batch_with_progress<S: AsRef<str>>(
        &self,
        pages: &[S],
        category: BillCategory,
        period: &str,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<BillRecord>, ExtractError> {
        let total =
            u32::try_from(pages.len()).map_err(|_| ExtractError::TooManyPages(pages.len()))?;

        progress.set_total(u64::from(total));
        progress.set_message(format!("Extracting {category} bills"));

        let mut records = Vec::with_capacity(pages.len());
        for (number, text) in (1..=total).zip(pages) {
            records.push(self.extract_page(text.as_ref(), category, period, number)?);
            progress.inc(1);
        }

        let placeholders = records.iter().filter(|r| r.is_placeholder()).count();
        log::info!(
            "Extracted {} {category} bill(s) for {period}: {} identified, {placeholders} placeholder(s)",
            records.len(),
            records.len() - placeholders
        );
        progress.finish(format!("{} pages, {placeholders} placeholder(s)", records.len()));

        Ok(records)
    }
}

/// Extracts the record for one page with the default configuration.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidPageNumber`] if `page` is 0.
pub fn extract_page(
    text: &str,
    category: BillCategory,
    period: &str,
    page: u32,
) -> Result<BillRecord, ExtractError> {
    DEFAULT_EXTRACTOR.extract_page(text, category, period, page)
}

/// Extracts one record per page with the default configuration.
///
/// # Errors
///
/// Returns [`ExtractError::TooManyPages`] if the page count does not fit a
/// page number.
pub fn extract_batch<S: AsRef<str>>(
    pages: &[S],
    category: BillCategory,
    period: &str,
) -> Result<Vec<BillRecord>, ExtractError> {
    DEFAULT_EXTRACTOR.extract_batch(pages, category, period)
}
