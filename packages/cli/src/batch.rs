//! Loading, extracting, and rendering one batch document.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use bill_splitter_cli_utils::{IndicatifProgress, MultiProgress};
use bill_splitter_extract::{
    BillCategory, BillRecord, Extractor, ExtractorConfig, FilenameResolver, summarize,
};

/// What to print for a processed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// One line per extracted record.
    Records,
    /// Resolved output filenames.
    Names,
    /// Identified/placeholder counts and files per suite.
    Summary,
}

impl Output {
    pub const ALL: &[Self] = &[Self::Records, Self::Names, Self::Summary];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Records => "Show extracted records",
            Self::Names => "Show output filenames",
            Self::Summary => "Show batch summary",
        }
    }
}

/// Everything needed to process one document.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub file: PathBuf,
    pub category: BillCategory,
    pub period: String,
    pub config: Option<PathBuf>,
    pub prefix: Option<String>,
}

/// Extracted records for a document, plus the resolver for its filenames.
#[derive(Debug)]
pub struct Batch {
    pub records: Vec<BillRecord>,
    pub resolver: FilenameResolver,
}

/// Current month as `"<Month> <Year>"`, e.g. `"May 2025"`.
#[must_use]
pub fn default_period() -> String {
    chrono::Local::now().format("%B %Y").to_string()
}

/// Reads the extractor configuration, or the defaults if `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config.
pub fn load_config(path: Option<&Path>) -> Result<ExtractorConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(ExtractorConfig::default());
    };

    log::debug!("Loading config from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    Ok(ExtractorConfig::from_toml_str(&contents)?)
}

/// Loads the document, extracts one record per page, and prepares the
/// filename resolver.
///
/// # Errors
///
/// Returns an error if the config or document cannot be loaded.
pub fn run(
    options: &BatchOptions,
    multi: &MultiProgress,
) -> Result<Batch, Box<dyn std::error::Error>> {
    let mut config = load_config(options.config.as_deref())?;
    if let Some(prefix) = &options.prefix {
        config.filename_prefix.clone_from(prefix);
    }

    let extractor = Extractor::new(&config)?;
    let pages = bill_splitter_pdf::load_pages(&options.file)?;

    let progress = IndicatifProgress::pages_bar(multi, "Loading pages");
    let records = extractor.extract_batch_with_progress(
        &pages,
        options.category,
        &options.period,
        progress.as_ref(),
    )?;

    Ok(Batch {
        records,
        resolver: FilenameResolver::from_config(&config),
    })
}

/// Renders `batch` as plain text or pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(batch: &Batch, output: Output, json: bool) -> Result<String, serde_json::Error> {
    match output {
        Output::Records if json => serde_json::to_string_pretty(&batch.records),
        Output::Records => Ok(render_records(&batch.records)),
        Output::Names => {
            let assignments = batch.resolver.resolve(&batch.records);
            if json {
                return serde_json::to_string_pretty(&assignments);
            }
            let mut out = String::new();
            for a in &assignments {
                writeln!(out, "page {:>3}: {}", a.record.page, a.filename).unwrap();
            }
            Ok(out)
        }
        Output::Summary => {
            let summary = summarize(&batch.resolver.resolve(&batch.records));
            if json {
                return serde_json::to_string_pretty(&summary);
            }
            let mut out = format!(
                "{} page(s): {} identified, {} placeholder(s)\n",
                summary.total, summary.identified, summary.placeholders
            );
            for group in &summary.suites {
                writeln!(out, "\nSuite {} ({})", group.suite, group.tenant).unwrap();
                for (page, filename) in &group.files {
                    writeln!(out, "  page {page:>3}: {filename}").unwrap();
                }
            }
            Ok(out)
        }
    }
}

fn render_records(records: &[BillRecord]) -> String {
    let mut out = String::new();
    for r in records {
        let marker = if r.is_placeholder() { "  (placeholder)" } else { "" };
        writeln!(
            out,
            "page {:>3}: {:<6} {} [{} {}]{marker}",
            r.page, r.suite, r.tenant, r.bill_type, r.period
        )
        .unwrap();
    }
    out
}
