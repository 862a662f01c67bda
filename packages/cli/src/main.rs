#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the bill splitter.
//!
//! Reads a batch bill document (a PDF, or extracted text with form-feed
//! page breaks), identifies the suite and tenant on every page, and prints
//! the records, the output filenames, or a summary. Run without a
//! subcommand for an interactive menu.
//!
//! Uses `indicatif-log-bridge` (via [`bill_splitter_cli_utils::init_logger`])
//! so that `RUST_LOG` output and the page progress bar share the terminal.

mod batch;
mod interactive;

use std::path::PathBuf;

use bill_splitter_extract::{BillCategory, parse_category};
use clap::{Args, Parser, Subcommand};

use crate::batch::{BatchOptions, Output};

#[derive(Parser)]
#[command(name = "bill_splitter", about = "Split batch utility bills by tenant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the suite and tenant extracted from every page
    Extract(BatchArgs),
    /// Print the output filename for every page
    Names(BatchArgs),
    /// Print identified/placeholder counts and files per suite
    Summary(BatchArgs),
}

#[derive(Args)]
struct BatchArgs {
    /// Batch document: a `.pdf`, or text with form-feed page breaks
    file: PathBuf,
    /// Bill layout ("electric" or "water")
    #[arg(long, value_parser = parse_category)]
    category: BillCategory,
    /// Billing period label used in filenames (defaults to the current month)
    #[arg(long)]
    period: Option<String>,
    /// TOML file overriding the extractor configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Filename prefix (overrides the config file)
    #[arg(long)]
    prefix: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl BatchArgs {
    fn into_options(self) -> (BatchOptions, bool) {
        let options = BatchOptions {
            file: self.file,
            category: self.category,
            period: self.period.unwrap_or_else(batch::default_period),
            config: self.config,
            prefix: self.prefix,
        };
        (options, self.json)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = bill_splitter_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi);
    };

    let (args, output) = match command {
        Commands::Extract(args) => (args, Output::Records),
        Commands::Names(args) => (args, Output::Names),
        Commands::Summary(args) => (args, Output::Summary),
    };
    let (options, json) = args.into_options();

    let batch = batch::run(&options, &multi)?;
    print!("{}", batch::render(&batch, output, json)?);

    Ok(())
}
