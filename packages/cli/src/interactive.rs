//! Interactive TUI for the bill splitter.
//!
//! Prompts for the document, bill layout, and period with `dialoguer`
//! instead of command-line flags.

use std::path::PathBuf;

use bill_splitter_cli_utils::MultiProgress;
use bill_splitter_extract::BillCategory;
use dialoguer::{Confirm, Input, Select};

use crate::batch::{self, BatchOptions, Output};

/// Prompts for a document and its settings, then prints the selected
/// output.
///
/// # Errors
///
/// Returns an error if a prompt fails or the document cannot be processed.
pub fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Bill Splitter");
    println!();

    let file: String = Input::new()
        .with_prompt("Bill document (.pdf or form-feed separated text)")
        .interact_text()?;

    let categories = BillCategory::all();
    let labels: Vec<String> = categories.iter().map(ToString::to_string).collect();
    let idx = Select::new()
        .with_prompt("Bill layout")
        .items(&labels)
        .default(0)
        .interact()?;

    let period: String = Input::new()
        .with_prompt("Billing period")
        .default(batch::default_period())
        .interact_text()?;

    let config = prompt_optional_path("Config file (empty for defaults)")?;

    let output_labels: Vec<&str> = Output::ALL.iter().map(|o| o.label()).collect();
    let output_idx = Select::new()
        .with_prompt("What would you like to see?")
        .items(&output_labels)
        .default(0)
        .interact()?;

    let json = Confirm::new()
        .with_prompt("Print as JSON?")
        .default(false)
        .interact()?;

    let options = BatchOptions {
        file: PathBuf::from(file.trim()),
        category: categories[idx],
        period,
        config,
        prefix: None,
    };

    let batch = batch::run(&options, multi)?;
    print!("{}", batch::render(&batch, Output::ALL[output_idx], json)?);

    Ok(())
}

/// Prompts for an optional path; empty input means `None`.
fn prompt_optional_path(prompt: &str) -> Result<Option<PathBuf>, dialoguer::Error> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(trimmed)))
    }
}
