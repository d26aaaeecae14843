//! qaprep CLI
//!
//! Command-line interface for preparing QA fine-tuning data from a handbook:
//! - Extracting PDF page text into a page-keyed JSON map
//! - Resolving question/key mappings into batch training entries
//! - Converting between flat `Question:/Context:/Answer:` text,
//!   line-delimited JSON, and prompt/completion JSONL
//!
//! Every command reads a file, transforms it in memory, and writes a file;
//! training frameworks consume the outputs on their own.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use qaprep_extract::QuestionSpec;
use qaprep_records::{
    entries_from_json, entries_to_flat_text, filter_complete, format_prompts, from_jsonl,
    parse_flat_text, prompts_to_jsonl, read_input, to_jsonl, ParseMode, PromptStyle,
};

#[derive(Parser)]
#[command(name = "qaprep")]
#[command(
    author,
    version,
    about = "Prepare question/answer fine-tuning data from a handbook"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract PDF page text into a `Page_N`-keyed JSON map.
    ExtractPdf {
        /// Input PDF file
        input: PathBuf,
        /// Output JSON map
        #[arg(short, long, default_value = "handbook_pages.json")]
        out: PathBuf,
    },

    /// Resolve question/key mappings against the page map and handbook JSON
    /// into a batch training-data array.
    Preprocess {
        /// Page-keyed JSON map (from `extract-pdf`)
        #[arg(long)]
        pages: PathBuf,
        /// Hand-authored handbook JSON (fallback document)
        #[arg(long)]
        handbook: PathBuf,
        /// JSON array of `{question, key}` mappings
        #[arg(long)]
        questions: PathBuf,
        /// Output batch JSON array
        #[arg(short, long, default_value = "training_data.json")]
        out: PathBuf,
    },

    /// Convert flat `Question:/Context:/Answer:` text into line-delimited JSON.
    Convert {
        /// Input flat text file
        input: PathBuf,
        /// Output JSONL dataset
        #[arg(short, long, default_value = "dataset.jsonl")]
        out: PathBuf,
        /// Parsing policy: `stateful` (tolerant, default) or `fixed-stride`
        #[arg(long, default_value = "stateful")]
        mode: String,
    },

    /// Re-emit a batch training-data JSON array as flat text blocks.
    Export {
        /// Input batch JSON array
        input: PathBuf,
        /// Output flat text file
        #[arg(short, long, default_value = "formatted_training_data.txt")]
        out: PathBuf,
    },

    /// Emit prompt/completion JSONL for a fine-tuning framework.
    FormatPrompts {
        /// Input JSONL dataset (from `convert`)
        input: PathBuf,
        /// Output prompt/completion JSONL
        #[arg(short, long, default_value = "prompts.jsonl")]
        out: PathBuf,
        /// Prompt layout: `labelled`, `instruction`, or `plain`
        #[arg(long, default_value = "labelled")]
        style: String,
    },

    /// Summarize a line-delimited JSON dataset.
    Stats {
        /// Input JSONL dataset
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::ExtractPdf { input, out } => cmd_extract_pdf(&input, &out),
        Commands::Preprocess {
            pages,
            handbook,
            questions,
            out,
        } => cmd_preprocess(&pages, &handbook, &questions, &out),
        Commands::Convert { input, out, mode } => cmd_convert(&input, &out, &mode),
        Commands::Export { input, out } => cmd_export(&input, &out),
        Commands::FormatPrompts { input, out, style } => cmd_format_prompts(&input, &out, &style),
        Commands::Stats { input } => cmd_stats(&input),
    }
}

fn load_json(path: &Path) -> Result<Value> {
    let text = read_input(path)?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn cmd_extract_pdf(input: &Path, out: &Path) -> Result<()> {
    println!("{} {}", "Extracting".green().bold(), input.display());

    let pages = qaprep_extract::extract_pages(input)?;
    fs::write(out, serde_json::to_string_pretty(&pages)?)?;
    println!(
        "  {} {} ({} pages)",
        "→".cyan(),
        out.display(),
        pages.len()
    );
    Ok(())
}

fn cmd_preprocess(pages: &Path, handbook: &Path, questions: &Path, out: &Path) -> Result<()> {
    println!("{} {}", "Preprocessing".green().bold(), questions.display());

    let pages_doc = load_json(pages)?;
    let handbook_doc = load_json(handbook)?;
    let question_specs: Vec<QuestionSpec> = serde_json::from_str(&read_input(questions)?)
        .with_context(|| format!("invalid question table in {}", questions.display()))?;

    let entries = qaprep_extract::build_training_entries(&pages_doc, &handbook_doc, &question_specs);
    let skipped = question_specs.len() - entries.len();

    fs::write(out, serde_json::to_string_pretty(&entries)?)?;
    println!(
        "  {} {} ({} entries, {} unresolved)",
        "→".cyan(),
        out.display(),
        entries.len(),
        skipped
    );
    Ok(())
}

fn cmd_convert(input: &Path, out: &Path, mode: &str) -> Result<()> {
    println!("{} {}", "Converting".green().bold(), input.display());

    let mode: ParseMode = mode.parse().map_err(anyhow::Error::msg)?;
    let records = parse_flat_text(&read_input(input)?, mode);
    fs::write(out, to_jsonl(&records))?;
    println!(
        "  {} {} ({} records)",
        "→".cyan(),
        out.display(),
        records.len()
    );
    Ok(())
}

fn cmd_export(input: &Path, out: &Path) -> Result<()> {
    println!("{} {}", "Exporting".green().bold(), input.display());

    let entries = entries_from_json(&read_input(input)?)?;
    let (complete, dropped) = filter_complete(entries);
    fs::write(out, entries_to_flat_text(&complete))?;
    println!(
        "  {} {} ({} blocks, {} dropped)",
        "→".cyan(),
        out.display(),
        complete.len(),
        dropped
    );
    Ok(())
}

fn cmd_format_prompts(input: &Path, out: &Path, style: &str) -> Result<()> {
    println!("{} {}", "Formatting".green().bold(), input.display());

    let style: PromptStyle = style.parse().map_err(anyhow::Error::msg)?;
    let records = from_jsonl(&read_input(input)?)?;
    let pairs = format_prompts(&records, style);
    fs::write(out, prompts_to_jsonl(&pairs))?;
    println!(
        "  {} {} ({} pairs)",
        "→".cyan(),
        out.display(),
        pairs.len()
    );
    Ok(())
}

fn cmd_stats(input: &Path) -> Result<()> {
    let records = from_jsonl(&read_input(input)?)?;
    let empty_context = records.iter().filter(|r| r.context.is_empty()).count();
    let empty_answer = records.iter().filter(|r| r.answer.is_empty()).count();

    println!("{} {}", "Dataset".green().bold(), input.display());
    println!("  records:        {}", records.len());
    println!("  empty contexts: {empty_context}");
    println!("  empty answers:  {empty_answer}");
    Ok(())
}
