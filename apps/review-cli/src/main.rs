//! ADGM document review CLI
//!
//! Verifies the upload checklist, reviews each document into the output
//! directory and writes `review_report.json` next to the annotated copies.

use std::path::PathBuf;

use anyhow::Context;
use citation_index::{select_provider, CitationConfig};
use clap::Parser;
use compliance_engine::{ComplianceEngine, ReviewConfig, ReviewError, Rulebook};
use review_cli::{bundle, write_report};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "review-cli")]
#[command(version, about = "ADGM corporate document checker")]
struct Args {
    /// Input .docx files
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Directory for reviewed documents and the report
    #[arg(short, long)]
    output: PathBuf,

    /// JSON rulebook replacing the built-in checklists and keyword tables
    #[arg(long)]
    rulebook: Option<PathBuf>,

    /// JSON review settings (thresholds, marker style)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of reference texts (overrides ADGM_REFS_DIR)
    #[arg(long)]
    refs_dir: Option<PathBuf>,

    /// Also zip the reviewed documents into the output directory
    #[arg(long)]
    bundle: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays readable progress output
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting review-cli v{}", env!("CARGO_PKG_VERSION"));

    let rulebook = match &args.rulebook {
        Some(path) => Rulebook::from_json_file(path)
            .with_context(|| format!("loading rulebook {}", path.display()))?,
        None => Rulebook::default(),
    };
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<ReviewConfig>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ReviewConfig::default(),
    };

    let mut citation_config = CitationConfig::from_env()?;
    if let Some(dir) = args.refs_dir {
        citation_config.refs_dir = dir;
    }
    let citations = select_provider(&citation_config);
    tracing::info!(provider = citations.name(), "citation provider selected");

    let engine = ComplianceEngine::new(config, rulebook, citations);

    println!("[1/3] Verifying checklist...");
    let review = match engine.review(&args.input, Some(&args.output)) {
        Ok(review) => review,
        Err(e @ ReviewError::NoDocuments) => {
            let path = write_report(&args.output, &e.to_error_report())?;
            eprintln!("{} Error report saved: {}", e, path.display());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    println!("Detected process: {}", review.checklist.process);
    let missing: Vec<&str> = review
        .checklist
        .missing_documents
        .iter()
        .map(|m| m.document.as_str())
        .collect();
    println!("Missing documents: {:?}", missing);

    println!("[2/3] Processed {} document(s)", review.documents.len());
    for doc in &review.documents {
        match &doc.reviewed_path {
            Some(path) => println!(
                "  {} ({}): {} issue(s) -> {}",
                doc.file_name,
                doc.document_type,
                doc.issues.len(),
                path.display()
            ),
            None => println!(
                "  {} ({}): {} issue(s), no reviewed copy",
                doc.file_name,
                doc.document_type,
                doc.issues.len()
            ),
        }
    }

    println!("[3/3] Generating report...");
    let report_path = write_report(&args.output, &review.report)?;

    if args.bundle {
        let archive =
            bundle::bundle_reviewed(&review.report.reviewed_files, &args.output, &chrono::Local::now())?;
        println!("Bundle saved: {}", archive.display());
    }

    println!();
    println!(
        "Review complete: {} issue(s), {} high severity.",
        review.report.total_issues, review.report.high_severity_count
    );
    println!("Report saved: {}", report_path.display());

    Ok(())
}
