use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::projection::{inspect_delta_file, DeltaOverview, LinePolicy, ProjectionOptions};

#[derive(Args)]
pub struct InspectArgs {
    /// Delta file from nucmer or delta-filter
    #[arg(required = true)]
    pub delta: PathBuf,

    /// Fail on unrecognized lines instead of skipping them
    #[arg(long)]
    pub strict: bool,
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if the delta file cannot be read or its records are out of order.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let options = ProjectionOptions {
        line_policy: if args.strict {
            LinePolicy::Strict
        } else {
            LinePolicy::Lenient
        },
    };

    let overview = inspect_delta_file(&args.delta, options)?;

    if verbose {
        eprintln!(
            "Read {} lines ({} blank, {} skipped)",
            overview.lines, overview.blank_lines, overview.skipped_lines
        );
    }

    match format {
        OutputFormat::Text => print_text_overview(&args, &overview),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&overview)?),
        OutputFormat::Tsv => print_tsv_overview(&overview),
    }

    Ok(())
}

fn print_text_overview(args: &InspectArgs, overview: &DeltaOverview) {
    println!("Delta file: {}", args.delta.display());
    println!("{}", "=".repeat(60));

    if let (Some(reference), Some(query)) = (
        &overview.preamble.reference_path,
        &overview.preamble.query_path,
    ) {
        println!("  Reference: {reference}");
        println!("  Query: {query}");
    } else if let Some(paths) = &overview.preamble.paths {
        println!("  Inputs: {paths}");
    }
    if let Some(program) = &overview.preamble.program {
        println!("  Program: {program}");
    }
    println!("  Contig pairs: {}", overview.contig_pairs.len());
    println!("  Alignment blocks: {}", overview.total_blocks());
    if overview.skipped_lines > 0 {
        println!("  Skipped lines: {}", overview.skipped_lines);
    }

    for pair in &overview.contig_pairs {
        println!(
            "\n{} ({} bp) <- {} ({} bp)",
            pair.reference, pair.reference_length, pair.query, pair.query_length
        );
        println!(
            "  Blocks: {} ({} reverse)",
            pair.blocks, pair.reverse_blocks
        );
        println!("  Reference bases spanned: {}", pair.spanned_reference_bases);
        println!(
            "  Indels: {} query insertions, {} reference gaps",
            pair.query_insertions, pair.reference_gaps
        );
        println!("  Errors: {}", pair.errors);
    }
}

fn print_tsv_overview(overview: &DeltaOverview) {
    println!(
        "reference\tquery\treference_length\tquery_length\tblocks\treverse_blocks\tspanned_reference_bases\tquery_insertions\treference_gaps\terrors"
    );
    for pair in &overview.contig_pairs {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            pair.reference,
            pair.query,
            pair.reference_length,
            pair.query_length,
            pair.blocks,
            pair.reverse_blocks,
            pair.spanned_reference_bases,
            pair.query_insertions,
            pair.reference_gaps,
            pair.errors,
        );
    }
}
