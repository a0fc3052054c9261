use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::contig::ContigSizes;
use crate::core::genome::Genome;
use crate::output::frankenfasta::{write_frankenfasta, DEFAULT_HEADER_PREFIX};
use crate::parsing;
use crate::projection::{project_delta_file, LinePolicy, ProjectionOptions, ProjectionSummary};
use crate::utils::validation::{nickname_from_path, validate_genome_name};

#[derive(Args)]
pub struct ConvertArgs {
    /// External genome assembly (FASTA, optionally gzip/bgzip compressed)
    #[arg(long, required = true)]
    pub external: PathBuf,

    /// Filtered delta file from nucmer/delta-filter [default: <NAME>.filtered.delta]
    #[arg(long)]
    pub delta: Option<PathBuf>,

    /// Reference FASTA or .fai; adds unaligned reference contigs and checks lengths
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Name of this external genome [default: derived from the external file name]
    #[arg(long)]
    pub name: Option<String>,

    /// Output file [default: <NAME>.frankenfasta]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Label prepended to each contig name in the output FASTA
    #[arg(long, default_value = DEFAULT_HEADER_PREFIX)]
    pub header_prefix: String,

    /// Fail on unrecognized delta lines instead of skipping them
    #[arg(long)]
    pub strict: bool,
}

/// Execute convert subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read, the delta file is
/// inconsistent with the genomes, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ConvertArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let name = match &args.name {
        Some(name) => validate_genome_name(name)?.to_string(),
        None => nickname_from_path(&args.external),
    };
    let delta_path = args
        .delta
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{name}.filtered.delta")));
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{name}.frankenfasta")));

    let mut external = parsing::fasta::read_genome(&args.external).with_context(|| {
        format!(
            "Failed to read external genome {}",
            args.external.display()
        )
    })?;

    if verbose {
        eprintln!(
            "Loaded external genome '{name}': {} contigs",
            external.len()
        );
    }

    let mut sizes = match &args.reference {
        Some(path) => parsing::read_reference_sizes(path)
            .with_context(|| format!("Failed to read reference {}", path.display()))?,
        None => ContigSizes::new(),
    };

    if verbose && !sizes.is_empty() {
        eprintln!(
            "Reference: {} contigs, {} bases",
            sizes.len(),
            sizes.total_length()
        );
    }

    let options = ProjectionOptions {
        line_policy: if args.strict {
            LinePolicy::Strict
        } else {
            LinePolicy::Lenient
        },
    };

    let mut output = Genome::new();
    let summary = project_delta_file(&delta_path, &mut external, &mut output, &mut sizes, options)
        .with_context(|| format!("Failed to project delta file {}", delta_path.display()))?;

    write_frankenfasta(&output, &output_path, &args.header_prefix)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    match format {
        OutputFormat::Text => print_text_summary(&name, &output_path, &summary),
        OutputFormat::Json => print_json_summary(&name, &output_path, &summary)?,
        OutputFormat::Tsv => print_tsv_summary(&name, &summary),
    }

    Ok(())
}

/// Percentage of `part` in `total`, 0 when `total` is 0
fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        part as f64 * 100.0 / total as f64
    }
}

fn print_text_summary(name: &str, output_path: &Path, summary: &ProjectionSummary) {
    let total = summary.calls.total();

    println!("Projection of '{name}'");
    println!("{}", "=".repeat(60));
    println!("Output: {}", output_path.display());
    println!("  Contigs: {}", summary.contigs);
    println!("  Positions: {total}");
    println!(
        "  Aligned: {} ({:.2}%)",
        summary.calls.aligned,
        percent(summary.calls.aligned, total)
    );
    println!(
        "  Deleted (!): {} ({:.2}%)",
        summary.calls.deleted,
        percent(summary.calls.deleted, total)
    );
    println!(
        "  Unaligned (X): {} ({:.2}%)",
        summary.calls.unaligned,
        percent(summary.calls.unaligned, total)
    );

    println!("\nDelta file:");
    if let Some(program) = &summary.preamble.program {
        println!("  Program: {program}");
    }
    println!("  Lines: {}", summary.lines);
    println!("  Contig headers: {}", summary.stats.contig_headers);
    println!("  Alignment blocks: {}", summary.stats.alignment_blocks);
    println!("  Query insertions: {}", summary.stats.query_insertions);
    println!("  Reference gaps: {}", summary.stats.reference_gaps);
    if summary.skipped_lines > 0 {
        println!("  Skipped lines: {}", summary.skipped_lines);
    }
}

fn print_json_summary(
    name: &str,
    output_path: &Path,
    summary: &ProjectionSummary,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "name": name,
        "output": output_path.display().to_string(),
        "summary": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(name: &str, summary: &ProjectionSummary) {
    println!(
        "name\tcontigs\taligned\tdeleted\tunaligned\talignment_blocks\tquery_insertions\treference_gaps\tskipped_lines"
    );
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        name,
        summary.contigs,
        summary.calls.aligned,
        summary.calls.deleted,
        summary.calls.unaligned,
        summary.stats.alignment_blocks,
        summary.stats.query_insertions,
        summary.stats.reference_gaps,
        summary.skipped_lines,
    );
}
