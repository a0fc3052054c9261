//! Command-line interface for frankenfasta.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **convert**: Project an external genome onto reference coordinates
//! - **inspect**: Summarize the structure of a delta file
//!
//! ## Usage
//!
//! ```text
//! # Align first (not done by this tool)
//! nucmer --prefix=ecoli reference.fasta ecoli.fasta
//! delta-filter -q -r -o 100 ecoli.delta > ecoli.filtered.delta
//!
//! # Project; reads ecoli.filtered.delta, writes ecoli.frankenfasta
//! frankenfasta convert --external ecoli.fasta --reference reference.fasta
//!
//! # JSON summary for scripting
//! frankenfasta convert --external ecoli.fasta --delta ecoli.filtered.delta --format json
//!
//! # Look inside a delta file
//! frankenfasta inspect ecoli.filtered.delta
//! ```

use clap::{Parser, Subcommand};

pub mod convert;
pub mod inspect;

#[derive(Parser)]
#[command(name = "frankenfasta")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Project external genome assemblies onto reference coordinates")]
#[command(
    long_about = "frankenfasta turns an external genome assembly into a reference-coordinate genome using a nucmer delta file.\n\nEvery reference position of the output holds:\n- the aligned base from the external assembly\n- '!' where the reference base is deleted in the external assembly\n- 'X' where no alignment covers the reference"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project an external genome onto reference coordinates
    Convert(convert::ConvertArgs),

    /// Summarize the contents of a delta file
    Inspect(inspect::InspectArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
