//! # frankenfasta
//!
//! A library for projecting an externally assembled genome onto the
//! coordinate space of a reference genome.
//!
//! Variant-calling pipelines compare samples position by position against a
//! reference. Reads can be aligned directly, but a finished assembly from
//! elsewhere first has to be aligned with nucmer, and the resulting delta file
//! decoded back into one call per reference position. The result, a
//! "franken genome", can then be compared with the reference and with every
//! other sample.
//!
//! ## Features
//!
//! - **Delta decoding**: Forward and reverse-strand blocks, query insertions and reference gaps
//! - **Coverage markers**: `'!'` for deleted reference bases, `'X'` for unaligned ones
//! - **Reference-aware**: Optionally adds reference contigs no alignment touched
//! - **Lenient or strict**: Unrecognized delta lines are counted or rejected
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use frankenfasta::core::genome::Genome;
//! use frankenfasta::output::frankenfasta::write_frankenfasta;
//! use frankenfasta::parsing::{fasta::read_genome, read_reference_sizes};
//! use frankenfasta::projection::{project_delta_file, ProjectionOptions};
//!
//! let mut external = read_genome(Path::new("ecoli.fasta")).unwrap();
//! let mut sizes = read_reference_sizes(Path::new("reference.fasta.fai")).unwrap();
//! let mut output = Genome::new();
//!
//! let summary = project_delta_file(
//!     Path::new("ecoli.filtered.delta"),
//!     &mut external,
//!     &mut output,
//!     &mut sizes,
//!     ProjectionOptions::default(),
//! )
//! .unwrap();
//! println!("{} aligned positions", summary.calls.aligned);
//!
//! write_frankenfasta(&output, Path::new("ecoli.frankenfasta"), "franken::").unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Calls, contig sizes and the genome store
//! - [`parsing`]: Delta line classifier and FASTA / FAI readers
//! - [`projection`]: The delta decoding state machine, finalizer and driver
//! - [`output`]: FASTA writer for projected genomes
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod projection;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::contig::{Contig, ContigSizes};
pub use core::genome::Genome;
pub use projection::{project_delta_file, ProjectionError, ProjectionOptions, ProjectionSummary};
