//! Writers for completed projections.
//!
//! - [`frankenfasta`]: one FASTA record per reference contig, named with a header label prefix

pub mod frankenfasta;
