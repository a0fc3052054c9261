//! Parsers for the files a projection consumes.
//!
//! - **Delta files**: nucmer / delta-filter alignment output, classified line by line
//! - **FASTA files**: external genomes (full sequence) and references (lengths only)
//! - **FASTA index (.fai) files**: reference lengths without reading sequence
//!
//! ## Example
//!
//! ```rust
//! use frankenfasta::parsing::delta::{classify_line, DeltaRecord};
//!
//! let record = classify_line("1 1200 1209 10 3 3 0");
//! assert!(matches!(record, DeltaRecord::AlignmentBlockHeader(b) if b.is_reverse()));
//! ```

use std::path::Path;

use thiserror::Error;

use crate::core::contig::ContigSizes;
use crate::utils::validation::check_contig_length;

pub mod delta;
pub mod fai;
pub mod fasta;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many contigs: {0} exceeds maximum allowed (100000)")]
    TooManyContigs(usize),
}

/// Read reference contig lengths from a `.fai` index or a FASTA file,
/// keeping the reference's contig order.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the path is neither a `.fai` nor a
/// FASTA file, or if a contig is longer than the supported maximum. Otherwise
/// returns a `ParseError` if the file cannot be read or holds no contigs.
pub fn read_reference_sizes(path: &Path) -> Result<ContigSizes, ParseError> {
    let contigs = if fai::is_fai_file(path) {
        fai::parse_fai_file(path)?
    } else if fasta::is_fasta_file(path) {
        fasta::read_contig_lengths(path)?
    } else {
        return Err(ParseError::InvalidFormat(format!(
            "{} is not a FASTA (.fa, .fasta, .fna, optionally .gz/.bgz) or .fai file",
            path.display()
        )));
    };

    for contig in &contigs {
        if let Some(message) = check_contig_length(contig.length) {
            return Err(ParseError::InvalidFormat(format!(
                "Reference contig '{}': {message}",
                contig.name
            )));
        }
    }
    Ok(ContigSizes::from_contigs(contigs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(suffix).unwrap();
        temp.write_all(content.as_bytes()).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_reference_sizes_from_fasta_and_fai() {
        let fasta = temp_with(".fa", ">ref1\nACGT\n>ref2\nAC\n");
        let sizes = read_reference_sizes(fasta.path()).unwrap();
        assert_eq!(sizes.get("ref1"), Some(4));
        assert_eq!(sizes.get("ref2"), Some(2));

        let fai = temp_with(".fai", "ref1\t12\t6\t12\t13\n");
        let sizes = read_reference_sizes(fai.path()).unwrap();
        assert_eq!(sizes.get("ref1"), Some(12));
    }

    #[test]
    fn test_reference_sizes_reject_unknown_extension() {
        let other = temp_with(".txt", ">ref1\nACGT\n");
        assert!(matches!(
            read_reference_sizes(other.path()),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_reference_sizes_reject_oversized_contig() {
        let fai = temp_with(".fai", &format!("huge\t{}\t6\t60\t61\n", u64::MAX));
        let err = read_reference_sizes(fai.path()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(ref msg) if msg.contains("huge")));
    }
}
