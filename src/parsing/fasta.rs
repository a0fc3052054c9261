//! FASTA loading using noodles.
//!
//! Reads whole genomes into a [`Genome`] for projection, or just contig names
//! and lengths when only the reference's dimensions are needed.
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::{debug, warn};

use crate::core::call::CallKind;
use crate::core::contig::Contig;
use crate::core::genome::Genome;
use crate::parsing::ParseError;
use crate::utils::validation::check_contig_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a FASTA file, transparently decompressing gzip/bgzip
fn open_fasta(path: &Path) -> Result<fasta::io::Reader<Box<dyn BufRead>>, ParseError> {
    let file = File::open(path)?;
    let inner: Box<dyn BufRead> = if is_gzipped(path) {
        // bgzip is a series of gzip members
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(fasta::io::Reader::new(inner))
}

/// Load every sequence of a FASTA file into a [`Genome`].
///
/// Contig names are the first word of each definition line. Bases are kept
/// exactly as written, including case.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found, or
/// `ParseError::TooManyContigs` if the limit is exceeded.
pub fn read_genome(path: &Path) -> Result<Genome, ParseError> {
    let mut reader = open_fasta(path)?;
    let genome = read_genome_from(&mut reader)?;
    debug!(path = %path.display(), contigs = genome.len(), "Loaded genome");
    Ok(genome)
}

/// Load every sequence from a noodles FASTA reader
///
/// # Errors
///
/// See [`read_genome`].
pub fn read_genome_from<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Genome, ParseError> {
    let mut genome = Genome::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check contig limit for DOS protection
        if check_contig_limit(genome.len()).is_some() {
            return Err(ParseError::TooManyContigs(genome.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        if genome.contig(&name).is_some() {
            warn!(contig = %name, "Duplicate sequence name in FASTA, keeping the last one");
        }
        let sequence = record.sequence().as_ref().to_vec();
        let markers = sequence
            .iter()
            .filter(|&&base| CallKind::of(base) != CallKind::Aligned)
            .count();
        if markers > 0 {
            warn!(
                contig = %name,
                markers,
                "Sequence contains '!' or 'X' symbols; copied positions will count as deleted or unaligned"
            );
        }
        genome.insert_contig(name, sequence);
    }

    if genome.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(genome)
}

/// Read contig names and lengths from a FASTA file.
///
/// This reads through the entire FASTA file to determine sequence lengths.
/// For large files, consider using an existing .fai index instead.
///
/// # Errors
///
/// See [`read_genome`].
pub fn read_contig_lengths(path: &Path) -> Result<Vec<Contig>, ParseError> {
    let mut reader = open_fasta(path)?;
    let mut contigs = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_contig_limit(contigs.len()).is_some() {
            return Err(ParseError::TooManyContigs(contigs.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let length = record.sequence().len() as u64;
        contigs.push(Contig::new(name, length));
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(contigs)
}
