use thiserror::Error;

use crate::core::genome::GenomeError;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed delta line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("Line {line}: alignment data before any contig header")]
    UnknownContigReference { line: usize },

    #[error("Line {line}: gap distance outside of an alignment block")]
    GapOutsideBlock { line: usize },

    #[error("Line {line}: invalid length {length} for reference contig '{contig}'")]
    InvalidContigLength {
        line: usize,
        contig: String,
        length: u64,
    },

    #[error("Line {line}: reference contig '{contig}' declared with length {declared}, expected {expected}")]
    ContigLengthMismatch {
        line: usize,
        contig: String,
        declared: u64,
        expected: u64,
    },

    #[error("Line {line}: invalid alignment block coordinates: {reason}")]
    InvalidBlockCoordinates { line: usize, reason: String },

    #[error("Line {line}: gap distance runs past the end of its alignment block")]
    BlockOverrun { line: usize },

    #[error("Line {line}: {source}")]
    Genome {
        line: usize,
        #[source]
        source: GenomeError,
    },

    #[error("Finalizing output genome: {0}")]
    Finalize(#[from] GenomeError),
}

impl ProjectionError {
    pub(crate) fn genome(line: usize) -> impl FnOnce(GenomeError) -> Self {
        move |source| Self::Genome { line, source }
    }
}
