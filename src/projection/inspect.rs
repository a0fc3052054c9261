//! Structural overview of a delta file, without reading any genome.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::parsing::delta::{DeltaPreamble, DeltaReader, DeltaRecord, LineKind};
use crate::projection::driver::{LinePolicy, ProjectionOptions};
use crate::projection::error::ProjectionError;

/// Per contig-header totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContigPairOverview {
    pub reference: String,
    pub query: String,
    pub reference_length: u64,
    pub query_length: u64,
    pub blocks: u64,
    pub reverse_blocks: u64,
    /// Reference bases spanned by all blocks, overlaps counted twice
    pub spanned_reference_bases: u64,
    pub query_insertions: u64,
    pub reference_gaps: u64,
    pub errors: u64,
}

impl ContigPairOverview {
    fn new(reference: String, query: String, reference_length: u64, query_length: u64) -> Self {
        Self {
            reference,
            query,
            reference_length,
            query_length,
            blocks: 0,
            reverse_blocks: 0,
            spanned_reference_bases: 0,
            query_insertions: 0,
            reference_gaps: 0,
            errors: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeltaOverview {
    #[serde(skip_serializing_if = "DeltaPreamble::is_empty")]
    pub preamble: DeltaPreamble,
    pub lines: u64,
    pub blank_lines: u64,
    pub skipped_lines: u64,
    pub contig_pairs: Vec<ContigPairOverview>,
}

impl DeltaOverview {
    #[must_use]
    pub fn total_blocks(&self) -> u64 {
        self.contig_pairs.iter().map(|p| p.blocks).sum()
    }
}

/// Classify every line of the delta file at `path` and tally what it holds.
///
/// # Errors
///
/// Returns `ProjectionError::Io` on read failure, `MalformedLine` in strict
/// mode, and `UnknownContigReference` / `GapOutsideBlock` for records that
/// appear out of order.
pub fn inspect_delta_file(
    path: &Path,
    options: ProjectionOptions,
) -> Result<DeltaOverview, ProjectionError> {
    let reader = File::open(path).map(BufReader::new)?;
    inspect_delta_reader(reader, options)
}

/// See [`inspect_delta_file`].
///
/// # Errors
///
/// See [`inspect_delta_file`].
pub fn inspect_delta_reader<R: BufRead>(
    reader: R,
    options: ProjectionOptions,
) -> Result<DeltaOverview, ProjectionError> {
    let mut overview = DeltaOverview::default();
    let mut in_block = false;

    for line in DeltaReader::new(reader) {
        let line = line?;
        overview.lines += 1;

        match line.kind {
            LineKind::Blank => overview.blank_lines += 1,
            LineKind::PreamblePaths(paths) => overview.preamble.set_paths(&paths),
            LineKind::PreambleProgram(program) => overview.preamble.program = Some(program),
            LineKind::Record(DeltaRecord::Unrecognized) => {
                if options.line_policy == LinePolicy::Strict {
                    return Err(ProjectionError::MalformedLine {
                        line: line.number,
                        content: line.text,
                    });
                }
                overview.skipped_lines += 1;
            }
            LineKind::Record(DeltaRecord::ContigHeader(header)) => {
                overview.contig_pairs.push(ContigPairOverview::new(
                    header.reference_contig,
                    header.query_contig,
                    header.reference_length,
                    header.query_length,
                ));
                in_block = false;
            }
            LineKind::Record(DeltaRecord::AlignmentBlockHeader(block)) => {
                let pair = overview
                    .contig_pairs
                    .last_mut()
                    .ok_or(ProjectionError::UnknownContigReference { line: line.number })?;
                pair.blocks += 1;
                if block.is_reverse() {
                    pair.reverse_blocks += 1;
                }
                pair.spanned_reference_bases +=
                    (block.ref_end + 1).saturating_sub(block.ref_start);
                pair.errors += block.errors;
                in_block = true;
            }
            LineKind::Record(DeltaRecord::GapDistance(gap)) => {
                let pair = overview
                    .contig_pairs
                    .last_mut()
                    .ok_or(ProjectionError::UnknownContigReference { line: line.number })?;
                if !in_block {
                    return Err(ProjectionError::GapOutsideBlock { line: line.number });
                }
                if gap.is_terminator() {
                    in_block = false;
                } else if gap.is_insertion {
                    pair.query_insertions += 1;
                } else {
                    pair.reference_gaps += 1;
                }
            }
        }
    }

    Ok(overview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_counts_blocks_and_indels() {
        let text = "ref.fa ext.fa
NUCMER
>ref1 qry1 100 90
1 50 1 49 2 2 0
10
-5
0
60 80 90 70 0 0 0
0
>ref2 qry2 40 40
1 40 1 40 0 0 0
0
";
        let overview = inspect_delta_reader(text.as_bytes(), ProjectionOptions::default()).unwrap();

        assert_eq!(overview.contig_pairs.len(), 2);
        assert_eq!(overview.total_blocks(), 3);

        let first = &overview.contig_pairs[0];
        assert_eq!(first.reference, "ref1");
        assert_eq!(first.blocks, 2);
        assert_eq!(first.reverse_blocks, 1);
        assert_eq!(first.spanned_reference_bases, 50 + 21);
        assert_eq!(first.reference_gaps, 1);
        assert_eq!(first.query_insertions, 1);
        assert_eq!(first.errors, 2);

        assert_eq!(overview.preamble.program.as_deref(), Some("NUCMER"));
        assert_eq!(overview.skipped_lines, 0);
    }

    #[test]
    fn test_inspect_rejects_block_without_header() {
        let err =
            inspect_delta_reader("1 10 1 10 0 0 0\n".as_bytes(), ProjectionOptions::default())
                .unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownContigReference { line: 1 }));
    }

    #[test]
    fn test_inspect_strict_mode() {
        let text = ">ref1 qry1 10 10\nnot a record\n";
        assert!(inspect_delta_reader(text.as_bytes(), ProjectionOptions::strict()).is_err());

        let overview = inspect_delta_reader(text.as_bytes(), ProjectionOptions::default()).unwrap();
        assert_eq!(overview.skipped_lines, 1);
    }
}
