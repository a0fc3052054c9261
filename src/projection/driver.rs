//! Streams a delta file through the classifier and projector, then finalizes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::contig::ContigSizes;
use crate::core::genome::{CallCounts, Genome};
use crate::parsing::delta::{DeltaPreamble, DeltaReader, DeltaRecord, LineKind};
use crate::projection::error::ProjectionError;
use crate::projection::finalize::finalize;
use crate::projection::projector::{ProjectionStats, Projector};
use crate::projection::state::ParserState;

/// Number of skipped lines reported individually before going quiet
const MAX_LOGGED_SKIPS: u64 = 5;

/// Program name nucmer writes on the second preamble line
const NUCMER_PROGRAM: &str = "NUCMER";

/// What to do with lines that are neither blank, preamble, nor a delta record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePolicy {
    /// Skip and count them
    #[default]
    Lenient,
    /// Fail with `ProjectionError::MalformedLine`
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionOptions {
    pub line_policy: LinePolicy,
}

impl ProjectionOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            line_policy: LinePolicy::Strict,
        }
    }
}

/// Outcome of projecting one delta file
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSummary {
    #[serde(skip_serializing_if = "DeltaPreamble::is_empty")]
    pub preamble: DeltaPreamble,

    pub lines: u64,
    pub blank_lines: u64,
    pub skipped_lines: u64,

    #[serde(flatten)]
    pub stats: ProjectionStats,

    /// Contigs in the finished output genome
    pub contigs: usize,

    /// Final call composition of the output genome
    pub calls: CallCounts,
}

/// Project the delta file at `path` into `output`.
///
/// `sizes` may be pre-seeded with the reference's contig lengths; contig
/// headers in the delta file are checked against it and added to it.
///
/// # Errors
///
/// Returns `ProjectionError::Io` if the file cannot be opened or read, or any
/// other `ProjectionError` raised while decoding. The output genome is left
/// partially written on error.
pub fn project_delta_file(
    path: &Path,
    external: &mut Genome,
    output: &mut Genome,
    sizes: &mut ContigSizes,
    options: ProjectionOptions,
) -> Result<ProjectionSummary, ProjectionError> {
    let reader = File::open(path).map(BufReader::new)?;
    debug!(path = %path.display(), "Reading delta file");
    project_delta_reader(reader, external, output, sizes, options)
}

/// Project delta records read from `reader` into `output`, then pad every
/// contig to its declared length.
///
/// # Errors
///
/// See [`project_delta_file`].
pub fn project_delta_reader<R: BufRead>(
    reader: R,
    external: &mut Genome,
    output: &mut Genome,
    sizes: &mut ContigSizes,
    options: ProjectionOptions,
) -> Result<ProjectionSummary, ProjectionError> {
    let mut preamble = DeltaPreamble::default();
    let mut lines = 0u64;
    let mut blank_lines = 0u64;
    let mut skipped_lines = 0u64;

    let mut projector = Projector::new(&mut *external, &mut *output, &mut *sizes);
    let mut state = ParserState::new();

    for line in DeltaReader::new(reader) {
        let line = line?;
        lines += 1;

        match line.kind {
            LineKind::Blank => blank_lines += 1,
            LineKind::PreamblePaths(paths) => preamble.set_paths(&paths),
            LineKind::PreambleProgram(program) => {
                if program != NUCMER_PROGRAM {
                    warn!(%program, "Delta file was not written by nucmer; gap distances may not be in bases");
                }
                preamble.program = Some(program);
            }
            LineKind::Record(DeltaRecord::Unrecognized) => match options.line_policy {
                LinePolicy::Strict => {
                    return Err(ProjectionError::MalformedLine {
                        line: line.number,
                        content: line.text,
                    });
                }
                LinePolicy::Lenient => {
                    skipped_lines += 1;
                    if skipped_lines <= MAX_LOGGED_SKIPS {
                        warn!(line = line.number, content = %line.text, "Skipping unrecognized delta line");
                    } else if skipped_lines == MAX_LOGGED_SKIPS + 1 {
                        warn!("Further unrecognized lines will not be reported individually");
                    }
                }
            },
            LineKind::Record(record) => {
                state = projector.apply(state, line.number, &record)?;
            }
        }
    }

    if state.block.is_some() {
        warn!("Delta file ended inside an alignment block");
    }
    let stats = projector.stats();

    finalize(output, sizes)?;

    let summary = ProjectionSummary {
        preamble,
        lines,
        blank_lines,
        skipped_lines,
        stats,
        contigs: output.len(),
        calls: output.call_counts(),
    };

    info!(
        contigs = summary.contigs,
        blocks = stats.alignment_blocks,
        aligned = summary.calls.aligned,
        deleted = summary.calls.deleted,
        unaligned = summary.calls.unaligned,
        skipped = skipped_lines,
        "Projection complete"
    );

    Ok(summary)
}
