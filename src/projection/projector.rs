//! The delta decoding state machine.
//!
//! Each structured record moves a [`ParserState`] forward and may write calls
//! into the output genome. Positions are 1-based throughout. Within a block,
//! a gap distance `d` means "copy `d - 1` matched bases, then apply one indel":
//!
//! - `d > 0`: the reference has a base the query lacks, so a `'!'` is written
//!   and only the reference cursor advances past it.
//! - `d < 0`: the query has a base the reference lacks, so only the query
//!   cursor advances past it.
//! - `d == 0`: copy everything up to the block end and close the block.

use serde::Serialize;
use tracing::debug;

use crate::core::call::{reverse_complement, DELETION_CALL};
use crate::core::contig::{ContigSizes, SizeUpdate};
use crate::core::genome::Genome;
use crate::parsing::delta::{AlignmentBlockHeader, ContigHeader, DeltaRecord, GapDistance};
use crate::projection::error::ProjectionError;
use crate::projection::state::{ActiveContigs, BlockCursor, ParserState, Strand};
use crate::utils::validation::check_contig_length;

/// Counters accumulated while projecting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionStats {
    pub contig_headers: u64,
    pub alignment_blocks: u64,
    pub gap_records: u64,
    pub query_insertions: u64,
    pub reference_gaps: u64,
    pub bases_copied: u64,
}

/// Applies delta records to an output genome, reading bases from the
/// external genome.
pub struct Projector<'a> {
    external: &'a mut Genome,
    output: &'a mut Genome,
    sizes: &'a mut ContigSizes,
    stats: ProjectionStats,
}

impl<'a> Projector<'a> {
    pub fn new(
        external: &'a mut Genome,
        output: &'a mut Genome,
        sizes: &'a mut ContigSizes,
    ) -> Self {
        Self {
            external,
            output,
            sizes,
            stats: ProjectionStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> ProjectionStats {
        self.stats
    }

    /// Apply one record found on delta line `line`, returning the next state.
    ///
    /// Unrecognized records leave the state untouched.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the record is inconsistent with the
    /// current state, the declared contig sizes or the external genome.
    pub fn apply(
        &mut self,
        state: ParserState,
        line: usize,
        record: &DeltaRecord,
    ) -> Result<ParserState, ProjectionError> {
        match record {
            DeltaRecord::ContigHeader(header) => self.on_contig_header(line, header),
            DeltaRecord::AlignmentBlockHeader(header) => self.on_block_header(state, line, header),
            DeltaRecord::GapDistance(gap) => self.on_gap_distance(state, line, *gap),
            DeltaRecord::Unrecognized => Ok(state),
        }
    }

    fn on_contig_header(
        &mut self,
        line: usize,
        header: &ContigHeader,
    ) -> Result<ParserState, ProjectionError> {
        let reference = &header.reference_contig;
        if header.reference_length == 0 || check_contig_length(header.reference_length).is_some() {
            return Err(ProjectionError::InvalidContigLength {
                line,
                contig: reference.clone(),
                length: header.reference_length,
            });
        }

        if let SizeUpdate::Conflict { existing } =
            self.sizes.record(reference.as_str(), header.reference_length)
        {
            return Err(ProjectionError::ContigLengthMismatch {
                line,
                contig: reference.clone(),
                declared: header.reference_length,
                expected: existing,
            });
        }

        self.external
            .select_contig(&header.query_contig)
            .map_err(ProjectionError::genome(line))?;
        self.output.add_contig(reference);
        self.output
            .select_contig(reference)
            .map_err(ProjectionError::genome(line))?;

        self.stats.contig_headers += 1;
        debug!(
            line,
            reference = %reference,
            query = %header.query_contig,
            length = header.reference_length,
            "Contig pair"
        );

        Ok(ParserState {
            contigs: Some(ActiveContigs {
                reference: reference.clone(),
                query: header.query_contig.clone(),
            }),
            block: None,
        })
    }

    fn on_block_header(
        &mut self,
        state: ParserState,
        line: usize,
        header: &AlignmentBlockHeader,
    ) -> Result<ParserState, ProjectionError> {
        let Some(contigs) = state.contigs else {
            return Err(ProjectionError::UnknownContigReference { line });
        };
        let Some(contig_length) = self.sizes.get(&contigs.reference) else {
            return Err(ProjectionError::UnknownContigReference { line });
        };

        let invalid = |reason: String| ProjectionError::InvalidBlockCoordinates { line, reason };
        if header.ref_start == 0 || header.query_start == 0 || header.query_end == 0 {
            return Err(invalid("coordinates are 1-based".to_string()));
        }
        if header.ref_start > header.ref_end {
            return Err(invalid(format!(
                "reference start {} is after end {}",
                header.ref_start, header.ref_end
            )));
        }
        if header.ref_end > contig_length {
            return Err(invalid(format!(
                "reference end {} exceeds length {} of '{}'",
                header.ref_end, contig_length, contigs.reference
            )));
        }
        let query_pos = i64::try_from(header.query_start)
            .map_err(|_| invalid(format!("query start {} is too large", header.query_start)))?;

        let strand = if header.is_reverse() {
            Strand::Reverse
        } else {
            Strand::Forward
        };

        self.stats.alignment_blocks += 1;
        debug!(
            line,
            ref_start = header.ref_start,
            ref_end = header.ref_end,
            query_start = header.query_start,
            query_end = header.query_end,
            ?strand,
            "Alignment block"
        );

        Ok(ParserState {
            contigs: Some(contigs),
            block: Some(BlockCursor {
                reference_pos: header.ref_start,
                block_end: header.ref_end,
                query_pos,
                strand,
            }),
        })
    }

    fn on_gap_distance(
        &mut self,
        state: ParserState,
        line: usize,
        gap: GapDistance,
    ) -> Result<ParserState, ProjectionError> {
        if state.contigs.is_none() {
            return Err(ProjectionError::UnknownContigReference { line });
        }
        let Some(mut block) = state.block else {
            return Err(ProjectionError::GapOutsideBlock { line });
        };
        self.stats.gap_records += 1;

        // Distance from the cursor to one past the block end
        let remaining = block
            .block_end
            .checked_add(1)
            .and_then(|end| end.checked_sub(block.reference_pos))
            .ok_or(ProjectionError::BlockOverrun { line })?;

        if gap.is_terminator() {
            self.copy_matched_run(&mut block, remaining, line)?;
            return Ok(ParserState {
                contigs: state.contigs,
                block: None,
            });
        }

        let run_length = gap.magnitude - 1;
        let reference_advance = if gap.is_insertion {
            run_length
        } else {
            run_length + 1
        };
        if reference_advance > remaining {
            return Err(ProjectionError::BlockOverrun { line });
        }

        self.copy_matched_run(&mut block, run_length, line)?;

        if gap.is_insertion {
            block.query_pos += block.step();
            self.stats.query_insertions += 1;
        } else {
            self.output
                .write(block.reference_pos, &[DELETION_CALL])
                .map_err(ProjectionError::genome(line))?;
            block.reference_pos += 1;
            self.stats.reference_gaps += 1;
        }

        Ok(ParserState {
            contigs: state.contigs,
            block: Some(block),
        })
    }

    /// Copy `run_length` query bases into the reference at the cursor and
    /// advance both cursors past them.
    fn copy_matched_run(
        &mut self,
        block: &mut BlockCursor,
        run_length: u64,
        line: usize,
    ) -> Result<(), ProjectionError> {
        if run_length == 0 {
            return Ok(());
        }

        let run = i64::try_from(run_length).map_err(|_| ProjectionError::BlockOverrun { line })?;
        let (first, last) = match block.strand {
            Strand::Forward => (block.query_pos, block.query_pos + run - 1),
            Strand::Reverse => (block.query_pos - run + 1, block.query_pos),
        };
        let first = u64::try_from(first)
            .ok()
            .filter(|&pos| pos > 0)
            .ok_or_else(|| ProjectionError::InvalidBlockCoordinates {
                line,
                reason: format!("query cursor moved before position 1 (at {first})"),
            })?;
        #[allow(clippy::cast_sign_loss)] // last >= first > 0
        let last = last as u64;

        let segment = self
            .external
            .read(first, last)
            .map_err(ProjectionError::genome(line))?;
        let result = match block.strand {
            Strand::Forward => self.output.write(block.reference_pos, segment),
            Strand::Reverse => self
                .output
                .write(block.reference_pos, &reverse_complement(segment)),
        };
        result.map_err(ProjectionError::genome(line))?;

        block.reference_pos += run_length;
        block.query_pos += block.step() * run;
        self.stats.bases_copied += run_length;
        Ok(())
    }
}
