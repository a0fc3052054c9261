//! In-memory genome store.
//!
//! A [`Genome`] maps contig names to growable runs of calls, addressed with
//! 1-based inclusive positions. Contigs keep the order in which they were
//! added. Reads and writes go through the *active* contig chosen with
//! [`Genome::select_contig`].

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::core::call::{CallKind, UNALIGNED_CALL};
use crate::utils::validation::MAX_CONTIG_LENGTH;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenomeError {
    #[error("Contig '{0}' not found in genome")]
    UnknownContig(String),

    #[error("No active contig selected")]
    NoActiveContig,

    #[error("Range {start}-{end} is outside contig '{contig}' (length {length})")]
    RangeOutOfBounds {
        contig: String,
        start: u64,
        end: u64,
        length: u64,
    },

    #[error("Positions are 1-based; position 0 is not addressable")]
    ZeroPosition,

    #[error("Contig '{contig}' cannot grow to {length} calls (maximum {MAX_CONTIG_LENGTH})")]
    ContigTooLong { contig: String, length: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ContigCalls {
    name: String,
    calls: Vec<u8>,
}

/// Per-kind call totals across a genome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CallCounts {
    pub aligned: u64,
    pub deleted: u64,
    pub unaligned: u64,
}

impl CallCounts {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.aligned + self.deleted + self.unaligned
    }
}

#[derive(Debug, Clone, Default)]
pub struct Genome {
    contigs: Vec<ContigCalls>,
    index: HashMap<String, usize>,
    active: Option<usize>,
}

impl Genome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty contig named `name` if it does not exist yet.
    ///
    /// Returns `true` if the contig was created.
    pub fn add_contig(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.push_contig(name.to_string(), Vec::new());
        true
    }

    /// Insert a contig with existing calls, replacing any contig of the same name.
    pub fn insert_contig(&mut self, name: impl Into<String>, calls: Vec<u8>) {
        let name = name.into();
        if let Some(&idx) = self.index.get(&name) {
            self.contigs[idx].calls = calls;
        } else {
            self.push_contig(name, calls);
        }
    }

    fn push_contig(&mut self, name: String, calls: Vec<u8>) {
        self.index.insert(name.clone(), self.contigs.len());
        self.contigs.push(ContigCalls { name, calls });
    }

    /// Make `name` the target of subsequent [`read`](Self::read) and
    /// [`write`](Self::write) calls.
    ///
    /// # Errors
    ///
    /// Returns `GenomeError::UnknownContig` if no contig has that name.
    pub fn select_contig(&mut self, name: &str) -> Result<(), GenomeError> {
        let idx = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| GenomeError::UnknownContig(name.to_string()))?;
        self.active = Some(idx);
        Ok(())
    }

    /// Contig names in insertion order
    pub fn contig_names(&self) -> impl Iterator<Item = &str> {
        self.contigs.iter().map(|c| c.name.as_str())
    }

    /// Contigs with their calls, in insertion order
    pub fn contigs(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.contigs
            .iter()
            .map(|c| (c.name.as_str(), c.calls.as_slice()))
    }

    #[must_use]
    pub fn contig(&self, name: &str) -> Option<&[u8]> {
        self.index
            .get(name)
            .map(|&idx| self.contigs[idx].calls.as_slice())
    }

    #[must_use]
    pub fn contig_len(&self, name: &str) -> Option<u64> {
        self.contig(name).map(|calls| calls.len() as u64)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    fn active_calls(&self) -> Result<&ContigCalls, GenomeError> {
        self.active
            .map(|idx| &self.contigs[idx])
            .ok_or(GenomeError::NoActiveContig)
    }

    /// Read the inclusive 1-based range `start..=end` of the active contig,
    /// in increasing position order.
    ///
    /// # Errors
    ///
    /// Returns `GenomeError::NoActiveContig` if nothing is selected,
    /// `GenomeError::ZeroPosition` for a zero start, or
    /// `GenomeError::RangeOutOfBounds` if the range is empty or exceeds the contig.
    pub fn read(&self, start: u64, end: u64) -> Result<&[u8], GenomeError> {
        let contig = self.active_calls()?;
        if start == 0 {
            return Err(GenomeError::ZeroPosition);
        }

        let length = contig.calls.len() as u64;
        if start > end || end > length {
            return Err(GenomeError::RangeOutOfBounds {
                contig: contig.name.clone(),
                start,
                end,
                length,
            });
        }

        // Bounded by the contig length, which is a usize
        #[allow(clippy::cast_possible_truncation)]
        let (from, to) = ((start - 1) as usize, end as usize);
        Ok(&contig.calls[from..to])
    }

    /// Write `calls` into the active contig starting at 1-based `start`.
    ///
    /// The contig grows as needed; positions skipped over between its old end
    /// and `start` are filled with `'X'`.
    ///
    /// # Errors
    ///
    /// Returns `GenomeError::NoActiveContig` if nothing is selected,
    /// `GenomeError::ZeroPosition` for a zero start, or
    /// `GenomeError::ContigTooLong` if the write would grow the contig past
    /// the length limit.
    pub fn write(&mut self, start: u64, calls: &[u8]) -> Result<(), GenomeError> {
        let idx = self.active.ok_or(GenomeError::NoActiveContig)?;
        if start == 0 {
            return Err(GenomeError::ZeroPosition);
        }

        let end = (start - 1).saturating_add(calls.len() as u64);
        let to = self.checked_length(idx, end)?;
        let from = to - calls.len();

        let contig = &mut self.contigs[idx].calls;
        if contig.len() < to {
            contig.resize(to, UNALIGNED_CALL);
        }
        contig[from..to].copy_from_slice(calls);
        Ok(())
    }

    /// Pad contig `name` with `fill` up to `target_length`. No-op if it is
    /// already at least that long.
    ///
    /// # Errors
    ///
    /// Returns `GenomeError::UnknownContig` if no contig has that name, or
    /// `GenomeError::ContigTooLong` if `target_length` is over the length limit.
    pub fn extend(&mut self, name: &str, target_length: u64, fill: u8) -> Result<(), GenomeError> {
        let idx = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| GenomeError::UnknownContig(name.to_string()))?;
        let target = self.checked_length(idx, target_length)?;

        let calls = &mut self.contigs[idx].calls;
        if calls.len() < target {
            calls.resize(target, fill);
        }
        Ok(())
    }

    /// Convert a requested length of contig `idx` to an allocation size,
    /// refusing anything over [`MAX_CONTIG_LENGTH`].
    fn checked_length(&self, idx: usize, length: u64) -> Result<usize, GenomeError> {
        let too_long = || GenomeError::ContigTooLong {
            contig: self.contigs[idx].name.clone(),
            length,
        };
        if length > MAX_CONTIG_LENGTH {
            return Err(too_long());
        }
        usize::try_from(length).map_err(|_| too_long())
    }

    /// Count calls by kind across every contig, classifying each symbol with
    /// [`CallKind::of`].
    #[must_use]
    pub fn call_counts(&self) -> CallCounts {
        let mut counts = CallCounts::default();
        for contig in &self.contigs {
            for &call in &contig.calls {
                match CallKind::of(call) {
                    CallKind::Aligned => counts.aligned += 1,
                    CallKind::Deleted => counts.deleted += 1,
                    CallKind::Unaligned => counts.unaligned += 1,
                }
            }
        }
        counts
    }
}
