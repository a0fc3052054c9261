//! Call symbols stored at each reference position of a projected genome.
//!
//! A call is a single byte. Aligned positions hold whatever base the external
//! assembly had there; the two marker symbols below cover everything else.

/// Reference position covered by an alignment block but deleted in the
/// external genome.
pub const DELETION_CALL: u8 = b'!';

/// Reference position never covered by any alignment block.
pub const UNALIGNED_CALL: u8 = b'X';

/// Classification of a single call, used for summaries.
///
/// Classification is by symbol alone. An external assembly that itself holds
/// a literal `'X'` or `'!'` base yields calls that are indistinguishable from
/// the markers, and those positions are classified as unaligned or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// A base copied from the external genome
    Aligned,
    /// `'!'`
    Deleted,
    /// `'X'`
    Unaligned,
}

impl CallKind {
    #[must_use]
    pub fn of(call: u8) -> Self {
        match call {
            DELETION_CALL => Self::Deleted,
            UNALIGNED_CALL => Self::Unaligned,
            _ => Self::Aligned,
        }
    }
}

/// Complement a single base, preserving case.
///
/// Only the four canonical bases are complemented; ambiguity codes and any
/// other symbol map to themselves.
#[must_use]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        other => other,
    }
}

/// Reverse-complement a run of calls.
#[must_use]
pub fn reverse_complement(run: &[u8]) -> Vec<u8> {
    run.iter().rev().map(|&base| complement(base)).collect()
}
