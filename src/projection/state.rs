//! Parser state carried from one delta line to the next.

/// Orientation of an alignment block's query coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Signed distance the query cursor moves per reference base
    #[must_use]
    pub fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// The contig pair named by the most recent contig header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveContigs {
    pub reference: String,
    pub query: String,
}

/// Cursors for the alignment block currently being decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCursor {
    /// Next reference position to be written
    pub reference_pos: u64,
    /// Last reference position covered by the block
    pub block_end: u64,
    /// Next query position to be read; may step to 0 once a reverse block is exhausted
    pub query_pos: i64,
    pub strand: Strand,
}

impl BlockCursor {
    #[must_use]
    pub fn step(&self) -> i64 {
        self.strand.step()
    }
}

/// State for one pass over one delta file.
///
/// Contig headers replace `contigs` and clear `block`; block headers open a
/// new `block`; a terminating gap distance closes it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    pub contigs: Option<ActiveContigs>,
    pub block: Option<BlockCursor>,
}

impl ParserState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
