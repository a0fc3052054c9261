use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single reference contig with its declared length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contig {
    /// Sequence name as written in the reference FASTA / delta header
    pub name: String,

    /// Declared sequence length
    pub length: u64,
}

impl Contig {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// Outcome of recording a contig length in a [`ContigSizes`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUpdate {
    /// The contig was not known before
    Inserted,
    /// The contig was already known with the same length
    Unchanged,
    /// The contig was already known with a different length
    Conflict { existing: u64 },
}

/// Ordered table of reference contig lengths.
///
/// Iteration follows insertion order, so a table seeded from a reference
/// FASTA keeps the reference's contig order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContigSizes {
    contigs: Vec<Contig>,

    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ContigSizes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from contigs, e.g. those read from a reference.
    ///
    /// Later duplicates of a name are ignored.
    #[must_use]
    pub fn from_contigs(contigs: impl IntoIterator<Item = Contig>) -> Self {
        let mut sizes = Self::new();
        for contig in contigs {
            sizes.record(contig.name, contig.length);
        }
        sizes
    }

    /// Record the length of `name`, reporting whether it conflicts with a
    /// previously recorded length. A conflicting length is not stored.
    pub fn record(&mut self, name: impl Into<String>, length: u64) -> SizeUpdate {
        let name = name.into();
        if let Some(&idx) = self.index.get(&name) {
            let existing = self.contigs[idx].length;
            return if existing == length {
                SizeUpdate::Unchanged
            } else {
                SizeUpdate::Conflict { existing }
            };
        }

        self.index.insert(name.clone(), self.contigs.len());
        self.contigs.push(Contig::new(name, length));
        SizeUpdate::Inserted
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&idx| self.contigs[idx].length)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contig> {
        self.contigs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    /// Sum of all declared lengths
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.contigs.iter().map(|c| c.length).sum()
    }
}
