//! Classifier for nucmer/delta-filter `.delta` files.
//!
//! A delta file is line oriented:
//!
//! ```text
//! /data/reference.fasta /data/external.fasta    <- preamble: input paths
//! NUCMER                                        <- preamble: program
//! >ref1 qry1 5000 4800                          <- contig pair header
//! 1 1200 10 1209 3 3 0                          <- alignment block header
//! 12                                            <- gap distances ...
//! -40
//! 0                                             <- block terminator
//! ```
//!
//! Each line is classified on its own by [`classify_line`]. The preamble is
//! positional, so it is recognised by [`DeltaReader`], which also numbers
//! lines and separates blank lines from malformed ones.

use std::io::{BufRead, Lines};

use serde::Serialize;

/// `>ref_contig query_contig ref_length query_length`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContigHeader {
    pub reference_contig: String,
    pub query_contig: String,
    pub reference_length: u64,
    pub query_length: u64,
}

/// `ref_start ref_end query_start query_end errors similarity_errors stop_codons`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentBlockHeader {
    pub ref_start: u64,
    pub ref_end: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub errors: u64,
    pub similarity_errors: u64,
    pub stop_codons: u64,
}

impl AlignmentBlockHeader {
    /// The query runs backwards when its start coordinate exceeds its end.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.query_start > self.query_end
    }
}

/// A decoded gap distance.
///
/// The file stores a signed integer: its magnitude is the distance to the next
/// indel (counting the indel position itself) and a negative sign marks an
/// insertion in the query. Zero closes the alignment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapDistance {
    pub magnitude: u64,
    pub is_insertion: bool,
}

impl GapDistance {
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        self.magnitude == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaRecord {
    ContigHeader(ContigHeader),
    AlignmentBlockHeader(AlignmentBlockHeader),
    GapDistance(GapDistance),
    Unrecognized,
}

impl DeltaRecord {
    #[must_use]
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_unsigned(s: &str) -> Option<u64> {
    if is_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// Classify one line of a delta file.
///
/// Fields must be separated by exactly one space; trailing whitespace
/// (including the line terminator) is ignored, leading whitespace is not.
#[must_use]
pub fn classify_line(line: &str) -> DeltaRecord {
    let line = line.trim_end();

    if let Some(rest) = line.strip_prefix('>') {
        return parse_contig_header(rest).map_or(DeltaRecord::Unrecognized, DeltaRecord::ContigHeader);
    }

    if let Some(block) = parse_block_header(line) {
        return DeltaRecord::AlignmentBlockHeader(block);
    }

    parse_gap_distance(line).map_or(DeltaRecord::Unrecognized, DeltaRecord::GapDistance)
}

fn parse_contig_header(rest: &str) -> Option<ContigHeader> {
    let fields: Vec<&str> = rest.split(' ').collect();
    let [reference, query, reference_length, query_length] = fields.as_slice() else {
        return None;
    };

    if reference.is_empty() || query.is_empty() {
        return None;
    }

    Some(ContigHeader {
        reference_contig: (*reference).to_string(),
        query_contig: (*query).to_string(),
        reference_length: parse_unsigned(reference_length)?,
        query_length: parse_unsigned(query_length)?,
    })
}

fn parse_block_header(line: &str) -> Option<AlignmentBlockHeader> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != 7 {
        return None;
    }

    let mut values = [0u64; 7];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = parse_unsigned(field)?;
    }

    let [ref_start, ref_end, query_start, query_end, errors, similarity_errors, stop_codons] =
        values;
    Some(AlignmentBlockHeader {
        ref_start,
        ref_end,
        query_start,
        query_end,
        errors,
        similarity_errors,
        stop_codons,
    })
}

fn parse_gap_distance(line: &str) -> Option<GapDistance> {
    let (digits, is_insertion) = match line.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (line, false),
    };

    let magnitude = parse_unsigned(digits)?;
    Some(GapDistance {
        magnitude,
        // "-0" is still a terminator
        is_insertion: is_insertion && magnitude != 0,
    })
}

/// The two-line preamble written by nucmer ahead of the first contig header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeltaPreamble {
    /// Line 1 exactly as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl DeltaPreamble {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_none() && self.program.is_none()
    }

    /// Record preamble line 1. The reference and query paths are only split
    /// out when the line holds exactly two whitespace-separated fields; paths
    /// containing spaces leave them unset.
    pub fn set_paths(&mut self, line: &str) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if let [reference_path, query_path] = fields.as_slice() {
            self.reference_path = Some((*reference_path).to_string());
            self.query_path = Some((*query_path).to_string());
        } else {
            self.reference_path = None;
            self.query_path = None;
        }
        self.paths = Some(line.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Record(DeltaRecord),
    /// Line 1 of the preamble, trimmed
    PreamblePaths(String),
    /// Line 2 of the preamble, trimmed
    PreambleProgram(String),
    Blank,
}

/// A classified line with its 1-based line number and original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaLine {
    pub number: usize,
    pub text: String,
    pub kind: LineKind,
}

/// Iterator over the classified lines of a delta file
pub struct DeltaReader<R> {
    lines: Lines<R>,
    line_number: usize,
    seen_record: bool,
}

impl<R: BufRead> DeltaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            seen_record: false,
        }
    }

    fn classify(&mut self, text: &str) -> LineKind {
        if text.trim().is_empty() {
            return LineKind::Blank;
        }

        let record = classify_line(text);
        if record.is_structured() {
            self.seen_record = true;
            return LineKind::Record(record);
        }

        if !self.seen_record {
            let text = text.trim();
            match self.line_number {
                1 => return LineKind::PreamblePaths(text.to_string()),
                2 => return LineKind::PreambleProgram(text.to_string()),
                _ => {}
            }
        }

        LineKind::Record(DeltaRecord::Unrecognized)
    }
}

impl<R: BufRead> Iterator for DeltaReader<R> {
    type Item = std::io::Result<DeltaLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = match self.lines.next()? {
            Ok(text) => text,
            Err(e) => return Some(Err(e)),
        };
        self.line_number += 1;

        let kind = self.classify(&text);
        Some(Ok(DeltaLine {
            number: self.line_number,
            text,
            kind,
        }))
    }
}
