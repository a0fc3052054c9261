//! Centralized validation and helper functions.

use std::path::Path;

/// Maximum number of contigs allowed in a single file (DOS protection)
pub const MAX_CONTIGS: usize = 100_000;

/// Longest contig accepted from a delta header or reference (DOS protection)
pub const MAX_CONTIG_LENGTH: u64 = 1 << 32;

pub const MAX_NAME_LENGTH: usize = 255;

/// Nickname used when a file name yields nothing usable
pub const FALLBACK_NICKNAME: &str = "external";

/// Check if adding another contig would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new contig.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_contig_limit(contigs.len()).is_some() {
///     return Err(...);
/// }
/// contigs.push(new_contig); // Safe to add
/// ```
#[must_use]
pub fn check_contig_limit(count: usize) -> Option<String> {
    if count >= MAX_CONTIGS {
        Some(format!(
            "Too many contigs: adding another would exceed maximum of {MAX_CONTIGS}"
        ))
    } else {
        None
    }
}

/// Check a declared contig length against [`MAX_CONTIG_LENGTH`].
///
/// Returns an error message if the length is over the limit, None if it is safe
/// to allocate.
#[must_use]
pub fn check_contig_length(length: u64) -> Option<String> {
    if length > MAX_CONTIG_LENGTH {
        Some(format!(
            "Contig length {length} exceeds maximum of {MAX_CONTIG_LENGTH}"
        ))
    } else {
        None
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Genome name too long: exceeds {MAX_NAME_LENGTH} characters")]
    NameTooLong,
    #[error("Invalid genome name: contains path separators or control characters")]
    InvalidName,
    #[error("Empty genome name provided")]
    EmptyName,
}

/// Validate a genome name supplied on the command line.
///
/// The name becomes part of the output file name, so it must not contain
/// path separators, `..`, or control characters.
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` if the name is blank,
/// `ValidationError::NameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidName` if it contains invalid characters.
pub fn validate_genome_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if trimmed.contains("..")
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidName);
    }

    Ok(trimmed)
}

/// Derive a genome nickname from its FASTA path.
///
/// Strips the directory, a compression suffix (`.gz`, `.bgz`) and a FASTA
/// extension, then replaces anything other than ASCII alphanumerics, `-`,
/// `_` and `.` with `_`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use frankenfasta::utils::validation::nickname_from_path;
///
/// assert_eq!(nickname_from_path(Path::new("/data/E. coli K12.fasta.gz")), "E._coli_K12");
/// assert_eq!(nickname_from_path(Path::new("assembly.fna")), "assembly");
/// ```
#[must_use]
pub fn nickname_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut stem = file_name.as_str();
    for suffix in [".gz", ".bgz"] {
        stem = strip_suffix_ignore_case(stem, suffix);
    }
    for suffix in [".fasta", ".fa", ".fna", ".fas", ".fsa"] {
        let stripped = strip_suffix_ignore_case(stem, suffix);
        if stripped.len() != stem.len() {
            stem = stripped;
            break;
        }
    }

    let nickname: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if nickname.trim_matches(|c| c == '_' || c == '.').is_empty() {
        FALLBACK_NICKNAME.to_string()
    } else {
        nickname
    }
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> &'a str {
    let split = s.len().saturating_sub(suffix.len());
    match (s.get(..split), s.get(split..)) {
        (Some(head), Some(tail)) if !head.is_empty() && tail.eq_ignore_ascii_case(suffix) => head,
        _ => s,
    }
}
