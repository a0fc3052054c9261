use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use noodles::fasta::{
    self,
    record::{Definition, Sequence},
};

use crate::core::genome::Genome;

/// Header label prepended to every contig name by default
pub const DEFAULT_HEADER_PREFIX: &str = "franken::";

/// Write `genome` as FASTA to `path`, one record per contig in genome order,
/// each named `<prefix><contig>`.
///
/// # Errors
///
/// Returns an IO error if the file cannot be created or written.
pub fn write_frankenfasta(genome: &Genome, path: &Path, prefix: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_frankenfasta_to(genome, &mut writer, prefix)?;
    writer.flush()
}

/// Write `genome` as FASTA to any writer.
///
/// # Errors
///
/// Returns an IO error if writing fails.
pub fn write_frankenfasta_to<W: Write>(
    genome: &Genome,
    inner: W,
    prefix: &str,
) -> std::io::Result<()> {
    let mut writer = fasta::io::Writer::new(inner);

    for (name, calls) in genome.contigs() {
        let definition = Definition::new(format!("{prefix}{name}"), None);
        let record = fasta::Record::new(definition, Sequence::from(calls.to_vec()));
        writer.write_record(&record)?;
    }

    Ok(())
}
