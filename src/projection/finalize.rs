use crate::core::call::UNALIGNED_CALL;
use crate::core::contig::ContigSizes;
use crate::core::genome::{Genome, GenomeError};

/// Pad every contig of `output` to its declared length with `'X'`.
///
/// Contigs present in `sizes` but never written (no delta header named them)
/// are created and filled entirely with `'X'`.
///
/// # Errors
///
/// Returns `GenomeError::UnknownContig` if a contig cannot be extended.
pub fn finalize(output: &mut Genome, sizes: &ContigSizes) -> Result<(), GenomeError> {
    for contig in sizes.iter() {
        output.add_contig(&contig.name);
        output.extend(&contig.name, contig.length, UNALIGNED_CALL)?;
    }
    Ok(())
}
