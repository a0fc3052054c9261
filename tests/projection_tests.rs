//! End-to-end projection scenarios through the public library API.

use std::collections::HashSet;
use std::io::Write;

use frankenfasta::core::call::{reverse_complement, DELETION_CALL, UNALIGNED_CALL};
use frankenfasta::core::contig::{Contig, ContigSizes};
use frankenfasta::core::genome::Genome;
use frankenfasta::output::frankenfasta::write_frankenfasta_to;
use frankenfasta::parsing::fasta::read_genome;
use frankenfasta::projection::{
    project_delta_file, project_delta_reader, ProjectionError, ProjectionOptions,
};
use tempfile::NamedTempFile;

const QRY1: &[u8] = b"ACGTACGTAC";

fn external_genome() -> Genome {
    let mut external = Genome::new();
    external.insert_contig("qry1", QRY1.to_vec());
    external.insert_contig("qry2", b"TTTTGGGGCCCCAAAA".to_vec());
    external
}

fn project(delta: &str) -> Result<Genome, ProjectionError> {
    project_with_sizes(delta, ContigSizes::new())
}

fn project_with_sizes(delta: &str, mut sizes: ContigSizes) -> Result<Genome, ProjectionError> {
    let mut external = external_genome();
    let mut output = Genome::new();
    project_delta_reader(
        delta.as_bytes(),
        &mut external,
        &mut output,
        &mut sizes,
        ProjectionOptions::default(),
    )?;
    Ok(output)
}

#[test]
fn test_full_match_without_indels() {
    let output = project(">ref1 qry1 10 10\n1 10 1 10 0 0 0\n0\n").unwrap();
    assert_eq!(output.contig("ref1"), Some(QRY1));
}

#[test]
fn test_reverse_strand_block() {
    let output = project(">ref1 qry1 10 10\n1 10 10 1 0 0 0\n0\n").unwrap();
    assert_eq!(output.contig("ref1").unwrap(), reverse_complement(QRY1).as_slice());
}

#[test]
fn test_query_insertion_consumes_no_reference() {
    // Two matched bases, an inserted query base, then the rest of the block
    let output = project(">ref1 qry1 9 10\n1 9 1 10 1 1 0\n-3\n0\n").unwrap();
    let calls = output.contig("ref1").unwrap();

    assert_eq!(calls.len(), 9);
    assert_eq!(&calls[..2], b"AC");
    // query position 3 (G) was skipped
    assert_eq!(&calls[2..], &QRY1[3..]);
}

#[test]
fn test_reference_gap_writes_deletion_marker() {
    let output = project(">ref1 qry1 10 10\n1 10 1 9 1 1 0\n3\n0\n").unwrap();
    let calls = output.contig("ref1").unwrap();

    assert_eq!(&calls[..2], b"AC");
    assert_eq!(calls[2], DELETION_CALL);
    assert_eq!(&calls[3..], &QRY1[2..9]);
}

#[test]
fn test_trailing_unaligned_region() {
    let output = project(">ref1 qry1 15 10\n1 10 1 10 0 0 0\n0\n").unwrap();
    let calls = output.contig("ref1").unwrap();

    assert_eq!(&calls[..10], QRY1);
    assert!(calls[10..].iter().all(|&c| c == UNALIGNED_CALL));
    assert_eq!(calls.len(), 15);
}

#[test]
fn test_multiple_blocks_and_contigs() {
    let delta = "\
/ref.fa /ext.fa
NUCMER
>ref1 qry1 30 10
1 5 1 5 0 0 0
0
21 25 10 6 0 0 0
0
>ref2 qry2 20 16
5 20 1 16 0 0 0
0
";
    let output = project(delta).unwrap();

    let ref1 = output.contig("ref1").unwrap();
    assert_eq!(&ref1[..5], b"ACGTA");
    assert!(ref1[5..20].iter().all(|&c| c == UNALIGNED_CALL));
    assert_eq!(&ref1[20..25], reverse_complement(&QRY1[5..10]).as_slice());
    assert_eq!(ref1.len(), 30);

    let ref2 = output.contig("ref2").unwrap();
    assert_eq!(&ref2[..4], b"XXXX");
    assert_eq!(&ref2[4..], b"TTTTGGGGCCCCAAAA");

    let names: Vec<&str> = output.contig_names().collect();
    assert_eq!(names, vec!["ref1", "ref2"]);
}

#[test]
fn test_two_query_contigs_on_one_reference_contig() {
    let delta = "\
>ref1 qry1 20 10
1 4 1 4 0 0 0
0
>ref1 qry2 20 16
11 14 13 16 0 0 0
0
";
    let output = project(delta).unwrap();
    assert_eq!(output.contig("ref1").unwrap(), b"ACGTXXXXXXAAAAXXXXXX");
}

#[test]
fn test_coverage_totality() {
    let delta = "\
>ref1 qry1 12 10
2 11 1 10 2 2 0
4
-2
0
";
    let sizes = ContigSizes::from_contigs(vec![Contig::new("ref1", 12), Contig::new("ref9", 5)]);
    let output = project_with_sizes(delta, sizes.clone()).unwrap();

    for contig in sizes.iter() {
        let calls = output.contig(&contig.name).unwrap();
        assert_eq!(calls.len() as u64, contig.length, "contig {}", contig.name);
        assert!(calls
            .iter()
            .all(|&c| c == DELETION_CALL || c == UNALIGNED_CALL || b"ACGT".contains(&c)));
    }
    assert_eq!(output.contig("ref9"), Some(b"XXXXX".as_slice()));
}

#[test]
fn test_idempotent_output() {
    let delta = ">ref1 qry1 12 10\n1 10 10 1 1 1 0\n-4\n3\n0\n";

    let render = || {
        let output = project(delta).unwrap();
        let mut buffer = Vec::new();
        write_frankenfasta_to(&output, &mut buffer, "franken::").unwrap();
        buffer
    };

    assert_eq!(render(), render());
}

#[test]
fn test_independent_projections_on_separate_threads() {
    let deltas = [
        ">ref1 qry1 10 10\n1 10 1 10 0 0 0\n0\n",
        ">ref1 qry1 10 10\n1 10 10 1 0 0 0\n0\n",
        ">ref1 qry2 16 16\n1 16 1 16 0 0 0\n0\n",
    ];

    let results: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = deltas
            .iter()
            .map(|delta| scope.spawn(move || project(delta).unwrap().contig("ref1").unwrap().to_vec()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results[0], QRY1);
    assert_eq!(results[1], reverse_complement(QRY1));
    assert_eq!(results[2], b"TTTTGGGGCCCCAAAA");

    let unique: HashSet<&Vec<u8>> = results.iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn test_fatal_error_leaves_other_projection_unaffected() {
    assert!(project("1 10 1 10 0 0 0\n").is_err());
    assert!(project(">ref1 qry1 10 10\n1 10 1 10 0 0 0\n0\n").is_ok());
}

#[test]
fn test_project_from_files() {
    let mut fasta = NamedTempFile::with_suffix(".fa").unwrap();
    fasta.write_all(b">qry1 some contig\nACGTA\nCGTAC\n").unwrap();
    fasta.flush().unwrap();

    let mut delta = NamedTempFile::with_suffix(".delta").unwrap();
    delta
        .write_all(b"/ref.fa /ext.fa\nNUCMER\n>ref1 qry1 12 10\n1 10 1 10 0 0 0\n0\n")
        .unwrap();
    delta.flush().unwrap();

    let mut external = read_genome(fasta.path()).unwrap();
    let mut output = Genome::new();
    let mut sizes = ContigSizes::new();
    let summary = project_delta_file(
        delta.path(),
        &mut external,
        &mut output,
        &mut sizes,
        ProjectionOptions::default(),
    )
    .unwrap();

    assert_eq!(output.contig("ref1"), Some(b"ACGTACGTACXX".as_slice()));
    assert_eq!(summary.stats.alignment_blocks, 1);
    assert_eq!(summary.calls.aligned, 10);
    assert_eq!(summary.calls.unaligned, 2);
}
