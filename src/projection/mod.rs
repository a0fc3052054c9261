//! Projection of an external genome onto reference coordinates.
//!
//! The pipeline for one external genome is:
//!
//! 1. [`driver`] streams the delta file through the line classifier
//! 2. [`projector`] decodes each record against the current [`state`],
//!    copying bases from the external genome into the output genome
//! 3. [`finalize`] pads every output contig to its reference length with `'X'`
//!
//! Every projection owns its parser state, so independent genomes can be
//! projected on separate threads.
//!
//! ## Example
//!
//! ```rust
//! use frankenfasta::core::contig::ContigSizes;
//! use frankenfasta::core::genome::Genome;
//! use frankenfasta::projection::{project_delta_reader, ProjectionOptions};
//!
//! let mut external = Genome::new();
//! external.insert_contig("qry1", b"ACGTACGTAC".to_vec());
//!
//! let delta = ">ref1 qry1 12 10\n1 10 1 10 0 0 0\n0\n";
//! let mut output = Genome::new();
//! let mut sizes = ContigSizes::new();
//! project_delta_reader(
//!     delta.as_bytes(),
//!     &mut external,
//!     &mut output,
//!     &mut sizes,
//!     ProjectionOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(output.contig("ref1"), Some(b"ACGTACGTACXX".as_slice()));
//! ```

pub mod driver;
pub mod error;
pub mod finalize;
pub mod inspect;
pub mod projector;
pub mod state;

pub use driver::{
    project_delta_file, project_delta_reader, LinePolicy, ProjectionOptions, ProjectionSummary,
};
pub use error::ProjectionError;
pub use inspect::{inspect_delta_file, DeltaOverview};
