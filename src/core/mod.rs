//! Core data types for projected genomes.
//!
//! - [`call`]: the per-position call alphabet and reverse-complementation
//! - [`contig`]: reference contig lengths
//! - [`genome`]: the in-memory genome store
//!
//! ## Calls
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | base   | Copied from the external genome |
//! | `!`    | Covered by an alignment, deleted in the external genome |
//! | `X`    | Not covered by any alignment |

pub mod call;
pub mod contig;
pub mod genome;
