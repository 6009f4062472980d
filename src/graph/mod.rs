//! Haplotype sequence lookup against an in-memory pangenome graph.
//!
//! The graph itself is an external collaborator, consumed through the
//! [`lookup::GraphNode`] trait: a stream of nodes, each exposing an integer
//! haplotype ID and a retrievable sequence. No pagination is involved.

pub mod lookup;

pub use lookup::{lookup_sequences, GraphNode, HaplotypeSequence};
