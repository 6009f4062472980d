//! # hapmat
//!
//! A library for assembling haplotype-identity matrices and reference-range
//! tables from BrAPI-compliant pangenome genotype services.
//!
//! Pangenome haplotype services expose their data through two paginated
//! endpoint families: "variants" (reference ranges plus per-row alternate
//! alleles) and "table" (per-sample genotype calls). Each endpoint carries
//! its own pagination metadata, and the total row count is only known once
//! the first page's metadata has been read.
//!
//! `hapmat` pages through both endpoints, aligns rows across page
//! boundaries by absolute row index, and translates genotype call tokens
//! into global haplotype IDs, producing a dense in-memory matrix. It also
//! looks up haplotype sequences from an in-memory pangenome graph by ID.
//!
//! ## Features
//!
//! - **Metadata-driven pagination**: page counts come from the first
//!   response; exactly `totalPages` requests are issued, in order
//! - **Typed decode at the fetch boundary**: malformed responses surface as
//!   errors naming the endpoint, page, and field
//! - **Cross-endpoint alignment checks**: resolution fails fast when the
//!   table and variants endpoints disagree on row counts
//! - **Explicit sentinels**: missing calls and reference-allele calls are
//!   distinguishable cell values, never out-of-bounds accesses
//!
//! ## Example
//!
//! ```rust,no_run
//! use hapmat::{resolve_haplotype_matrix, HttpTransport, MISSING};
//!
//! let transport = HttpTransport::new().unwrap();
//! let matrix = resolve_haplotype_matrix(
//!     &transport,
//!     "http://phg.example.org/brapi/v2/allelematrix/table",
//!     "http://phg.example.org/brapi/v2/variants",
//!     1000,
//! )
//! .unwrap();
//!
//! let (rows, taxa) = matrix.shape();
//! println!("{rows} variants x {taxa} taxa");
//! ```
//!
//! ## Modules
//!
//! - [`brapi`]: typed envelope decoding and the paginated fetcher
//! - [`matrix`]: reference ranges, allele tables, and matrix resolution
//! - [`graph`]: haplotype sequence lookup from a graph node stream
//! - [`cli`]: command-line interface implementation

pub mod brapi;
pub mod cli;
pub mod graph;
pub mod matrix;

// Re-export commonly used types for convenience
pub use brapi::envelope::{Envelope, Pagination};
pub use brapi::fetch::{FetchError, HttpTransport, Paginator, Transport};
pub use graph::lookup::{lookup_sequences, GraphNode, HaplotypeSequence};
pub use matrix::alleles::{fetch_allele_table, AlleleTable};
pub use matrix::ranges::{fetch_reference_ranges, ReferenceRange};
pub use matrix::resolver::{
    resolve_haplotype_matrix, resolve_index_matrix, HaplotypeMatrix, ResolveError, MISSING,
    REF_ALLELE,
};
pub use matrix::HapId;
