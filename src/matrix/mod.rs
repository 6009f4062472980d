//! Assembly of haplotype tables and matrices from paginated endpoints.
//!
//! This module holds the reconcile half of the pipeline:
//!
//! - [`ranges`]: extract the reference-range table from the variants endpoint
//! - [`alleles`]: build the per-row alternate-allele haplotype-ID table
//! - [`resolver`]: resolve per-sample genotype calls into the dense
//!   [`resolver::HaplotypeMatrix`]
//!
//! Rows discovered on each endpoint are aligned by absolute row index
//! (`page * pageSize + local_index`); the variants and table endpoints are
//! assumed to paginate the same logical row set in the same order, and the
//! resolver fails fast when their row counts disagree.

pub mod alleles;
pub mod ranges;
pub mod resolver;

/// Global integer identifier of one haplotype in the pangenome graph.
pub type HapId = i32;

pub use alleles::{fetch_allele_table, AlleleTable};
pub use ranges::{fetch_reference_ranges, ReferenceRange, DEFAULT_RANGE_PAGE_SIZE};
pub use resolver::{
    resolve_haplotype_matrix, resolve_index_matrix, HaplotypeMatrix, ResolveError,
    DEFAULT_TABLE_PAGE_SIZE, MISSING, REF_ALLELE,
};
