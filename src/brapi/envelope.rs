//! Typed decode of the BrAPI JSON response envelope.
//!
//! Every BrAPI response wraps its payload in the same envelope:
//!
//! ```json
//! {
//!   "metadata": { "pagination": { "totalCount": 1500, "totalPages": 3 } },
//!   "result": { ... }
//! }
//! ```
//!
//! The `result` shape differs per endpoint family, so [`Envelope`] is
//! generic over it: [`VariantsResult`] for `/variants` and [`TableResult`]
//! for `/table`.

use serde::Deserialize;

/// Pagination metadata reported by the server on every page.
///
/// The values are trusted for request planning (how many pages to ask for)
/// but row totals are re-verified once all pages have been received.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(rename = "totalCount")]
    pub total_count: u64,

    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub pagination: Pagination,
}

/// The outer BrAPI response envelope, generic over the `result` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<R> {
    pub metadata: Metadata,
    pub result: R,
}

/// `result` payload of the variants endpoint family.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantsResult {
    pub data: Vec<VariantRow>,
}

/// One row of the variants endpoint: a reference range plus the ordered
/// list of alternate alleles observed at it.
///
/// `alternate_bases` entries are decimal haplotype IDs transmitted as JSON
/// strings; they are parsed to integers by the allele table builder, where
/// a parse failure can be reported with endpoint and page context.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantRow {
    #[serde(rename = "referenceName")]
    pub reference_name: String,

    pub start: i64,

    pub end: i64,

    #[serde(rename = "variantDbId")]
    pub variant_db_id: String,

    #[serde(rename = "alternateBases", default)]
    pub alternate_bases: Vec<String>,
}

/// `result` payload of the table (genotype matrix) endpoint family.
///
/// `genotypes` is row-major: one inner vector per variant row, one call
/// token per taxon, e.g. `"2/2"` or the missing marker `"."`.
#[derive(Debug, Clone, Deserialize)]
pub struct TableResult {
    pub genotypes: Vec<Vec<String>>,
}
