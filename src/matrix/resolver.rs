//! Genotype matrix resolution.
//!
//! The table endpoint serves per-sample genotype calls as `k/k[/...]`
//! tokens. Only the first `/`-field of a call is consulted; the phased
//! remainder is ignored, matching the upstream service's convention.
//!
//! [`resolve_haplotype_matrix`] translates each call into a global
//! haplotype ID through the allele table built from the variants endpoint:
//! call index `k >= 1` on row *i* names `allele_table.row(i)[k - 1]`. The
//! index-only sibling [`resolve_index_matrix`] keeps the raw 0-based call
//! indices for callers that only need local call identity.

use thiserror::Error;
use tracing::info;

use crate::brapi::envelope::{Envelope, TableResult};
use crate::brapi::fetch::{FetchError, Paginator, Transport};
use crate::matrix::alleles::{fetch_allele_table, AlleleTable};

/// Default `pageSize` for the table endpoint.
pub const DEFAULT_TABLE_PAGE_SIZE: u32 = 1000;

/// `pageSize` used internally against the variants endpoint when building
/// the allele table, independent of the caller-supplied table page size.
const VARIANT_PAGE_SIZE: u32 = 1000;

/// Cell value for a missing genotype call (`.`).
pub const MISSING: i32 = -1;

/// Cell value for a reference-allele call (first field `0`).
///
/// A `0` call names the reference allele, which has no alternate-allele
/// entry to translate through. The server convention for whether such
/// calls occur is undocumented, so the case is kept distinguishable from
/// [`MISSING`] instead of being folded into it or rejected.
pub const REF_ALLELE: i32 = -2;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("genotype table at {endpoint} has no rows to size the matrix from")]
    EmptyTable { endpoint: String },

    #[error("genotype row {row} on page {page} has {found} calls, expected {expected}")]
    TaxaMismatch {
        page: u64,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "table endpoint reports {table_rows} rows but variants endpoint produced {variant_rows} allele rows"
    )]
    EndpointMismatch {
        table_rows: u64,
        variant_rows: usize,
    },

    #[error(
        "call '{token}' at row {row}, column {column} names alternate allele {index} but the row has {available}"
    )]
    AlleleIndexOutOfRange {
        row: usize,
        column: usize,
        token: String,
        index: usize,
        available: usize,
    },

    #[error("invalid genotype call '{token}' at page {page}, row {row}, column {column}")]
    InvalidCall {
        page: u64,
        row: usize,
        column: usize,
        token: String,
    },
}

/// Dense row-major matrix of haplotype IDs (or call indices), one row per
/// variant, one column per taxon.
///
/// The shape is fixed at allocation time from page 0's metadata; cells
/// start out as [`MISSING`] and are overwritten as pages arrive, so a cell
/// a malformed response never reached is still well-defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaplotypeMatrix {
    data: Vec<i32>,
    rows: usize,
    taxa: usize,
}

impl HaplotypeMatrix {
    fn filled(rows: usize, taxa: usize, value: i32) -> Self {
        Self {
            data: vec![value; rows * taxa],
            rows,
            taxa,
        }
    }

    /// `(rows, taxa)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.taxa)
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        if row < self.rows && column < self.taxa {
            Some(self.data[row * self.taxa + column])
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[i32]> {
        if row < self.rows {
            Some(&self.data[row * self.taxa..(row + 1) * self.taxa])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        (0..self.rows).map(|row| &self.data[row * self.taxa..(row + 1) * self.taxa])
    }

    fn set(&mut self, row: usize, column: usize, value: i32) {
        self.data[row * self.taxa + column] = value;
    }
}

/// First field of a genotype call token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallIndex {
    /// The missing marker `.`.
    Missing,
    /// Index 0: the reference allele.
    Reference,
    /// Index `k >= 1`: the `k`-th alternate allele, 1-based.
    Alt(usize),
}

fn parse_call(token: &str) -> Option<CallIndex> {
    // split() yields at least one field, even for an empty token
    let first = token.split('/').next().unwrap_or("");
    if first == "." {
        return Some(CallIndex::Missing);
    }
    match first.parse::<usize>() {
        Ok(0) => Some(CallIndex::Reference),
        Ok(k) => Some(CallIndex::Alt(k)),
        Err(_) => None,
    }
}

/// Matrix dimensions resolved from the table endpoint's first page.
struct Dimensions {
    total_count: u64,
    total_taxa: usize,
}

fn matrix_dimensions(
    endpoint: &str,
    pages: &[Envelope<TableResult>],
) -> Result<Dimensions, ResolveError> {
    let first = pages.first().ok_or_else(|| ResolveError::EmptyTable {
        endpoint: endpoint.to_string(),
    })?;

    // totalTaxa is fixed once, from row 0 of page 0
    let total_taxa = first
        .result
        .genotypes
        .first()
        .map(Vec::len)
        .filter(|&taxa| taxa > 0)
        .ok_or_else(|| ResolveError::EmptyTable {
            endpoint: endpoint.to_string(),
        })?;

    Ok(Dimensions {
        total_count: first.metadata.pagination.total_count,
        total_taxa,
    })
}

/// Allocate the matrix and resolve every cell through `resolve_cell`.
///
/// `resolve_cell` receives the absolute row index, column, page index, and
/// call token. All-or-nothing: the first error discards the matrix.
fn fill_matrix<F>(
    endpoint: &str,
    pages: &[Envelope<TableResult>],
    dimensions: &Dimensions,
    mut resolve_cell: F,
) -> Result<HaplotypeMatrix, ResolveError>
where
    F: FnMut(usize, usize, u64, &str) -> Result<i32, ResolveError>,
{
    let total_rows = usize::try_from(dimensions.total_count).map_err(|_| {
        ResolveError::Fetch(FetchError::Decode {
            endpoint: endpoint.to_string(),
            page: 0,
            detail: format!("totalCount {} does not fit in memory", dimensions.total_count),
        })
    })?;

    let mut matrix = HaplotypeMatrix::filled(total_rows, dimensions.total_taxa, MISSING);

    let mut absolute_row = 0usize;
    for (page_index, envelope) in pages.iter().enumerate() {
        let page = page_index as u64;
        for calls in &envelope.result.genotypes {
            if absolute_row >= total_rows {
                return Err(ResolveError::Fetch(FetchError::RowCountMismatch {
                    endpoint: endpoint.to_string(),
                    expected: dimensions.total_count,
                    found: absolute_row as u64 + 1,
                }));
            }
            if calls.len() != dimensions.total_taxa {
                return Err(ResolveError::TaxaMismatch {
                    page,
                    row: absolute_row,
                    expected: dimensions.total_taxa,
                    found: calls.len(),
                });
            }
            for (column, token) in calls.iter().enumerate() {
                let value = resolve_cell(absolute_row, column, page, token)?;
                matrix.set(absolute_row, column, value);
            }
            absolute_row += 1;
        }
    }

    if absolute_row as u64 != dimensions.total_count {
        return Err(ResolveError::Fetch(FetchError::RowCountMismatch {
            endpoint: endpoint.to_string(),
            expected: dimensions.total_count,
            found: absolute_row as u64,
        }));
    }

    Ok(matrix)
}

/// Resolve the full haplotype-identity matrix.
///
/// Fetches the table endpoint at `page_size`, the variants endpoint at the
/// internal page size of 1000, verifies that both endpoints describe
/// the same row count, then translates every call through the allele
/// table. Cells become a global haplotype ID, [`MISSING`], or
/// [`REF_ALLELE`].
///
/// # Errors
///
/// Propagates fetch failures from either endpoint; fails with
/// [`ResolveError::EndpointMismatch`] before any cell is resolved when the
/// endpoints disagree on row count, and with the taxa/call errors
/// documented on [`ResolveError`] during resolution. No partial matrix is
/// ever returned.
pub fn resolve_haplotype_matrix<T: Transport>(
    transport: &T,
    table_url: &str,
    variants_url: &str,
    page_size: u32,
) -> Result<HaplotypeMatrix, ResolveError> {
    info!(table_url, variants_url, page_size, "resolving haplotype matrix");

    let paginator = Paginator::new(transport, table_url, page_size);
    let pages = paginator.fetch_all::<TableResult>()?;
    let dimensions = matrix_dimensions(table_url, &pages)?;

    let allele_table = fetch_allele_table(transport, variants_url, VARIANT_PAGE_SIZE)?;

    // Both endpoints must paginate the same logical row set; misalignment
    // here would silently attach calls to the wrong variant.
    if allele_table.len() as u64 != dimensions.total_count {
        return Err(ResolveError::EndpointMismatch {
            table_rows: dimensions.total_count,
            variant_rows: allele_table.len(),
        });
    }

    let matrix = fill_matrix(table_url, &pages, &dimensions, |row, column, page, token| {
        resolve_haplotype_cell(&allele_table, row, column, page, token)
    })?;

    info!(
        rows = matrix.shape().0,
        taxa = matrix.shape().1,
        "haplotype matrix resolved"
    );
    Ok(matrix)
}

fn resolve_haplotype_cell(
    allele_table: &AlleleTable,
    row: usize,
    column: usize,
    page: u64,
    token: &str,
) -> Result<i32, ResolveError> {
    match parse_call(token) {
        Some(CallIndex::Missing) => Ok(MISSING),
        Some(CallIndex::Reference) => Ok(REF_ALLELE),
        Some(CallIndex::Alt(index)) => {
            // row < allele_table.len() is guaranteed by the endpoint check
            let alleles = allele_table.row(row).unwrap_or(&[]);
            alleles.get(index - 1).copied().ok_or_else(|| {
                ResolveError::AlleleIndexOutOfRange {
                    row,
                    column,
                    token: token.to_string(),
                    index,
                    available: alleles.len(),
                }
            })
        }
        None => Err(ResolveError::InvalidCall {
            page,
            row,
            column,
            token: token.to_string(),
        }),
    }
}

/// Resolve the index-only matrix: raw 0-based call indices, no allele
/// table. Cells become the first field of each call, or [`MISSING`].
///
/// # Errors
///
/// Same fetch, shape, and call-validity errors as
/// [`resolve_haplotype_matrix`], minus the allele-table classes.
pub fn resolve_index_matrix<T: Transport>(
    transport: &T,
    table_url: &str,
    page_size: u32,
) -> Result<HaplotypeMatrix, ResolveError> {
    info!(table_url, page_size, "resolving genotype index matrix");

    let paginator = Paginator::new(transport, table_url, page_size);
    let pages = paginator.fetch_all::<TableResult>()?;
    let dimensions = matrix_dimensions(table_url, &pages)?;

    fill_matrix(table_url, &pages, &dimensions, |row, column, page, token| {
        match parse_call(token) {
            Some(CallIndex::Missing) => Ok(MISSING),
            Some(CallIndex::Reference) => Ok(0),
            Some(CallIndex::Alt(index)) => {
                i32::try_from(index).map_err(|_| ResolveError::InvalidCall {
                    page,
                    row,
                    column,
                    token: token.to_string(),
                })
            }
            None => Err(ResolveError::InvalidCall {
                page,
                row,
                column,
                token: token.to_string(),
            }),
        }
    })
}
