//! Per-variant alternate-allele haplotype-ID table.
//!
//! Row *i* of the [`AlleleTable`] is the ordered list of global haplotype
//! IDs appearing in the `alternateBases` array of the *i*-th variants row.
//! Genotype calls index into this list 1-based: call index `k >= 1` on row
//! *i* names `table.row(i)[k - 1]`; index 0 is the reference allele and has
//! no entry here.
//!
//! Rows are kept in encounter order (page-major, then intra-page); nothing
//! is reordered or deduplicated.

use tracing::info;

use crate::brapi::envelope::VariantsResult;
use crate::brapi::fetch::{FetchError, Paginator, Transport};
use crate::matrix::HapId;

/// Ordered alternate-allele lists, one row per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlleleTable {
    rows: Vec<Vec<HapId>>,
}

impl AlleleTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[HapId]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[HapId]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Whether `id` appears in any row of the table.
    #[must_use]
    pub fn contains(&self, id: HapId) -> bool {
        self.rows.iter().any(|row| row.contains(&id))
    }
}

impl From<Vec<Vec<HapId>>> for AlleleTable {
    fn from(rows: Vec<Vec<HapId>>) -> Self {
        Self { rows }
    }
}

/// Fetch the allele table from a variants endpoint.
///
/// # Errors
///
/// Propagates fetch failures; returns [`FetchError::Decode`] when an
/// `alternateBases` entry is not a decimal haplotype ID, and
/// [`FetchError::RowCountMismatch`] when the received row total disagrees
/// with page 0's `totalCount`.
pub fn fetch_allele_table<T: Transport>(
    transport: &T,
    url: &str,
    page_size: u32,
) -> Result<AlleleTable, FetchError> {
    info!(url, page_size, "fetching allele table");

    let paginator = Paginator::new(transport, url, page_size);
    let pages = paginator.fetch_all::<VariantsResult>()?;

    let expected = pages
        .first()
        .map_or(0, |page| page.metadata.pagination.total_count);

    let mut rows: Vec<Vec<HapId>> = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
    for (page_index, envelope) in pages.iter().enumerate() {
        for variant in &envelope.result.data {
            let mut ids = Vec::with_capacity(variant.alternate_bases.len());
            for base in &variant.alternate_bases {
                let id: HapId = base.parse().map_err(|_| FetchError::Decode {
                    endpoint: url.to_string(),
                    page: page_index as u64,
                    detail: format!(
                        "alternateBases entry '{base}' of variant '{}' is not an integer haplotype ID",
                        variant.variant_db_id
                    ),
                })?;
                ids.push(id);
            }
            rows.push(ids);
        }
    }

    if rows.len() as u64 != expected {
        return Err(FetchError::RowCountMismatch {
            endpoint: url.to_string(),
            expected,
            found: rows.len() as u64,
        });
    }

    info!(rows = rows.len(), "allele table assembled");
    Ok(AlleleTable { rows })
}
