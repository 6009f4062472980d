//! Reference-range extraction from the variants endpoint.
//!
//! Each variants row carries a genomic interval (`referenceName`, `start`,
//! `end`) and its server-assigned `variantDbId`. The extractor walks every
//! page and returns the rows in server order, one [`ReferenceRange`] per
//! variant row.

use serde::Serialize;
use tracing::info;

use crate::brapi::envelope::VariantsResult;
use crate::brapi::fetch::{FetchError, Paginator, Transport};

/// Default `pageSize` for the variants endpoint.
pub const DEFAULT_RANGE_PAGE_SIZE: u32 = 500;

/// A genomic interval with its server-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRange {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
    pub db_id: String,
}

/// Fetch the full reference-range table from a variants endpoint.
///
/// Output order is absolute row-index order across pages (page 0 row 0,
/// page 0 row 1, ..., page 1 row 0, ...). The returned table's length is
/// verified against the `totalCount` reported by page 0's metadata.
///
/// # Errors
///
/// Propagates any [`FetchError`] from the underlying fetch, and returns
/// [`FetchError::RowCountMismatch`] when the rows actually received do not
/// add up to the reported `totalCount`.
pub fn fetch_reference_ranges<T: Transport>(
    transport: &T,
    url: &str,
    page_size: u32,
) -> Result<Vec<ReferenceRange>, FetchError> {
    info!(url, page_size, "fetching reference ranges");

    let paginator = Paginator::new(transport, url, page_size);
    let pages = paginator.fetch_all::<VariantsResult>()?;

    let expected = pages
        .first()
        .map_or(0, |page| page.metadata.pagination.total_count);

    let mut ranges = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
    for envelope in pages {
        for row in envelope.result.data {
            ranges.push(ReferenceRange {
                chromosome: row.reference_name,
                start: row.start,
                end: row.end,
                db_id: row.variant_db_id,
            });
        }
    }

    if ranges.len() as u64 != expected {
        return Err(FetchError::RowCountMismatch {
            endpoint: url.to_string(),
            expected,
            found: ranges.len() as u64,
        });
    }

    info!(rows = ranges.len(), "reference ranges assembled");
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brapi::fetch::testutil::CannedTransport;

    fn page(total_count: u64, total_pages: u64, ids: &[u32]) -> String {
        let data: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"referenceName":"chr{c}","start":{s},"end":{e},"variantDbId":"rr_{id}"}}"#,
                    c = id % 10 + 1,
                    s = id * 100,
                    e = id * 100 + 50,
                )
            })
            .collect();
        format!(
            r#"{{"metadata":{{"pagination":{{"totalCount":{total_count},"totalPages":{total_pages}}}}},"result":{{"data":[{}]}}}}"#,
            data.join(",")
        )
    }

    #[test]
    fn test_ranges_span_pages_in_order() {
        let base = "http://host/brapi/v2/variants";
        let transport = CannedTransport::new(vec![
            (format!("{base}?pageSize=2&page=0"), page(4, 2, &[0, 1])),
            (format!("{base}?pageSize=2&page=1"), page(4, 2, &[2, 3])),
        ]);

        let ranges = fetch_reference_ranges(&transport, base, 2).unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0].db_id, "rr_0");
        assert_eq!(ranges[3].db_id, "rr_3");
        assert_eq!(ranges[2].chromosome, "chr3");
        assert_eq!(ranges[2].start, 200);
        assert_eq!(ranges[2].end, 250);
    }

    #[test]
    fn test_ranges_length_matches_total_count() {
        let base = "http://host/brapi/v2/variants";
        let transport = CannedTransport::new(vec![(
            format!("{base}?pageSize=10&page=0"),
            page(3, 1, &[0, 1, 2]),
        )]);

        let ranges = fetch_reference_ranges(&transport, base, 10).unwrap();
        assert_eq!(ranges.len(), 3);
    }

    #[test]
    fn test_short_page_is_row_count_mismatch() {
        let base = "http://host/brapi/v2/variants";
        // Server claims 4 rows over 2 pages but the last page is short.
        let transport = CannedTransport::new(vec![
            (format!("{base}?pageSize=2&page=0"), page(4, 2, &[0, 1])),
            (format!("{base}?pageSize=2&page=1"), page(4, 2, &[2])),
        ]);

        let err = fetch_reference_ranges(&transport, base, 2).unwrap_err();
        assert!(matches!(
            err,
            FetchError::RowCountMismatch {
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_endpoint_yields_empty_table() {
        let base = "http://host/brapi/v2/variants";
        let transport = CannedTransport::new(vec![(
            format!("{base}?pageSize=500&page=0"),
            page(0, 0, &[]),
        )]);

        let ranges = fetch_reference_ranges(&transport, base, 500).unwrap();
        assert!(ranges.is_empty());
    }

    #[test]
    fn test_idempotent_across_fetches() {
        let base = "http://host/brapi/v2/variants";
        let pages = vec![(format!("{base}?pageSize=10&page=0"), page(2, 1, &[5, 6]))];
        let transport = CannedTransport::new(pages.clone());
        let transport_again = CannedTransport::new(pages);

        let first = fetch_reference_ranges(&transport, base, 10).unwrap();
        let second = fetch_reference_ranges(&transport_again, base, 10).unwrap();
        assert_eq!(first, second);
    }
}
