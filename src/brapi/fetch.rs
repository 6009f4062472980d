//! Paginated fetching against a BrAPI endpoint.
//!
//! [`Transport`] is the seam between the pagination logic and the network:
//! production code uses [`HttpTransport`] (blocking `reqwest` with a bounded
//! timeout), tests substitute an in-memory implementation serving canned
//! pages. [`Paginator`] owns the URL construction rules and the
//! metadata-driven page loop.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::brapi::envelope::Envelope;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {endpoint} page {page}: {detail}")]
    Decode {
        endpoint: String,
        page: u64,
        detail: String,
    },

    #[error("{endpoint} reported {expected} rows but {found} were received")]
    RowCountMismatch {
        endpoint: String,
        expected: u64,
        found: u64,
    },
}

/// Blocking GET of a URL, returning the response body as text.
///
/// Implementations must not retry: the paginator treats any error as
/// terminal for the whole multi-page fetch.
pub trait Transport {
    /// # Errors
    ///
    /// Returns `FetchError::Http` on a connection, timeout, or body-read
    /// failure, or `FetchError::Status` for a non-success status code.
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Default per-request timeout for [`HttpTransport`].
///
/// The upstream service this was modeled on performed unbounded blocking
/// requests; a hung request blocking the caller forever is treated here as
/// a defect, so every request carries a deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Transport`] backed by a blocking `reqwest` client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the underlying client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the underlying client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

/// Walks a BrAPI endpoint page by page, decoding each page's envelope.
///
/// Page numbers are 0-indexed. The first page's `metadata.pagination`
/// decides how many pages exist; exactly `totalPages` requests are issued,
/// strictly in increasing page order. Consumers compute the absolute row
/// index of a row as `page * page_size + local_index`.
pub struct Paginator<'a, T: Transport> {
    transport: &'a T,
    base_url: String,
    page_size: u32,
}

impl<'a, T: Transport> Paginator<'a, T> {
    pub fn new(transport: &'a T, base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            page_size,
        }
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Build the request URL for one page.
    ///
    /// A base URL ending in a bare `/variants` or `/table` has no query
    /// string yet and takes `?`; anything else (typically a base that
    /// already carries query parameters) takes `&`.
    fn page_url(&self, page: u64) -> String {
        let connector = if self.base_url.ends_with("/variants") || self.base_url.ends_with("/table")
        {
            '?'
        } else {
            '&'
        };
        format!(
            "{}{}pageSize={}&page={}",
            self.base_url, connector, self.page_size, page
        )
    }

    fn fetch_page<R: DeserializeOwned>(&self, page: u64) -> Result<Envelope<R>, FetchError> {
        let url = self.page_url(page);
        debug!(url = %url, page, "requesting page");
        let body = self.transport.get(&url)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            endpoint: self.base_url.clone(),
            page,
            detail: e.to_string(),
        })
    }

    /// Fetch every page of the endpoint, in page order.
    ///
    /// Page 0 is fetched first to learn `totalPages`; `totalPages == 0`
    /// yields an empty vector (the probe request is still made, since the
    /// page count is unknowable without it).
    ///
    /// # Errors
    ///
    /// Any transport or decode failure on any page aborts the fetch.
    pub fn fetch_all<R: DeserializeOwned>(&self) -> Result<Vec<Envelope<R>>, FetchError> {
        let first: Envelope<R> = self.fetch_page(0)?;
        let total_pages = first.metadata.pagination.total_pages;

        let mut pages = Vec::with_capacity(usize::try_from(total_pages).unwrap_or(0));
        if total_pages == 0 {
            return Ok(pages);
        }

        pages.push(first);
        for page in 1..total_pages {
            pages.push(self.fetch_page(page)?);
        }
        Ok(pages)
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::CannedTransport;
    use super::*;
    use crate::brapi::envelope::VariantsResult;

    fn variants_page(total_count: u64, total_pages: u64, rows: usize, offset: usize) -> String {
        let data: Vec<String> = (0..rows)
            .map(|i| {
                format!(
                    r#"{{"referenceName":"1","start":{s},"end":{e},"variantDbId":"rr_{id}","alternateBases":["{a}"]}}"#,
                    s = (offset + i) * 10,
                    e = (offset + i) * 10 + 5,
                    id = offset + i,
                    a = offset + i,
                )
            })
            .collect();
        format!(
            r#"{{"metadata":{{"pagination":{{"totalCount":{total_count},"totalPages":{total_pages}}}}},"result":{{"data":[{}]}}}}"#,
            data.join(",")
        )
    }

    #[test]
    fn test_connector_for_bare_variants_url() {
        let transport = CannedTransport::new(vec![]);
        let paginator = Paginator::new(&transport, "http://host/brapi/v2/variants", 500);
        assert_eq!(
            paginator.page_url(0),
            "http://host/brapi/v2/variants?pageSize=500&page=0"
        );
    }

    #[test]
    fn test_connector_for_url_with_query() {
        let transport = CannedTransport::new(vec![]);
        let paginator = Paginator::new(&transport, "http://host/brapi/v2/table?foo=bar", 100);
        assert_eq!(
            paginator.page_url(2),
            "http://host/brapi/v2/table?foo=bar&pageSize=100&page=2"
        );
    }

    #[test]
    fn test_fetch_all_requests_exactly_total_pages() {
        let base = "http://host/brapi/v2/variants";
        let transport = CannedTransport::new(vec![
            (
                format!("{base}?pageSize=500&page=0"),
                variants_page(1500, 3, 500, 0),
            ),
            (
                format!("{base}?pageSize=500&page=1"),
                variants_page(1500, 3, 500, 500),
            ),
            (
                format!("{base}?pageSize=500&page=2"),
                variants_page(1500, 3, 500, 1000),
            ),
        ]);

        let paginator = Paginator::new(&transport, base, 500);
        let pages = paginator.fetch_all::<VariantsResult>().unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(transport.requests.borrow().len(), 3);

        // Absolute index of page 2, local row 10 is 2*500 + 10 = 1010.
        let row = &pages[2].result.data[10];
        assert_eq!(row.variant_db_id, "rr_1010");
    }

    #[test]
    fn test_fetch_all_empty_endpoint() {
        let base = "http://host/brapi/v2/variants";
        let transport = CannedTransport::new(vec![(
            format!("{base}?pageSize=500&page=0"),
            variants_page(0, 0, 0, 0),
        )]);

        let paginator = Paginator::new(&transport, base, 500);
        let pages = paginator.fetch_all::<VariantsResult>().unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_fetch_all_aborts_on_failed_page() {
        let base = "http://host/brapi/v2/variants";
        // Page 1 is missing from the canned set, simulating a mid-fetch failure.
        let transport = CannedTransport::new(vec![(
            format!("{base}?pageSize=500&page=0"),
            variants_page(1000, 2, 500, 0),
        )]);

        let paginator = Paginator::new(&transport, base, 500);
        let result = paginator.fetch_all::<VariantsResult>();
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[test]
    fn test_fetch_page_decode_error_names_endpoint_and_page() {
        let base = "http://host/brapi/v2/variants";
        let transport = CannedTransport::new(vec![(
            format!("{base}?pageSize=500&page=0"),
            "{\"not\":\"brapi\"}".to_string(),
        )]);

        let paginator = Paginator::new(&transport, base, 500);
        let err = paginator.fetch_all::<VariantsResult>().unwrap_err();
        match err {
            FetchError::Decode { endpoint, page, .. } => {
                assert_eq!(endpoint, base);
                assert_eq!(page, 0);
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }
}
