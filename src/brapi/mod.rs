//! BrAPI endpoint access: typed envelope decoding and paginated fetching.
//!
//! This module provides the network-facing half of the crate:
//!
//! - [`envelope`]: serde types for the BrAPI JSON envelope
//!   (`metadata.pagination` plus the `result` payload of the "variants" and
//!   "table" endpoint families)
//! - [`fetch`]: the [`Transport`] seam, a blocking HTTP implementation, and
//!   the [`Paginator`] that walks an endpoint page by page
//!
//! Both endpoint families take `pageSize` and `page` query parameters and
//! report `totalCount`/`totalPages` in the first page's metadata. The
//! paginator reads that metadata once, then issues exactly `totalPages`
//! requests (pages `0..totalPages`), strictly in order. Any transport or
//! decode failure aborts the whole fetch; there are no retries and no
//! partial results.
//!
//! JSON is decoded into typed rows at this boundary, so malformed responses
//! surface as [`fetch::FetchError::Decode`] naming the endpoint and page,
//! and downstream code never touches untyped values.

pub mod envelope;
pub mod fetch;

pub use envelope::{Envelope, Pagination, TableResult, VariantRow, VariantsResult};
pub use fetch::{FetchError, HttpTransport, Paginator, Transport};
