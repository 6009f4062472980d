//! Command-line interface for hapmat.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **ranges**: Fetch the reference-range table from a variants endpoint
//! - **alleles**: Fetch the per-variant alternate-allele haplotype-ID table
//! - **matrix**: Resolve the full haplotype-identity matrix from a table
//!   endpoint plus a variants endpoint
//! - **index**: Resolve the index-only genotype matrix (raw call indices)
//!
//! ## Usage
//!
//! ```text
//! # Reference ranges as TSV
//! hapmat ranges http://phg.example.org/brapi/v2/variants --format tsv
//!
//! # Haplotype matrix, JSON output for scripting
//! hapmat matrix http://phg.example.org/brapi/v2/allelematrix/table \
//!     http://phg.example.org/brapi/v2/variants --format json
//!
//! # Raw call indices with a smaller page size
//! hapmat index http://phg.example.org/brapi/v2/allelematrix/table --page-size 500
//! ```

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::brapi::fetch::{FetchError, HttpTransport};

pub mod alleles;
pub mod index;
pub mod matrix;
pub mod ranges;

#[derive(Parser)]
#[command(name = "hapmat")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Assemble haplotype matrices and reference-range tables from BrAPI genotype services")]
#[command(
    long_about = "hapmat pages through the BrAPI 'variants' and 'table' (genotype matrix) endpoints of a pangenome haplotype service, reconciles the rows across endpoints, and prints the assembled tables.\n\nThe variants endpoint contributes reference ranges and per-row alternate-allele haplotype IDs; the table endpoint contributes per-sample genotype calls, which the matrix command translates into global haplotype IDs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the reference-range table from a variants endpoint
    Ranges(ranges::RangesArgs),

    /// Fetch the alternate-allele haplotype-ID table from a variants endpoint
    Alleles(alleles::AllelesArgs),

    /// Resolve the haplotype-identity matrix from table + variants endpoints
    Matrix(matrix::MatrixArgs),

    /// Resolve the index-only genotype matrix from a table endpoint
    Index(index::IndexArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

pub(crate) fn build_transport(timeout_secs: u64) -> Result<HttpTransport, FetchError> {
    HttpTransport::with_timeout(Duration::from_secs(timeout_secs))
}
