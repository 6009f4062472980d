use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::matrix::resolver::{
    resolve_haplotype_matrix, HaplotypeMatrix, DEFAULT_TABLE_PAGE_SIZE, MISSING, REF_ALLELE,
};

#[derive(Args)]
pub struct MatrixArgs {
    /// Table (genotype matrix) endpoint URL
    #[arg(required = true)]
    pub table_url: String,

    /// Variants endpoint URL
    #[arg(required = true)]
    pub variants_url: String,

    /// Rows per page request against the table endpoint
    #[arg(long, default_value_t = DEFAULT_TABLE_PAGE_SIZE)]
    pub page_size: u32,
}

/// JSON shape shared by the matrix and index commands.
#[derive(Serialize)]
pub(crate) struct MatrixOutput {
    pub rows: usize,
    pub taxa: usize,
    pub cells: Vec<Vec<i32>>,
}

impl MatrixOutput {
    pub(crate) fn from_matrix(matrix: &HaplotypeMatrix) -> Self {
        let (rows, taxa) = matrix.shape();
        Self {
            rows,
            taxa,
            cells: matrix.rows().map(<[i32]>::to_vec).collect(),
        }
    }
}

pub fn run(args: MatrixArgs, format: OutputFormat, verbose: bool, timeout: u64) -> anyhow::Result<()> {
    let transport = crate::cli::build_transport(timeout)?;
    let matrix =
        resolve_haplotype_matrix(&transport, &args.table_url, &args.variants_url, args.page_size)?;

    if verbose {
        let (rows, taxa) = matrix.shape();
        eprintln!("Resolved {rows} x {taxa} haplotype matrix");
    }

    match format {
        OutputFormat::Text => print_text(&matrix),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&MatrixOutput::from_matrix(&matrix))?
            );
        }
        OutputFormat::Tsv => print_tsv(&matrix),
    }

    Ok(())
}

fn print_text(matrix: &HaplotypeMatrix) {
    let (rows, taxa) = matrix.shape();
    let mut missing = 0usize;
    let mut reference = 0usize;
    for row in matrix.rows() {
        for &cell in row {
            if cell == MISSING {
                missing += 1;
            } else if cell == REF_ALLELE {
                reference += 1;
            }
        }
    }

    println!("Haplotype Matrix");
    println!("{}", "=".repeat(60));
    println!("Rows (variants):  {rows}");
    println!("Columns (taxa):   {taxa}");
    println!("Missing cells:    {missing}");
    println!("Reference cells:  {reference}");
}

pub(crate) fn print_tsv(matrix: &HaplotypeMatrix) {
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", cells.join("\t"));
    }
}
