use clap::Args;

use crate::cli::matrix::MatrixOutput;
use crate::cli::OutputFormat;
use crate::matrix::resolver::{resolve_index_matrix, HaplotypeMatrix, DEFAULT_TABLE_PAGE_SIZE, MISSING};

#[derive(Args)]
pub struct IndexArgs {
    /// Table (genotype matrix) endpoint URL
    #[arg(required = true)]
    pub table_url: String,

    /// Rows per page request
    #[arg(long, default_value_t = DEFAULT_TABLE_PAGE_SIZE)]
    pub page_size: u32,
}

pub fn run(args: IndexArgs, format: OutputFormat, verbose: bool, timeout: u64) -> anyhow::Result<()> {
    let transport = crate::cli::build_transport(timeout)?;
    let matrix = resolve_index_matrix(&transport, &args.table_url, args.page_size)?;

    if verbose {
        let (rows, taxa) = matrix.shape();
        eprintln!("Resolved {rows} x {taxa} genotype index matrix");
    }

    match format {
        OutputFormat::Text => print_text(&matrix),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&MatrixOutput::from_matrix(&matrix))?
            );
        }
        OutputFormat::Tsv => crate::cli::matrix::print_tsv(&matrix),
    }

    Ok(())
}

fn print_text(matrix: &HaplotypeMatrix) {
    let (rows, taxa) = matrix.shape();
    let missing = matrix
        .rows()
        .flat_map(|row| row.iter())
        .filter(|&&cell| cell == MISSING)
        .count();

    println!("Genotype Index Matrix");
    println!("{}", "=".repeat(60));
    println!("Rows (variants):  {rows}");
    println!("Columns (taxa):   {taxa}");
    println!("Missing cells:    {missing}");
}
