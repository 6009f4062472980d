use clap::Args;

use crate::cli::OutputFormat;
use crate::matrix::alleles::{fetch_allele_table, AlleleTable};
use crate::matrix::resolver::DEFAULT_TABLE_PAGE_SIZE;

#[derive(Args)]
pub struct AllelesArgs {
    /// Variants endpoint URL (e.g. http://host/brapi/v2/variants)
    #[arg(required = true)]
    pub url: String,

    /// Rows per page request
    #[arg(long, default_value_t = DEFAULT_TABLE_PAGE_SIZE)]
    pub page_size: u32,
}

pub fn run(args: AllelesArgs, format: OutputFormat, verbose: bool, timeout: u64) -> anyhow::Result<()> {
    let transport = crate::cli::build_transport(timeout)?;
    let table = fetch_allele_table(&transport, &args.url, args.page_size)?;

    if verbose {
        eprintln!("Fetched allele table with {} rows from {}", table.len(), args.url);
    }

    match format {
        OutputFormat::Text => print_text(&table),
        OutputFormat::Json => {
            let rows: Vec<&[i32]> = table.rows().collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Tsv => print_tsv(&table),
    }

    Ok(())
}

fn print_text(table: &AlleleTable) {
    println!("Allele Table");
    println!("{}", "=".repeat(60));
    for (index, row) in table.rows().enumerate() {
        let ids: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{index:>8}  [{}]", ids.join(", "));
    }
    println!("\nTotal: {} variant rows", table.len());
}

fn print_tsv(table: &AlleleTable) {
    println!("row\thap_ids");
    for (index, row) in table.rows().enumerate() {
        let ids: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{index}\t{}", ids.join(","));
    }
}
