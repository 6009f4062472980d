use clap::Args;

use crate::cli::OutputFormat;
use crate::matrix::ranges::{fetch_reference_ranges, ReferenceRange, DEFAULT_RANGE_PAGE_SIZE};

#[derive(Args)]
pub struct RangesArgs {
    /// Variants endpoint URL (e.g. http://host/brapi/v2/variants)
    #[arg(required = true)]
    pub url: String,

    /// Rows per page request
    #[arg(long, default_value_t = DEFAULT_RANGE_PAGE_SIZE)]
    pub page_size: u32,
}

pub fn run(args: RangesArgs, format: OutputFormat, verbose: bool, timeout: u64) -> anyhow::Result<()> {
    let transport = crate::cli::build_transport(timeout)?;
    let ranges = fetch_reference_ranges(&transport, &args.url, args.page_size)?;

    if verbose {
        eprintln!("Fetched {} reference ranges from {}", ranges.len(), args.url);
    }

    match format {
        OutputFormat::Text => print_text(&ranges),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ranges)?),
        OutputFormat::Tsv => print_tsv(&ranges),
    }

    Ok(())
}

fn print_text(ranges: &[ReferenceRange]) {
    println!("Reference Ranges");
    println!("{}", "=".repeat(60));
    println!("{:<12} {:>12} {:>12}  {}", "chromosome", "start", "end", "db_id");
    for range in ranges {
        println!(
            "{:<12} {:>12} {:>12}  {}",
            range.chromosome, range.start, range.end, range.db_id
        );
    }
    println!("\nTotal: {} ranges", ranges.len());
}

fn print_tsv(ranges: &[ReferenceRange]) {
    println!("chromosome\tstart\tend\tdb_id");
    for range in ranges {
        println!(
            "{}\t{}\t{}\t{}",
            range.chromosome, range.start, range.end, range.db_id
        );
    }
}
