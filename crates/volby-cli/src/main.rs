use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use volby_acquire::{RunOutcome, ScrapeConfig};

#[derive(Parser)]
#[command(name = "volby-scrape")]
#[command(about = "Export 2017 Czech parliamentary election results of one region to CSV")]
#[command(version)]
struct Cli {
    /// Region listing URL (must start with https://www.volby.cz/pls/ps2017nss/)
    region_url: String,

    /// Output CSV file, overwritten if it exists
    output_csv: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // RUST_LOG overrides; HTML parsing crates stay quiet unless asked for
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,selectors=warn,html5ever=warn"));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
        .init();

    let args = match volby_validate::validate_args(&cli.region_url, &cli.output_csv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: volby-scrape <REGION_URL> <OUTPUT_CSV>");
            std::process::exit(1);
        }
    };

    let config = ScrapeConfig::default();
    match volby_acquire::run(&args.region_url, &args.output_path, &config).await? {
        RunOutcome::Written { path, rows, columns } => {
            tracing::info!(path = %path.display(), rows, columns, "Done");
        }
        RunOutcome::NoData => {
            tracing::info!("Done, no output written");
        }
    }

    Ok(())
}
