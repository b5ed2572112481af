//! Simple CLI that reads HTML from stdin and outputs the catalog as JSON.
//!
//! Usage: `catalog_stdin [--path <pattern>] [--base-url <url>] < page.html`
//!
//! Without `--path` the catalog is detected; with it the saved pattern is
//! replayed. Set `RUST_LOG=catalog_detect=debug` to see pipeline decisions.

use std::io::{self, Read};
use std::process::ExitCode;

use catalog_detect::{analyze_with_options, extract_with_path, CatalogResult, Options};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog_stdin",
    about = "Detect the article catalog of an HTML page read from stdin",
    version
)]
struct Cli {
    /// Saved generic path to replay instead of detecting.
    #[arg(long)]
    path: Option<String>,

    /// Page URL used to resolve relative links.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Read HTML from stdin
    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        return ExitCode::FAILURE;
    }

    let options = Options {
        base_url: cli.base_url,
        ..Options::default()
    };

    let result = match cli.path {
        Some(path) => extract_with_path(&html, &path, &options).map(|items| CatalogResult {
            items,
            pattern: Some(path),
        }),
        None => analyze_with_options(&html, &options),
    };

    match result {
        Ok(result) => {
            println!("{}", serde_json::to_string(&result).unwrap_or_default());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
