use clap::Parser;
use eml_url_extract::{extract_file, logging, UrlSet};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Print every unique http(s) URL found in one .eml message
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the .eml file
    #[arg(value_name = "FILE")]
    eml: PathBuf,
}

/// One URL per line followed by the total; nothing when the set is empty
fn write_urls(out: &mut impl Write, urls: &UrlSet) -> io::Result<()> {
    if urls.is_empty() {
        return Ok(());
    }
    for url in urls {
        writeln!(out, "{url}")?;
    }
    writeln!(out, "Total unique URLs: {}", urls.len())
}

fn main() -> ExitCode {
    logging::init("info");
    let cli = Cli::parse();

    let urls = match extract_file(&cli.eml) {
        Ok(urls) => urls,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if urls.is_empty() {
        info!("No URLs found in email");
    } else {
        info!("Unique URLs found:");
    }

    let stdout = io::stdout();
    if let Err(e) = write_urls(&mut stdout.lock(), &urls) {
        error!("Failed to write output: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
