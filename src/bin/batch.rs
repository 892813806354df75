use clap::Parser;
use eml_url_extract::{logging, BatchConfig, BatchCoordinator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Extract URLs from every .eml file of a categorized corpus
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Corpus root containing the category directories
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Category directory name, repeatable (default: spam, good)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Message file extension
    #[arg(long)]
    extension: Option<String>,

    /// Per-file results document
    #[arg(long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Summary document
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Worker threads (0 = available parallelism)
    #[arg(long)]
    workers: Option<usize>,
}

impl Cli {
    fn merge_into(self, config: &mut BatchConfig) {
        if let Some(root) = self.root {
            config.input_root = root;
        }
        if !self.categories.is_empty() {
            config.categories = self.categories;
        }
        if let Some(extension) = self.extension {
            config.extension = extension;
        }
        if let Some(results) = self.results {
            config.results_path = results;
        }
        if let Some(summary) = self.summary {
            config.summary_path = summary;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
    }
}

fn main() -> ExitCode {
    logging::init("info");
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref().map(BatchConfig::from_json_file) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
        None => BatchConfig::default(),
    };
    cli.merge_into(&mut config);

    match BatchCoordinator::new(config).run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
