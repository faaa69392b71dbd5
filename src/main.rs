use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use shamir_recover::ShareFile;
use tracing_subscriber::EnvFilter;

/// Recover Shamir secrets from JSON share files, one secret per line.
#[derive(Debug, Parser)]
#[command(name = "shamir-recover", version)]
struct Cli {
    /// Share files to process, in order
    #[arg(default_values = ["resources/testcase1.json", "resources/testcase2.json"])]
    files: Vec<PathBuf>,

    /// Report a failing file and continue with the next one
    #[arg(long)]
    keep_going: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let mut failures = 0usize;
    for path in &cli.files {
        match recover(path) {
            Ok(secret) => println!("{}", secret),
            Err(e) if cli.keep_going => {
                tracing::error!(
                    path = %path.display(),
                    error = %format!("{:#}", e),
                    "skipping file"
                );
                failures += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if failures > 0 {
        tracing::warn!(
            failures,
            total = cli.files.len(),
            "some files could not be recovered"
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn recover(path: &Path) -> anyhow::Result<num_bigint::BigInt> {
    let file = ShareFile::from_path(path)
        .with_context(|| format!("could not load {}", path.display()))?;
    let keys = file.threshold();
    tracing::info!(
        path = %path.display(),
        n = keys.share_count,
        k = keys.threshold,
        "recovering secret"
    );
    file.recover_secret()
        .with_context(|| format!("reconstruction failed for {}", path.display()))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
