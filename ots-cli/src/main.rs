//! `ots`: a command-line client for the OpenTimestamps protocol.
//!
//! Reads and writes detached `.ots` files alongside the target file, the
//! same convention the reference implementation uses: `stamp foo.txt`
//! writes `foo.txt.ots`, and every other subcommand takes that file back in.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use ots_client::verifier::{EthereumExplorerVerifier, ExplorerVerifier};
use ots_client::{workflow, Config};
use ots_core::{codec, info, predicate, verify, FileHash, HashAlgorithm, Timestamp};

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Core(#[from] ots_core::Error),
    #[error(transparent)]
    Client(#[from] ots_client::Error),
    #[error("explorer client error: {0}")]
    Transport(#[from] reqwest::Error),
}

type Result<T> = std::result::Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ots")]
#[command(about = "An OpenTimestamps client", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stamp a file, writing a detached `<file>.ots` timestamp.
    Stamp {
        file: PathBuf,
        /// Calendar URLs to submit to (repeatable); defaults to the public pool.
        #[arg(long = "calendar")]
        calendars: Vec<String>,
    },
    /// Upgrade a timestamp's pending attestations in place.
    Upgrade { ots_file: PathBuf },
    /// Verify a timestamp against the file it commits to.
    Verify { ots_file: PathBuf, file: PathBuf },
    /// Shrink a timestamp down to its cheapest attestation on one chain.
    Shrink { ots_file: PathBuf, chain: String },
    /// Print a human-readable rendering of a timestamp.
    Info {
        ots_file: PathBuf,
        #[arg(long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Stamp { file, calendars } => stamp(&file, calendars).await,
        Commands::Upgrade { ots_file } => upgrade(&ots_file).await,
        Commands::Verify { ots_file, file } => verify_cmd(&ots_file, &file).await,
        Commands::Shrink { ots_file, chain } => shrink(&ots_file, &chain),
        Commands::Info { ots_file, verbose } => info_cmd(&ots_file, verbose),
    };

    if let Err(err) = result {
        tracing::error!(%err, "ots failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn read_timestamp(path: &Path) -> Result<Timestamp> {
    let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(codec::read(&bytes)?)
}

fn write_timestamp(path: &Path, timestamp: &Timestamp) -> Result<()> {
    fs::write(path, codec::write(timestamp)).map_err(|source| CliError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

fn ots_sibling(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".ots");
    PathBuf::from(name)
}

async fn stamp(file: &Path, calendars: Vec<String>) -> Result<()> {
    let data = fs::read(file).map_err(|source| CliError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;
    let file_hash = FileHash::compute(HashAlgorithm::Sha256, &data);

    let mut config = Config::default();
    if !calendars.is_empty() {
        config.calendar_urls = calendars;
    }

    let (timestamp, errors) = workflow::submit(file_hash, None, &config).await;
    for err in &errors {
        tracing::warn!(%err, "calendar submission failed");
    }

    let out = ots_sibling(file);
    write_timestamp(&out, &timestamp)?;
    println!("wrote {}", out.display());
    Ok(())
}

async fn upgrade(ots_file: &Path) -> Result<()> {
    let timestamp = read_timestamp(ots_file)?;
    if !predicate::can_upgrade(&timestamp) {
        println!("nothing to upgrade: no pending attestation");
        return Ok(());
    }

    let config = Config::default();
    let (upgraded, errors) = workflow::upgrade(timestamp, &config).await;
    for err in &errors {
        tracing::warn!(%err, "calendar upgrade poll failed");
    }

    write_timestamp(ots_file, &upgraded)?;
    println!("upgraded {}", ots_file.display());
    Ok(())
}

async fn verify_cmd(ots_file: &Path, file: &Path) -> Result<()> {
    let timestamp = read_timestamp(ots_file)?;
    let data = fs::read(file).map_err(|source| CliError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;
    let computed = FileHash::compute(timestamp.file_hash.algorithm, &data);
    if computed != timestamp.file_hash {
        println!(
            "FAILED: {} does not match the hash this timestamp commits to",
            file.display()
        );
        std::process::exit(1);
    }

    let config = Config::default();
    let bitcoin = ExplorerVerifier::bitcoin(config.bitcoin_explorer_url.clone(), config.timeout)?;
    let litecoin =
        ExplorerVerifier::litecoin(config.litecoin_explorer_url.clone(), config.timeout)?;
    let ethereum =
        EthereumExplorerVerifier::new(config.ethereum_explorer_url.clone(), config.timeout)?;

    let msg = timestamp.file_hash.value.clone();
    let tree = timestamp.tree.clone();
    let report = tokio::task::spawn_blocking(move || {
        let verifiers: Vec<&dyn verify::Verifier> = vec![&bitcoin, &litecoin, &ethereum];
        verify::verify(&msg, &tree, &verifiers)
    })
    .await
    .expect("verification task panicked");

    if report.is_verified() {
        for (time, verifiers) in &report.attestations {
            println!(
                "success! {} attests data existed as of {} (verified by {})",
                timestamp.file_hash.algorithm.name(),
                time,
                verifiers.join(", ")
            );
        }
        Ok(())
    } else {
        println!("pending or unverifiable attestation(s) only");
        std::process::exit(1);
    }
}

fn shrink(ots_file: &Path, chain: &str) -> Result<()> {
    let timestamp = read_timestamp(ots_file)?;
    let shrunk = workflow::shrink(timestamp, chain)?;
    write_timestamp(ots_file, &shrunk)?;
    println!("shrunk {} to {chain}", ots_file.display());
    Ok(())
}

fn info_cmd(ots_file: &Path, verbose: bool) -> Result<()> {
    let timestamp = read_timestamp(ots_file)?;
    println!("{}", info::render(&timestamp, verbose));
    Ok(())
}
