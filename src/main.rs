//! Command-line entry point for generating precache bundles.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use precache_bundler::{BuildResult, DEFAULT_CONFIG_FILE, PrecacheBuilder, PrecacheConfig};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Generate a service-worker precache manifest for a web asset bundle"
)]
struct Cli {
    /// Path to the precache configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Print the selection without writing the service worker
    #[arg(long)]
    dry_run: bool,

    /// Also write the manifest summary JSON to this path
    #[arg(long)]
    manifest_out: Option<PathBuf>,

    /// Abort when the directory walk runs longer than this many milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,
}

fn main() -> BuildResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = PrecacheConfig::from_path(&cli.config)?;
    let base_dir = cli
        .config
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let mut builder = PrecacheBuilder::new(&base_dir, &config);
    if let Some(ms) = cli.deadline_ms {
        builder = builder.with_deadline(Duration::from_millis(ms));
    }

    let artifacts = builder.build()?;
    println!(
        "selected {} files from {}",
        artifacts.entries.len(),
        config.glob_directory
    );

    if cli.dry_run {
        println!("{}", artifacts.manifest_json);
        return Ok(());
    }

    let dest = builder.write(&artifacts)?;
    println!("wrote {}", dest.display());

    if let Some(manifest_out) = cli.manifest_out {
        builder.write_manifest(&artifacts, &manifest_out)?;
        println!("wrote {}", manifest_out.display());
    }

    Ok(())
}
