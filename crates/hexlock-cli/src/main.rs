//! hexlock: toggle files between plaintext and encrypted-at-rest
//!
//! Commands:
//!   lock [FILES...]    - seal files into .enc/.sha256 sidecar pairs
//!   unlock [FILES...]  - restore plaintexts from their sidecar pairs
//!   wait [FILES...]    - sleep (interruptible), then run one lock pass
//!
//! The guarded file list comes from hexlock.toml plus positional
//! arguments. The 32-byte key travels as 64 hex chars via --key or the
//! HEXLOCK_KEY environment variable; without one, a fresh key is
//! generated and printed once.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use hexlock_core::{FileReport, HexlockConfig, Operation, Outcome};
use hexlock_crypto::SealKey;
use hexlock_engine::{run_pass, TransitionOptions};

// ── CLI structure ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "hexlock",
    version,
    about = "Lock files into encrypted sidecars guarded by a shared hex key"
)]
struct Cli {
    /// Path to the hexlock.toml configuration file
    #[arg(
        long,
        short = 'c',
        env = "HEXLOCK_CONFIG",
        default_value = "hexlock.toml",
        global = true
    )]
    config: PathBuf,

    /// Key as 64 hex characters (generated and printed if omitted)
    #[arg(long, short = 'k', env = "HEXLOCK_KEY", hide_env_values = true, global = true)]
    key: Option<String>,

    /// Skip the digest gate and overwrite unconditionally
    #[arg(long, short = 'f', global = true)]
    force: bool,

    /// Report what would happen without touching the filesystem
    #[arg(long, short = 'd', global = true)]
    dry_run: bool,

    /// Log level for diagnostics (trace, debug, info, warn, error)
    #[arg(long, env = "HEXLOCK_LOG", default_value = "warn", global = true)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seal files: P becomes P.enc + P.sha256, plaintext removed
    Lock {
        /// Extra files to lock, appended to the config file list
        files: Vec<PathBuf>,
    },

    /// Restore files: P.enc becomes P, sidecars kept
    Unlock {
        /// Extra files to unlock, appended to the config file list
        files: Vec<PathBuf>,
    },

    /// Sleep for the given time (SIGINT/SIGTERM short-circuits the wait),
    /// then run exactly one lock pass
    Wait {
        /// Extra files to lock, appended to the config file list
        files: Vec<PathBuf>,

        /// Minutes to wait before locking
        #[arg(long, short = 'm', env = "HEXLOCK_WAIT_MINUTES", default_value_t = 10)]
        minutes: u64,

        /// Seconds to wait, added to the minutes
        #[arg(long, short = 's', env = "HEXLOCK_WAIT_SECONDS", default_value_t = 0)]
        seconds: u64,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log);

    let config = load_config(&cli.config).await?;
    let key = resolve_key(cli.key.as_deref())?;
    let opts = TransitionOptions {
        dry_run: cli.dry_run,
        check_hash: !cli.force,
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        dry_run = cli.dry_run,
        "hexlock starting"
    );

    let failed = match cli.command {
        Commands::Lock { files } => {
            println!("Locking files");
            lock_pass(&config, &files, &key, opts)
        }
        Commands::Unlock { files } => {
            println!("Unlocking files");
            let files = guarded_files(&config, &files);
            render_all(Operation::Unlock, run_pass(Operation::Unlock, &files, &key, opts))
        }
        Commands::Wait { files, minutes, seconds } => {
            let duration = Duration::from_secs(minutes * 60 + seconds);
            println!("Locking files in {}s", duration.as_secs());

            wait_or_cancel(duration).await?;

            println!("Done waiting! Locking files now");
            lock_pass(&config, &files, &key, opts)
        }
    };

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

// ── Config loading ────────────────────────────────────────────────────────────

async fn load_config(path: &Path) -> Result<HexlockConfig> {
    if path.exists() {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config: {}", path.display()))
    } else {
        Ok(HexlockConfig::default())
    }
}

/// Config file list first, then positional arguments. Concatenated as-is,
/// never deduplicated.
fn guarded_files(config: &HexlockConfig, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = config.files.clone();
    files.extend(extra.iter().cloned());
    files
}

// ── Key handling ──────────────────────────────────────────────────────────────

fn resolve_key(supplied: Option<&str>) -> Result<SealKey> {
    match supplied {
        Some(hex) => SealKey::from_hex(hex).context("decoding --key / HEXLOCK_KEY"),
        None => {
            let key = SealKey::generate();
            let hex = key.to_hex();
            println!("You didn't provide a key, so a fresh one was generated. Save it — \
                      without it the locked files cannot be recovered:");
            println!("\n\t{hex}\n");
            println!("Add it to your shell profile so it is picked up from the environment next time:");
            println!("\n\texport HEXLOCK_KEY=\"{hex}\"\n");
            Ok(key)
        }
    }
}

// ── Passes and rendering ──────────────────────────────────────────────────────

fn lock_pass(config: &HexlockConfig, extra: &[PathBuf], key: &SealKey, opts: TransitionOptions) -> usize {
    let files = guarded_files(config, extra);
    render_all(Operation::Lock, run_pass(Operation::Lock, &files, key, opts))
}

/// Print one line per file report; returns the number of failures.
fn render_all(op: Operation, reports: Vec<FileReport>) -> usize {
    let mut failed = 0;
    for report in &reports {
        match &report.result {
            Ok(Outcome::Locked { enc, digest }) => {
                println!("{} => {} + {}", report.path.display(), enc.display(), digest.display());
            }
            Ok(Outcome::LockedUnchanged) => {
                println!("{} is unchanged", report.path.display());
            }
            Ok(Outcome::Unlocked { restored }) => {
                println!(
                    "{} => {}",
                    hexlock_engine::enc_path(&report.path).display(),
                    restored.display()
                );
            }
            Err(e) => {
                eprintln!("{} {} error: {}", report.path.display(), op.as_str(), e);
                failed += 1;
            }
        }
    }
    failed
}

// ── Cancellable wait ──────────────────────────────────────────────────────────

/// Block until the timer elapses or a shutdown signal arrives. Either way
/// the pending lock pass still runs; cancellation only shortens the wait.
async fn wait_or_cancel(duration: Duration) -> Result<()> {
    tokio::select! {
        () = tokio::time::sleep(duration) => {}
        result = cancellation() => {
            result.context("waiting for shutdown signal")?;
            println!("Interrupted");
        }
    }
    Ok(())
}

#[cfg(unix)]
async fn cancellation() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = term.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn cancellation() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
