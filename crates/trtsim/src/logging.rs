//! Tracing setup for the `trtsim` binary
//!
//! Events go to stderr unless `--log-file` is given. A log file is appended
//! to across runs and trimmed to its newest tail once it grows past
//! [`MAX_LOG_SIZE`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
pub const KEEP_SIZE: u64 = 1024 * 1024;

/// Cut `path` down to roughly its last `keep` bytes once it exceeds `limit`.
///
/// The kept tail starts on a line boundary. Returns the number of bytes
/// dropped, or `None` when the file is missing or small enough.
fn trim_log(path: &Path, limit: u64, keep: u64) -> io::Result<Option<u64>> {
    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if len <= limit {
        return Ok(None);
    }

    let mut tail = Vec::new();
    {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(keep)))?;
        file.read_to_end(&mut tail)?;
    }
    let start = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let kept = &tail[start..];
    let dropped = len - kept.len() as u64;

    let mut file = File::create(path)?;
    writeln!(file, "--- trtsim: trimmed {dropped} older bytes ---")?;
    file.write_all(kept)?;
    Ok(Some(dropped))
}

/// Default filter: the binary at `level`, the core library at `warn`.
pub fn default_filter(level: &str) -> String {
    format!("trtsim={level},trtsim_core=warn")
}

/// Initialize tracing. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(log_file: Option<&Path>, level: &str) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    let registry = tracing_subscriber::registry().with(env_filter);

    let Some(log_path) = log_file else {
        registry
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .init();
        return Ok(());
    };

    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let trimmed = trim_log(log_path, MAX_LOG_SIZE, KEEP_SIZE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    registry
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    match trimmed {
        Ok(Some(dropped)) => tracing::info!(dropped, "trimmed log file"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "could not trim log file"),
    }
    tracing::info!(log_path = %log_path.display(), "logging to file");

    Ok(())
}
