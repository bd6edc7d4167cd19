use anyhow::{Context, Result};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix shared by every log file this binary writes.
const LOG_PREFIX: &str = "barline_";

/// Maps a level name to a filter. Unknown names fall back to `info`.
pub fn parse_level(log_level: &str) -> log::LevelFilter {
    match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Info,
    }
}

/// Installs the global logger: a timestamped file in `log_dir`, plus stderr.
/// Stdout belongs to the status stream and is never logged to.
///
/// Returns the path of the new log file.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<PathBuf> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    }

    // Clean up old log files, keeping only the most recent one
    cleanup_old_logs(log_dir)?;

    let log_file_name = format!(
        "{}{}.log",
        LOG_PREFIX,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = log_dir.join(log_file_name);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(parse_level(log_level))
        .chain(std::io::stderr())
        .chain(fern::log_file(&log_path)?)
        .apply()?;

    Ok(log_path)
}

/// Deletes every `barline_*.log` in `log_dir` except the newest one. The
/// timestamp in the name sorts chronologically.
pub fn cleanup_old_logs(log_dir: &Path) -> Result<()> {
    let pattern = format!("{}/{}*.log", log_dir.display(), LOG_PREFIX);

    let mut log_files: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Invalid log file pattern {}", pattern))?
        .filter_map(|entry| entry.ok())
        .collect();

    // Newest first
    log_files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    for old_file in log_files.iter().skip(1) {
        if let Err(e) = fs::remove_file(old_file) {
            eprintln!("Failed to delete old log file {}: {}", old_file.display(), e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("DEBUG"), log::LevelFilter::Debug);
        assert_eq!(parse_level("trace"), log::LevelFilter::Trace);
        assert_eq!(parse_level("error"), log::LevelFilter::Error);
        assert_eq!(parse_level("nonsense"), log::LevelFilter::Info);
    }

    #[test]
    fn cleanup_keeps_only_the_newest_log() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        for name in [
            "barline_2024-01-01_10-00-00.log",
            "barline_2024-03-01_10-00-00.log",
            "barline_2024-02-01_10-00-00.log",
            "other.log",
        ] {
            fs::write(dir.path().join(name), "x").expect("Failed to write log fixture");
        }

        cleanup_old_logs(dir.path()).expect("Cleanup failed");

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .expect("Failed to read log directory")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, ["barline_2024-03-01_10-00-00.log", "other.log"]);
    }
}
