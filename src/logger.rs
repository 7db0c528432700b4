use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "partition_sim.log";

/// The engine logs every arrival, placement and completion at `debug`.
/// These lines only go to the log file; the console stays at `info` for them.
const ENGINE_TARGET: &str = "partition_sim::domain::memory_model::engine";

/// Initializes the global logger.
///
/// Call once at the start of `main`. A second call only reports the failed
/// `apply()` on stderr.
///
/// The level comes from `RUST_LOG` (`error`, `warn`, `info`, `debug`, `trace`,
/// `off`) and defaults to `info`. Output goes to stderr and to
/// `logs/partition_sim.log`; if the file cannot be opened, to stderr only.
pub fn init() {
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let mut dispatch = Dispatch::new().level(level).level_for("serde", LevelFilter::Warn).chain(console_dispatch());

    if let Err(e) = fs::create_dir_all(LOG_DIR) {
        eprintln!("Failed to create log directory at '{}': {}", LOG_DIR, e);
    }

    let log_file_path = format!("{}/{}", LOG_DIR, LOG_FILE);
    match fern::log_file(&log_file_path) {
        Ok(file) => dispatch = dispatch.chain(file_dispatch().chain(file)),
        Err(e) => eprintln!("Failed to open log file '{}': {}. Logging to console only.", log_file_path, e),
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
        return;
    }

    log::info!("Logger initialized at level {}. Logging to console and '{}'.", level, log_file_path);
}

/// Parses a `RUST_LOG` value; anything unset or unknown means `info`.
fn level_from_env(value: Option<&str>) -> LevelFilter {
    value.and_then(|v| v.trim().parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info)
}

fn console_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .level_for(ENGINE_TARGET, LevelFilter::Info)
        .format(move |out, message, record| {
            out.finish(format_args!("[{} {}] {}", Local::now().format("%H:%M:%S"), colors.color(record.level()), message))
        })
        .chain(std::io::stderr())
}

fn file_dispatch() -> Dispatch {
    Dispatch::new().format(|out, message, record| {
        out.finish(format_args!("[{} {} {}] {}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"), record.level(), record.target(), message))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_info() {
        assert_eq!(level_from_env(None), LevelFilter::Info);
        assert_eq!(level_from_env(Some("chatty")), LevelFilter::Info);
    }

    #[test]
    fn level_is_read_case_insensitively() {
        assert_eq!(level_from_env(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from_env(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("off")), LevelFilter::Off);
    }
}
