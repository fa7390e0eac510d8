//! Log bridge for navdeck
//!
//! Routes every `log::info!()`/`log::debug!()`/... call to a debug log file:
//! `/tmp/navdeck_debug.log` on Unix/macOS, `%TEMP%\navdeck_debug.log` on
//! Windows. When `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` on the command line, then `RUST_LOG`,
//! then `log_level` from the config file (applied after the config is
//! loaded), then off.

use navdeck_config::LogLevel;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    file: Mutex<Option<std::fs::File>>,
    mirror_stderr: bool,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set once the CLI or `RUST_LOG` chose a level; the config may not override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/navdeck_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("navdeck_debug.log")
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Level named by a `RUST_LOG` value.
///
/// Accepts a bare level (`debug`) or directives (`navdeck=debug,info`); the
/// most verbose level mentioned wins. Unparseable values mean `info`.
pub fn parse_rust_log(value: &str) -> LogLevel {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            level.parse::<LogLevel>().ok()
        })
        .max()
        .unwrap_or(LogLevel::Info)
}

/// Effective level given the three sources, highest precedence first.
pub fn effective_level(
    cli: Option<LogLevel>,
    rust_log: Option<&str>,
    config: Option<LogLevel>,
) -> LogLevel {
    cli.or_else(|| rust_log.map(parse_rust_log))
        .or(config)
        .unwrap_or_default()
}

impl LogBridge {
    fn open(level: LogLevel, mirror_stderr: bool) -> Self {
        let bridge = LogBridge {
            file: Mutex::new(None),
            mirror_stderr,
        };
        if level != LogLevel::Off {
            bridge.open_file(level);
        }
        bridge
    }

    fn open_file(&self, level: LogLevel) {
        let mut file = self.file.lock();
        if file.is_some() {
            return;
        }
        // Silently skip logging when the file can't be opened
        if let Ok(mut f) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            let _ = writeln!(
                f,
                "{}\nnavdeck debug session started at {} (level={:?})\n{}",
                "=".repeat(80),
                get_timestamp(),
                level,
                "=".repeat(80)
            );
            *file = Some(f);
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Install the bridge as the global logger.
///
/// `cli_level` is the `--log-level` flag, if given. Calling this twice keeps
/// the first installation.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = effective_level(cli_level, rust_log.as_deref(), None);
    LEVEL_PINNED.store(
        cli_level.is_some() || rust_log.is_some(),
        Ordering::SeqCst,
    );

    let bridge = BRIDGE.get_or_init(|| LogBridge::open(level, rust_log.is_some()));
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}

/// Apply the config file's `log_level` unless the CLI or `RUST_LOG` already
/// chose one.
pub fn apply_config_log_level(level: LogLevel) {
    if LEVEL_PINNED.load(Ordering::SeqCst) {
        return;
    }
    if let Some(bridge) = BRIDGE.get()
        && level != LogLevel::Off
    {
        bridge.open_file(level);
    }
    log::set_max_level(level.to_level_filter());
}
