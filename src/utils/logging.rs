use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;

/// Set up diagnostics on stderr, leaving stdout to the printed messages.
///
/// Each record carries its module path so per-message `trace!` output from
/// the printer can be told apart from the driver loop.
pub fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or("cachepiper"),
                record.args()
            )
        })
        .target(Target::Stderr)
        .filter(None, level)
        .init();
}

/// Map a `--log-level` argument to a filter; unknown names fall back to warnings only
pub fn get_log_level(level: &str) -> LevelFilter {
    level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Warn)
}
