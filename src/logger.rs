//! Process-wide logger for the `memkv` binary.
//!
//! Lines look like `src/server.rs:42 [memkv_0.1.0 20261019 14:02:11] INFO: ...`.
//! `RUST_LOG` picks the filter (default `info`); `RUST_LOG=trace` switches to
//! the short `file:line LEVEL: msg` form since trace output is noisy enough.

use chrono::Local;
use colored::*;
use env_logger::{Builder, Env};
use log::{info, Level};
use std::{env as stdenv, io::Write};

/// `<crate>_<version>`, shown in every non-terse line.
pub fn service_tag() -> String {
    format!("{}_{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Level names padded to five columns so messages line up.
fn level_tag(level: Level) -> ColoredString {
    let padded = format!("{:>5}", level);
    match level {
        Level::Error => padded.red(),
        Level::Warn => padded.yellow(),
        Level::Info => padded.green(),
        Level::Debug => padded.blue(),
        Level::Trace => padded.purple(),
    }
}

fn terse_requested() -> bool {
    matches!(stdenv::var("RUST_LOG"), Ok(val) if val.eq_ignore_ascii_case("trace"))
}

pub fn setup_logger() {
    let terse = terse_requested();
    let tag = service_tag();

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            let level = level_tag(record.level());

            if terse {
                return writeln!(buf, "{}:{} {}: {}", file, line, level, record.args());
            }
            writeln!(
                buf,
                "{}:{} [{} {}]{}: {}",
                file,
                line,
                tag.as_str().purple(),
                Local::now().format("%Y%m%d %H:%M:%S").to_string().purple(),
                level,
                record.args()
            )
        })
        .init();
    info!("Logger initialized for {}", service_tag());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_tag_names_this_crate() {
        assert_eq!(service_tag(), format!("memkv_{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_level_tags_are_aligned() {
        colored::control::set_override(false);
        assert_eq!(level_tag(Level::Info).to_string(), " INFO");
        assert_eq!(level_tag(Level::Error).to_string(), "ERROR");
        assert_eq!(level_tag(Level::Warn).to_string(), " WARN");
    }
}
