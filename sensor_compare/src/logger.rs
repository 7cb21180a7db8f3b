use std::io::Write;

use env_logger::{Builder, Env};

/// Log to stderr with `info` as default level, `RUST_LOG` overrides it.
/// Stdout stays reserved for the report itself.
pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .init();
}
