//! Tracing setup for the textmask binary
//!
//! The library only emits events; it never installs a subscriber. The
//! binary calls [`init`] once at startup.
//!
//! # Usage
//!
//! `-v` raises the console level to debug for this crate, `-vv` to trace.
//! RUST_LOG overrides both:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=textmask::edit=debug` - edit mapping only
//! - `RUST_LOG=textmask::mask=trace` - every walk, including dropped characters
//!
//! # Log Files
//!
//! Logs are written to `<config dir>/textmask/logs/textmask.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console filter used when RUST_LOG is unset
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "textmask=debug",
        _ => "textmask=trace",
    }
}

/// Initialize tracing with a stderr console layer and a rolling file layer
///
/// Console output goes to stderr so formatted results on stdout stay
/// pipeable.
pub fn init(verbosity: u8) {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "textmask.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("textmask=debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: file logging disabled: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
