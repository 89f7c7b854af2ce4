//! Basic bootstrap example.
//!
//! Reads `configlog.json` next to the executable (or the file named by
//! `TIERLOG_CONFIG`), then writes one event per level.
//!
//! Run with:
//! ```bash
//! TIERLOG_CONFIG=demos/configlog.json cargo run --example basic
//! ```

fn main() {
    let logging = tierlog::bootstrap();

    for handler in logging.handlers() {
        println!("{} {}", handler.destination, handler.filter);
    }

    tracing::trace!("This is a trace message (dropped by every handler)");
    tracing::debug!("This is a debug message");
    tracing::info!(user = "alice", action = "login", "User logged in");
    tracing::warn!("This is a warning message (console only)");
    tracing::error!(error_code = 500, "Database error occurred");
}
