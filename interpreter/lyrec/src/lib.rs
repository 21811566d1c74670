//! Lyre CLI library.
//!
//! The binary in `main.rs` is a thin dispatcher over [`commands`]; the
//! command handlers live here so they can be exercised by tests.

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once, and only when `RUST_LOG` asks
/// for it. Without the variable the CLI stays silent.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
