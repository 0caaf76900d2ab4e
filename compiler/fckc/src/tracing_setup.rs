//! Tracing subscriber for the `fck` binary.
//!
//! Library crates only emit events; this installs the subscriber that shows
//! them. Nothing is installed unless `FCK_LOG` (or `RUST_LOG`) is set, so a
//! normal run pays only for disabled callsites.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter directives, `FCK_LOG` first.
fn directives() -> Option<String> {
    std::env::var("FCK_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Install the global subscriber. Safe to call more than once.
///
/// `FCK_LOG_TREE=1` shows spans as an indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(directives) = directives() else {
            return;
        };
        let filter = EnvFilter::new(directives);
        let tree = std::env::var("FCK_LOG_TREE").is_ok_and(|value| value == "1");

        let registry = tracing_subscriber::registry().with(filter);
        let installed = if tree {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if let Err(error) = installed {
            eprintln!("fck: tracing not installed: {error}");
        }
    });
}
