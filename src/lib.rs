//! Compose layered lint and theme configuration into one effective config.
//!
//! Lint fragments (presets, rule sets, file-scoped overrides, ignores) fold
//! left to right with last-write-wins per rule; theme layers combine a base
//! token table with an additive extend layer and a destructive replace layer.
//! Both composers are pure and fail as a whole on the first error.

pub mod cli;
pub mod config;
pub mod lint;
pub mod loader;
pub mod paths;
pub mod scan;
pub mod theme;

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default = if verbose { "configstack=debug" } else { "configstack=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
