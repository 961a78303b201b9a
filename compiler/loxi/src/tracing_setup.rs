use std::sync::Once;

/// Environment variable holding the log filter, e.g. `LOX_LOG=debug` or
/// `LOX_LOG=lox_eval=trace`.
pub const LOG_ENV: &str = "LOX_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `LOX_LOG` is set. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var_os(LOG_ENV).is_some() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_env(LOG_ENV))
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .init();
        }
    });
}
