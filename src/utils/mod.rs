pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "wallet=info";

/// Initializes the global stderr tracing subscriber. `RUST_LOG` adds further
/// directives.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
