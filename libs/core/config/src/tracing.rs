use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre with a project-standard configuration.
///
/// Call this first in `main()`. Shows file:line of errors and hides the
/// environment section. Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware output and span trace capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON events, no module targets.
/// - **Development** (default): pretty multi-line output.
///
/// Both install [`tracing_error::ErrorLayer`] so `color-eyre` reports carry span traces.
/// `RUST_LOG` overrides the default filter. Calling this more than once is a no-op.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,tower_http=info,sea_orm=warn,sqlx=warn")
        } else {
            EnvFilter::new("debug,tower_http=debug,sea_orm=info,sqlx=warn")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        // Already initialized (tests, repeated calls)
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
