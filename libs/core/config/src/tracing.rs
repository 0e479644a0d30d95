use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre panic/error hooks.
///
/// Call once at the top of main(), before anything fallible. Safe to call
/// again; later installs are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the global tracing subscriber for the given environment.
///
/// - Production: JSON lines with flattened event fields, targets hidden —
///   shaped for log aggregation.
/// - Development: pretty human-readable output.
///
/// Both register a `tracing_error::ErrorLayer` so eyre reports carry span
/// traces. `RUST_LOG` overrides the default filter
/// (development `debug`, production `info,sea_orm=warn`).
///
/// Safe to call more than once; re-initialization is a no-op, which keeps
/// tests that each set up tracing from stepping on each other.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,sea_orm=warn")
        } else {
            EnvFilter::new("debug")
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
        Ok(_) => info!(environment = ?environment, "tracing initialized"),
        Err(_) => debug!("tracing already initialized, keeping existing subscriber"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_development_does_not_panic() {
        init_tracing(&Environment::Development);
    }

    #[test]
    fn init_production_does_not_panic() {
        init_tracing(&Environment::Production);
    }

    #[test]
    fn repeated_init_is_a_noop() {
        let env = Environment::Development;
        init_tracing(&env);
        init_tracing(&env);
    }

    #[test]
    fn rust_log_override_is_accepted() {
        temp_env::with_var("RUST_LOG", Some("trace"), || {
            init_tracing(&Environment::Development);
        });
    }
}
