//! Startup helpers shared by the GP2GP test tool binaries.
//!
//! Both binaries log to standard error only: the journal extractor's standard output carries
//! the extracted payload and nothing else.

use nhs_numbers::{seed_from_env_value, GeneratorConfig, GeneratorResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` is honoured; `default_directive` (for example `nhs_numbers=info`) is added on
/// top so the tool's own crate logs at a useful level without configuration.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_directive.parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Resolve the generator configuration once at startup.
///
/// An explicit `--seed` wins over the environment value. Without either the shuffle is not
/// reproducible.
pub fn resolve_generator_config(
    seed_flag: Option<u64>,
    env_seed: Option<String>,
    no_trailing_newline: bool,
) -> GeneratorResult<GeneratorConfig> {
    let seed = match seed_flag {
        Some(seed) => Some(seed),
        None => seed_from_env_value(env_seed)?,
    };

    Ok(GeneratorConfig::new(seed, !no_trailing_newline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nhs_numbers::GeneratorError;

    #[test]
    fn test_resolve_generator_config_defaults() {
        let config = resolve_generator_config(None, None, false).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(config.trailing_newline());
    }

    #[test]
    fn test_resolve_generator_config_flag_wins_over_env() {
        let config = resolve_generator_config(Some(1), Some("2".into()), true).unwrap();
        assert_eq!(config.seed(), Some(1));
        assert!(!config.trailing_newline());
    }

    #[test]
    fn test_resolve_generator_config_uses_env_seed() {
        let config = resolve_generator_config(None, Some("99".into()), false).unwrap();
        assert_eq!(config.seed(), Some(99));
    }

    #[test]
    fn test_resolve_generator_config_rejects_bad_env_seed() {
        let err = resolve_generator_config(None, Some("-1".into()), false).expect_err("negative");
        assert!(matches!(err, GeneratorError::InvalidSeed(_)));
    }

    #[test]
    fn test_resolve_generator_config_ignores_bad_env_seed_when_flag_given() {
        assert!(resolve_generator_config(Some(3), Some("junk".into()), false).is_ok());
    }
}
