//! Constants used throughout the NHS numbers crate.

/// Environment variable holding an optional shuffle seed, for reproducible source files.
pub const SEED_ENV_VAR: &str = "NHS_NUMBER_SEED";

/// Deepest container nesting the literal parser accepts.
pub const MAX_LITERAL_DEPTH: usize = 100;
