//! NHS number source file generation.

use crate::{GeneratorError, GeneratorResult, NhsNumberCounts};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Generator configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    seed: Option<u64>,
    trailing_newline: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(None, true)
    }
}

impl GeneratorConfig {
    /// Create a new `GeneratorConfig`.
    ///
    /// Without a seed the shuffle draws from the thread-local generator and differs between
    /// runs. `trailing_newline` controls whether the last NHS number is followed by a newline.
    pub fn new(seed: Option<u64>, trailing_newline: bool) -> Self {
        Self {
            seed,
            trailing_newline,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }
}

/// Parse the shuffle seed from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, no seed is configured.
pub fn seed_from_env_value(value: Option<String>) -> GeneratorResult<Option<u64>> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<u64>().map_err(|_| GeneratorError::InvalidSeed(v)))
        .transpose()
}

/// Outcome of a successful [`generate_file`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub line_count: usize,
}

/// Writes a shuffled NHS number source file.
///
/// Every NHS number in `input_data` is repeated by its count, the whole list is shuffled and
/// the result is written to `file_name`, one NHS number per line. The input is fully
/// validated before the file is created or truncated.
///
/// # Arguments
///
/// * `file_name` - Destination path. Must not be empty.
/// * `input_data` - Literal mapping of NHS number to repeat count, e.g. `{'9000000009': 2}`.
///   Must contain more than whitespace.
/// * `config` - Shuffle seed and line ending options.
///
/// # Errors
///
/// Returns [`GeneratorError::MissingFileName`] or [`GeneratorError::MissingInputData`] for
/// empty arguments, the validation errors of [`NhsNumberCounts::parse`], and I/O errors from
/// creating or writing the file.
pub fn generate_file(
    file_name: &str,
    input_data: &str,
    config: &GeneratorConfig,
) -> GeneratorResult<GeneratedFile> {
    // A path made only of spaces is still a valid relative path; blank input data is not a
    // literal.
    if file_name.is_empty() {
        return Err(GeneratorError::MissingFileName);
    }
    if input_data.trim().is_empty() {
        return Err(GeneratorError::MissingInputData);
    }

    let counts = NhsNumberCounts::parse(input_data)?;
    let mut nhs_numbers = counts.expand()?;
    tracing::debug!(
        "expanded {} distinct NHS numbers into {} lines",
        counts.iter().count(),
        nhs_numbers.len()
    );

    match config.seed() {
        Some(seed) => shuffle(&mut nhs_numbers, &mut StdRng::seed_from_u64(seed)),
        None => shuffle(&mut nhs_numbers, &mut rand::thread_rng()),
    }

    let path = PathBuf::from(file_name);
    let file = File::create(&path).map_err(GeneratorError::FileCreate)?;
    let mut writer = BufWriter::new(file);
    write_nhs_numbers(&mut writer, &nhs_numbers, config.trailing_newline())
        .and_then(|()| writer.flush())
        .map_err(GeneratorError::FileWrite)?;

    tracing::info!(
        "wrote {} NHS numbers to {}",
        nhs_numbers.len(),
        path.display()
    );

    Ok(GeneratedFile {
        path,
        line_count: nhs_numbers.len(),
    })
}

/// Uniformly shuffles NHS numbers in place.
pub fn shuffle<R: Rng + ?Sized>(nhs_numbers: &mut [String], rng: &mut R) {
    nhs_numbers.shuffle(rng);
}

/// Writes one NHS number per line.
///
/// With `trailing_newline` every NHS number, including the last, is followed by `\n`, which
/// is the layout downstream test harnesses were built against. Without it the newline only
/// separates lines.
pub fn write_nhs_numbers<W: Write>(
    writer: &mut W,
    nhs_numbers: &[String],
    trailing_newline: bool,
) -> std::io::Result<()> {
    for (i, nhs_number) in nhs_numbers.iter().enumerate() {
        writer.write_all(nhs_number.as_bytes())?;
        if trailing_newline || i + 1 < nhs_numbers.len() {
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}
