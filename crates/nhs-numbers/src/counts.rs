//! Validated NHS number repeat counts.

use crate::{parse_literal, GeneratorError, GeneratorResult, Literal};

/// How many times each NHS number should appear in a source file.
///
/// Once constructed, every count is strictly positive and every NHS number is text. Entries
/// keep the order of the input mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NhsNumberCounts {
    entries: Vec<(String, u64)>,
}

impl NhsNumberCounts {
    /// Parses and validates a literal mapping such as `{'9000000009': 2}`.
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorError`] if:
    /// - the text is not a valid literal,
    /// - the literal is not a mapping,
    /// - any value is not an integer greater than zero (booleans are not integers),
    /// - any key is not text.
    pub fn parse(input_data: &str) -> GeneratorResult<Self> {
        Self::from_literal(parse_literal(input_data)?)
    }

    /// Validates an already parsed literal. See [`NhsNumberCounts::parse`].
    pub fn from_literal(literal: Literal) -> GeneratorResult<Self> {
        let Literal::Dict(pairs) = literal else {
            return Err(GeneratorError::NotAMapping);
        };

        let counts = pairs
            .iter()
            .map(|(_, value)| match value {
                Literal::Int(count) if *count > 0 => u64::try_from(*count)
                    .map_err(|_| GeneratorError::InvalidCount),
                _ => Err(GeneratorError::InvalidCount),
            })
            .collect::<GeneratorResult<Vec<u64>>>()?;

        let entries = pairs
            .into_iter()
            .zip(counts)
            .map(|((key, _), count)| match key {
                Literal::Str(nhs_number) => Ok((nhs_number, count)),
                _ => Err(GeneratorError::NonTextKey),
            })
            .collect::<GeneratorResult<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// NHS numbers and their counts, in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(nhs_number, count)| (nhs_number.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of lines a source file will hold.
    pub fn total(&self) -> u128 {
        self.entries.iter().map(|(_, count)| u128::from(*count)).sum()
    }

    /// Repeats every NHS number by its count, in mapping order.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::TooManyNhsNumbers`] if the list cannot be allocated.
    pub fn expand(&self) -> GeneratorResult<Vec<String>> {
        let total = self.total();
        let capacity = usize::try_from(total).map_err(|_| GeneratorError::TooManyNhsNumbers(total))?;

        let mut nhs_numbers: Vec<String> = Vec::new();
        nhs_numbers
            .try_reserve_exact(capacity)
            .map_err(|_| GeneratorError::TooManyNhsNumbers(total))?;

        for (nhs_number, count) in &self.entries {
            // `count` fits in usize because the whole total did.
            let count = *count as usize;
            nhs_numbers.extend(std::iter::repeat(nhs_number).take(count).cloned());
        }

        Ok(nhs_numbers)
    }
}
