//! The full calculation: normalize, value, and for Arabic derive the variations

use crate::{
    alphabet::{Alphabet, CalculationVariant},
    error::NumerologyError,
    normalize,
    tables,
    valuer::{self, LetterRow},
    variations::{EbcedVariations, VariationPolicy, calculate_variations},
};

/// The outcome of valuing one text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct CalculationResult {
    /// The input with whitespace and diacritics removed.
    pub normalized: String,
    /// Sum of the row values.
    pub total: i64,
    /// One row per character of `normalized`, in order.
    pub rows: Vec<LetterRow>,
    /// The alphabet the text was valued in.
    pub alphabet: Alphabet,
    /// Present exactly when `alphabet` is Arabic.
    pub variations: Option<EbcedVariations>,
}

impl CalculationResult {
    /// Number of characters (not bytes) in the normalized text.
    pub fn letter_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reject text that is empty or only whitespace.
fn ensure_not_blank(text: &str) -> Result<(), NumerologyError> {
    if text.chars().all(char::is_whitespace) {
        return Err(NumerologyError::InvalidArgument("text must not be blank"));
    }
    Ok(())
}

/// Entry point for calculations, parameterised by how Arabic variations are derived.
///
/// A `Calculator` holds no tables and no mutable state, so one value can be shared freely across
/// threads.
///
/// # Example
/// ```
/// use numerology::{Alphabet, CalculationVariant, Calculator};
///
/// let result = Calculator::default()
///     .calculate("اب", Alphabet::Arabic, CalculationVariant::Normal)
///     .expect("text is not blank");
/// assert_eq!(result.total, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calculator {
    /// Rule set for the big, smallest and biggest totals.
    policy: VariationPolicy,
}

impl Calculator {
    /// A calculator deriving Arabic variations with `policy`.
    pub const fn new(policy: VariationPolicy) -> Self {
        Self { policy }
    }

    /// The variation policy in use.
    pub const fn policy(&self) -> VariationPolicy {
        self.policy
    }

    /// Value `text` in `alphabet`, using the `variant` table for Arabic.
    ///
    /// # Errors
    /// Returns [`NumerologyError::InvalidArgument`] when `text` is empty or only whitespace. Text
    /// that becomes empty only after diacritics are stripped is not an error and yields an empty
    /// result.
    pub fn calculate(
        &self,
        text: &str,
        alphabet: Alphabet,
        variant: CalculationVariant,
    ) -> Result<CalculationResult, NumerologyError> {
        ensure_not_blank(text)?;

        let retained: Vec<char> = normalize::retained_chars(text, alphabet).collect();
        let table = tables::value_table(alphabet, variant);
        let (rows, total) = valuer::value_rows(retained.iter().copied(), table);

        let variations = match alphabet {
            Alphabet::Arabic => Some(calculate_variations(&retained, self.policy)),
            Alphabet::Hebrew | Alphabet::Greek => None,
        };

        Ok(CalculationResult {
            normalized: retained.into_iter().collect(),
            total,
            rows,
            alphabet,
            variations,
        })
    }

    /// Total of `text` in the standard table of `alphabet`, without building rows.
    ///
    /// # Errors
    /// Returns [`NumerologyError::InvalidArgument`] when `text` is empty or only whitespace.
    pub fn calculate_total(&self, text: &str, alphabet: Alphabet) -> Result<i64, NumerologyError> {
        ensure_not_blank(text)?;
        Ok(valuer::total(
            normalize::retained_chars(text, alphabet),
            tables::value_table(alphabet, CalculationVariant::Normal),
        ))
    }

    /// `text` with whitespace and the diacritics of `alphabet` removed.
    pub fn normalize(&self, text: &str, alphabet: Alphabet) -> String {
        normalize::normalize(text, alphabet)
    }
}

/// [`Calculator::calculate`] with the default variation policy.
///
/// # Errors
/// Returns [`NumerologyError::InvalidArgument`] when `text` is empty or only whitespace.
pub fn calculate(
    text: &str,
    alphabet: Alphabet,
    variant: CalculationVariant,
) -> Result<CalculationResult, NumerologyError> {
    Calculator::default().calculate(text, alphabet, variant)
}

/// [`Calculator::calculate_total`] with the default variation policy.
///
/// # Errors
/// Returns [`NumerologyError::InvalidArgument`] when `text` is empty or only whitespace.
pub fn calculate_total(text: &str, alphabet: Alphabet) -> Result<i64, NumerologyError> {
    Calculator::default().calculate_total(text, alphabet)
}
