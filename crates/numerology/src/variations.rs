//! Alternate Ebced totals and Shamsi/Qamari counts for Arabic text

use std::{collections::HashSet, fmt, str::FromStr};

use crate::{
    alphabet::{Alphabet, CalculationVariant},
    error::NumerologyError,
    tables, valuer,
};

/// Addend of the classic big total: the value of a prefixed definite article, elif (1) + lam (30).
pub const DEFINITE_ARTICLE_VALUE: i64 = 31;

/// Value of the largest Arabic numeral letter, ghayn.
pub const MAX_LETTER_VALUE: i64 = 1000;

/// How the big, smallest and biggest totals are derived.
///
/// There are two traditions for these totals and they disagree for almost every input, so the
/// choice is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariationPolicy {
    /// Every total sums its own per-letter table over all occurrences:
    /// big uses spelled-name values, smallest uses values modulo 12 and biggest uses second-order
    /// name values (see [`tables::ArabicLetterInfo`]).
    #[default]
    LetterTables,
    /// Totals derived from the standard values only: big adds [`DEFINITE_ARTICLE_VALUE`],
    /// smallest counts each distinct letter once and biggest values every character at
    /// [`MAX_LETTER_VALUE`].
    Classic,
}

impl VariationPolicy {
    /// Name as used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LetterTables => "letter-tables",
            Self::Classic => "classic",
        }
    }
}

impl fmt::Display for VariationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariationPolicy {
    type Err = NumerologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "letter-tables" | "letter_tables" | "tables" => Ok(Self::LetterTables),
            "classic" => Ok(Self::Classic),
            _ => Err(NumerologyError::UnknownPolicy(s.to_string())),
        }
    }
}

/// The alternate totals and letter-class counts of an Arabic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
#[allow(
    clippy::struct_field_names,
    reason = "Names follow the traditional terms"
)]
pub struct EbcedVariations {
    /// Standard total, identical to a normal calculation.
    pub small_ebced: i64,
    /// Big total; spelled-name values or the standard total plus 31, per [`VariationPolicy`].
    pub big_ebced: i64,
    /// Smallest total; values modulo 12 or distinct letters counted once, per [`VariationPolicy`].
    pub smallest_ebced: i64,
    /// Biggest total; second-order name values or 1000 per character, per [`VariationPolicy`].
    pub biggest_ebced: i64,
    /// Occurrences of sun letters.
    pub shamsi_count: usize,
    /// Occurrences of moon letters.
    pub qamari_count: usize,
}

/// Sum `chars` in the Arabic table for `variant`.
fn arabic_total(chars: &[char], variant: CalculationVariant) -> i64 {
    valuer::total(
        chars.iter().copied(),
        tables::value_table(Alphabet::Arabic, variant),
    )
}

/// Compute the variations for an already normalized sequence of Arabic characters.
///
/// An empty sequence yields all-zero variations under either policy.
///
/// # Example
/// ```
/// use numerology::variations::{VariationPolicy, calculate_variations};
///
/// let chars: Vec<char> = "غغ".chars().collect();
/// let variations = calculate_variations(&chars, VariationPolicy::Classic);
/// assert_eq!(variations.small_ebced, 2000);
/// assert_eq!(variations.smallest_ebced, 1000);
/// assert_eq!(variations.qamari_count, 2);
/// ```
pub fn calculate_variations(chars: &[char], policy: VariationPolicy) -> EbcedVariations {
    if chars.is_empty() {
        return EbcedVariations::default();
    }

    let small_ebced = arabic_total(chars, CalculationVariant::Normal);

    let (big_ebced, smallest_ebced, biggest_ebced) = match policy {
        VariationPolicy::LetterTables => (
            arabic_total(chars, CalculationVariant::Big),
            arabic_total(chars, CalculationVariant::Smallest),
            arabic_total(chars, CalculationVariant::Biggest),
        ),
        VariationPolicy::Classic => {
            let distinct: HashSet<char> = chars.iter().copied().collect();
            let character_count = i64::try_from(chars.len()).unwrap_or(i64::MAX);
            (
                small_ebced.saturating_add(DEFINITE_ARTICLE_VALUE),
                valuer::total(
                    distinct,
                    tables::value_table(Alphabet::Arabic, CalculationVariant::Normal),
                ),
                character_count.saturating_mul(MAX_LETTER_VALUE),
            )
        }
    };

    let shamsi = tables::shamsi_letters();
    let qamari = tables::qamari_letters();

    EbcedVariations {
        small_ebced,
        big_ebced,
        smallest_ebced,
        biggest_ebced,
        shamsi_count: chars.iter().filter(|c| shamsi.contains(**c)).count(),
        qamari_count: chars.iter().filter(|c| qamari.contains(**c)).count(),
    }
}
