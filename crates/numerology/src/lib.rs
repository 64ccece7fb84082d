//! Letter-value numerology for Arabic (Ebced), Hebrew (Gematria) and Greek (Isopsephy) text.
//!
//! Text is normalized by dropping whitespace and the script's diacritics, every remaining
//! character is valued from a fixed table, and Arabic text additionally gets four alternate
//! totals plus counts of its sun and moon letters.
//!
//! # Example
//!
//! ```
//! use numerology::{Alphabet, CalculationVariant, calculate};
//!
//! let result = calculate("אב", Alphabet::Hebrew, CalculationVariant::Normal).unwrap();
//! assert_eq!(result.total, 3);
//! assert_eq!(result.rows.len(), 2);
//! assert!(result.variations.is_none());
//! ```

pub mod alphabet;
pub mod calculator;
pub mod error;
pub mod normalize;
pub mod tables;
pub mod valuer;
pub mod variations;

// Re-export main types for convenience
pub use alphabet::{Alphabet, AlphabetInfo, CalculationVariant, TextDirection};
pub use calculator::{CalculationResult, Calculator, calculate, calculate_total};
pub use error::NumerologyError;
pub use normalize::normalize;
pub use valuer::LetterRow;
pub use variations::{EbcedVariations, VariationPolicy};
