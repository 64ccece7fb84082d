//! The closed set of scripts and calculation variants, and their wire encodings

use std::{fmt, str::FromStr};

use crate::error::NumerologyError;

/// The script a text is valued in.
///
/// Callers exchange alphabets as integer codes (`Arabic = 0`, `Hebrew = 1`, `Greek = 2`). Decoding a
/// code never fails: anything unrecognised resolves to [`Alphabet::FALLBACK`].
///
/// # Example
/// ```
/// use numerology::Alphabet;
///
/// assert_eq!(Alphabet::from_code(1), Alphabet::Hebrew);
/// assert_eq!(Alphabet::from_code(42), Alphabet::FALLBACK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alphabet {
    /// Ebced.
    #[default]
    Arabic,
    /// Gematria.
    Hebrew,
    /// Isopsephy.
    Greek,
}

impl Alphabet {
    /// Every supported alphabet, in wire-code order.
    pub const ALL: [Self; 3] = [Self::Arabic, Self::Hebrew, Self::Greek];

    /// The alphabet used when a caller supplies a code outside the known range.
    pub const FALLBACK: Self = Self::Arabic;

    /// Integer wire code of this alphabet.
    pub const fn code(self) -> u8 {
        match self {
            Self::Arabic => 0,
            Self::Hebrew => 1,
            Self::Greek => 2,
        }
    }

    /// Decode a wire code, falling back to [`Alphabet::FALLBACK`] for unknown codes.
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Arabic,
            1 => Self::Hebrew,
            2 => Self::Greek,
            _ => Self::FALLBACK,
        }
    }

    /// Descriptive information used when presenting this alphabet.
    pub const fn info(self) -> AlphabetInfo {
        match self {
            Self::Arabic => AlphabetInfo {
                system_name: "Ebced",
                language_name: "Arabic",
                direction: TextDirection::Rtl,
            },
            Self::Hebrew => AlphabetInfo {
                system_name: "Gematria",
                language_name: "Hebrew",
                direction: TextDirection::Rtl,
            },
            Self::Greek => AlphabetInfo {
                system_name: "Isopsephy",
                language_name: "Greek",
                direction: TextDirection::Ltr,
            },
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().language_name)
    }
}

/// Strict parsing by name (`"arabic"`, `"Hebrew"`, ...) or by wire code (`"2"`).
///
/// Unlike [`Alphabet::from_code`] this does not fall back, so it can be used where an unknown
/// alphabet must be rejected.
impl FromStr for Alphabet {
    type Err = NumerologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arabic" | "ebced" | "0" => Ok(Self::Arabic),
            "hebrew" | "gematria" | "1" => Ok(Self::Hebrew),
            "greek" | "isopsephy" | "2" => Ok(Self::Greek),
            _ => Err(NumerologyError::UnknownAlphabet(s.to_string())),
        }
    }
}

/// Which per-letter table is used to value Arabic text.
///
/// Hebrew and Greek have a single table and ignore the variant. Wire codes are `Normal = 0`,
/// `Smallest = 1`, `Big = 2`, `Biggest = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalculationVariant {
    #[default]
    Normal,
    Smallest,
    Big,
    Biggest,
}

impl CalculationVariant {
    /// Every variant, in wire-code order.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Smallest, Self::Big, Self::Biggest];

    /// The variant used when a caller supplies a code outside the known range.
    pub const FALLBACK: Self = Self::Normal;

    /// Integer wire code of this variant.
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Smallest => 1,
            Self::Big => 2,
            Self::Biggest => 3,
        }
    }

    /// Decode a wire code, falling back to [`CalculationVariant::FALLBACK`] for unknown codes.
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Normal,
            1 => Self::Smallest,
            2 => Self::Big,
            3 => Self::Biggest,
            _ => Self::FALLBACK,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Smallest => "smallest",
            Self::Big => "big",
            Self::Biggest => "biggest",
        }
    }
}

impl fmt::Display for CalculationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationVariant {
    type Err = NumerologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "0" => Ok(Self::Normal),
            "smallest" | "1" => Ok(Self::Smallest),
            "big" | "2" => Ok(Self::Big),
            "biggest" | "3" => Ok(Self::Biggest),
            _ => Err(NumerologyError::UnknownVariant(s.to_string())),
        }
    }
}

/// Writing direction of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Rtl,
    Ltr,
}

impl TextDirection {
    /// The HTML `dir` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rtl => "rtl",
            Self::Ltr => "ltr",
        }
    }
}

/// Presentation details of an alphabet's numbering system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(
    clippy::missing_docs_in_private_items,
    reason = "Self explanatory attribute names"
)]
pub struct AlphabetInfo {
    pub system_name: &'static str,
    pub language_name: &'static str,
    pub direction: TextDirection,
}

#[cfg(feature = "serde")]
/// Both enums travel as their integer wire code. Deserialization goes through `from_code`, so an
/// out-of-range code is accepted and resolved to the fallback rather than rejected.
mod serde_impl {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Alphabet, CalculationVariant};

    impl Serialize for Alphabet {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_u8(self.code())
        }
    }

    impl<'de> Deserialize<'de> for Alphabet {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            i64::deserialize(deserializer).map(Self::from_code)
        }
    }

    impl Serialize for CalculationVariant {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_u8(self.code())
        }
    }

    impl<'de> Deserialize<'de> for CalculationVariant {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            i64::deserialize(deserializer).map(Self::from_code)
        }
    }
}
