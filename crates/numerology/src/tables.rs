//! Letter-value tables and diacritic sets for every supported alphabet
//!
//! All tables are literal data turned into lookup structures the first time they are touched and
//! shared, read-only, for the rest of the process. Nothing in this module hands out a mutable
//! reference.

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use crate::alphabet::{Alphabet, CalculationVariant};

/// The four values a single Arabic character carries, one per [`CalculationVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArabicLetterInfo {
    /// The character this row describes.
    pub letter: char,
    /// Standard abjad value.
    pub normal: u32,
    /// Standard value modulo 12, where an exact multiple of 12 counts as 12.
    pub smallest: u32,
    /// Abjad value of the letter's spelled-out name, e.g. elif (ا ل ف) = 111.
    pub big: u32,
    /// Sum of the `big` values of the letters of the spelled-out name, e.g. elif = 111 + 71 + 81.
    pub biggest: u32,
}

impl ArabicLetterInfo {
    /// Shorthand used by the literal table below.
    const fn new(letter: char, normal: u32, smallest: u32, big: u32, biggest: u32) -> Self {
        Self {
            letter,
            normal,
            smallest,
            big,
            biggest,
        }
    }

    /// The value of this letter under `variant`.
    pub const fn value(&self, variant: CalculationVariant) -> u32 {
        match variant {
            CalculationVariant::Normal => self.normal,
            CalculationVariant::Smallest => self.smallest,
            CalculationVariant::Big => self.big,
            CalculationVariant::Biggest => self.biggest,
        }
    }
}

/// Every Arabic character with a value. Orthographic variants (hamza seats, ta marbuta, alef
/// maqsura, Persian kaf) share the row of the letter they are written for.
#[rustfmt::skip]
const ARABIC_LETTERS: [ArabicLetterInfo; 35] = [
    ArabicLetterInfo::new('ا', 1, 1, 111, 263),
    ArabicLetterInfo::new('أ', 1, 1, 111, 263),
    ArabicLetterInfo::new('إ', 1, 1, 111, 263),
    ArabicLetterInfo::new('آ', 1, 1, 111, 263),
    ArabicLetterInfo::new('ب', 2, 2, 3, 114),
    ArabicLetterInfo::new('ج', 3, 3, 53, 154),
    ArabicLetterInfo::new('د', 4, 4, 35, 217),
    ArabicLetterInfo::new('ه', 5, 5, 6, 117),
    ArabicLetterInfo::new('ة', 5, 5, 6, 117),
    ArabicLetterInfo::new('و', 6, 6, 13, 137),
    ArabicLetterInfo::new('ز', 7, 7, 18, 140),
    ArabicLetterInfo::new('ح', 8, 8, 9, 120),
    ArabicLetterInfo::new('ط', 9, 9, 10, 121),
    ArabicLetterInfo::new('ي', 10, 10, 11, 122),
    ArabicLetterInfo::new('ى', 10, 10, 11, 122),
    ArabicLetterInfo::new('ئ', 10, 10, 11, 122),
    ArabicLetterInfo::new('ك', 20, 8, 101, 293),
    ArabicLetterInfo::new('ک', 20, 8, 101, 293),
    ArabicLetterInfo::new('ل', 30, 6, 71, 272),
    ArabicLetterInfo::new('م', 40, 4, 90, 191),
    ArabicLetterInfo::new('ن', 50, 2, 106, 225),
    ArabicLetterInfo::new('س', 60, 12, 120, 237),
    ArabicLetterInfo::new('ع', 70, 10, 130, 247),
    ArabicLetterInfo::new('ف', 80, 8, 81, 192),
    ArabicLetterInfo::new('ص', 90, 6, 95, 241),
    ArabicLetterInfo::new('ق', 100, 4, 181, 373),
    ArabicLetterInfo::new('ر', 200, 8, 201, 312),
    ArabicLetterInfo::new('ش', 300, 12, 360, 477),
    ArabicLetterInfo::new('ت', 400, 4, 401, 512),
    ArabicLetterInfo::new('ث', 500, 8, 501, 612),
    ArabicLetterInfo::new('خ', 600, 12, 601, 712),
    ArabicLetterInfo::new('ذ', 700, 4, 731, 913),
    ArabicLetterInfo::new('ض', 800, 8, 805, 951),
    ArabicLetterInfo::new('ظ', 900, 12, 901, 1012),
    ArabicLetterInfo::new('غ', 1000, 4, 1060, 1177),
];

/// Hebrew gematria, final forms valued like their regular forms.
#[rustfmt::skip]
const HEBREW_VALUES: [(char, u32); 27] = [
    ('א', 1), ('ב', 2), ('ג', 3), ('ד', 4), ('ה', 5),
    ('ו', 6), ('ז', 7), ('ח', 8), ('ט', 9),
    ('י', 10), ('כ', 20), ('ך', 20), ('ל', 30), ('מ', 40), ('ם', 40),
    ('נ', 50), ('ן', 50), ('ס', 60), ('ע', 70), ('פ', 80), ('ף', 80),
    ('צ', 90), ('ץ', 90),
    ('ק', 100), ('ר', 200), ('ש', 300), ('ת', 400),
];

/// Greek isopsephy including the archaic numerals stigma, koppa and sampi, in both cases.
#[rustfmt::skip]
const GREEK_VALUES: [(char, u32); 55] = [
    ('α', 1), ('β', 2), ('γ', 3), ('δ', 4), ('ε', 5),
    ('ϛ', 6), ('ζ', 7), ('η', 8), ('θ', 9),
    ('ι', 10), ('κ', 20), ('λ', 30), ('μ', 40), ('ν', 50),
    ('ξ', 60), ('ο', 70), ('π', 80), ('ϟ', 90),
    ('ρ', 100), ('σ', 200), ('ς', 200), ('τ', 300), ('υ', 400),
    ('φ', 500), ('χ', 600), ('ψ', 700), ('ω', 800), ('ϡ', 900),
    ('Α', 1), ('Β', 2), ('Γ', 3), ('Δ', 4), ('Ε', 5),
    ('Ϛ', 6), ('Ζ', 7), ('Η', 8), ('Θ', 9),
    ('Ι', 10), ('Κ', 20), ('Λ', 30), ('Μ', 40), ('Ν', 50),
    ('Ξ', 60), ('Ο', 70), ('Π', 80), ('Ϟ', 90),
    ('Ρ', 100), ('Σ', 200), ('Τ', 300), ('Υ', 400),
    ('Φ', 500), ('Χ', 600), ('Ψ', 700), ('Ω', 800), ('Ϡ', 900),
];

/// Combining tonos, breathing and iota subscript marks.
const GREEK_DIACRITICS: [char; 16] = [
    '\u{0300}', '\u{0301}', '\u{0302}', '\u{0303}', '\u{0304}', '\u{0305}', '\u{0306}', '\u{0307}',
    '\u{0308}', '\u{0309}', '\u{030A}', '\u{030B}', '\u{0313}', '\u{0314}', '\u{0342}', '\u{0345}',
];

/// Sun letters: the lam of a preceding definite article assimilates into them.
const SHAMSI_LETTERS: [char; 14] = [
    'ت', 'ث', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ل', 'ن',
];

/// Moon letters: the lam of a preceding definite article is pronounced.
const QAMARI_LETTERS: [char; 14] = [
    'ا', 'ب', 'ج', 'ح', 'خ', 'ع', 'غ', 'ف', 'ق', 'ك', 'م', 'ه', 'و', 'ي',
];

/// Hebrew letter block, excluded from the mark range below.
const HEBREW_LETTER_RANGE: std::ops::RangeInclusive<u32> = 0x05D0..=0x05EA;

/// An immutable mapping from character to letter value.
#[derive(Debug)]
pub struct ValueTable(HashMap<char, u32>);

impl ValueTable {
    /// Value of `c`, or 0 if the character has no value in this table.
    pub fn value_of(&self, c: char) -> u32 {
        self.0.get(&c).copied().unwrap_or(0)
    }

    /// Whether `c` has an entry in this table.
    pub fn contains(&self, c: char) -> bool {
        self.0.contains_key(&c)
    }

    /// Number of characters with an entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The largest value any character carries in this table.
    pub fn max_value(&self) -> u32 {
        self.0.values().copied().max().unwrap_or(0)
    }
}

impl FromIterator<(char, u32)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (char, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An immutable set of characters, used for diacritics and for the Shamsi/Qamari classes.
#[derive(Debug)]
pub struct CharSet(HashSet<char>);

/// Characters stripped during normalization.
pub type DiacriticSet = CharSet;

impl CharSet {
    /// Whether `c` is a member.
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the two sets share any member.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.0.is_disjoint(&other.0)
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build the Arabic table for one variant.
fn arabic_table(variant: CalculationVariant) -> ValueTable {
    ARABIC_LETTERS
        .iter()
        .map(|info| (info.letter, info.value(variant)))
        .collect()
}

/// Collect every valid scalar value in the given code point ranges.
fn code_points(ranges: &[std::ops::RangeInclusive<u32>]) -> impl Iterator<Item = char> + '_ {
    ranges
        .iter()
        .flat_map(|range| range.clone())
        .filter_map(char::from_u32)
}

static ARABIC_NORMAL: LazyLock<ValueTable> =
    LazyLock::new(|| arabic_table(CalculationVariant::Normal));
static ARABIC_SMALLEST: LazyLock<ValueTable> =
    LazyLock::new(|| arabic_table(CalculationVariant::Smallest));
static ARABIC_BIG: LazyLock<ValueTable> = LazyLock::new(|| arabic_table(CalculationVariant::Big));
static ARABIC_BIGGEST: LazyLock<ValueTable> =
    LazyLock::new(|| arabic_table(CalculationVariant::Biggest));
static HEBREW: LazyLock<ValueTable> = LazyLock::new(|| HEBREW_VALUES.into_iter().collect());
static GREEK: LazyLock<ValueTable> = LazyLock::new(|| GREEK_VALUES.into_iter().collect());

/// Arabic marks: U+0610..U+061A, U+064B..U+065F (which already holds the hamza and alef marks
/// U+0654 and U+0656), the superscript alef U+0670 and the tatweel U+0640.
static ARABIC_DIACRITICS: LazyLock<DiacriticSet> = LazyLock::new(|| {
    code_points(&[0x0610..=0x061A, 0x064B..=0x065F, 0x0670..=0x0670, 0x0640..=0x0640]).collect()
});

/// Hebrew cantillation and vowel points: everything in U+0591..U+05C7 outside the letter block.
static HEBREW_DIACRITICS: LazyLock<DiacriticSet> = LazyLock::new(|| {
    code_points(&[0x0591..=0x05C7])
        .filter(|c| !HEBREW_LETTER_RANGE.contains(&u32::from(*c)))
        .collect()
});

static GREEK_DIACRITIC_SET: LazyLock<DiacriticSet> =
    LazyLock::new(|| GREEK_DIACRITICS.into_iter().collect());

static SHAMSI: LazyLock<CharSet> = LazyLock::new(|| SHAMSI_LETTERS.into_iter().collect());
static QAMARI: LazyLock<CharSet> = LazyLock::new(|| QAMARI_LETTERS.into_iter().collect());

/// The value table for `alphabet` under `variant`.
///
/// Arabic has one table per variant; Hebrew and Greek always return their single table.
pub fn value_table(alphabet: Alphabet, variant: CalculationVariant) -> &'static ValueTable {
    match (alphabet, variant) {
        (Alphabet::Arabic, CalculationVariant::Normal) => &ARABIC_NORMAL,
        (Alphabet::Arabic, CalculationVariant::Smallest) => &ARABIC_SMALLEST,
        (Alphabet::Arabic, CalculationVariant::Big) => &ARABIC_BIG,
        (Alphabet::Arabic, CalculationVariant::Biggest) => &ARABIC_BIGGEST,
        (Alphabet::Hebrew, _) => &HEBREW,
        (Alphabet::Greek, _) => &GREEK,
    }
}

/// The marks stripped from text written in `alphabet`.
pub fn diacritic_set(alphabet: Alphabet) -> &'static DiacriticSet {
    match alphabet {
        Alphabet::Arabic => &ARABIC_DIACRITICS,
        Alphabet::Hebrew => &HEBREW_DIACRITICS,
        Alphabet::Greek => &GREEK_DIACRITIC_SET,
    }
}

/// The per-letter rows the Arabic tables are built from.
pub const fn arabic_letters() -> &'static [ArabicLetterInfo] {
    &ARABIC_LETTERS
}

/// The fourteen Arabic sun letters.
pub fn shamsi_letters() -> &'static CharSet {
    &SHAMSI
}

/// The fourteen Arabic moon letters.
pub fn qamari_letters() -> &'static CharSet {
    &QAMARI
}
