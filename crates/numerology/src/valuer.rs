//! Per-character valuation against a single table

use crate::tables::ValueTable;

/// One retained character and the value it contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct LetterRow {
    /// The character, as a one-character string.
    pub char: String,
    /// Its value in the table used for the calculation, 0 when it has none.
    pub value: u32,
}

impl LetterRow {
    /// Row for `c` valued at `value`.
    pub fn new(c: char, value: u32) -> Self {
        Self {
            char: c.to_string(),
            value,
        }
    }
}

/// Sum of the values of `chars` in `table`.
///
/// The total is kept as `i64`, which cannot be exhausted by any realistic input even with the
/// largest per-letter values.
pub fn total<I>(chars: I, table: &ValueTable) -> i64
where
    I: IntoIterator<Item = char>,
{
    chars
        .into_iter()
        .map(|c| i64::from(table.value_of(c)))
        .fold(0_i64, i64::saturating_add)
}

/// Value every character of `chars` in order, returning one row per character and their total.
///
/// Repeated characters produce a row each. Characters missing from `table` are valued at 0.
pub fn value_rows<I>(chars: I, table: &ValueTable) -> (Vec<LetterRow>, i64)
where
    I: IntoIterator<Item = char>,
{
    let chars = chars.into_iter();
    let mut rows = Vec::with_capacity(chars.size_hint().0);
    let mut total = 0_i64;

    for c in chars {
        let value = table.value_of(c);
        rows.push(LetterRow::new(c, value));
        total = total.saturating_add(i64::from(value));
    }

    (rows, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Alphabet, CalculationVariant, tables::value_table};

    #[test]
    fn rows_follow_input_order_and_repeat() {
        let table = value_table(Alphabet::Arabic, CalculationVariant::Normal);
        let (rows, total) = value_rows("ببا".chars(), table);

        assert_eq!(
            rows,
            vec![
                LetterRow::new('ب', 2),
                LetterRow::new('ب', 2),
                LetterRow::new('ا', 1),
            ]
        );
        assert_eq!(total, 5);
    }

    #[test]
    fn unknown_characters_add_zero_rows() {
        let table = value_table(Alphabet::Hebrew, CalculationVariant::Normal);
        let (rows, total) = value_rows("אzב".chars(), table);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], LetterRow::new('z', 0));
        assert_eq!(total, 3);
    }

    #[test]
    fn total_matches_rows() {
        let table = value_table(Alphabet::Greek, CalculationVariant::Normal);
        let text = "ΑΒΓΔΕϚΖΗΘ";
        let (rows, total_from_rows) = value_rows(text.chars(), table);

        assert_eq!(total(text.chars(), table), total_from_rows);
        assert_eq!(
            rows.iter().map(|row| i64::from(row.value)).sum::<i64>(),
            45
        );
    }

    #[test]
    fn large_inputs_do_not_wrap() {
        let table = value_table(Alphabet::Arabic, CalculationVariant::Normal);
        let text = "غ".repeat(10_000);
        assert_eq!(total(text.chars(), table), 10_000_000);
    }

    #[test]
    fn empty_input_has_no_rows() {
        let table = value_table(Alphabet::Arabic, CalculationVariant::Normal);
        let (rows, total) = value_rows(std::iter::empty(), table);
        assert!(rows.is_empty());
        assert_eq!(total, 0);
    }
}
