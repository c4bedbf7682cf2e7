//! Typed cell values
//!
//! Every field of a table is one of three variants: text, number, or a
//! missing-value marker. The variant is decided once per column after the
//! whole file has been read (see [`ColumnType::infer`]), so a column never
//! mixes numbers and text.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Tokens treated as missing values when no custom set is configured.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A numeric field: the parsed value plus the text it was read from.
///
/// Integer columns keep exact `i64` values. Float columns compare by value,
/// so `1` and `1.0` are equal there. The original text is kept so output
/// reproduces the input verbatim.
#[derive(Debug, Clone)]
pub struct Number {
    value: NumValue,
    repr: String,
}

#[derive(Debug, Clone, Copy)]
enum NumValue {
    Int(i64),
    Float(f64),
}

/// Identity used for equality and hashing
#[derive(PartialEq, Eq, Hash)]
enum NumKey {
    Int(i64),
    Float(u64),
}

impl Number {
    /// Parse a field as a float, returning `None` if it is not numeric
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().map(|value| Self {
            value: NumValue::Float(value),
            repr: raw.to_string(),
        })
    }

    /// Parse a field as an exact integer
    pub fn parse_integer(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(|value| Self {
            value: NumValue::Int(value),
            repr: raw.to_string(),
        })
    }

    pub fn value(&self) -> f64 {
        match self.value {
            NumValue::Int(i) => i as f64,
            NumValue::Float(f) => f,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.value {
            NumValue::Int(i) => Some(i),
            NumValue::Float(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// Floats: -0.0 folds into 0.0 and every NaN is one value.
    fn key(&self) -> NumKey {
        match self.value {
            NumValue::Int(i) => NumKey::Int(i),
            NumValue::Float(f) if f == 0.0 => NumKey::Float(0.0f64.to_bits()),
            NumValue::Float(f) if f.is_nan() => NumKey::Float(f64::NAN.to_bits()),
            NumValue::Float(f) => NumKey::Float(f.to_bits()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A single typed field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Text(String),
    Number(Number),
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(n.value()),
            _ => None,
        }
    }

    /// Text written back to a delimited file. Missing values become empty fields.
    pub fn as_field(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Number(n) => n.as_str(),
            Cell::Missing => "",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_field())
    }
}

/// Per-column type decided after reading every field of the column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every value parses as `i64`; compared exactly
    Integer,
    /// Every value parses as `f64`; compared by value
    Number,
    Text,
}

/// Set of tokens that mark a field as missing
#[derive(Debug, Clone)]
pub struct NaValues {
    tokens: Vec<String>,
}

impl NaValues {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Only empty fields count as missing
    pub fn empty_only() -> Self {
        Self::new([""])
    }

    /// Fields must match a token exactly; `" NA"` is text
    pub fn is_na(&self, raw: &str) -> bool {
        self.tokens.iter().any(|t| t == raw)
    }
}

impl Default for NaValues {
    fn default() -> Self {
        Self::new(DEFAULT_NA_VALUES.iter().copied())
    }
}

impl ColumnType {
    /// Infer a column's type from its raw fields.
    ///
    /// A column is numeric when it has at least one non-missing field and
    /// every non-missing field parses as a number. It is an integer column
    /// when every such field parses as `i64`. Anything else is text.
    pub fn infer<'a, I>(fields: I, na: &NaValues) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen_value = false;
        let mut all_integer = true;
        for raw in fields {
            if na.is_na(raw) {
                continue;
            }
            let trimmed = raw.trim();
            if all_integer && trimmed.parse::<i64>().is_err() {
                all_integer = false;
            }
            if !all_integer && trimmed.parse::<f64>().is_err() {
                return ColumnType::Text;
            }
            seen_value = true;
        }
        match (seen_value, all_integer) {
            (false, _) => ColumnType::Text,
            (true, true) => ColumnType::Integer,
            (true, false) => ColumnType::Number,
        }
    }

    /// Convert a raw field to a cell of this column type
    pub fn coerce(self, raw: &str, na: &NaValues) -> Cell {
        if na.is_na(raw) {
            return Cell::Missing;
        }
        match self {
            // A numeric column only contains parseable fields; fall back to text regardless.
            ColumnType::Integer => match Number::parse_integer(raw) {
                Some(n) => Cell::Number(n),
                None => Cell::Text(raw.to_string()),
            },
            ColumnType::Number => match Number::parse(raw) {
                Some(n) => Cell::Number(n),
                None => Cell::Text(raw.to_string()),
            },
            ColumnType::Text => Cell::Text(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_column_inference() {
        let na = NaValues::default();
        assert_eq!(ColumnType::infer(["1", "2.5", "", "NA"], &na), ColumnType::Number);
        assert_eq!(ColumnType::infer(["1", "two"], &na), ColumnType::Text);
        assert_eq!(ColumnType::infer(["1", "-20", "NA"], &na), ColumnType::Integer);
        assert_eq!(ColumnType::infer(["2.5", "two"], &na), ColumnType::Text);
    }

    #[test]
    fn test_large_integers_stay_distinct() {
        let na = NaValues::default();
        let fields = ["9007199254740992", "9007199254740993"];
        assert_eq!(ColumnType::infer(fields, &na), ColumnType::Integer);

        let a = ColumnType::Integer.coerce(fields[0], &na);
        let b = ColumnType::Integer.coerce(fields[1], &na);
        assert_ne!(a, b);
        assert_eq!(a.as_field(), "9007199254740992");
        match b {
            Cell::Number(n) => assert_eq!(n.as_integer(), Some(9007199254740993)),
            other => panic!("expected number, got {:?}", other),
        }

        // As floats both fields round to 2^53
        assert_eq!(
            Number::parse(fields[0]).unwrap(),
            Number::parse(fields[1]).unwrap()
        );
    }

    #[test]
    fn test_all_missing_column_is_text() {
        let na = NaValues::default();
        assert_eq!(ColumnType::infer(["", "NaN", "null"], &na), ColumnType::Text);
        assert_eq!(ColumnType::infer(std::iter::empty(), &na), ColumnType::Text);
    }

    #[test]
    fn test_number_equality_uses_value() {
        let a = Cell::Number(Number::parse("1").unwrap());
        let b = Cell::Number(Number::parse("1.0").unwrap());
        assert_eq!(a, b);
        assert_eq!(b.as_field(), "1.0");

        let zero = Number::parse("0").unwrap();
        let neg_zero = Number::parse("-0.0").unwrap();
        assert_eq!(zero, neg_zero);
    }

    #[test]
    fn test_text_column_keeps_numeric_looking_fields_as_text() {
        let na = NaValues::default();
        let cell = ColumnType::Text.coerce("010", &na);
        assert_eq!(cell, Cell::Text("010".to_string()));
        assert_eq!(cell.as_text(), Some("010"));
        assert_eq!(cell.as_number(), None);
        assert_ne!(cell, ColumnType::Text.coerce("10", &na));
    }

    #[test]
    fn test_missing_markers() {
        let na = NaValues::default();
        assert!(ColumnType::Text.coerce("", &na).is_missing());
        assert_eq!(ColumnType::Text.coerce("  ", &na), Cell::Text("  ".to_string()));
        assert!(ColumnType::Number.coerce("NaN", &na).is_missing());
        assert_eq!(ColumnType::Text.coerce("NA", &na), Cell::Missing);
        assert_eq!(Cell::Missing.as_field(), "");

        let strict = NaValues::empty_only();
        assert_eq!(
            ColumnType::Text.coerce("NA", &strict),
            Cell::Text("NA".to_string())
        );
    }

    #[test]
    fn test_number_keeps_original_text() {
        let cell = ColumnType::Number.coerce(" 12.50", &NaValues::default());
        assert_eq!(cell.as_number(), Some(12.5));
        assert_eq!(cell.to_string(), " 12.50");
    }
}
