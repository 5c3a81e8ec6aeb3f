//! Parsing of pasted columns of numbers.
//!
//! Pasted text is split on any run of commas, newlines or other whitespace.
//! A byte order mark, as left behind by spreadsheet exports, separates tokens
//! as well.
//! Each token is read with a lenient rule: the longest leading prefix that
//! forms a decimal number is used (`"12.5cm"` reads as `12.5`), and tokens
//! without such a prefix are dropped. Non-finite results are dropped too, so
//! a parsed sequence never contains NaN or infinity.

use serde::{Deserialize, Serialize};

/// How a pasted column is placed into the active group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// Overwrite existing subjects from the first row, then create new ones.
    FillColumn,
    /// Always create new subjects after the last existing one.
    AppendRows,
}

impl BatchMode {
    /// Row index the first pasted value is written to.
    #[must_use]
    pub const fn start_offset(self, existing_subjects: usize) -> usize {
        match self {
            Self::FillColumn => 0,
            Self::AppendRows => existing_subjects,
        }
    }
}

/// Splits `raw` into tokens and parses each one, dropping the unparsable ones.
///
/// ```
/// use openfield_model::batch::parse_numbers;
///
/// assert_eq!(parse_numbers("1, abc, 3"), vec![1.0, 3.0]);
/// assert_eq!(parse_numbers("2500\n2450\t2600"), vec![2500.0, 2450.0, 2600.0]);
/// assert!(parse_numbers("  \n ").is_empty());
/// ```
#[must_use]
pub fn parse_numbers(raw: &str) -> Vec<f64> {
    raw.split(is_separator)
        .filter(|token| !token.is_empty())
        .filter_map(parse_number)
        .collect()
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '\u{feff}' || c.is_whitespace()
}

/// Parses the leading decimal number of `token`.
///
/// Returns `None` when the token does not start with a number or when the
/// number is not finite.
#[must_use]
pub fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim_start();
    let end = numeric_prefix_len(token.as_bytes());
    if end == 0 {
        return None;
    }
    token[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Length of the longest prefix matching `[+-]? digits? (. digits?)? ([eE] [+-]? digits)?`
/// with at least one mantissa digit. Zero when there is no such prefix.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(pos);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    pos
}
