//! G-Code tokenizer
//!
//! Splits a document into instruction lines, strips `;` comments and breaks
//! each line into a command code and single-letter parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tokenized G-Code line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Upper-cased command code (e.g. "G1"); empty for blank lines
    pub command: String,
    /// Parameter values keyed by lower-cased letter
    pub params: BTreeMap<char, f64>,
    /// Parameter tokens that lack a letter address or whose numeric part
    /// was not a clean number
    pub invalid: Vec<String>,
}

impl Instruction {
    /// Value of parameter `key` (lower-case letter), if present
    pub fn get(&self, key: char) -> Option<f64> {
        self.params.get(&key).copied()
    }

    /// True for blank or comment-only lines
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Remove an inline `;` comment from a line.
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parse the longest leading prefix of `text` that forms a decimal number.
///
/// Returns the value and whether the whole input was consumed. An input with
/// no numeric prefix yields `NaN`.
pub fn parse_number_prefix(text: &str) -> (f64, bool) {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return (f64::NAN, false);
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let value = text[..end].parse::<f64>().unwrap_or(f64::NAN);
    (value, end == bytes.len())
}

/// Tokenize a single line (comments are stripped here as well).
pub fn tokenize_line(line: &str) -> Instruction {
    let mut tokens = strip_comment(line).split_whitespace();

    let command = match tokens.next() {
        Some(code) => code.to_uppercase(),
        None => return Instruction::default(),
    };

    let mut params = BTreeMap::new();
    let mut invalid = Vec::new();

    for token in tokens {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let key = first.to_lowercase().next().unwrap_or(first);
        let (value, clean) = parse_number_prefix(chars.as_str());
        if !clean || !first.is_ascii_alphabetic() {
            invalid.push(token.to_string());
        }
        params.insert(key, value);
    }

    Instruction {
        command,
        params,
        invalid,
    }
}

/// Tokenize a whole document, yielding 1-based line numbers with each
/// instruction. Blank lines are yielded as empty instructions; a trailing
/// newline does not start an extra line.
pub fn tokenize(text: &str) -> impl Iterator<Item = (u32, Instruction)> + '_ {
    text.lines().enumerate().map(|(idx, line)| {
        let line_number = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        (line_number, tokenize_line(line))
    })
}
