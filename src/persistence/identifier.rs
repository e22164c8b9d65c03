//! Safe column identifiers for arbitrary record keys.
//!
//! A key goes through two steps before it reaches a statement:
//!
//! 1. [`column_name`] folds it into a column name that SQLite's ASCII
//! case-insensitive name comparison cannot confuse with another key.
//! Uppercase `X` becomes `^x`, `^` becomes `^^` and NUL, which ends a
//! statement for SQLite's tokenizer even inside quotes, becomes `^0`.
//! Everything else passes through. [`key_from_column`] undoes it.
//! 2. [`quote_identifier`] wraps the name in double quotes, doubling any
//! embedded double quote.
//!
//! The internal row id column is named so that step 1 can never produce it.

const ESCAPE: char = '^';
const NUL_ESCAPE: char = '0';

/// Insertion order column, created with the table.
pub(crate) const ROW_ID_COLUMN: &str = "^_id";

pub fn column_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());

    for c in key.chars() {
        if c == ESCAPE {
            name.push(ESCAPE);
            name.push(ESCAPE);
        } else if c == '\0' {
            name.push(ESCAPE);
            name.push(NUL_ESCAPE);
        } else if c.is_ascii_uppercase() {
            name.push(ESCAPE);
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }

    name
}

pub fn key_from_column(name: &str) -> Option<String> {
    //! Invert [`column_name`].
    //!
    //! Returns [`None`] for names the mapping never produces, such as the
    //! row id column.

    let mut key = String::with_capacity(name.len());
    let mut chars = name.chars();

    while let Some(c) = chars.next() {
        if c != ESCAPE {
            key.push(c);
            continue;
        }
        match chars.next() {
            Some(ESCAPE) => key.push(ESCAPE),
            Some(NUL_ESCAPE) => key.push('\0'),
            Some(lower) if lower.is_ascii_lowercase() => key.push(lower.to_ascii_uppercase()),
            _ => return None,
        }
    }

    Some(key)
}

pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn quote_key(key: &str) -> String {
    quote_identifier(&column_name(key))
}
