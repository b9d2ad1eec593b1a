//! Positional argument checks for operation entry points.
//!
//! Every failure is a `LedgerError::Validation` carrying the 0-based index
//! of the offending argument.

use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Borrowed view over an operation's string arguments.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    args: &'a [String],
}

impl<'a> Args<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self { args }
    }

    /// Fail unless exactly `n` arguments were supplied.
    pub fn expect_len(&self, n: usize) -> Result<()> {
        if self.args.len() != n {
            return Err(LedgerError::validation(
                self.args.len().min(n),
                format!("incorrect number of arguments: expected {}, got {}", n, self.args.len()),
            ));
        }
        Ok(())
    }

    /// The argument at `index`, unchecked beyond presence.
    pub fn raw(&self, index: usize) -> Result<&'a str> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| LedgerError::validation(index, "missing argument"))
    }

    pub fn non_empty(&self, index: usize) -> Result<&'a str> {
        let value = self.raw(index)?;
        if value.is_empty() {
            return Err(LedgerError::validation(index, "must be a non-empty string"));
        }
        Ok(value)
    }

    /// Non-empty and lowercased.
    pub fn lowercase(&self, index: usize) -> Result<String> {
        Ok(self.non_empty(index)?.to_lowercase())
    }

    /// A natural key: non-empty and case-folded.
    pub fn natural_key(&self, index: usize) -> Result<String> {
        self.lowercase(index)
    }

    pub fn integer<T: FromStr>(&self, index: usize) -> Result<T> {
        self.non_empty(index)?
            .parse::<T>()
            .map_err(|_| LedgerError::validation(index, "must be a numeric string"))
    }
}

/// Case-fold a key handed to a typed entry point.
pub fn fold_key(key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(LedgerError::validation(0, "must be a non-empty string"));
    }
    Ok(key.to_lowercase())
}
