//! Composite key encoding.
//!
//! A composite key is `NS index NS attr NS attr NS …` where `NS` is U+0000.
//! Plain natural keys never start with U+0000, so index entries and
//! aggregates share one key space without colliding.

use crate::error::{LedgerError, Result};

const NS: char = '\u{0}';

/// Build the full key for `(index_name, attributes…)`.
pub fn composite_key(index_name: &str, attributes: &[&str]) -> Result<String> {
    composite_prefix(index_name, attributes)
}

/// Build the scan prefix for `(index_name, prefix_attributes…)`.
///
/// Every component is terminated, so the prefix `["ab"]` never matches a
/// key whose attribute is `"abc"`.
pub fn composite_prefix(index_name: &str, attributes: &[&str]) -> Result<String> {
    if index_name.is_empty() {
        return Err(LedgerError::validation(0, "index name must be a non-empty string"));
    }
    check_component(0, index_name)?;

    let mut key = String::with_capacity(
        2 + index_name.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>(),
    );
    key.push(NS);
    key.push_str(index_name);
    key.push(NS);
    for (i, attribute) in attributes.iter().enumerate() {
        check_component(i + 1, attribute)?;
        key.push_str(attribute);
        key.push(NS);
    }
    Ok(key)
}

/// Decompose a composite key back into its index name and attributes.
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>)> {
    let body = key
        .strip_prefix(NS)
        .and_then(|rest| rest.strip_suffix(NS))
        .ok_or_else(|| LedgerError::validation(0, format!("not a composite key: {:?}", key)))?;

    let mut parts = body.split(NS).map(str::to_string);
    let index_name = parts.next().unwrap_or_default();
    Ok((index_name, parts.collect()))
}

fn check_component(index: usize, component: &str) -> Result<()> {
    if component.contains(NS) {
        return Err(LedgerError::validation(
            index,
            "composite key component must not contain U+0000",
        ));
    }
    Ok(())
}
