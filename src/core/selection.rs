//! Secret selection.
//!
//! Decides which vault secrets to fetch and the alias each one is published
//! under. Entries are written `name=alias` both in the inline filter and in
//! secrets files.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::constants::{ALIAS_SEPARATOR, ALL_SECRETS, FILTER_SEPARATOR};
use crate::core::params::SelectionSource;
use crate::core::types::{Alias, SecretName};
use crate::error::SelectionError;

/// Alias → vault secret name.
pub type SecretMap = BTreeMap<Alias, SecretName>;

/// Which secrets to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every enabled, unexpired secret, published under its own name.
    All,
    /// Explicit alias → name mapping.
    Named(SecretMap),
}

impl Selection {
    /// Build the selection described by a resolved input source.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` for malformed entries, bad glob patterns,
    /// or unreadable files.
    pub fn from_source(source: &SelectionSource) -> Result<Self, SelectionError> {
        match source {
            SelectionSource::Filter(filter) => Self::from_filter(filter),
            SelectionSource::File(pattern) => read_files(pattern).map(Self::Named),
        }
    }

    /// Build a selection from an inline filter; `*` selects everything.
    pub fn from_filter(filter: &str) -> Result<Self, SelectionError> {
        if filter.trim() == ALL_SECRETS {
            return Ok(Self::All);
        }
        parse_filter(filter).map(Self::Named)
    }
}

/// Parse an inline `name=alias,name=alias` filter.
pub fn parse_filter(filter: &str) -> Result<SecretMap, SelectionError> {
    let mut map = SecretMap::new();

    for segment in filter.split(FILTER_SEPARATOR) {
        let entry = segment.trim();
        let (name, alias) = split_entry(entry).ok_or_else(|| SelectionError::MalformedEntry {
            entry: entry.to_string(),
        })?;
        insert(&mut map, entry, name, alias)?;
    }

    Ok(map)
}

/// Read `name=alias` lines from every file matching `pattern`.
///
/// Files are read in match order, so later files override earlier aliases.
/// Blank lines are skipped. A pattern that matches nothing yields an empty map.
pub fn read_files(pattern: &str) -> Result<SecretMap, SelectionError> {
    let paths = glob::glob(pattern).map_err(|source| SelectionError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut map = SecretMap::new();
    let mut matched = 0usize;

    // Unreadable directory entries are skipped like non-file matches.
    for path in paths.flatten().filter(|p| p.is_file()) {
        matched += 1;
        read_file(&path, &mut map)?;
    }

    if matched == 0 {
        warn!(pattern = %pattern, "secrets file pattern matched no files");
    }
    debug!(files = matched, secrets = map.len(), "read secrets files");

    Ok(map)
}

fn read_file(path: &Path, map: &mut SecretMap) -> Result<(), SelectionError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SelectionError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, line) in contents.split('\n').enumerate() {
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, alias) = split_entry(entry).ok_or_else(|| SelectionError::MalformedLine {
            path: path.to_path_buf(),
            line: index + 1,
        })?;
        insert(map, entry, name, alias)?;
    }

    Ok(())
}

/// Split `name=alias` on its only `=`, trimming both sides.
fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let (name, alias) = entry.split_once(ALIAS_SEPARATOR)?;
    if alias.contains(ALIAS_SEPARATOR) {
        return None;
    }
    Some((name.trim(), alias.trim()))
}

fn insert(map: &mut SecretMap, entry: &str, name: &str, alias: &str) -> Result<(), SelectionError> {
    if name.is_empty() || alias.is_empty() {
        return Err(SelectionError::EmptyField(entry.to_string()));
    }
    // Aliases become runner file-command headers (`ALIAS<<delimiter`).
    if alias.chars().any(char::is_control) || alias.contains("<<") {
        return Err(SelectionError::InvalidAlias(alias.to_string()));
    }
    if let Some(previous) = map.insert(alias.to_string(), name.to_string()) {
        warn!(alias = %alias, previous = %previous, secret = %name, "alias redefined, last entry wins");
    }
    Ok(())
}
