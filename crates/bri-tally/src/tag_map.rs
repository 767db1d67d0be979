//! Tag normalizer
//!
//! Maps journal abbreviations as printed in the index to canonical journal
//! titles. The map is assembled from a primary source and an OCR-fix
//! supplement, then widened with space-stripped keys because a dropped
//! interior space is the most common OCR error in tags.

use crate::error::TallyError;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// One `(tag, title)` row of a tag source, as read from a tab-delimited file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TagRow {
    /// Abbreviation
    pub tag: Option<String>,
    /// Canonical journal title
    pub title: Option<String>,
}

impl TagRow {
    /// Validated `(tag, title)` pair; `row` is used in the error message
    pub fn into_pair(self, row: usize) -> Result<(String, String), TallyError> {
        match (self.tag, self.title) {
            (Some(tag), Some(title)) if !tag.trim().is_empty() && !title.trim().is_empty() => {
                Ok((tag.trim().to_string(), title.trim().to_string()))
            }
            _ => Err(TallyError::Source(format!(
                "row {} needs both a tag and a title",
                row
            ))),
        }
    }
}

/// Abbreviation to canonical title lookup
///
/// Precedence on key collision, highest first:
/// 1. primary rows (the first row for a tag wins)
/// 2. fix rows
/// 3. space-stripped forms of spaced keys
///
/// # Examples
///
/// ```
/// use bri_tally::TagMap;
///
/// let tags = TagMap::build(
///     vec![("Choice", "Choice Magazine"), ("H Net", "H-Net Reviews")],
///     Vec::<(&str, &str)>::new(),
/// );
///
/// assert_eq!(tags.lookup("HNet"), Some("H-Net Reviews"));
/// assert_eq!(tags.lookup("choice"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    titles: HashMap<String, String>,
}

impl TagMap {
    /// Build the map from primary and fix rows
    pub fn build<P, F, K, V>(primary: P, fixes: F) -> Self
    where
        P: IntoIterator<Item = (K, V)>,
        F: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut titles = HashMap::new();
        // insertion order decides between spaced keys that strip to the same form
        let mut order: Vec<String> = Vec::new();

        let mut primary_count = 0;
        for (tag, title) in primary {
            let (tag, title) = (tag.into(), title.into());
            if let Some(existing) = titles.get(&tag) {
                warn!("Duplicate tag '{}' in primary source; keeping '{}'", tag, existing);
                continue;
            }
            order.push(tag.clone());
            titles.insert(tag, title);
            primary_count += 1;
        }

        let mut fix_count = 0;
        for (tag, title) in fixes {
            let tag = tag.into();
            if titles.contains_key(&tag) {
                continue;
            }
            order.push(tag.clone());
            titles.insert(tag, title.into());
            fix_count += 1;
        }

        let mut derived_count = 0;
        for tag in &order {
            if !tag.contains(' ') {
                continue;
            }
            let stripped = tag.replace(' ', "");
            if stripped.is_empty() || titles.contains_key(&stripped) {
                continue;
            }
            if let Some(title) = titles.get(tag).cloned() {
                titles.insert(stripped, title);
                derived_count += 1;
            }
        }

        info!(
            "Tag map built: {} primary, {} fixes, {} space-stripped",
            primary_count, fix_count, derived_count
        );

        Self { titles }
    }

    /// Canonical title for `tag`, or `None` when the tag is unresolved
    ///
    /// Matching is exact and case-sensitive.
    pub fn lookup(&self, tag: &str) -> Option<&str> {
        self.titles.get(tag).map(String::as_str)
    }

    /// Whether `tag` resolves
    pub fn contains(&self, tag: &str) -> bool {
        self.titles.contains_key(tag)
    }

    /// Number of keys, derived keys included
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the map has no keys
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
