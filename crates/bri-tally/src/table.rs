//! Count tables
//!
//! A count table has one row per key (book or author) and one column per
//! canonical journal title. Rows and columns are kept in sorted order so
//! that output is stable across runs and across merge order.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Separator between title and author in a book key
pub const BOOK_KEY_SEPARATOR: &str = " || ";

/// Identifies a book by title and author
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookKey {
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
}

impl BookKey {
    /// Create a key
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Recover a key from its `title || author` form
    ///
    /// Splits on the last separator, so a title containing the separator
    /// still yields the right author.
    pub fn parse(key: &str) -> Option<Self> {
        key.rsplit_once(BOOK_KEY_SEPARATOR)
            .map(|(title, author)| Self::new(title, author))
    }
}

impl fmt::Display for BookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.title, BOOK_KEY_SEPARATOR, self.author)
    }
}

impl Serialize for BookKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Journal counts per row key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountTable<K: Ord> {
    rows: BTreeMap<K, BTreeMap<String, usize>>,
}

/// Per-book counts
pub type BookTable = CountTable<BookKey>;

/// Per-author counts
pub type AuthorTable = CountTable<String>;

impl<K: Ord> Default for CountTable<K> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> CountTable<K> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `key` has a row, even if it never gets a count
    pub fn ensure_row(&mut self, key: &K) {
        if !self.rows.contains_key(key) {
            self.rows.insert(key.clone(), BTreeMap::new());
        }
    }

    /// Add `n` to the count for `(key, journal)`
    pub fn add(&mut self, key: &K, journal: &str, n: usize) {
        self.ensure_row(key);
        if let Some(row) = self.rows.get_mut(key) {
            *row.entry(journal.to_string()).or_insert(0) += n;
        }
    }

    /// Increment the count for `(key, journal)`
    pub fn increment(&mut self, key: &K, journal: &str) {
        self.add(key, journal, 1);
    }

    /// Count for `(key, journal)`; zero when either is absent
    pub fn count(&self, key: &K, journal: &str) -> usize {
        self.rows
            .get(key)
            .and_then(|row| row.get(journal))
            .copied()
            .unwrap_or(0)
    }

    /// Counts of one row
    pub fn row(&self, key: &K) -> Option<&BTreeMap<String, usize>> {
        self.rows.get(key)
    }

    /// Rows in key order
    pub fn rows(&self) -> impl Iterator<Item = (&K, &BTreeMap<String, usize>)> {
        self.rows.iter()
    }

    /// Every journal with a count in any row, sorted
    pub fn journals(&self) -> BTreeSet<&str> {
        self.rows
            .values()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect()
    }

    /// Sum of every count in the table
    pub fn total(&self) -> usize {
        self.rows.values().flat_map(|row| row.values()).sum()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add every row and count of `other` into this table
    pub fn merge(&mut self, other: CountTable<K>) {
        for (key, row) in other.rows {
            self.ensure_row(&key);
            for (journal, n) in row {
                self.add(&key, &journal, n);
            }
        }
    }
}

impl CountTable<BookKey> {
    /// Regroup book rows by author, summing counts per journal
    ///
    /// Authors whose books have no resolved reviews still get a row.
    pub fn to_author_table(&self) -> AuthorTable {
        let mut authors = AuthorTable::new();
        for (book, row) in &self.rows {
            authors.ensure_row(&book.author);
            for (journal, n) in row {
                authors.add(&book.author, journal, *n);
            }
        }
        authors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_key_round_trip() {
        let key = BookKey::new("Rivers", "Smith, J");
        assert_eq!(key.to_string(), "Rivers || Smith, J");
        assert_eq!(BookKey::parse("Rivers || Smith, J"), Some(key));
    }

    #[test]
    fn test_book_key_parse_uses_last_separator() {
        let key = BookKey::parse("This || That || Smith, J").unwrap();
        assert_eq!(key.title, "This || That");
        assert_eq!(key.author, "Smith, J");
        assert_eq!(BookKey::parse("no separator"), None);
    }

    #[test]
    fn test_increment_and_count() {
        let mut books = BookTable::new();
        let key = BookKey::new("Rivers", "Smith, J");
        books.increment(&key, "Choice Magazine");
        books.increment(&key, "Choice Magazine");

        assert_eq!(books.count(&key, "Choice Magazine"), 2);
        assert_eq!(books.count(&key, "Library Journal"), 0);
        assert_eq!(books.total(), 2);
    }

    #[test]
    fn test_empty_rows_are_kept() {
        let mut books = BookTable::new();
        books.ensure_row(&BookKey::new("Rivers", "Smith, J"));
        assert_eq!(books.len(), 1);
        assert!(books.journals().is_empty());
        assert_eq!(books.to_author_table().len(), 1);
    }

    #[test]
    fn test_author_table_sums_books() {
        let mut books = BookTable::new();
        let rivers = BookKey::new("Rivers", "Smith, J");
        let hills = BookKey::new("Hills", "Smith, J");
        let salt = BookKey::new("Salt", "Jones, K");
        books.add(&rivers, "Choice Magazine", 2);
        books.add(&hills, "Choice Magazine", 1);
        books.add(&hills, "Library Journal", 4);
        books.add(&salt, "Library Journal", 1);

        let authors = books.to_author_table();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors.count(&"Smith, J".to_string(), "Choice Magazine"), 3);
        assert_eq!(authors.count(&"Smith, J".to_string(), "Library Journal"), 4);
        assert_eq!(authors.count(&"Jones, K".to_string(), "Library Journal"), 1);
    }

    #[test]
    fn test_merge_sums_counts() {
        let key = BookKey::new("Rivers", "Smith, J");
        let mut left = BookTable::new();
        left.increment(&key, "Choice Magazine");
        let mut right = BookTable::new();
        right.increment(&key, "Choice Magazine");
        right.ensure_row(&BookKey::new("Hills", "Jones, K"));

        left.merge(right);
        assert_eq!(left.count(&key, "Choice Magazine"), 2);
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn test_journals_are_sorted_union() {
        let mut books = BookTable::new();
        books.increment(&BookKey::new("B", "x"), "Library Journal");
        books.increment(&BookKey::new("A", "y"), "Booklist");
        let journals: Vec<&str> = books.journals().into_iter().collect();
        assert_eq!(journals, vec!["Booklist", "Library Journal"]);
    }

    #[test]
    fn test_serializes_with_string_keys() {
        let mut books = BookTable::new();
        books.increment(&BookKey::new("Rivers", "Smith, J"), "Booklist");
        let json = serde_json::to_string(&books).unwrap();
        assert_eq!(json, r#"{"Rivers || Smith, J":{"Booklist":1}}"#);
    }
}
