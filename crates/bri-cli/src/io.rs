//! Tabular file input and output.
//!
//! Raw rows are comma-separated unless the file ends in `.tsv`; tag sources
//! and every output table are tab-separated.

use crate::error::{CliError, Result};
use bri_domain::{FieldTag, ReviewFields};
use bri_tally::{AuthorTable, BookTable, RawRow, TagRow};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Read a text file, decoding it as UTF-8 or Latin-1.
pub fn read_text(path: &Path, latin1: bool) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    decode(bytes, latin1)
}

/// Decode raw bytes; Latin-1 maps every byte to the code point of the same value.
pub fn decode(bytes: Vec<u8>, latin1: bool) -> Result<String> {
    if latin1 {
        return Ok(bytes.into_iter().map(char::from).collect());
    }
    String::from_utf8(bytes)
        .map_err(|e| CliError::InvalidInput(format!("Input is not valid UTF-8 ({}); try --latin1", e)))
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Read raw index rows from a file.
pub fn read_rows(path: &Path, latin1: bool) -> Result<Vec<RawRow>> {
    let text = read_text(path, latin1)?;
    parse_rows(&text, delimiter_for(path))
}

/// Parse raw index rows with a header line naming Author, Title and Review.
pub fn parse_rows(text: &str, delimiter: u8) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Read `(tag, title)` pairs from a tab-separated tag source.
pub fn read_tag_rows(path: &Path) -> Result<Vec<(String, String)>> {
    let text = read_text(path, false)?;
    parse_tag_rows(&text)
}

/// Parse a tag source with `tag` and `title` header columns.
pub fn parse_tag_rows(text: &str) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut pairs = Vec::new();
    for (index, record) in reader.deserialize::<TagRow>().enumerate() {
        pairs.push(record?.into_pair(index)?);
    }
    Ok(pairs)
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer)
}

fn count_cells(row: &BTreeMap<String, usize>, journals: &[&str]) -> Vec<String> {
    journals
        .iter()
        .map(|journal| row.get(*journal).copied().unwrap_or(0).to_string())
        .collect()
}

/// Write the book table: key column, one column per journal, then `author_name`.
pub fn write_books<W: Write>(writer: W, books: &BookTable) -> Result<()> {
    let journals: Vec<&str> = books.journals().into_iter().collect();
    let mut out = tsv_writer(writer);

    let mut header = vec!["book"];
    header.extend(journals.iter().copied());
    header.push("author_name");
    out.write_record(&header)?;

    for (key, row) in books.rows() {
        let mut record = vec![key.to_string()];
        record.extend(count_cells(row, &journals));
        record.push(key.author.clone());
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the author table: `author_name`, then one column per journal.
pub fn write_authors<W: Write>(writer: W, authors: &AuthorTable) -> Result<()> {
    let journals: Vec<&str> = authors.journals().into_iter().collect();
    let mut out = tsv_writer(writer);

    let mut header = vec!["author_name"];
    header.extend(journals.iter().copied());
    out.write_record(&header)?;

    for (author, row) in authors.rows() {
        let mut record = vec![author.clone()];
        record.extend(count_cells(row, &journals));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

/// One parsed review of one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// Book author
    pub author: String,
    /// Book title
    pub title: String,
    /// Parsed review fields
    pub fields: ReviewFields,
}

/// Write field records with columns `author, title, J, V, M, D, Y, P, L`.
pub fn write_fields<W: Write>(writer: W, records: &[FieldRecord]) -> Result<()> {
    let mut out = tsv_writer(writer);

    let mut header = vec!["author".to_string(), "title".to_string()];
    header.extend(FieldTag::REVIEW_FIELDS.iter().map(|tag| tag.code().to_string()));
    out.write_record(&header)?;

    for record in records {
        let mut cells = vec![record.author.as_str(), record.title.as_str()];
        cells.extend(
            FieldTag::REVIEW_FIELDS
                .iter()
                .map(|tag| record.fields.get(*tag).unwrap_or("")),
        );
        out.write_record(&cells)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri_tally::BookKey;

    #[test]
    fn test_latin1_decoding() {
        let decoded = decode(vec![b'C', 0xE9, b'l', b'i', b'n', b'e'], true).unwrap();
        assert_eq!(decoded, "Céline");
    }

    #[test]
    fn test_invalid_utf8_suggests_latin1() {
        let result = decode(vec![b'C', 0xE9], false);
        assert!(matches!(result, Err(CliError::InvalidInput(msg)) if msg.contains("--latin1")));
    }

    #[test]
    fn test_delimiter_by_extension() {
        assert_eq!(delimiter_for(Path::new("rows.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("rows.TSV")), b'\t');
        assert_eq!(delimiter_for(Path::new("rows.csv")), b',');
    }

    #[test]
    fn test_parse_rows_with_quoted_review() {
        let text = "Author,Title,Review,Volume\n\
                    \"Smith, J\",Rivers,\"Choice - v35 - p690 - LJ - p4\",1\n\
                    \"Jones, K\",,LJ - p9,2\n";
        let rows = parse_rows(text, b',').unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].author.as_deref(), Some("Smith, J"));
        assert_eq!(rows[0].review.as_deref(), Some("Choice - v35 - p690 - LJ - p4"));
        assert!(rows[1].title.is_none());
    }

    #[test]
    fn test_parse_tag_rows() {
        let text = "tag\ttitle\nChoice\tChoice\nH Net\tH-Net Reviews\n";
        let pairs = parse_tag_rows(text).unwrap();
        assert_eq!(pairs[1], ("H Net".to_string(), "H-Net Reviews".to_string()));
    }

    #[test]
    fn test_parse_tag_rows_rejects_missing_title() {
        let text = "tag\ttitle\nChoice\t\n";
        assert!(matches!(parse_tag_rows(text), Err(CliError::Tally(_))));
    }

    #[test]
    fn test_write_books_and_authors() {
        let mut books = BookTable::new();
        books.add(&BookKey::new("Rivers", "Smith, J"), "Choice", 2);
        books.add(&BookKey::new("Hills", "Smith, J"), "Booklist", 1);

        let mut out = Vec::new();
        write_books(&mut out, &books).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "book\tBooklist\tChoice\tauthor_name");
        assert_eq!(lines[1], "Hills || Smith, J\t1\t0\tSmith, J");
        assert_eq!(lines[2], "Rivers || Smith, J\t0\t2\tSmith, J");

        let mut out = Vec::new();
        write_authors(&mut out, &books.to_author_table()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1), Some("Smith, J\t1\t2"));
    }

    #[test]
    fn test_write_fields() {
        let mut fields = ReviewFields::journal_only("Choice");
        fields.page = Some("p690".into());
        let records = vec![FieldRecord {
            author: "Smith, J".into(),
            title: "Rivers".into(),
            fields,
        }];

        let mut out = Vec::new();
        write_fields(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "author\ttitle\tJ\tV\tM\tD\tY\tP\tL");
        assert_eq!(lines[1], "Smith, J\tRivers\tChoice\t\t\t\t\tp690\t");
    }
}
