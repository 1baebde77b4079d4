//! Delimited-text parsing.

use std::io::Read;

use csv::ReaderBuilder;

use super::{Dataset, Row};
use crate::error_handling::FilterError;

/// Parses delimited text with a header row into a [`Dataset`].
///
/// Rows may have fewer or more fields than the header (missing cells become
/// absent values, extra cells are dropped). Values are kept as-is, without
/// trimming or type coercion; a UTF-8 byte order mark is ignored.
///
/// # Errors
///
/// - [`FilterError::Parse`] if the input is not valid delimited UTF-8 text
/// - [`FilterError::EmptyFile`] if there is no header or no data row
pub fn parse_dataset<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, FilterError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FilterError::EmptyFile);
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(Row::new(
            record.iter().map(|field| Some(field.to_string())).collect(),
        ));
    }

    if rows.is_empty() {
        return Err(FilterError::EmptyFile);
    }

    log::debug!(
        "Parsed {} rows with {} columns: {:?}",
        rows.len(),
        headers.len(),
        headers
    );
    Ok(Dataset::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let input = "domain,company\noutlook.com,A\ngoogle.com,B\n";
        let dataset = parse_dataset(input.as_bytes(), b',').expect("should parse");
        assert_eq!(dataset.headers(), &["domain", "company"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1].get(0), Some("google.com"));
        assert_eq!(dataset.rows()[1].get(1), Some("B"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let input = "Website,Notes\n\"https://acme.com\",\"says \"\"hi\"\", twice\"\n";
        let dataset = parse_dataset(input.as_bytes(), b',').expect("should parse");
        assert_eq!(dataset.rows()[0].get(1), Some("says \"hi\", twice"));
    }

    #[test]
    fn test_parse_short_row_has_absent_cells() {
        let input = "name,domain,city\nAda,ada.dev\n";
        let dataset = parse_dataset(input.as_bytes(), b',').expect("should parse");
        assert_eq!(dataset.rows()[0].get(1), Some("ada.dev"));
        assert_eq!(dataset.rows()[0].get(2), None);
    }

    #[test]
    fn test_parse_semicolon_delimiter() {
        let input = "domain;company\nacme.com;Acme\n";
        let dataset = parse_dataset(input.as_bytes(), b';').expect("should parse");
        assert_eq!(dataset.headers(), &["domain", "company"]);
        assert_eq!(dataset.rows()[0].get(1), Some("Acme"));
    }

    #[test]
    fn test_parse_strips_bom() {
        let input = "\u{feff}domain,company\nacme.com,Acme\n";
        let dataset = parse_dataset(input.as_bytes(), b',').expect("should parse");
        assert_eq!(dataset.headers()[0], "domain");
    }

    #[test]
    fn test_parse_empty_file() {
        let result = parse_dataset("".as_bytes(), b',');
        assert!(matches!(result, Err(FilterError::EmptyFile)));
    }

    #[test]
    fn test_parse_header_only() {
        let result = parse_dataset("domain,company\n".as_bytes(), b',');
        assert!(matches!(result, Err(FilterError::EmptyFile)));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let input: &[u8] = b"domain\n\xff\xfe\xfd\n";
        let result = parse_dataset(input, b',');
        assert!(matches!(result, Err(FilterError::Parse(_))));
    }
}
