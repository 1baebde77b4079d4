//! CSV export functionality.
//!
//! Writes the kept rows back out with the input's header. The derived
//! normalized domain is internal and never becomes a column.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

use crate::dataset::Dataset;

/// Serializes a dataset (header first) to any writer.
///
/// Absent cells are written as empty fields.
///
/// # Returns
///
/// The number of data rows written.
pub fn write_dataset<W: Write>(
    dataset: &Dataset,
    writer: W,
    delimiter: u8,
) -> Result<usize, csv::Error> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_writer(writer);

    writer.write_record(dataset.headers())?;
    for row in dataset.rows() {
        writer.write_record(row.values().iter().map(|v| v.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(dataset.len())
}

/// Exports a dataset to a CSV file, replacing any existing file.
///
/// # Arguments
///
/// * `dataset` - Rows to write
/// * `output` - Destination file path
/// * `delimiter` - Field delimiter
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub fn export_csv(dataset: &Dataset, output: &Path, delimiter: u8) -> Result<usize> {
    let file = std::fs::File::create(output).context(format!(
        "Failed to create output file: {}",
        output.display()
    ))?;
    let count = write_dataset(dataset, std::io::BufWriter::new(file), delimiter)
        .context(format!("Failed to write CSV to {}", output.display()))?;
    log::info!("Wrote {} rows to {}", count, output.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{parse_dataset, Row};

    #[test]
    fn test_write_dataset_header_and_rows() {
        let dataset = Dataset::from_records(["domain", "company"], [["google.com", "B"]]);
        let mut out = Vec::new();
        let count = write_dataset(&dataset, &mut out, b',').expect("write should succeed");
        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "domain,company\ngoogle.com,B\n"
        );
    }

    #[test]
    fn test_write_dataset_omits_normalized_domain() {
        let row = Row::new(vec![Some("HTTPS://Acme.com/x".into())])
            .with_normalized_domain(Some("acme.com".into()));
        let dataset = Dataset::new(vec!["Website".into()], vec![row]);
        let mut out = Vec::new();
        write_dataset(&dataset, &mut out, b',').expect("write should succeed");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Website\nHTTPS://Acme.com/x\n"
        );
    }

    #[test]
    fn test_write_dataset_absent_cells_and_quoting() {
        let dataset = Dataset::new(
            vec!["domain".into(), "notes".into()],
            vec![Row::new(vec![Some("a.com".into())]), Row::new(vec![
                Some("b.com".into()),
                Some("x, y".into()),
            ])],
        );
        let mut out = Vec::new();
        write_dataset(&dataset, &mut out, b',').expect("write should succeed");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "domain,notes\na.com,\nb.com,\"x, y\"\n"
        );
    }

    #[test]
    fn test_write_then_parse_preserves_values() {
        let input = "Company Website;Name\nhttps://www.acme.com/about;Acme, Inc.\n";
        let dataset = parse_dataset(input.as_bytes(), b';').expect("parse");
        let mut out = Vec::new();
        write_dataset(&dataset, &mut out, b';').expect("write");
        let reparsed = parse_dataset(out.as_slice(), b';').expect("reparse");
        assert_eq!(reparsed, dataset);
    }

    #[test]
    fn test_export_csv_to_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("filtered.csv");
        let dataset = Dataset::from_records(["domain"], [["acme.com"], ["b.org"]]);
        let count = export_csv(&dataset, &path, b',').expect("export");
        assert_eq!(count, 2);
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "domain\nacme.com\nb.org\n");
    }

    #[test]
    fn test_export_csv_bad_path() {
        let dataset = Dataset::from_records(["domain"], [["acme.com"]]);
        let result = export_csv(
            &dataset,
            Path::new("/nonexistent-dir/definitely/filtered.csv"),
            b',',
        );
        assert!(result.is_err());
    }
}
