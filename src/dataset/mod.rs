//! In-memory tabular data.
//!
//! A [`Dataset`] is a header plus rows whose values line up with it. Rows
//! carry a derived `normalized_domain` that is never exported.

mod parse;

pub use parse::parse_dataset;

/// One record of the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    values: Vec<Option<String>>,
    normalized_domain: Option<String>,
}

impl Row {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self {
            values,
            normalized_domain: None,
        }
    }

    /// Value at column position `index`, `None` when the cell is absent.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn normalized_domain(&self) -> Option<&str> {
        self.normalized_domain.as_deref()
    }

    /// Returns a copy of this row with the derived domain attached.
    pub fn with_normalized_domain(self, domain: Option<String>) -> Self {
        Self {
            values: self.values,
            normalized_domain: domain,
        }
    }
}

/// An ordered set of rows sharing one header.
///
/// Every row holds exactly `headers().len()` values: shorter rows are padded
/// with absent values and longer rows are truncated when the dataset is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                if row.values.len() == width {
                    return row;
                }
                if row.values.len() > width {
                    log::warn!(
                        "Row {} has {} fields but the header has {}; extra fields dropped",
                        index + 1,
                        row.values.len(),
                        width
                    );
                }
                let mut values = row.values;
                values.resize(width, None);
                Row {
                    values,
                    normalized_domain: row.normalized_domain,
                }
            })
            .collect();
        Self { headers, rows }
    }

    /// Builds a dataset from string cells, treating every cell as present.
    pub fn from_records<H, R, V>(headers: H, records: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let headers = headers.into_iter().map(Into::into).collect();
        let rows = records
            .into_iter()
            .map(|record| Row::new(record.into_iter().map(|v| Some(v.into())).collect()))
            .collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.headers, self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column` in the header (exact match).
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Value of `column` in `row`, `None` when the column or the cell is absent.
    pub fn value<'a>(&self, row: &'a Row, column: &str) -> Option<&'a str> {
        self.column_index(column).and_then(|index| row.get(index))
    }
}
