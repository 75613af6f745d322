// ---------------------------------------------------------------------------
// Column – one named column of the table
// ---------------------------------------------------------------------------

/// Cell storage for a single column.
///
/// Classification is column-level: a column is numeric iff it has at least
/// one non-missing cell and every non-missing cell parses as a finite f64.
/// Missing numeric cells (empty fields in the source) are kept as `None`;
/// statistics skip them and range filters never match them.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        matches!(self.values, ColumnValues::Numeric(_))
    }

    /// Cell rendered as text, for the preview table and CSV export.
    /// Floats use Rust's shortest round-trip formatting so that an
    /// exported file re-parses to the same values.
    pub fn cell_text(&self, row: usize) -> String {
        match &self.values {
            ColumnValues::Numeric(v) => match v.get(row).copied().flatten() {
                Some(x) => format!("{x}"),
                None => String::new(),
            },
            ColumnValues::Text(v) => v.get(row).cloned().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric grammar
// ---------------------------------------------------------------------------

/// A field is missing when it is empty after trimming.
pub fn is_missing(field: &str) -> bool {
    field.trim().is_empty()
}

/// Parse a field under the declared numeric grammar: whatever
/// `str::parse::<f64>` accepts, restricted to finite results.
/// `NaN` / `inf` tokens are treated as text, not numbers.
pub fn parse_numeric(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Table – the complete parsed dataset
// ---------------------------------------------------------------------------

/// An immutable table of equally long named columns. Derived artifacts
/// (filtered row sets, exports) are built from it, never written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub n_rows: usize,
}

impl Table {
    /// Build a typed table from raw string records, classifying each
    /// column as numeric or text from its content.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let n_rows = records.len();
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(col_idx, name)| {
                let raw: Vec<&str> = records
                    .iter()
                    .map(|r| r.get(col_idx).map(String::as_str).unwrap_or(""))
                    .collect();
                Column {
                    name,
                    values: classify_column(&raw),
                }
            })
            .collect();

        Table { columns, n_rows }
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }

    /// The values of a numeric column, or `None` for unknown / text columns.
    pub fn numeric_column(&self, name: &str) -> Option<&[Option<f64>]> {
        match &self.column(name)?.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Text(_) => None,
        }
    }
}

fn classify_column(raw: &[&str]) -> ColumnValues {
    let mut saw_value = false;
    let numeric = raw.iter().all(|field| {
        if is_missing(field) {
            true
        } else {
            saw_value = true;
            parse_numeric(field).is_some()
        }
    });

    if numeric && saw_value {
        ColumnValues::Numeric(
            raw.iter()
                .map(|field| {
                    if is_missing(field) {
                        None
                    } else {
                        parse_numeric(field)
                    }
                })
                .collect(),
        )
    } else {
        ColumnValues::Text(raw.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_records(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn classifies_numeric_and_text_columns() {
        let t = table(
            &["a", "name"],
            &[&["1", "Alice"], &["2.5", "Bob"], &["-3e2", "Carol"]],
        );
        assert_eq!(t.numeric_columns(), vec!["a".to_string()]);
        assert_eq!(
            t.numeric_column("a").unwrap(),
            &[Some(1.0), Some(2.5), Some(-300.0)]
        );
        assert!(t.numeric_column("name").is_none());
    }

    #[test]
    fn missing_cells_stay_numeric() {
        let t = table(&["v"], &[&["1"], &[""], &["  "], &["4"]]);
        assert_eq!(
            t.numeric_column("v").unwrap(),
            &[Some(1.0), None, None, Some(4.0)]
        );
    }

    #[test]
    fn all_missing_column_is_text() {
        let t = table(&["v"], &[&[""], &[""]]);
        assert!(t.numeric_column("v").is_none());
    }

    #[test]
    fn nan_and_inf_tokens_are_text() {
        let t = table(&["v"], &[&["1"], &["NaN"]]);
        assert!(t.numeric_column("v").is_none());
        let t = table(&["v"], &[&["1"], &["inf"]]);
        assert!(t.numeric_column("v").is_none());
    }

    #[test]
    fn cell_text_round_trips_floats() {
        let t = table(&["v"], &[&["1"], &["2.5"], &[""]]);
        let col = t.column("v").unwrap();
        assert_eq!(col.cell_text(0), "1");
        assert_eq!(col.cell_text(1), "2.5");
        assert_eq!(col.cell_text(2), "");
    }

    #[test]
    fn zero_numeric_columns() {
        let t = table(&["name", "city"], &[&["Alice", "NY"]]);
        assert!(t.numeric_columns().is_empty());
        assert_eq!(t.n_rows, 1);
    }
}
