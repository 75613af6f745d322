use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};

use super::error::DataError;
use super::model::Table;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Only `.csv` is accepted: a header row with column names followed by
/// data rows, comma-delimited.  Column types (numeric vs. text) are
/// inferred from content by [`Table::from_records`].
pub fn load_path(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            load_csv(file)
        }
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
}

/// Parse CSV from any reader.  Strict: every record must have the same
/// number of fields as the header, and a malformed file is an error
/// rather than a silently truncated table.
pub fn load_csv<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let headers: Vec<String> = match reader.headers() {
        Ok(h) if h.is_empty() => return Err(DataError::EmptyFile.into()),
        Ok(h) => h.iter().map(|s| s.to_string()).collect(),
        Err(e) => return Err(DataError::Csv(e)).context("reading CSV header"),
    };

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataError::NoColumns.into());
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(DataError::Csv)
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    Ok(Table::from_records(headers, records))
}

// ---------------------------------------------------------------------------
// Parse cache
// ---------------------------------------------------------------------------

/// Identity of a source file: path plus size and mtime, so an edited
/// file re-parses while unrelated UI interactions never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

impl CacheKey {
    fn for_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).context("reading file metadata")?;
        Ok(CacheKey {
            path: path.to_path_buf(),
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Memoizes parsed tables by file identity.  Unbounded by design: entries
/// live until the process exits or the cache is cleared explicitly.
#[derive(Default)]
pub struct ParseCache {
    entries: HashMap<CacheKey, Arc<Table>>,
}

impl ParseCache {
    /// Load through the cache.  A hit skips parsing entirely.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Table>> {
        let key = CacheKey::for_path(path)?;
        if let Some(table) = self.entries.get(&key) {
            log::debug!("parse cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        log::debug!("parse cache miss for {}", path.display());
        let table = Arc::new(load_path(path)?);
        self.entries.insert(key, Arc::clone(&table));
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// (path, row count) per cached table, for the admin page.
    pub fn summaries(&self) -> Vec<(PathBuf, usize)> {
        let mut out: Vec<(PathBuf, usize)> = self
            .entries
            .iter()
            .map(|(k, t)| (k.path.clone(), t.n_rows))
            .collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnValues;
    use std::io::Write;

    #[test]
    fn parses_simple_csv() {
        let table = load_csv("a,b\n1,10\n2,20\n3,30\n".as_bytes()).unwrap();
        assert_eq!(table.n_rows, 3);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(
            table.numeric_columns(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let table = load_csv("a,b\n".as_bytes()).unwrap();
        assert_eq!(table.n_rows, 0);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_input_is_an_empty_file() {
        let err = load_csv("".as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::EmptyFile)
        ));
    }

    #[test]
    fn blank_header_has_no_columns() {
        let err = load_csv(",,\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::NoColumns)
        ));
    }

    #[test]
    fn ragged_row_is_an_error() {
        let err = load_csv("a,b\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::Csv(_))
        ));
    }

    #[test]
    fn quoted_fields_are_preserved() {
        let table = load_csv("name,note\n\"Doe, John\",\"say \"\"hi\"\"\"\n".as_bytes()).unwrap();
        match &table.column("name").unwrap().values {
            ColumnValues::Text(v) => assert_eq!(v[0], "Doe, John"),
            _ => panic!("expected text column"),
        }
        match &table.column("note").unwrap().values {
            ColumnValues::Text(v) => assert_eq!(v[0], "say \"hi\""),
            _ => panic!("expected text column"),
        }
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = std::env::temp_dir();
        let path = dir.join("csvscope_loader_test.parquet");
        std::fs::write(&path, b"not a table").unwrap();
        let err = load_path(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::UnsupportedExtension(e)) if e == "parquet"
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn cache_returns_same_table_until_file_changes() {
        let dir = std::env::temp_dir();
        let path = dir.join("csvscope_cache_test.csv");
        std::fs::write(&path, "a\n1\n2\n").unwrap();

        let mut cache = ParseCache::default();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        // Rewrite with different content and size: identity changes.
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"a\n1\n2\n3\n").unwrap();
        drop(f);
        let third = cache.load(&path).unwrap();
        assert_eq!(third.n_rows, 3);

        cache.clear();
        assert!(cache.is_empty());
        let _ = std::fs::remove_file(&path);
    }
}
