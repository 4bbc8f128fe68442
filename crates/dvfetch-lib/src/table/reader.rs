use super::types::{DatasetRecord, DatasetTable};
use crate::error::DvFetchError;
use std::path::{Path, PathBuf};

pub const REQUIRED_COLUMNS: [&str; 3] = ["id", "name", "type"];

/// Where the list of datafiles comes from.
#[derive(Debug, Clone)]
pub enum TableSource {
    Table(DatasetTable),
    Path { path: PathBuf, delimiter: char },
}

impl TableSource {
    pub fn path(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self::Path {
            path: path.into(),
            delimiter,
        }
    }

    pub fn load(self) -> Result<Vec<DatasetRecord>, DvFetchError> {
        let table = match self {
            Self::Table(table) => table,
            Self::Path { path, delimiter } => read_delimited(&path, delimiter)?,
        };
        table.into_records()
    }
}

impl From<DatasetTable> for TableSource {
    fn from(table: DatasetTable) -> Self {
        Self::Table(table)
    }
}

fn read_delimited(path: &Path, delimiter: char) -> Result<DatasetTable, DvFetchError> {
    if !path.exists() {
        return Err(DvFetchError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| DvFetchError::InvalidInput {
            reason: format!("separator {delimiter:?} must be a single ASCII character"),
        })?;

    let read_failed = |e: csv::Error| DvFetchError::InvalidInput {
        reason: format!("Failed to read file {}: {}", path.display(), e),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_failed)?;

    let columns = reader
        .headers()
        .map_err(read_failed)?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
                .map_err(read_failed)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        path = %path.display(),
        columns = columns.len(),
        rows = rows.len(),
        "Read input table"
    );

    Ok(DatasetTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, file_name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_comma_separated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "files.csv", "id,name,type\n6180617,test_nodes,tab\n");

        let records = TableSource::path(path, ',').load().unwrap();
        assert_eq!(records, vec![DatasetRecord::new("6180617", "test_nodes", "tab")]);
    }

    #[test]
    fn test_load_tab_separated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "files.tsv",
            "name\tid\ttype\nnodes\t1\ttab\nedges\t2\ttab\n",
        );

        let records = TableSource::path(path, '\t').load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], DatasetRecord::new("2", "edges", "tab"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = TableSource::path("/path/that/does/not/exist.csv", ',').load();

        assert!(matches!(result, Err(DvFetchError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_header_only_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "files.csv", "id,name,type\n");

        let result = TableSource::path(path, ',').load();
        assert!(matches!(result, Err(DvFetchError::EmptyInput)));
    }

    #[test]
    fn test_load_with_wrong_separator_reports_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "files.csv", "id,name,type\n1,a,csv\n");

        let result = TableSource::path(path, '\t').load();
        assert!(matches!(result, Err(DvFetchError::MissingColumns { .. })));
    }

    #[test]
    fn test_load_rejects_non_ascii_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "files.csv", "id,name,type\n1,a,csv\n");

        let result = TableSource::path(path, '§').load();
        assert!(matches!(result, Err(DvFetchError::InvalidInput { .. })));
    }

    #[test]
    fn test_load_short_row_is_invalid_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "files.csv", "id,name,type\n1,a,csv\n2,b\n");

        let result = TableSource::path(path, ',').load();
        match result {
            Err(DvFetchError::InvalidRecord { details }) => {
                assert!(details.contains("row 1"), "unexpected details: {details}");
                assert!(details.contains("'type'"), "unexpected details: {details}");
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_load_long_row_keeps_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "files.csv", "id,name,type\n1,a,csv,extra\n");

        let records = TableSource::path(path, ',').load().unwrap();
        assert_eq!(records, vec![DatasetRecord::new("1", "a", "csv")]);
    }
}
