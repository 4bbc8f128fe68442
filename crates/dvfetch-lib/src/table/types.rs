use crate::error::DvFetchError;
use itertools::Itertools;

/// One remote datafile to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    /// Dataverse file identifier
    pub id: String,
    /// Local file stem
    pub name: String,
    /// File extension, the `type` column of the input table
    pub file_type: String,
}

impl DatasetRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file_type: file_type.into(),
        }
    }

    /// Rejects records with an empty `id`, `name` or `type`.
    pub fn validate(&self) -> Result<(), DvFetchError> {
        let empty = [
            ("id", &self.id),
            ("name", &self.name),
            ("type", &self.file_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect::<Vec<_>>();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(DvFetchError::InvalidRecord {
                details: format!(
                    "record {:?} is missing required keys: [{}]",
                    self.id,
                    empty.iter().join(", ")
                ),
            })
        }
    }

    pub fn filename(&self) -> String {
        format!("{}.{}", self.name, self.file_type)
    }
}

/// An already-materialized table: a header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DatasetTable {
    pub fn new<C, S>(columns: C, rows: Vec<Vec<String>>) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = DatasetRecord>) -> Self {
        Self {
            columns: vec!["id".to_string(), "name".to_string(), "type".to_string()],
            rows: records
                .into_iter()
                .map(|record| vec![record.id, record.name, record.file_type])
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Checks the header and converts every row into a [`DatasetRecord`].
    ///
    /// Missing columns are reported before emptiness, so a table with no header
    /// and no rows fails with [`DvFetchError::MissingColumns`].
    pub fn into_records(self) -> Result<Vec<DatasetRecord>, DvFetchError> {
        let missing = super::REQUIRED_COLUMNS
            .iter()
            .filter(|column| self.column_index(column).is_none())
            .map(|column| column.to_string())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(DvFetchError::MissingColumns { missing });
        }

        if self.is_empty() {
            return Err(DvFetchError::EmptyInput);
        }

        // Both lookups succeeded above.
        let [id_idx, name_idx, type_idx] =
            super::REQUIRED_COLUMNS.map(|column| self.column_index(column).unwrap_or_default());

        self.rows
            .into_iter()
            .enumerate()
            .map(|(row_number, row)| {
                let cell = |idx: usize, column: &str| {
                    row.get(idx).cloned().ok_or_else(|| DvFetchError::InvalidRecord {
                        details: format!("row {row_number} has no value for column '{column}'"),
                    })
                };
                let record = DatasetRecord {
                    id: cell(id_idx, "id")?,
                    name: cell(name_idx, "name")?,
                    file_type: cell(type_idx, "type")?,
                };
                record.validate()?;
                Ok(record)
            })
            .collect()
    }
}
