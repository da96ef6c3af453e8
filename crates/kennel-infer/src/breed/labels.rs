use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug)]
pub enum LabelError {
    Io(String),
    Parse { line: usize, msg: String },
    DuplicateIndex(usize),
    MissingIndex(usize),
    Empty,
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::Io(msg) => write!(f, "label source error: {msg}"),
            LabelError::Parse { line, msg } => {
                write!(f, "label parse error at line {line}: {msg}")
            }
            LabelError::DuplicateIndex(index) => write!(f, "duplicate label index {index}"),
            LabelError::MissingIndex(index) => {
                write!(f, "missing label index {index}, table is not contiguous")
            }
            LabelError::Empty => write!(f, "label table is empty"),
            LabelError::IndexOutOfRange { index, len } => {
                write!(f, "label index {index} out of range for table of {len}")
            }
        }
    }
}

impl std::error::Error for LabelError {}

/// Ordered class-name table, index 0..N-1.
///
/// Index assignment is fixed at load time and must match the index
/// convention the model was trained with; the contiguity checks below are
/// the only defense against a silent mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Load a table from a CSV-like file with `id,breed` rows.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| LabelError::Io(format!("{}: {e}", path.display())))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse `id,breed` rows. An `id,breed` header on the first line is
    /// tolerated. Rows may arrive in any order; ids must form exactly
    /// 0..N-1 once sorted.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LabelError> {
        let mut rows: BTreeMap<usize, String> = BTreeMap::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| LabelError::Io(e.to_string()))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (id, breed) = line.split_once(',').ok_or_else(|| LabelError::Parse {
                line: lineno + 1,
                msg: "expected 'id,breed'".to_string(),
            })?;
            let id = id.trim();
            let breed = breed.trim();

            if lineno == 0 && id.eq_ignore_ascii_case("id") {
                continue; // header
            }

            let index: usize = id.parse().map_err(|_| LabelError::Parse {
                line: lineno + 1,
                msg: format!("invalid index '{id}'"),
            })?;
            if breed.is_empty() {
                return Err(LabelError::Parse {
                    line: lineno + 1,
                    msg: "empty breed name".to_string(),
                });
            }

            if rows.insert(index, breed.to_string()).is_some() {
                return Err(LabelError::DuplicateIndex(index));
            }
        }

        if rows.is_empty() {
            return Err(LabelError::Empty);
        }

        let mut labels = Vec::with_capacity(rows.len());
        for (expect, (index, breed)) in rows.into_iter().enumerate() {
            if index != expect {
                return Err(LabelError::MissingIndex(expect));
            }
            labels.push(breed);
        }

        Ok(Self { labels })
    }

    /// Build a table directly from an ordered name list.
    pub fn from_names(names: Vec<String>) -> Result<Self, LabelError> {
        if names.is_empty() {
            return Err(LabelError::Empty);
        }
        Ok(Self { labels: names })
    }

    pub fn resolve(&self, index: usize) -> Result<&str, LabelError> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(LabelError::IndexOutOfRange {
                index,
                len: self.labels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
