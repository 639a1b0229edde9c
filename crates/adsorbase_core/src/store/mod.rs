//! Hierarchical store engine adapter.
//!
//! # Responsibility
//! - Provide the group/attribute/dataset container the mapping layer needs:
//!   named nodes with child nodes, scalar attributes, and numeric array
//!   datasets, addressable by absolute path.
//! - Keep SQLite details inside this module boundary.
//!
//! # Invariants
//! - Sibling node names are unique; `require_group` is idempotent.
//! - Dataset upsert fully replaces previous content, shape included.
//! - Schema version is mirrored to `PRAGMA user_version`.

use ndarray::{Array1, Array2};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod group;
pub mod migrations;
mod open;

pub use group::Group;
pub use open::{AccessMode, Store};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the store engine adapter.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite transport error.
    Sqlite(rusqlite::Error),
    /// Store file schema is newer than this binary supports.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Read-only open of a file that was never initialized as a store.
    UninitializedStore,
    /// Array value has no rectangular primitive representation.
    UnsupportedDatasetType(String),
    /// Persisted bytes cannot be converted back into a valid value.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedStore => {
                write!(f, "store file holds no initialized schema")
            }
            Self::UnsupportedDatasetType(message) => {
                write!(f, "unsupported dataset type: {message}")
            }
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Scalar attribute value attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Real(f64),
    Int(i64),
    /// Ordered list of strings; order is preserved on read.
    TextList(Vec<String>),
}

/// Numeric array dataset attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetValue {
    OneD(Array1<f64>),
    TwoD(Array2<f64>),
}

impl DatasetValue {
    /// Builds a 2D dataset from rows, rejecting jagged input.
    ///
    /// A jagged array has no rectangular primitive representation, so it is
    /// refused before anything is written.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> StoreResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(StoreError::UnsupportedDatasetType(format!(
                    "jagged array: row {index} has {} values, row 0 has {cols}",
                    row.len()
                )));
            }
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let nrows = if cols == 0 { 0 } else { flat.len() / cols };
        let array = Array2::from_shape_vec((nrows, cols), flat)
            .map_err(|err| StoreError::InvalidData(err.to_string()))?;
        Ok(Self::TwoD(array))
    }

    /// Returns the dataset shape as `[len]` or `[rows, cols]`.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::OneD(array) => vec![array.len()],
            Self::TwoD(array) => array.shape().to_vec(),
        }
    }
}

pub(crate) fn encode_values(values: impl Iterator<Item = f64>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

pub(crate) fn decode_values(bytes: &[u8]) -> StoreResult<Vec<f64>> {
    if bytes.len() % 8 != 0 {
        return Err(StoreError::InvalidData(format!(
            "dataset blob length {} is not a multiple of 8",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{decode_values, encode_values, DatasetValue, StoreError};

    #[test]
    fn from_rows_rejects_jagged_input() {
        let err =
            DatasetValue::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedDatasetType(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn from_rows_accepts_rectangular_input() {
        let dataset =
            DatasetValue::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(dataset.shape(), vec![2, 2]);
    }

    #[test]
    fn value_blob_codec_round_trips() {
        let values = vec![0.0, -1.5, f64::MAX];
        let decoded = decode_values(&encode_values(values.iter().copied())).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn decode_rejects_truncated_blob() {
        assert!(matches!(
            decode_values(&[0u8; 9]),
            Err(StoreError::InvalidData(_))
        ));
    }
}
