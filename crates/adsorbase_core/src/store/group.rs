//! Group handles: tree navigation, attributes, datasets.
//!
//! # Responsibility
//! - Expose node-level operations against an open store: child lookup and
//!   creation, attribute and dataset read/write, path resolution.
//!
//! # Invariants
//! - `require_group` is get-or-create and idempotent.
//! - `child_names` enumerates in the store's native order (lexicographic);
//!   insertion order is not preserved across open/close cycles.
//! - `upsert_dataset` replaces the whole dataset row; a shrunk dataset
//!   keeps no trailing values from a previous write.

use crate::store::open::Store;
use crate::store::{
    decode_values, encode_values, AttrValue, DatasetValue, StoreError, StoreResult,
};
use ndarray::{Array1, Array2};
use rusqlite::{params, OptionalExtension};

pub(crate) const ROOT_NODE_ID: i64 = 1;

/// Handle to one node in the store tree.
///
/// Cheap to copy; borrows the store it came from.
#[derive(Clone, Copy)]
pub struct Group<'s> {
    store: &'s Store,
    id: i64,
}

impl<'s> Group<'s> {
    pub(crate) fn new(store: &'s Store, id: i64) -> Self {
        Self { store, id }
    }

    /// Returns the absolute path of this node, `/` for the root.
    pub fn name(&self) -> StoreResult<String> {
        let mut segments = Vec::new();
        let mut current = self.id;
        while current != ROOT_NODE_ID {
            let (parent, name): (Option<i64>, String) = self.store.conn().query_row(
                "SELECT parent_id, name FROM nodes WHERE id = ?1;",
                [current],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            segments.push(name);
            current = parent.ok_or_else(|| {
                StoreError::InvalidData(format!("node {current} is detached from the root"))
            })?;
        }
        segments.reverse();
        Ok(format!("/{}", segments.join("/")))
    }

    /// Returns the parent node, or `None` for the root.
    pub fn parent(&self) -> StoreResult<Option<Group<'s>>> {
        let parent: Option<i64> = self.store.conn().query_row(
            "SELECT parent_id FROM nodes WHERE id = ?1;",
            [self.id],
            |row| row.get(0),
        )?;
        Ok(parent.map(|id| Group::new(self.store, id)))
    }

    /// Walks parent links upward until no parent exists.
    pub fn root(&self) -> StoreResult<Group<'s>> {
        let mut current = *self;
        while let Some(parent) = current.parent()? {
            current = parent;
        }
        Ok(current)
    }

    /// Looks up a direct child by name.
    pub fn child(&self, name: &str) -> StoreResult<Option<Group<'s>>> {
        let id: Option<i64> = self
            .store
            .conn()
            .query_row(
                "SELECT id FROM nodes WHERE parent_id = ?1 AND name = ?2;",
                params![self.id, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(|id| Group::new(self.store, id)))
    }

    /// Gets or creates a direct child by name.
    pub fn require_group(&self, name: &str) -> StoreResult<Group<'s>> {
        if let Some(child) = self.child(name)? {
            return Ok(child);
        }
        self.store.conn().execute(
            "INSERT INTO nodes (parent_id, name) VALUES (?1, ?2);",
            params![self.id, name],
        )?;
        let id = self.store.conn().last_insert_rowid();
        Ok(Group::new(self.store, id))
    }

    /// Lists direct child names in the store's native enumeration order.
    pub fn child_names(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .store
            .conn()
            .prepare("SELECT name FROM nodes WHERE parent_id = ?1 ORDER BY name ASC;")?;
        let mut rows = stmt.query([self.id])?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            names.push(row.get(0)?);
        }
        Ok(names)
    }

    /// Removes a direct child and its whole subtree.
    ///
    /// Returns whether a child with that name existed. References pointing
    /// at removed nodes become dangling; dereferencing them later resolves
    /// to nothing rather than failing.
    pub fn remove_child(&self, name: &str) -> StoreResult<bool> {
        let changed = self.store.conn().execute(
            "DELETE FROM nodes WHERE parent_id = ?1 AND name = ?2;",
            params![self.id, name],
        )?;
        Ok(changed > 0)
    }

    /// Resolves a path to a node: absolute paths start from the store root,
    /// relative paths from this node. A missing segment yields `None`.
    pub fn resolve(&self, path: &str) -> StoreResult<Option<Group<'s>>> {
        let mut current = if path.starts_with('/') {
            self.root()?
        } else {
            *self
        };
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            match current.child(segment)? {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Writes a named attribute, overwriting any previous value.
    pub fn set_attr(&self, name: &str, value: &AttrValue) -> StoreResult<()> {
        let (kind, text, real, int): (&str, Option<String>, Option<f64>, Option<i64>) =
            match value {
                AttrValue::Text(text) => ("text", Some(text.clone()), None, None),
                AttrValue::Real(real) => ("real", None, Some(*real), None),
                AttrValue::Int(int) => ("int", None, None, Some(*int)),
                AttrValue::TextList(list) => {
                    let encoded = serde_json::to_string(list).map_err(|err| {
                        StoreError::InvalidData(format!("attribute `{name}`: {err}"))
                    })?;
                    ("text_list", Some(encoded), None, None)
                }
            };
        self.store.conn().execute(
            "INSERT OR REPLACE INTO node_attrs
                (node_id, name, kind, text_value, real_value, int_value)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![self.id, name, kind, text, real, int],
        )?;
        Ok(())
    }

    /// Reads a named attribute, `None` when absent.
    pub fn attr(&self, name: &str) -> StoreResult<Option<AttrValue>> {
        let row: Option<(String, Option<String>, Option<f64>, Option<i64>)> = self
            .store
            .conn()
            .query_row(
                "SELECT kind, text_value, real_value, int_value
                 FROM node_attrs WHERE node_id = ?1 AND name = ?2;",
                params![self.id, name],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        let Some((kind, text, real, int)) = row else {
            return Ok(None);
        };

        let value = match kind.as_str() {
            "text" => AttrValue::Text(text.ok_or_else(|| missing_column(name, "text_value"))?),
            "real" => AttrValue::Real(real.ok_or_else(|| missing_column(name, "real_value"))?),
            "int" => AttrValue::Int(int.ok_or_else(|| missing_column(name, "int_value"))?),
            "text_list" => {
                let encoded = text.ok_or_else(|| missing_column(name, "text_value"))?;
                let list: Vec<String> = serde_json::from_str(&encoded).map_err(|err| {
                    StoreError::InvalidData(format!("attribute `{name}`: {err}"))
                })?;
                AttrValue::TextList(list)
            }
            other => {
                return Err(StoreError::InvalidData(format!(
                    "attribute `{name}` has unknown kind `{other}`"
                )))
            }
        };
        Ok(Some(value))
    }

    /// Removes a named attribute. Returns whether it existed.
    pub fn remove_attr(&self, name: &str) -> StoreResult<bool> {
        let changed = self.store.conn().execute(
            "DELETE FROM node_attrs WHERE node_id = ?1 AND name = ?2;",
            params![self.id, name],
        )?;
        Ok(changed > 0)
    }

    /// Writes a named dataset, fully replacing any previous one.
    pub fn upsert_dataset(&self, name: &str, value: &DatasetValue) -> StoreResult<()> {
        let (ndim, dim0, dim1, data): (i64, i64, i64, Vec<u8>) = match value {
            DatasetValue::OneD(array) => (
                1,
                array.len() as i64,
                0,
                encode_values(array.iter().copied()),
            ),
            DatasetValue::TwoD(array) => {
                let (rows, cols) = array.dim();
                (
                    2,
                    rows as i64,
                    cols as i64,
                    encode_values(array.iter().copied()),
                )
            }
        };
        self.store.conn().execute(
            "INSERT OR REPLACE INTO node_datasets
                (node_id, name, ndim, dim0, dim1, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![self.id, name, ndim, dim0, dim1, data],
        )?;
        Ok(())
    }

    /// Removes a named dataset. Returns whether it existed.
    pub fn remove_dataset(&self, name: &str) -> StoreResult<bool> {
        let changed = self.store.conn().execute(
            "DELETE FROM node_datasets WHERE node_id = ?1 AND name = ?2;",
            params![self.id, name],
        )?;
        Ok(changed > 0)
    }

    /// Reads a named dataset, `None` when absent.
    pub fn dataset(&self, name: &str) -> StoreResult<Option<DatasetValue>> {
        let row: Option<(i64, i64, i64, Vec<u8>)> = self
            .store
            .conn()
            .query_row(
                "SELECT ndim, dim0, dim1, data
                 FROM node_datasets WHERE node_id = ?1 AND name = ?2;",
                params![self.id, name],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        let Some((ndim, dim0, dim1, data)) = row else {
            return Ok(None);
        };

        let values = decode_values(&data)?;
        let value = match ndim {
            1 => {
                if values.len() != dim0 as usize {
                    return Err(bad_shape(name, values.len(), &[dim0 as usize]));
                }
                DatasetValue::OneD(Array1::from_vec(values))
            }
            2 => {
                let shape = (dim0 as usize, dim1 as usize);
                if values.len() != shape.0 * shape.1 {
                    return Err(bad_shape(name, values.len(), &[shape.0, shape.1]));
                }
                let array = Array2::from_shape_vec(shape, values)
                    .map_err(|err| StoreError::InvalidData(err.to_string()))?;
                DatasetValue::TwoD(array)
            }
            other => {
                return Err(StoreError::InvalidData(format!(
                    "dataset `{name}` has unsupported rank {other}"
                )))
            }
        };
        Ok(Some(value))
    }
}

fn missing_column(attr: &str, column: &str) -> StoreError {
    StoreError::InvalidData(format!("attribute `{attr}` is missing its `{column}`"))
}

fn bad_shape(dataset: &str, values: usize, shape: &[usize]) -> StoreError {
    StoreError::InvalidData(format!(
        "dataset `{dataset}` holds {values} values but declares shape {shape:?}"
    ))
}
