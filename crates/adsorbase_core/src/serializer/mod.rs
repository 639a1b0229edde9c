//! Record serialization against store groups.
//!
//! # Responsibility
//! - Classify record fields through static descriptor tables (scalar
//!   attribute, array dataset, reference, reference list).
//! - Provide the generic dump/load protocol shared by every record type.
//!
//! # Invariants
//! - Unset optional fields are skipped on dump and cleared from the node,
//!   so re-registration leaves no stale values.
//! - A missing required attribute or dataset surfaces as a construction
//!   error; it is never papered over with defaults.
//! - Enum values travel as their storage strings.

use crate::model::isotherm::IsothermValidationError;
use crate::store::{AttrValue, DatasetValue, Group, StoreError};
use ndarray::{Array1, Array2};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub mod experiment;
pub mod isotherms;
pub mod records;
pub mod reference;

pub use experiment::ExperimentSerializer;
pub use isotherms::{MixIsothermSerializer, MonoIsothermSerializer};

pub type SerializerResult<T> = Result<T, SerializerError>;

/// Errors from record dump/load operations.
#[derive(Debug)]
pub enum SerializerError {
    /// Underlying store engine error.
    Store(StoreError),
    /// Required attribute was never written.
    MissingAttribute {
        record: &'static str,
        name: &'static str,
    },
    /// Required dataset was never written.
    MissingDataset {
        record: &'static str,
        name: &'static str,
    },
    /// Attribute exists but cannot be converted to the declared field.
    InvalidAttribute {
        record: &'static str,
        name: &'static str,
        message: String,
    },
    /// Stored fields assemble into a record violating model invariants.
    InvalidRecord {
        record: &'static str,
        source: IsothermValidationError,
    },
}

impl Display for SerializerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::MissingAttribute { record, name } => {
                write!(f, "{record}: required attribute `{name}` is missing")
            }
            Self::MissingDataset { record, name } => {
                write!(f, "{record}: required dataset `{name}` is missing")
            }
            Self::InvalidAttribute {
                record,
                name,
                message,
            } => write!(f, "{record}: attribute `{name}`: {message}"),
            Self::InvalidRecord { record, source } => write!(f, "{record}: {source}"),
        }
    }
}

impl Error for SerializerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for SerializerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Storage classification of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Named scalar attribute on the record's node.
    Attribute,
    /// Named numeric array dataset on the record's node.
    Dataset,
    /// Route attribute pointing at one shared record in `collection`.
    Reference { collection: &'static str },
    /// Route-list attribute pointing at shared records in `collection`,
    /// order preserved.
    ReferenceList { collection: &'static str },
}

/// One entry of a record type's static field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A record type that maps onto one store node.
///
/// The descriptor table replaces the original's runtime field reflection:
/// it is built once per type and drives both dump and load identically.
pub trait StoredRecord: Sized {
    /// Record name used in error messages.
    fn record_name() -> &'static str;

    /// Static field table for this record type.
    fn descriptors() -> &'static [FieldDescriptor];

    /// Current value of an attribute field, `None` when the field is unset.
    fn attribute(&self, name: &str) -> Option<AttrValue>;

    /// Current value of a dataset field, `None` when the field is unset.
    fn dataset(&self, _name: &str) -> Option<DatasetValue> {
        None
    }

    /// Names of the records a reference field points at, in field order.
    /// `None` when the reference is unset.
    fn reference_names(&self, _name: &str) -> Option<Vec<String>> {
        None
    }
}

/// An attribute-only record that can be rebuilt from its fields alone.
/// Shared records (adsorbates, adsorbents) implement this so references
/// can deserialize them without a specialized serializer.
pub trait AttrRecord: StoredRecord {
    fn assemble(fields: &RecordFields) -> SerializerResult<Self>;
}

/// Dumps every field named by the record's descriptor table onto `group`.
///
/// Side effect only. Existing attributes/datasets of the same names are
/// overwritten; names for unset optional fields are removed.
pub fn write_record<T: StoredRecord>(record: &T, group: &Group<'_>) -> SerializerResult<()> {
    for descriptor in T::descriptors() {
        match descriptor.kind {
            FieldKind::Attribute => match record.attribute(descriptor.name) {
                Some(value) => group.set_attr(descriptor.name, &value)?,
                None => {
                    group.remove_attr(descriptor.name)?;
                }
            },
            FieldKind::Dataset => match record.dataset(descriptor.name) {
                Some(value) => group.upsert_dataset(descriptor.name, &value)?,
                None => {
                    group.remove_dataset(descriptor.name)?;
                }
            },
            FieldKind::Reference { collection } => {
                match record.reference_names(descriptor.name) {
                    Some(names) if !names.is_empty() => {
                        let route = reference::collection_route(collection, &names[0]);
                        group.set_attr(descriptor.name, &AttrValue::Text(route))?;
                    }
                    _ => {
                        group.remove_attr(descriptor.name)?;
                    }
                }
            }
            FieldKind::ReferenceList { collection } => {
                match record.reference_names(descriptor.name) {
                    Some(names) => {
                        let routes = names
                            .iter()
                            .map(|name| reference::collection_route(collection, name))
                            .collect();
                        group.set_attr(descriptor.name, &AttrValue::TextList(routes))?;
                    }
                    None => {
                        group.remove_attr(descriptor.name)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Reads every field named by the record's descriptor table from `group`.
///
/// Absent names are simply not present in the result; requiredness is
/// decided by the accessors the assembling code calls.
pub fn read_record_fields<T: StoredRecord>(group: &Group<'_>) -> SerializerResult<RecordFields> {
    let mut fields = RecordFields::new(T::record_name());
    for descriptor in T::descriptors() {
        match descriptor.kind {
            FieldKind::Attribute => {
                if let Some(value) = group.attr(descriptor.name)? {
                    fields.attrs.insert(descriptor.name, value);
                }
            }
            FieldKind::Dataset => {
                if let Some(value) = group.dataset(descriptor.name)? {
                    fields.datasets.insert(descriptor.name, value);
                }
            }
            FieldKind::Reference { .. } => {
                if let Some(AttrValue::Text(route)) = group.attr(descriptor.name)? {
                    fields.references.insert(descriptor.name, vec![route]);
                }
            }
            FieldKind::ReferenceList { .. } => {
                if let Some(AttrValue::TextList(routes)) = group.attr(descriptor.name)? {
                    fields.references.insert(descriptor.name, routes);
                }
            }
        }
    }
    Ok(fields)
}

/// Field values read from one node, keyed by descriptor name.
#[derive(Debug)]
pub struct RecordFields {
    record: &'static str,
    attrs: HashMap<&'static str, AttrValue>,
    datasets: HashMap<&'static str, DatasetValue>,
    references: HashMap<&'static str, Vec<String>>,
}

impl RecordFields {
    fn new(record: &'static str) -> Self {
        Self {
            record,
            attrs: HashMap::new(),
            datasets: HashMap::new(),
            references: HashMap::new(),
        }
    }

    /// Builds the error for an attribute that exists but has the wrong shape.
    pub fn invalid_attribute(&self, name: &'static str, message: impl Into<String>) -> SerializerError {
        SerializerError::InvalidAttribute {
            record: self.record,
            name,
            message: message.into(),
        }
    }

    pub fn require_text(&self, name: &'static str) -> SerializerResult<String> {
        self.optional_text(name)?
            .ok_or(SerializerError::MissingAttribute {
                record: self.record,
                name,
            })
    }

    pub fn optional_text(&self, name: &'static str) -> SerializerResult<Option<String>> {
        match self.attrs.get(name) {
            None => Ok(None),
            Some(AttrValue::Text(text)) => Ok(Some(text.clone())),
            Some(other) => Err(self.invalid_attribute(name, unexpected(other, "text"))),
        }
    }

    pub fn require_real(&self, name: &'static str) -> SerializerResult<f64> {
        self.optional_real(name)?
            .ok_or(SerializerError::MissingAttribute {
                record: self.record,
                name,
            })
    }

    pub fn optional_real(&self, name: &'static str) -> SerializerResult<Option<f64>> {
        match self.attrs.get(name) {
            None => Ok(None),
            Some(AttrValue::Real(real)) => Ok(Some(*real)),
            // Whole-valued reals may have been written as integers.
            Some(AttrValue::Int(int)) => Ok(Some(*int as f64)),
            Some(other) => Err(self.invalid_attribute(name, unexpected(other, "real"))),
        }
    }

    pub fn optional_text_list(&self, name: &'static str) -> SerializerResult<Option<Vec<String>>> {
        match self.attrs.get(name) {
            None => Ok(None),
            Some(AttrValue::TextList(list)) => Ok(Some(list.clone())),
            Some(other) => Err(self.invalid_attribute(name, unexpected(other, "text list"))),
        }
    }

    pub fn require_dataset_1d(&self, name: &'static str) -> SerializerResult<Array1<f64>> {
        self.optional_dataset_1d(name)?
            .ok_or(SerializerError::MissingDataset {
                record: self.record,
                name,
            })
    }

    pub fn optional_dataset_1d(&self, name: &'static str) -> SerializerResult<Option<Array1<f64>>> {
        match self.datasets.get(name) {
            None => Ok(None),
            Some(DatasetValue::OneD(array)) => Ok(Some(array.clone())),
            Some(DatasetValue::TwoD(_)) => {
                Err(self.invalid_attribute(name, "dataset is 2D, expected 1D"))
            }
        }
    }

    pub fn require_dataset_2d(&self, name: &'static str) -> SerializerResult<Array2<f64>> {
        match self.datasets.get(name) {
            None => Err(SerializerError::MissingDataset {
                record: self.record,
                name,
            }),
            Some(DatasetValue::TwoD(array)) => Ok(array.clone()),
            Some(DatasetValue::OneD(_)) => {
                Err(self.invalid_attribute(name, "dataset is 1D, expected 2D"))
            }
        }
    }

    /// Stored reference routes for a field, empty when the reference was
    /// never written.
    pub fn reference_routes(&self, name: &'static str) -> &[String] {
        self.references.get(name).map_or(&[], Vec::as_slice)
    }
}

fn unexpected(value: &AttrValue, expected: &str) -> String {
    let kind = match value {
        AttrValue::Text(_) => "text",
        AttrValue::Real(_) => "real",
        AttrValue::Int(_) => "int",
        AttrValue::TextList(_) => "text list",
    };
    format!("stored as {kind}, expected {expected}")
}

/// Serializer for records whose fields are attributes only.
///
/// Covers the shared records (adsorbates, adsorbents); richer records get
/// specialized serializers composing the same generic read/write paths.
pub struct AttrOnlySerializer<T: AttrRecord> {
    _marker: PhantomData<T>,
}

impl<T: AttrRecord> AttrOnlySerializer<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Writes the record's attributes onto `group`.
    pub fn dump(&self, record: &T, group: &Group<'_>) -> SerializerResult<()> {
        write_record(record, group)
    }

    /// Rebuilds the record from the attributes stored on `group`.
    pub fn load(&self, group: &Group<'_>) -> SerializerResult<T> {
        T::assemble(&read_record_fields::<T>(group)?)
    }
}

impl<T: AttrRecord> Default for AttrOnlySerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}
