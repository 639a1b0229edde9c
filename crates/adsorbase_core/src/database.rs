//! Registration and retrieval facade.
//!
//! # Responsibility
//! - Own the fixed tree layout at the store root and the upsert semantics
//!   for registering each record kind.
//! - Surface absent names as a distinct `NotFound` condition.
//!
//! # Invariants
//! - The facade borrows a caller-owned [`Store`]; it never opens or holds a
//!   store of its own.
//! - Registration is upsert by name: re-registering overwrites, never
//!   errors. No rollback exists; re-running registration is the recovery
//!   path for interrupted dumps.

use crate::layout::{ADSORBATES, ADSORBENTS, EXPERIMENTS};
use crate::model::adsorbate::Adsorbate;
use crate::model::adsorbent::Adsorbent;
use crate::model::experiment::Experiment;
use crate::serializer::{
    AttrOnlySerializer, AttrRecord, ExperimentSerializer, SerializerError,
};
use crate::store::{Group, Store, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors from facade operations.
#[derive(Debug)]
pub enum DatabaseError {
    /// No record with that name exists in the collection.
    NotFound { kind: &'static str, name: String },
    /// Underlying store engine error.
    Store(StoreError),
    /// Record dump/load error.
    Serializer(SerializerError),
}

impl Display for DatabaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, name } => write!(f, "{kind} `{name}` not found"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Serializer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DatabaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Store(err) => Some(err),
            Self::Serializer(err) => Some(err),
        }
    }
}

impl From<StoreError> for DatabaseError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SerializerError> for DatabaseError {
    fn from(value: SerializerError) -> Self {
        Self::Serializer(value)
    }
}

/// Facade over one open store.
///
/// The caller opens the store in the access mode it needs and keeps it for
/// as long as the facade is used; dropping the store releases the
/// underlying resources.
pub struct AdsorptionDatabase<'s> {
    store: &'s Store,
}

impl<'s> AdsorptionDatabase<'s> {
    /// Creates a facade over a caller-owned store handle.
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// Registers (upserts) an adsorbate in the shared root collection.
    pub fn register_adsorbate(&self, adsorbate: &Adsorbate) -> DatabaseResult<()> {
        self.register_shared("register_adsorbate", ADSORBATES, &adsorbate.name, adsorbate)
    }

    /// Registers (upserts) an adsorbent in the shared root collection.
    pub fn register_adsorbent(&self, adsorbent: &Adsorbent) -> DatabaseResult<()> {
        self.register_shared("register_adsorbent", ADSORBENTS, &adsorbent.name, adsorbent)
    }

    /// Registers (upserts) an experiment and all its isotherms.
    ///
    /// Shared records referenced by the experiment are not registered here;
    /// register them separately so their routes resolve on load.
    pub fn register_experiment(&self, experiment: &Experiment) -> DatabaseResult<()> {
        let result = (|| -> DatabaseResult<()> {
            let root = self.store.root();
            let collection = root.require_group(EXPERIMENTS)?;
            let node = collection.require_group(&experiment.name)?;
            ExperimentSerializer::new().dump(experiment, &node)?;
            Ok(())
        })();
        self.log_op("register_experiment", &experiment.name, &result);
        result
    }

    /// Lists experiment names in store enumeration order.
    pub fn list_experiments(&self) -> DatabaseResult<Vec<String>> {
        self.list_collection(EXPERIMENTS)
    }

    /// Lists adsorbate names in store enumeration order.
    pub fn list_adsorbates(&self) -> DatabaseResult<Vec<String>> {
        self.list_collection(ADSORBATES)
    }

    /// Lists adsorbent names in store enumeration order.
    pub fn list_adsorbents(&self) -> DatabaseResult<Vec<String>> {
        self.list_collection(ADSORBENTS)
    }

    /// Loads an experiment by name, isotherms and references included.
    pub fn get_experiment(&self, name: &str) -> DatabaseResult<Experiment> {
        let result = (|| -> DatabaseResult<Experiment> {
            let node = self.collection_member("experiment", EXPERIMENTS, name)?;
            Ok(ExperimentSerializer::new().load(&node)?)
        })();
        self.log_op("get_experiment", name, &result);
        result
    }

    /// Loads an adsorbate by name.
    pub fn get_adsorbate(&self, name: &str) -> DatabaseResult<Adsorbate> {
        self.get_shared("adsorbate", ADSORBATES, name)
    }

    /// Loads an adsorbent by name.
    pub fn get_adsorbent(&self, name: &str) -> DatabaseResult<Adsorbent> {
        self.get_shared("adsorbent", ADSORBENTS, name)
    }

    /// Removes a shared adsorbate. Returns whether it existed.
    ///
    /// References held by isotherms keep their routes; they resolve to
    /// nothing from now on.
    pub fn remove_adsorbate(&self, name: &str) -> DatabaseResult<bool> {
        self.remove_shared(ADSORBATES, name)
    }

    /// Removes a shared adsorbent. Returns whether it existed.
    pub fn remove_adsorbent(&self, name: &str) -> DatabaseResult<bool> {
        self.remove_shared(ADSORBENTS, name)
    }

    fn register_shared<T: AttrRecord>(
        &self,
        event: &'static str,
        collection: &'static str,
        name: &str,
        record: &T,
    ) -> DatabaseResult<()> {
        let result = (|| -> DatabaseResult<()> {
            let root = self.store.root();
            let collection = root.require_group(collection)?;
            let node = collection.require_group(name)?;
            AttrOnlySerializer::<T>::new().dump(record, &node)?;
            Ok(())
        })();
        self.log_op(event, name, &result);
        result
    }

    fn get_shared<T: AttrRecord>(
        &self,
        kind: &'static str,
        collection: &'static str,
        name: &str,
    ) -> DatabaseResult<T> {
        let node = self.collection_member(kind, collection, name)?;
        Ok(AttrOnlySerializer::<T>::new().load(&node)?)
    }

    fn remove_shared(&self, collection: &'static str, name: &str) -> DatabaseResult<bool> {
        let root = self.store.root();
        match root.child(collection)? {
            Some(group) => Ok(group.remove_child(name)?),
            None => Ok(false),
        }
    }

    fn list_collection(&self, collection: &'static str) -> DatabaseResult<Vec<String>> {
        let root = self.store.root();
        match root.child(collection)? {
            Some(group) => Ok(group.child_names()?),
            None => Ok(Vec::new()),
        }
    }

    fn collection_member(
        &self,
        kind: &'static str,
        collection: &'static str,
        name: &str,
    ) -> DatabaseResult<Group<'s>> {
        let root = self.store.root();
        root.child(collection)?
            .and_then(|group| group.child(name).transpose())
            .transpose()?
            .ok_or_else(|| DatabaseError::NotFound {
                kind,
                name: name.to_string(),
            })
    }

    fn log_op<T>(&self, event: &str, name: &str, result: &DatabaseResult<T>) {
        match result {
            Ok(_) => info!("event={event} module=database status=ok name={name}"),
            Err(err) => {
                error!("event={event} module=database status=error name={name} error={err}")
            }
        }
    }
}
