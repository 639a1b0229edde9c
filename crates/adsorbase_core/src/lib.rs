//! Object-to-hierarchical-store mapping layer for an adsorption isotherm
//! database. Typed records are dumped into a tree of named groups, scalar
//! attributes, numeric datasets, and path-based cross-references, and
//! reconstructed from that tree on load.

pub mod database;
pub mod handler;
pub mod layout;
pub mod logging;
pub mod model;
pub mod serializer;
pub mod store;

pub use database::{AdsorptionDatabase, DatabaseError, DatabaseResult};
pub use handler::{
    HandlerError, HandlerResult, IsothermDataHandler, MixIsothermFileData, MonoIsothermFileData,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::adsorbate::Adsorbate;
pub use model::adsorbent::{Adsorbent, AdsorbentType};
pub use model::experiment::{Experiment, ExperimentType};
pub use model::isotherm::{
    IsothermType, IsothermValidationError, MixIsotherm, MonoIsotherm,
};
pub use serializer::{
    AttrOnlySerializer, ExperimentSerializer, MixIsothermSerializer, MonoIsothermSerializer,
    SerializerError, SerializerResult,
};
pub use store::{AccessMode, AttrValue, DatasetValue, Group, Store, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
