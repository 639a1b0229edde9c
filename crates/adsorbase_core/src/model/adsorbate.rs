//! Adsorbate domain model.
//!
//! # Responsibility
//! - Define the shared gas-species record referenced by isotherms.
//!
//! # Invariants
//! - `name` is the unique key inside the adsorbates collection.

use serde::{Deserialize, Serialize};

/// A gas species that adsorbs onto an adsorbent.
///
/// Adsorbates are stored once in a shared root collection and referenced by
/// route from every isotherm that measures them, so the same species is
/// never duplicated across experiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adsorbate {
    /// Unique key within the adsorbates collection.
    pub name: String,
    /// Chemical formula, e.g. `CO2`.
    pub chemical_formula: Option<String>,
}

impl Adsorbate {
    /// Creates an adsorbate record.
    pub fn new(name: impl Into<String>, chemical_formula: Option<String>) -> Self {
        Self {
            name: name.into(),
            chemical_formula,
        }
    }
}
