//! Domain model for the adsorption database.
//!
//! # Responsibility
//! - Define the record types persisted in the hierarchical store.
//! - Enforce paired-array invariants before anything reaches storage.
//!
//! # Invariants
//! - Records are identified by `name` within their collection; there are no
//!   surrogate ids.
//! - Shared records (adsorbates, adsorbents) appear once in the model graph
//!   per name and once in storage.

pub mod adsorbate;
pub mod adsorbent;
pub mod experiment;
pub mod isotherm;
