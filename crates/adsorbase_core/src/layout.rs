//! Fixed storage tree layout.
//!
//! # Responsibility
//! - Name the root collections and per-experiment sub-collections.
//! - Build the routes used by cross-references and the composite node names
//!   used for isotherms.
//!
//! # Invariants
//! - Collection names are case-sensitive path segments and part of the
//!   stored format.
//! - An isotherm node name combines bare name and isotherm type, so two
//!   isotherms sharing a bare name but differing in type never collide
//!   within one experiment.

use crate::model::isotherm::IsothermType;

/// Root collection holding experiment nodes.
pub const EXPERIMENTS: &str = "Experiments";
/// Root collection holding shared adsorbate nodes.
pub const ADSORBATES: &str = "Adsorbates";
/// Root collection holding shared adsorbent nodes.
pub const ADSORBENTS: &str = "Adsorbents";
/// Per-experiment sub-collection for pure-component isotherms.
pub const MONO_ISOTHERMS: &str = "Pure";
/// Per-experiment sub-collection for mixture isotherms.
pub const MIXTURE_ISOTHERMS: &str = "Mixture";

/// Absolute route of a shared adsorbate node.
pub fn adsorbate_route(name: &str) -> String {
    format!("/{ADSORBATES}/{name}")
}

/// Absolute route of a shared adsorbent node.
pub fn adsorbent_route(name: &str) -> String {
    format!("/{ADSORBENTS}/{name}")
}

/// Node name of an isotherm inside its per-kind sub-collection.
pub fn isotherm_store_name(name: &str, isotherm_type: IsothermType) -> String {
    format!("{name}-{}", isotherm_type.storage_value())
}
