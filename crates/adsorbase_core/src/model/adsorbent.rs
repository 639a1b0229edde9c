//! Adsorbent domain model.
//!
//! # Responsibility
//! - Define the shared solid-material record referenced by experiments.
//!
//! # Invariants
//! - `name` is the unique key inside the adsorbents collection.
//! - `AdsorbentType` round-trips through its storage string codec.

use serde::{Deserialize, Serialize};

/// Material category of an adsorbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdsorbentType {
    Zeolite,
    ActivatedCarbon,
    /// Metal-organic framework.
    Mof,
    Silica,
}

impl AdsorbentType {
    /// Returns the string stored as the `type` attribute.
    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Zeolite => "Zeolite",
            Self::ActivatedCarbon => "Activated Carbon",
            Self::Mof => "Metal-organic framework",
            Self::Silica => "Silica",
        }
    }

    /// Parses a stored `type` attribute back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Zeolite" => Some(Self::Zeolite),
            "Activated Carbon" => Some(Self::ActivatedCarbon),
            "Metal-organic framework" => Some(Self::Mof),
            "Silica" => Some(Self::Silica),
            _ => None,
        }
    }
}

/// A solid material onto which gases adsorb.
///
/// Stored once in a shared root collection; experiments reference it by
/// route instead of copying its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adsorbent {
    /// Serialized as `type` to match the stored attribute name.
    #[serde(rename = "type")]
    pub kind: AdsorbentType,
    /// Unique key within the adsorbents collection.
    pub name: String,
    pub manufacturer: Option<String>,
    /// Void volume of the packing, in cm3/g.
    pub void_volume: Option<f64>,
    /// Skeletal density, in g/cm3.
    pub density: Option<f64>,
    /// Silicon/aluminium ratio, meaningful for zeolites.
    pub si_al_ratio: Option<f64>,
    /// Pellet size, in mm.
    pub pellet_size: Option<f64>,
    /// Binder mass fraction.
    pub binder_content: Option<f64>,
}

impl Adsorbent {
    /// Creates an adsorbent record with all optional properties unset.
    pub fn new(kind: AdsorbentType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            manufacturer: None,
            void_volume: None,
            density: None,
            si_al_ratio: None,
            pellet_size: None,
            binder_content: None,
        }
    }
}
