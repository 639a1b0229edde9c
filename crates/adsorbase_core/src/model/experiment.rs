//! Experiment domain model.
//!
//! # Responsibility
//! - Group the isotherms measured in one published campaign, together with
//!   the adsorbent they were measured on and paper metadata.
//!
//! # Invariants
//! - `name` is the unique key inside the experiments collection and becomes
//!   the storage path segment of the experiment node.
//! - Contained isotherms are owned exclusively by the experiment; only the
//!   adsorbent and the isotherms' adsorbates are shared records.

use crate::model::adsorbent::Adsorbent;
use crate::model::isotherm::{MixIsotherm, MonoIsotherm};
use serde::{Deserialize, Serialize};

/// Measurement technique used for an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentType {
    Gravimetric,
    Volumetric,
    Dynamic,
}

impl ExperimentType {
    /// Returns the string stored as the `experiment_type` attribute.
    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Gravimetric => "Gravimetric",
            Self::Volumetric => "Volumetric",
            Self::Dynamic => "Dynamic",
        }
    }

    /// Parses a stored `experiment_type` attribute back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Gravimetric" => Some(Self::Gravimetric),
            "Volumetric" => Some(Self::Volumetric),
            "Dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }
}

/// One published adsorption campaign: an adsorbent plus the pure and
/// mixture isotherms measured on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Unique key within the experiments collection.
    pub name: String,
    pub experiment_type: ExperimentType,
    /// Campaign temperature, in K.
    pub temperature: f64,
    /// `None` only when the referenced adsorbent vanished from storage.
    pub adsorbent: Option<Adsorbent>,
    pub monocomponent_isotherms: Vec<MonoIsotherm>,
    pub mixture_isotherms: Vec<MixIsotherm>,
    pub comments: Option<String>,
    pub paper_url: Option<String>,
    pub authors: Option<Vec<String>>,
    pub year: Option<String>,
    pub paper_doi: Option<Vec<String>>,
}

impl Experiment {
    /// Creates an experiment with no isotherms and no paper metadata.
    pub fn new(
        name: impl Into<String>,
        experiment_type: ExperimentType,
        temperature: f64,
        adsorbent: Adsorbent,
    ) -> Self {
        Self {
            name: name.into(),
            experiment_type,
            temperature,
            adsorbent: Some(adsorbent),
            monocomponent_isotherms: Vec::new(),
            mixture_isotherms: Vec::new(),
            comments: None,
            paper_url: None,
            authors: None,
            year: None,
            paper_doi: None,
        }
    }
}
