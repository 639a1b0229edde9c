//! Isotherm domain models.
//!
//! # Responsibility
//! - Define pure-component and mixture isotherm records.
//! - Enforce paired-array shape invariants at construction time.
//!
//! # Invariants
//! - `pressures` and `loadings` of a mono isotherm have equal length.
//! - Mixture `loadings`/`bulk_composition` are `(components, points)` with
//!   row `i` belonging to `adsorbates[i]` and `points == pressures.len()`.
//! - Shape violations are construction-time defects and are never persisted.

use crate::model::adsorbate::Adsorbate;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Thermodynamic convention of the measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsothermType {
    Excess,
    Absolute,
}

impl IsothermType {
    /// Returns the string stored as the `isotherm_type` attribute.
    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Excess => "Excess",
            Self::Absolute => "Absolute",
        }
    }

    /// Parses a stored `isotherm_type` attribute back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Excess" => Some(Self::Excess),
            "Absolute" => Some(Self::Absolute),
            _ => None,
        }
    }
}

/// Paired-array shape violation in an isotherm record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsothermValidationError {
    ShapeMismatch {
        isotherm: String,
        field: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

impl Display for IsothermValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch {
                isotherm,
                field,
                expected,
                actual,
            } => write!(
                f,
                "isotherm `{isotherm}`: `{field}` has shape {actual:?}, expected {expected:?}"
            ),
        }
    }
}

impl Error for IsothermValidationError {}

/// Pure-component isotherm: loading of one adsorbate versus pressure at
/// fixed temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonoIsotherm {
    /// Bare isotherm name; the stored node name also carries the type.
    pub name: String,
    pub isotherm_type: IsothermType,
    /// Measurement temperature, in K.
    pub temperature: f64,
    /// `None` only when the referenced adsorbate vanished from storage.
    pub adsorbate: Option<Adsorbate>,
    pub pressures: Array1<f64>,
    pub loadings: Array1<f64>,
    pub heats_of_adsorption: Option<Array1<f64>>,
    pub comments: Option<String>,
}

impl MonoIsotherm {
    /// Creates a validated pure-component isotherm.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        isotherm_type: IsothermType,
        temperature: f64,
        adsorbate: Adsorbate,
        pressures: Array1<f64>,
        loadings: Array1<f64>,
        heats_of_adsorption: Option<Array1<f64>>,
        comments: Option<String>,
    ) -> Result<Self, IsothermValidationError> {
        let isotherm = Self {
            name: name.into(),
            isotherm_type,
            temperature,
            adsorbate: Some(adsorbate),
            pressures,
            loadings,
            heats_of_adsorption,
            comments,
        };
        isotherm.validate()?;
        Ok(isotherm)
    }

    /// Re-checks the paired-array invariants.
    ///
    /// Also applied when a record is reassembled from storage, so corrupted
    /// state is rejected instead of masked.
    pub fn validate(&self) -> Result<(), IsothermValidationError> {
        let points = self.pressures.len();
        if self.loadings.len() != points {
            return Err(self.shape_mismatch("loadings", points, self.loadings.len()));
        }
        if let Some(heats) = &self.heats_of_adsorption {
            if heats.len() != points {
                return Err(self.shape_mismatch("heats_of_adsorption", points, heats.len()));
            }
        }
        Ok(())
    }

    fn shape_mismatch(
        &self,
        field: &'static str,
        expected: usize,
        actual: usize,
    ) -> IsothermValidationError {
        IsothermValidationError::ShapeMismatch {
            isotherm: self.name.clone(),
            field,
            expected: vec![expected],
            actual: vec![actual],
        }
    }
}

/// Multi-component isotherm: loadings of several adsorbates versus pressure
/// at fixed bulk composition and temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixIsotherm {
    /// Bare isotherm name; the stored node name also carries the type.
    pub name: String,
    pub isotherm_type: IsothermType,
    /// Measurement temperature, in K.
    pub temperature: f64,
    /// Component order is authoritative: row `i` of `loadings` and
    /// `bulk_composition` belongs to `adsorbates[i]`.
    pub adsorbates: Vec<Adsorbate>,
    pub pressures: Array1<f64>,
    /// `(components, points)` adsorbed amounts.
    pub loadings: Array2<f64>,
    /// `(components, points)` gas-phase mole fractions.
    pub bulk_composition: Array2<f64>,
    pub comments: Option<String>,
}

impl MixIsotherm {
    /// Creates a validated mixture isotherm.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        isotherm_type: IsothermType,
        temperature: f64,
        adsorbates: Vec<Adsorbate>,
        pressures: Array1<f64>,
        loadings: Array2<f64>,
        bulk_composition: Array2<f64>,
        comments: Option<String>,
    ) -> Result<Self, IsothermValidationError> {
        let isotherm = Self {
            name: name.into(),
            isotherm_type,
            temperature,
            adsorbates,
            pressures,
            loadings,
            bulk_composition,
            comments,
        };
        isotherm.validate_arrays()?;
        isotherm.validate_components()?;
        Ok(isotherm)
    }

    /// Re-checks array shapes against each other and the pressure axis.
    ///
    /// Does not check `adsorbates` against the component axis: reference
    /// decoding fails softly, so a loaded record may carry fewer adsorbates
    /// than loading rows.
    pub fn validate_arrays(&self) -> Result<(), IsothermValidationError> {
        let (components, points) = self.loadings.dim();
        if points != self.pressures.len() {
            return Err(self.shape_mismatch(
                "loadings",
                vec![components, self.pressures.len()],
                vec![components, points],
            ));
        }
        if self.bulk_composition.dim() != self.loadings.dim() {
            return Err(self.shape_mismatch(
                "bulk_composition",
                vec![components, points],
                self.bulk_composition.shape().to_vec(),
            ));
        }
        Ok(())
    }

    /// Checks that every loading row has its adsorbate. Construction-time
    /// only; see [`MixIsotherm::validate_arrays`].
    pub fn validate_components(&self) -> Result<(), IsothermValidationError> {
        let components = self.loadings.nrows();
        if self.adsorbates.len() != components {
            return Err(self.shape_mismatch(
                "adsorbates",
                vec![components],
                vec![self.adsorbates.len()],
            ));
        }
        Ok(())
    }

    fn shape_mismatch(
        &self,
        field: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    ) -> IsothermValidationError {
        IsothermValidationError::ShapeMismatch {
            isotherm: self.name.clone(),
            field,
            expected,
            actual,
        }
    }
}
