//! Isotherm data handler extension point.
//!
//! # Responsibility
//! - Define the contract for turning raw lab-file data into validated
//!   isotherm records ready for registration.
//!
//! # Invariants
//! - Extraction points not overridden by a concrete handler fail with
//!   `NotImplemented`, never with a silent empty result.
//! - Created isotherms pass model validation before they are returned.

use crate::model::adsorbate::Adsorbate;
use crate::model::isotherm::{
    IsothermType, IsothermValidationError, MixIsotherm, MonoIsotherm,
};
use ndarray::{Array1, Array2};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HandlerResult<T> = Result<T, HandlerError>;

/// Errors from isotherm data handlers.
#[derive(Debug)]
pub enum HandlerError {
    /// Extraction point left unimplemented by the concrete handler.
    NotImplemented(&'static str),
    /// Extracted arrays violate isotherm shape invariants.
    Validation(IsothermValidationError),
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotImplemented(operation) => {
                write!(f, "handler does not implement `{operation}`")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotImplemented(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<IsothermValidationError> for HandlerError {
    fn from(value: IsothermValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Source description for one pure-component lab file.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoIsothermFileData {
    pub file_name: String,
    pub adsorbate: Adsorbate,
}

/// Source description for one mixture lab file.
#[derive(Debug, Clone, PartialEq)]
pub struct MixIsothermFileData {
    pub file_name: String,
    /// Component order; extracted loading/composition rows must follow it.
    pub adsorbates: Vec<Adsorbate>,
}

/// Contract for extracting raw isotherm arrays from lab data files.
///
/// Concrete handlers override the extraction points for their file format;
/// the provided `create_*` methods assemble validated records from the
/// extracted arrays.
pub trait IsothermDataHandler {
    /// Extracts `(pressures, loadings)` from a pure-component file.
    fn mono_data(
        &self,
        _file_data: &MonoIsothermFileData,
    ) -> HandlerResult<(Array1<f64>, Array1<f64>)> {
        Err(HandlerError::NotImplemented("mono_data"))
    }

    /// Extracts `(pressures, loadings, bulk_composition)` from a mixture
    /// file, rows ordered like the file data's adsorbates.
    fn mix_data(
        &self,
        _file_data: &MixIsothermFileData,
    ) -> HandlerResult<(Array1<f64>, Array2<f64>, Array2<f64>)> {
        Err(HandlerError::NotImplemented("mix_data"))
    }

    /// Builds a validated pure-component isotherm from extracted data.
    fn create_mono_isotherm(
        &self,
        name: &str,
        isotherm_type: IsothermType,
        temperature: f64,
        file_data: &MonoIsothermFileData,
        heats_of_adsorption: Option<Array1<f64>>,
        comments: Option<String>,
    ) -> HandlerResult<MonoIsotherm> {
        let (pressures, loadings) = self.mono_data(file_data)?;
        let isotherm = MonoIsotherm::new(
            name,
            isotherm_type,
            temperature,
            file_data.adsorbate.clone(),
            pressures,
            loadings,
            heats_of_adsorption,
            comments,
        )?;
        Ok(isotherm)
    }

    /// Builds a validated mixture isotherm from extracted data.
    fn create_mix_isotherm(
        &self,
        name: &str,
        isotherm_type: IsothermType,
        temperature: f64,
        file_data: &MixIsothermFileData,
        comments: Option<String>,
    ) -> HandlerResult<MixIsotherm> {
        let (pressures, loadings, bulk_composition) = self.mix_data(file_data)?;
        let isotherm = MixIsotherm::new(
            name,
            isotherm_type,
            temperature,
            file_data.adsorbates.clone(),
            pressures,
            loadings,
            bulk_composition,
            comments,
        )?;
        Ok(isotherm)
    }
}
