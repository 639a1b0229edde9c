//! Pure-component and mixture isotherm serializers.
//!
//! # Responsibility
//! - Dump/load isotherm records against their store nodes, composing the
//!   generic field protocol with adsorbate reference resolution.
//!
//! # Invariants
//! - Adsorbate references are stored as routes, never as copies.
//! - Mixture adsorbate order is the dump-time order; loading never permutes
//!   it, keeping loading row `i` aligned with adsorbate `i`.

use crate::model::adsorbate::Adsorbate;
use crate::model::isotherm::{IsothermType, MixIsotherm, MonoIsotherm};
use crate::serializer::reference::{resolve_route, resolve_routes};
use crate::serializer::{
    read_record_fields, write_record, RecordFields, SerializerError, SerializerResult,
};
use crate::store::Group;

fn parse_isotherm_type(fields: &RecordFields) -> SerializerResult<IsothermType> {
    let text = fields.require_text("isotherm_type")?;
    IsothermType::parse(&text).ok_or_else(|| {
        fields.invalid_attribute("isotherm_type", format!("unknown isotherm type `{text}`"))
    })
}

/// Serializer for [`MonoIsotherm`] records.
#[derive(Default)]
pub struct MonoIsothermSerializer;

impl MonoIsothermSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Writes the isotherm's attributes, datasets, and adsorbate route.
    pub fn dump(&self, isotherm: &MonoIsotherm, group: &Group<'_>) -> SerializerResult<()> {
        write_record(isotherm, group)
    }

    /// Rebuilds the isotherm, resolving the adsorbate reference softly.
    pub fn load(&self, group: &Group<'_>) -> SerializerResult<MonoIsotherm> {
        let fields = read_record_fields::<MonoIsotherm>(group)?;

        let adsorbate = match fields.reference_routes("adsorbate").first() {
            Some(route) => resolve_route::<Adsorbate>(group, route)?,
            None => None,
        };

        let isotherm = MonoIsotherm {
            name: fields.require_text("name")?,
            isotherm_type: parse_isotherm_type(&fields)?,
            temperature: fields.require_real("temperature")?,
            adsorbate,
            pressures: fields.require_dataset_1d("pressures")?,
            loadings: fields.require_dataset_1d("loadings")?,
            heats_of_adsorption: fields.optional_dataset_1d("heats_of_adsorption")?,
            comments: fields.optional_text("comments")?,
        };
        isotherm
            .validate()
            .map_err(|source| SerializerError::InvalidRecord {
                record: "MonoIsotherm",
                source,
            })?;
        Ok(isotherm)
    }
}

/// Serializer for [`MixIsotherm`] records.
#[derive(Default)]
pub struct MixIsothermSerializer;

impl MixIsothermSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Writes the isotherm's attributes, datasets, and adsorbate routes.
    pub fn dump(&self, isotherm: &MixIsotherm, group: &Group<'_>) -> SerializerResult<()> {
        write_record(isotherm, group)
    }

    /// Rebuilds the isotherm, resolving adsorbate references softly.
    ///
    /// Dangling adsorbate routes are skipped, so the loaded list can be
    /// shorter than the loading matrix's component axis.
    pub fn load(&self, group: &Group<'_>) -> SerializerResult<MixIsotherm> {
        let fields = read_record_fields::<MixIsotherm>(group)?;

        let adsorbates =
            resolve_routes::<Adsorbate>(group, fields.reference_routes("adsorbates"))?;

        let isotherm = MixIsotherm {
            name: fields.require_text("name")?,
            isotherm_type: parse_isotherm_type(&fields)?,
            temperature: fields.require_real("temperature")?,
            adsorbates,
            pressures: fields.require_dataset_1d("pressures")?,
            loadings: fields.require_dataset_2d("loadings")?,
            bulk_composition: fields.require_dataset_2d("bulk_composition")?,
            comments: fields.optional_text("comments")?,
        };
        isotherm
            .validate_arrays()
            .map_err(|source| SerializerError::InvalidRecord {
                record: "MixIsotherm",
                source,
            })?;
        Ok(isotherm)
    }
}
