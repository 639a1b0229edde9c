//! Static field tables binding the record model to storage.
//!
//! # Responsibility
//! - Declare, once per record type, which fields are scalar attributes,
//!   which are array datasets, and which are references.
//! - Map field names to live values for dump and back for load.
//!
//! # Invariants
//! - Descriptor tables are exhaustive for everything stored on the record's
//!   own node; nested owned records (an experiment's isotherms) live in
//!   sub-collections and are composed by their serializers instead.

use crate::layout::{ADSORBATES, ADSORBENTS};
use crate::model::adsorbate::Adsorbate;
use crate::model::adsorbent::{Adsorbent, AdsorbentType};
use crate::model::experiment::Experiment;
use crate::model::isotherm::{MixIsotherm, MonoIsotherm};
use crate::serializer::{
    AttrRecord, FieldDescriptor, FieldKind, RecordFields, SerializerResult, StoredRecord,
};
use crate::store::{AttrValue, DatasetValue};

const ATTRIBUTE: FieldKind = FieldKind::Attribute;
const DATASET: FieldKind = FieldKind::Dataset;

impl StoredRecord for Adsorbate {
    fn record_name() -> &'static str {
        "Adsorbate"
    }

    fn descriptors() -> &'static [FieldDescriptor] {
        const DESCRIPTORS: &[FieldDescriptor] = &[
                FieldDescriptor::new("name", ATTRIBUTE),
                FieldDescriptor::new("chemical_formula", ATTRIBUTE),
        ];
        DESCRIPTORS
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(AttrValue::Text(self.name.clone())),
            "chemical_formula" => self.chemical_formula.clone().map(AttrValue::Text),
            _ => None,
        }
    }
}

impl AttrRecord for Adsorbate {
    fn assemble(fields: &RecordFields) -> SerializerResult<Self> {
        Ok(Self {
            name: fields.require_text("name")?,
            chemical_formula: fields.optional_text("chemical_formula")?,
        })
    }
}

impl StoredRecord for Adsorbent {
    fn record_name() -> &'static str {
        "Adsorbent"
    }

    fn descriptors() -> &'static [FieldDescriptor] {
        const DESCRIPTORS: &[FieldDescriptor] = &[
                FieldDescriptor::new("type", ATTRIBUTE),
                FieldDescriptor::new("name", ATTRIBUTE),
                FieldDescriptor::new("manufacturer", ATTRIBUTE),
                FieldDescriptor::new("void_volume", ATTRIBUTE),
                FieldDescriptor::new("density", ATTRIBUTE),
                FieldDescriptor::new("si_al_ratio", ATTRIBUTE),
                FieldDescriptor::new("pellet_size", ATTRIBUTE),
                FieldDescriptor::new("binder_content", ATTRIBUTE),
        ];
        DESCRIPTORS
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "type" => Some(AttrValue::Text(self.kind.storage_value().to_string())),
            "name" => Some(AttrValue::Text(self.name.clone())),
            "manufacturer" => self.manufacturer.clone().map(AttrValue::Text),
            "void_volume" => self.void_volume.map(AttrValue::Real),
            "density" => self.density.map(AttrValue::Real),
            "si_al_ratio" => self.si_al_ratio.map(AttrValue::Real),
            "pellet_size" => self.pellet_size.map(AttrValue::Real),
            "binder_content" => self.binder_content.map(AttrValue::Real),
            _ => None,
        }
    }
}

impl AttrRecord for Adsorbent {
    fn assemble(fields: &RecordFields) -> SerializerResult<Self> {
        let kind_text = fields.require_text("type")?;
        let kind = AdsorbentType::parse(&kind_text).ok_or_else(|| {
            fields.invalid_attribute("type", format!("unknown adsorbent type `{kind_text}`"))
        })?;
        Ok(Self {
            kind,
            name: fields.require_text("name")?,
            manufacturer: fields.optional_text("manufacturer")?,
            void_volume: fields.optional_real("void_volume")?,
            density: fields.optional_real("density")?,
            si_al_ratio: fields.optional_real("si_al_ratio")?,
            pellet_size: fields.optional_real("pellet_size")?,
            binder_content: fields.optional_real("binder_content")?,
        })
    }
}

impl StoredRecord for MonoIsotherm {
    fn record_name() -> &'static str {
        "MonoIsotherm"
    }

    fn descriptors() -> &'static [FieldDescriptor] {
        const DESCRIPTORS: &[FieldDescriptor] = &[
                FieldDescriptor::new("name", ATTRIBUTE),
                FieldDescriptor::new("isotherm_type", ATTRIBUTE),
                FieldDescriptor::new("temperature", ATTRIBUTE),
                FieldDescriptor::new("comments", ATTRIBUTE),
                FieldDescriptor::new(
                    "adsorbate",
                    FieldKind::Reference {
                        collection: ADSORBATES,
                    },
                ),
                FieldDescriptor::new("pressures", DATASET),
                FieldDescriptor::new("loadings", DATASET),
                FieldDescriptor::new("heats_of_adsorption", DATASET),
        ];
        DESCRIPTORS
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(AttrValue::Text(self.name.clone())),
            "isotherm_type" => Some(AttrValue::Text(
                self.isotherm_type.storage_value().to_string(),
            )),
            "temperature" => Some(AttrValue::Real(self.temperature)),
            "comments" => self.comments.clone().map(AttrValue::Text),
            _ => None,
        }
    }

    fn dataset(&self, name: &str) -> Option<DatasetValue> {
        match name {
            "pressures" => Some(DatasetValue::OneD(self.pressures.clone())),
            "loadings" => Some(DatasetValue::OneD(self.loadings.clone())),
            "heats_of_adsorption" => self
                .heats_of_adsorption
                .clone()
                .map(DatasetValue::OneD),
            _ => None,
        }
    }

    fn reference_names(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "adsorbate" => self
                .adsorbate
                .as_ref()
                .map(|adsorbate| vec![adsorbate.name.clone()]),
            _ => None,
        }
    }
}

impl StoredRecord for MixIsotherm {
    fn record_name() -> &'static str {
        "MixIsotherm"
    }

    fn descriptors() -> &'static [FieldDescriptor] {
        const DESCRIPTORS: &[FieldDescriptor] = &[
                FieldDescriptor::new("name", ATTRIBUTE),
                FieldDescriptor::new("isotherm_type", ATTRIBUTE),
                FieldDescriptor::new("temperature", ATTRIBUTE),
                FieldDescriptor::new("comments", ATTRIBUTE),
                FieldDescriptor::new(
                    "adsorbates",
                    FieldKind::ReferenceList {
                        collection: ADSORBATES,
                    },
                ),
                FieldDescriptor::new("pressures", DATASET),
                FieldDescriptor::new("loadings", DATASET),
                FieldDescriptor::new("bulk_composition", DATASET),
        ];
        DESCRIPTORS
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(AttrValue::Text(self.name.clone())),
            "isotherm_type" => Some(AttrValue::Text(
                self.isotherm_type.storage_value().to_string(),
            )),
            "temperature" => Some(AttrValue::Real(self.temperature)),
            "comments" => self.comments.clone().map(AttrValue::Text),
            _ => None,
        }
    }

    fn dataset(&self, name: &str) -> Option<DatasetValue> {
        match name {
            "pressures" => Some(DatasetValue::OneD(self.pressures.clone())),
            "loadings" => Some(DatasetValue::TwoD(self.loadings.clone())),
            "bulk_composition" => Some(DatasetValue::TwoD(self.bulk_composition.clone())),
            _ => None,
        }
    }

    fn reference_names(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "adsorbates" => Some(
                self.adsorbates
                    .iter()
                    .map(|adsorbate| adsorbate.name.clone())
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl StoredRecord for Experiment {
    fn record_name() -> &'static str {
        "Experiment"
    }

    fn descriptors() -> &'static [FieldDescriptor] {
        const DESCRIPTORS: &[FieldDescriptor] = &[
                FieldDescriptor::new("name", ATTRIBUTE),
                FieldDescriptor::new("experiment_type", ATTRIBUTE),
                FieldDescriptor::new("temperature", ATTRIBUTE),
                FieldDescriptor::new("comments", ATTRIBUTE),
                FieldDescriptor::new("paper_url", ATTRIBUTE),
                FieldDescriptor::new("authors", ATTRIBUTE),
                FieldDescriptor::new("year", ATTRIBUTE),
                FieldDescriptor::new("paper_doi", ATTRIBUTE),
                FieldDescriptor::new(
                    "adsorbent",
                    FieldKind::Reference {
                        collection: ADSORBENTS,
                    },
                ),
        ];
        DESCRIPTORS
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(AttrValue::Text(self.name.clone())),
            "experiment_type" => Some(AttrValue::Text(
                self.experiment_type.storage_value().to_string(),
            )),
            "temperature" => Some(AttrValue::Real(self.temperature)),
            "comments" => self.comments.clone().map(AttrValue::Text),
            "paper_url" => self.paper_url.clone().map(AttrValue::Text),
            "authors" => self.authors.clone().map(AttrValue::TextList),
            "year" => self.year.clone().map(AttrValue::Text),
            "paper_doi" => self.paper_doi.clone().map(AttrValue::TextList),
            _ => None,
        }
    }

    fn reference_names(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "adsorbent" => self
                .adsorbent
                .as_ref()
                .map(|adsorbent| vec![adsorbent.name.clone()]),
            _ => None,
        }
    }
}
