//! Experiment serializer.
//!
//! # Responsibility
//! - Dump/load experiment records, composing the isotherm serializers
//!   against the per-kind sub-collections of the experiment node.
//!
//! # Invariants
//! - Isotherm nodes are named `"{name}-{isotherm_type}"` inside their
//!   sub-collection, so bare-name collisions across types cannot occur.
//! - The adsorbent reference is stored as a route and resolved softly.
//! - Dump upserts node by node and drops sub-collection nodes for isotherms
//!   no longer contained in the experiment; an interrupted dump leaves a
//!   partial experiment that a re-run overwrites completely.

use crate::layout::{isotherm_store_name, MIXTURE_ISOTHERMS, MONO_ISOTHERMS};
use crate::model::adsorbent::Adsorbent;
use crate::model::experiment::{Experiment, ExperimentType};
use crate::serializer::isotherms::{MixIsothermSerializer, MonoIsothermSerializer};
use crate::serializer::reference::resolve_route;
use crate::serializer::{read_record_fields, write_record, SerializerResult};
use crate::store::Group;
use std::collections::HashSet;

/// Serializer for [`Experiment`] records and their owned isotherms.
#[derive(Default)]
pub struct ExperimentSerializer {
    mono_serializer: MonoIsothermSerializer,
    mix_serializer: MixIsothermSerializer,
}

impl ExperimentSerializer {
    pub fn new() -> Self {
        Self {
            mono_serializer: MonoIsothermSerializer::new(),
            mix_serializer: MixIsothermSerializer::new(),
        }
    }

    /// Writes the experiment's scalars, its adsorbent route, and every
    /// contained isotherm into the per-kind sub-collections.
    ///
    /// Nodes left over from a previous dump whose isotherms are no longer
    /// contained in the experiment are removed, so re-registration leaves
    /// only the current isotherm set retrievable.
    pub fn dump(&self, experiment: &Experiment, group: &Group<'_>) -> SerializerResult<()> {
        write_record(experiment, group)?;

        let kept: HashSet<String> = experiment
            .monocomponent_isotherms
            .iter()
            .map(|isotherm| isotherm_store_name(&isotherm.name, isotherm.isotherm_type))
            .collect();
        prune_sub_collection(group, MONO_ISOTHERMS, &kept)?;

        for isotherm in &experiment.monocomponent_isotherms {
            let sub_collection = group.require_group(MONO_ISOTHERMS)?;
            let node = sub_collection
                .require_group(&isotherm_store_name(&isotherm.name, isotherm.isotherm_type))?;
            self.mono_serializer.dump(isotherm, &node)?;
        }

        let kept: HashSet<String> = experiment
            .mixture_isotherms
            .iter()
            .map(|isotherm| isotherm_store_name(&isotherm.name, isotherm.isotherm_type))
            .collect();
        prune_sub_collection(group, MIXTURE_ISOTHERMS, &kept)?;

        for isotherm in &experiment.mixture_isotherms {
            let sub_collection = group.require_group(MIXTURE_ISOTHERMS)?;
            let node = sub_collection
                .require_group(&isotherm_store_name(&isotherm.name, isotherm.isotherm_type))?;
            self.mix_serializer.dump(isotherm, &node)?;
        }

        Ok(())
    }

    /// Rebuilds the experiment, loading nested isotherm nodes and resolving
    /// the adsorbent reference softly.
    pub fn load(&self, group: &Group<'_>) -> SerializerResult<Experiment> {
        let fields = read_record_fields::<Experiment>(group)?;

        let adsorbent = match fields.reference_routes("adsorbent").first() {
            Some(route) => resolve_route::<Adsorbent>(group, route)?,
            None => None,
        };

        let mut monocomponent_isotherms = Vec::new();
        if let Some(sub_collection) = group.child(MONO_ISOTHERMS)? {
            for node_name in sub_collection.child_names()? {
                if let Some(node) = sub_collection.child(&node_name)? {
                    monocomponent_isotherms.push(self.mono_serializer.load(&node)?);
                }
            }
        }

        let mut mixture_isotherms = Vec::new();
        if let Some(sub_collection) = group.child(MIXTURE_ISOTHERMS)? {
            for node_name in sub_collection.child_names()? {
                if let Some(node) = sub_collection.child(&node_name)? {
                    mixture_isotherms.push(self.mix_serializer.load(&node)?);
                }
            }
        }

        let type_text = fields.require_text("experiment_type")?;
        let experiment_type = ExperimentType::parse(&type_text).ok_or_else(|| {
            fields.invalid_attribute(
                "experiment_type",
                format!("unknown experiment type `{type_text}`"),
            )
        })?;

        Ok(Experiment {
            name: fields.require_text("name")?,
            experiment_type,
            temperature: fields.require_real("temperature")?,
            adsorbent,
            monocomponent_isotherms,
            mixture_isotherms,
            comments: fields.optional_text("comments")?,
            paper_url: fields.optional_text("paper_url")?,
            authors: fields.optional_text_list("authors")?,
            year: fields.optional_text("year")?,
            paper_doi: fields.optional_text_list("paper_doi")?,
        })
    }
}

/// Removes sub-collection children whose composite names are not in `kept`.
fn prune_sub_collection(
    group: &Group<'_>,
    name: &str,
    kept: &HashSet<String>,
) -> SerializerResult<()> {
    if let Some(sub_collection) = group.child(name)? {
        for child_name in sub_collection.child_names()? {
            if !kept.contains(&child_name) {
                sub_collection.remove_child(&child_name)?;
            }
        }
    }
    Ok(())
}
