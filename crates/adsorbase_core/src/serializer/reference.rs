//! Cross-reference encoding and resolution.
//!
//! # Responsibility
//! - Turn shared-record names into route strings and stored routes back
//!   into records.
//!
//! # Invariants
//! - References are weak: a route whose target was removed resolves to
//!   nothing instead of failing the surrounding load.
//! - Resolution starts at the store root reached by walking parent links
//!   upward from the referencing node.

use crate::serializer::{read_record_fields, AttrRecord, SerializerResult};
use crate::store::Group;

/// Absolute route of a named record inside a root collection.
pub fn collection_route(collection: &str, name: &str) -> String {
    format!("/{collection}/{name}")
}

/// Resolves one stored route from the referencing node.
///
/// Returns `None` when the route no longer points at a node (the shared
/// record was removed after the reference was written).
pub fn resolve_route<T: AttrRecord>(
    group: &Group<'_>,
    route: &str,
) -> SerializerResult<Option<T>> {
    let root = group.root()?;
    match root.resolve(route)? {
        Some(target) => Ok(Some(T::assemble(&read_record_fields::<T>(&target)?)?)),
        None => Ok(None),
    }
}

/// Resolves a stored route list, preserving stored order.
///
/// Dangling routes are skipped; the caller sees only the records that still
/// exist, in their original relative order.
pub fn resolve_routes<T: AttrRecord>(
    group: &Group<'_>,
    routes: &[String],
) -> SerializerResult<Vec<T>> {
    let mut records = Vec::with_capacity(routes.len());
    for route in routes {
        if let Some(record) = resolve_route::<T>(group, route)? {
            records.push(record);
        }
    }
    Ok(records)
}
