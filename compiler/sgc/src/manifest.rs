//! JSON manifests describing candidate types.
//!
//! A manifest stands in for a host property introspector:
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "com.example.Bean",
//!       "markers": ["toString", "equalsAndHashCode"],
//!       "properties": [
//!         { "name": "name", "type": "java.lang.String" },
//!         { "name": "tags", "type": "java.lang.String[]", "field": "tags" },
//!         { "name": "cache", "type": "java.lang.Object", "excludeFromEqualsAndHash": true }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Without `getter` or `field` a property is read through its conventional
//! getter; `"unreadable": true` models a property with no accessor at all.
//! Class types are always spelled with their qualified name. Candidate types
//! must be top-level: package segments are lowercase by convention, so a
//! segment starting with an uppercase letter (or a binary name with `$`)
//! marks a nested type.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use sg_model::{Accessor, ClassTypeDef, PropertyDef, TypeDef};
use tracing::debug;

use crate::{ManifestError, Markers, TypeCandidate};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeEntry {
    name: String,
    #[serde(default)]
    markers: Vec<MarkerEntry>,
    #[serde(default)]
    properties: Vec<PropertyEntry>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum MarkerEntry {
    ToString,
    EqualsAndHashCode,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct PropertyEntry {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    getter: Option<String>,
    field: Option<String>,
    #[serde(default)]
    unreadable: bool,
    #[serde(default)]
    exclude_from_string: bool,
    #[serde(default)]
    exclude_from_equals_and_hash: bool,
}

/// Read and parse the manifest at `path`.
pub fn load(path: &Path) -> Result<Vec<TypeCandidate>, ManifestError> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let candidates = parse(&text)?;
    debug!(path = %path.display(), types = candidates.len(), "loaded manifest");
    Ok(candidates)
}

/// Parse manifest text into candidates, keeping declaration order.
pub fn parse(text: &str) -> Result<Vec<TypeCandidate>, ManifestError> {
    let manifest: Manifest = serde_json::from_str(text)?;
    manifest.types.into_iter().map(candidate).collect()
}

fn candidate(entry: TypeEntry) -> Result<TypeCandidate, ManifestError> {
    let ty = ClassTypeDef::of(&entry.name);
    if ty.simple_name().is_empty() || entry.name.contains(['[', ']', ' ']) {
        return Err(ManifestError::InvalidTypeName(entry.name));
    }
    let enclosed = ty
        .package()
        .split('.')
        .any(|segment| segment.starts_with(|c: char| c.is_ascii_uppercase()));
    if enclosed || entry.name.contains('$') {
        return Err(ManifestError::NestedType(entry.name));
    }
    let markers = entry
        .markers
        .iter()
        .fold(Markers::empty(), |acc, marker| acc | marker_flag(*marker));
    let properties = entry
        .properties
        .into_iter()
        .map(|p| property(&entry.name, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TypeCandidate {
        ty,
        markers,
        properties,
    })
}

fn marker_flag(marker: MarkerEntry) -> Markers {
    match marker {
        MarkerEntry::ToString => Markers::TO_STRING,
        MarkerEntry::EqualsAndHashCode => Markers::EQUALS_AND_HASH_CODE,
    }
}

fn property(type_name: &str, entry: PropertyEntry) -> Result<PropertyDef, ManifestError> {
    let Some(ty) = TypeDef::parse(&entry.ty) else {
        return Err(ManifestError::InvalidType {
            type_name: type_name.to_owned(),
            property: entry.name,
            ty: entry.ty,
        });
    };
    let mut property = PropertyDef::new(entry.name, ty);
    match (entry.getter, entry.field) {
        (Some(_), Some(_)) => {
            return Err(ManifestError::ConflictingAccessors {
                type_name: type_name.to_owned(),
                property: property.name,
            });
        }
        (Some(getter), None) => property = property.with_accessor(Some(Accessor::Method(getter))),
        (None, Some(field)) => property = property.with_accessor(Some(Accessor::Field(field))),
        (None, None) if entry.unreadable => property = property.with_accessor(None),
        (None, None) => {}
    }
    property.exclude_from_string = entry.exclude_from_string;
    property.exclude_from_equals_and_hash = entry.exclude_from_equals_and_hash;
    Ok(property)
}
