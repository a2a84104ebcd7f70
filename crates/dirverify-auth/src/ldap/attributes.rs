//! Attribute extraction from a matched directory entry

use dirverify_core::{
    AttributeValue, Cardinality, DirectoryEntry, NormalizedAttributes, RequestedAttribute,
};

/// Normalize the requested attributes of `entry`.
///
/// Missing or empty attributes become an empty string. `single` attributes
/// keep their first value, `multi` attributes keep every value.
pub fn extract(entry: &DirectoryEntry, requested: &[RequestedAttribute]) -> NormalizedAttributes {
    requested
        .iter()
        .map(|attribute| {
            let value = match entry.values(&attribute.id) {
                Some(values) if !values.is_empty() => match attribute.cardinality {
                    Cardinality::Single => AttributeValue::Single(values[0].clone()),
                    Cardinality::Multi => AttributeValue::Multi(values.to_vec()),
                },
                _ => AttributeValue::empty(),
            };
            (attribute.name.clone(), value)
        })
        .collect()
}
