//! Collection layout for the sample store.
//!
//! Two collections exist: `satellites` (the tracked objects, unique by
//! `sat_id`) and `locations` (position samples referencing a satellite).
//! Deleting a satellite cascades into its location samples.

/// Collection holding satellite records.
pub const SATELLITES: &str = "satellites";

/// Collection holding position samples.
pub const LOCATIONS: &str = "locations";

/// A foreign-key-style constraint: the named field must match an existing
/// document's same field in the target collection.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSpec {
    pub field: &'static str,
    pub collection: &'static str,
}

/// A cascade rule: removing a document also removes all documents in the
/// target collection sharing the named field's value.
#[derive(Debug, Clone, Copy)]
pub struct CascadeSpec {
    pub field: &'static str,
    pub collection: &'static str,
}

/// Constraint configuration for one collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub unique_field: Option<&'static str>,
    pub reference: Option<ReferenceSpec>,
    pub cascade: Option<CascadeSpec>,
}

const COLLECTIONS: &[CollectionSpec] = &[
    CollectionSpec {
        name: SATELLITES,
        unique_field: Some("sat_id"),
        reference: None,
        cascade: Some(CascadeSpec {
            field: "sat_id",
            collection: LOCATIONS,
        }),
    },
    CollectionSpec {
        name: LOCATIONS,
        unique_field: None,
        reference: Some(ReferenceSpec {
            field: "sat_id",
            collection: SATELLITES,
        }),
        cascade: None,
    },
];

/// All collections the store manages.
pub fn collections() -> &'static [CollectionSpec] {
    COLLECTIONS
}

/// Look up the spec for a collection by name.
pub fn spec(name: &str) -> Option<&'static CollectionSpec> {
    COLLECTIONS.iter().find(|spec| spec.name == name)
}
