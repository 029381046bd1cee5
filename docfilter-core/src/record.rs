//! Record traits.
//!
//! A [`Record`] is a struct whose fields can be walked by the converter. It exposes
//! each field together with the [`FieldDescriptor`] resolved from its tag. Records are
//! normally derived:
//!
//! ```ignore
//! use docfilter::Record;
//!
//! #[derive(Record, Default)]
//! #[filter(collection = "users")]
//! pub struct UserFilter {
//!     #[filter("_id,omitempty")]
//!     pub id: Option<ObjectId>,
//!     #[filter("name,omitempty")]
//!     pub name: String,
//!     #[filter(",inline")]
//!     pub audit: Audit,
//! }
//! ```
//!
//! The [`Document`] capability is the collection-naming hook used by store facades.

use crate::{
    error::{FilterError, FilterResult},
    tag::FieldDescriptor,
    value::FilterValue,
};

/// A single field of a record: its resolved descriptor and its value.
pub struct Field<'a> {
    /// Descriptor resolved from the field's tag.
    pub descriptor: &'a FieldDescriptor,
    /// The field's value.
    pub value: &'a dyn FilterValue,
}

impl<'a> Field<'a> {
    /// Pairs a descriptor with a value.
    pub fn new(descriptor: &'a FieldDescriptor, value: &'a dyn FilterValue) -> Self {
        Self { descriptor, value }
    }
}

/// A struct whose fields can be converted into a predicate document.
pub trait Record {
    /// Returns the fields of this record in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Returns `true` when every field holds its default value.
    fn is_default(&self) -> bool;

    /// Name of the record type, used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the collection-naming capability, if the record has one.
    fn as_document(&self) -> Option<&dyn Document> {
        None
    }
}

/// Capability of a record that knows which collection it targets.
pub trait Document {
    /// Returns the stable name of the collection this record belongs to.
    fn collection_name(&self) -> &str;
}

/// Resolves the collection a filter targets.
///
/// An explicit override wins; otherwise the record's [`Document`] capability is used.
///
/// # Errors
///
/// Returns [`FilterError::CollectionNameNotFound`] when neither is available.
pub fn target_collection<'a>(
    record: &'a dyn Record,
    explicit: Option<&'a str>,
) -> FilterResult<&'a str> {
    explicit
        .filter(|name| !name.is_empty())
        .or_else(|| record.as_document().map(|document| document.collection_name()))
        .ok_or(FilterError::CollectionNameNotFound)
}

/// Requires a record to expose the [`Document`] capability.
///
/// # Errors
///
/// Returns [`FilterError::InvalidDocument`] when the record has no collection name.
pub fn require_document(record: &dyn Record) -> FilterResult<&dyn Document> {
    record
        .as_document()
        .ok_or_else(|| FilterError::InvalidDocument(record.type_name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    struct Named {
        name: String,
    }

    impl Record for Named {
        fn fields(&self) -> Vec<Field<'_>> {
            static DESCRIPTORS: OnceLock<Vec<FieldDescriptor>> = OnceLock::new();
            let descriptors = DESCRIPTORS.get_or_init(|| vec![FieldDescriptor::parse("name", "")]);
            descriptors
                .iter()
                .zip([&self.name as &dyn FilterValue])
                .map(|(descriptor, value)| Field::new(descriptor, value))
                .collect()
        }

        fn is_default(&self) -> bool {
            self.name.is_empty()
        }

        fn as_document(&self) -> Option<&dyn Document> {
            Some(self)
        }
    }

    impl Document for Named {
        fn collection_name(&self) -> &str {
            "named"
        }
    }

    struct Anonymous;

    impl Record for Anonymous {
        fn fields(&self) -> Vec<Field<'_>> {
            Vec::new()
        }

        fn is_default(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_explicit_collection_wins() {
        let record = Named { name: "x".into() };
        assert_eq!(target_collection(&record, Some("override")), Ok("override"));
    }

    #[test]
    fn test_collection_from_capability() {
        let record = Named { name: "x".into() };
        assert_eq!(target_collection(&record, None), Ok("named"));
        assert_eq!(target_collection(&record, Some("")), Ok("named"));
    }

    #[test]
    fn test_collection_not_found() {
        assert_eq!(
            target_collection(&Anonymous, None),
            Err(FilterError::CollectionNameNotFound)
        );
    }

    #[test]
    fn test_require_document() {
        let record = Named { name: "x".into() };
        assert_eq!(require_document(&record).map(|d| d.collection_name().to_string()), Ok("named".to_string()));

        match require_document(&Anonymous) {
            Err(FilterError::InvalidDocument(name)) => assert!(name.ends_with("Anonymous")),
            _ => panic!("expected invalid document"),
        }
    }
}
