//! Hand-written predicate helpers.
//!
//! The [`Predicate`] struct provides a collection of static methods for building
//! native predicate documents directly:
//!
//! - Comparison: `eq`, `ne`, `gt`, `gte`, `lt`, `lte`
//! - Membership: `in_`, `nin`
//! - Logical: `and`, `or`, `combine`
//! - Updates: `set`, `set_serialized`
//! - Soft deletion: `undeleted`, `by_id`, `undeleted_by_id`
//!
//! Their output is a native document, so it passes through
//! [`parse_filter`](crate::parse::parse_filter) unchanged and can be mixed freely
//! with converted records:
//!
//! ```ignore
//! use docfilter::{Predicate, parse_filter};
//!
//! let filter = Predicate::and([
//!     parse_filter(&UserFilter { name: "alice".into(), ..Default::default() }),
//!     Predicate::gte("age", 18),
//!     Predicate::undeleted(),
//! ]);
//! ```

use bson::{Bson, Document, doc, oid::ObjectId, ser::serialize_to_bson};
use serde::Serialize;

use crate::{
    error::{FilterError, FilterResult},
    value::FilterValue,
};

/// Field holding the soft-deletion timestamp.
pub const DELETED_AT: &str = "deleted_at";

/// Field holding the document identifier.
pub const ID: &str = "_id";

/// Helper struct for constructing predicate documents.
pub struct Predicate;

impl Predicate {
    fn field(field: impl Into<String>, op: &str, value: impl Into<Bson>) -> Document {
        let field: String = field.into();
        let value: Bson = value.into();

        doc! { field: { op: value } }
    }

    /// Matches documents where the field equals the value: `{field: {$eq: value}}`.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Document {
        Self::field(field, "$eq", value)
    }

    /// Matches documents where the field differs from the value.
    pub fn ne(field: impl Into<String>, value: impl Into<Bson>) -> Document {
        Self::field(field, "$ne", value)
    }

    /// Matches documents where the field is greater than the value.
    pub fn gt(field: impl Into<String>, value: impl Into<Bson>) -> Document {
        Self::field(field, "$gt", value)
    }

    /// Matches documents where the field is greater than or equal to the value.
    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Document {
        Self::field(field, "$gte", value)
    }

    /// Matches documents where the field is less than the value.
    pub fn lt(field: impl Into<String>, value: impl Into<Bson>) -> Document {
        Self::field(field, "$lt", value)
    }

    /// Matches documents where the field is less than or equal to the value.
    pub fn lte(field: impl Into<String>, value: impl Into<Bson>) -> Document {
        Self::field(field, "$lte", value)
    }

    /// Matches documents where the field is one of the values.
    pub fn in_(field: impl Into<String>, values: impl Into<Bson>) -> Document {
        Self::field(field, "$in", values)
    }

    /// Matches documents where the field is none of the values.
    pub fn nin(field: impl Into<String>, values: impl Into<Bson>) -> Document {
        Self::field(field, "$nin", values)
    }

    /// Combines filters under `operator` (`$and`, `$or`, `$nor`, ...).
    ///
    /// Zero filters produce an empty document rather than an empty combinator.
    pub fn combine(operator: &str, filters: impl IntoIterator<Item = Document>) -> Document {
        let filters = filters.into_iter().collect::<Vec<_>>();

        if filters.is_empty() {
            return Document::new();
        }

        doc! { operator: filters }
    }

    /// All filters must match: `{$and: [...]}`.
    pub fn and(filters: impl IntoIterator<Item = Document>) -> Document {
        Self::combine("$and", filters)
    }

    /// Any filter may match: `{$or: [...]}`.
    pub fn or(filters: impl IntoIterator<Item = Document>) -> Document {
        Self::combine("$or", filters)
    }

    /// Wraps a value as an update payload: `{$set: value}`.
    ///
    /// Records render through their tags (see
    /// [`record_literal`](crate::builder::record_literal)), so `omitempty` fields are
    /// left untouched by the update.
    pub fn set<V: FilterValue + ?Sized>(value: &V) -> Document {
        doc! { "$set": value.literal() }
    }

    /// Wraps any serializable value as an update payload: `{$set: value}`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Serialization`] if the value cannot be represented as BSON.
    pub fn set_serialized<T: Serialize + ?Sized>(value: &T) -> FilterResult<Document> {
        let value = serialize_to_bson(value)?;
        Ok(doc! { "$set": value })
    }

    /// Matches documents that have not been soft-deleted.
    pub fn undeleted() -> Document {
        Self::eq(DELETED_AT, Bson::Null)
    }

    /// Matches the document with the given identifier: `{_id: id}`.
    pub fn by_id(id: ObjectId) -> Document {
        doc! { ID: id }
    }

    /// Matches the document with the given identifier, if it has not been soft-deleted.
    pub fn undeleted_by_id(id: ObjectId) -> Document {
        Self::and([Self::undeleted(), Self::by_id(id)])
    }
}

/// Reads an object id from either an `ObjectId` value or its hex representation.
///
/// # Errors
///
/// Returns [`FilterError::InvalidObjectId`] for malformed strings and other value types.
pub fn object_id(id: &Bson) -> FilterResult<ObjectId> {
    match id {
        Bson::ObjectId(oid) => Ok(*oid),
        Bson::String(hex) => ObjectId::parse_str(hex)
            .map_err(|e| FilterError::InvalidObjectId(format!("{hex}: {e}"))),
        other => Err(FilterError::InvalidObjectId(format!(
            "unsupported id type {:?}",
            other.element_type()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_comparisons() {
        assert_eq!(Predicate::eq("name", "alice"), doc! { "name": { "$eq": "alice" } });
        assert_eq!(Predicate::ne("name", "bob"), doc! { "name": { "$ne": "bob" } });
        assert_eq!(Predicate::gt("age", 18), doc! { "age": { "$gt": 18 } });
        assert_eq!(Predicate::gte("age", 18), doc! { "age": { "$gte": 18 } });
        assert_eq!(Predicate::lt("age", 65), doc! { "age": { "$lt": 65 } });
        assert_eq!(Predicate::lte("age", 65), doc! { "age": { "$lte": 65 } });
    }

    #[test]
    fn test_membership() {
        assert_eq!(
            Predicate::in_("status", vec!["active", "pending"]),
            doc! { "status": { "$in": ["active", "pending"] } }
        );
        assert_eq!(
            Predicate::nin("score", vec![1, 2]),
            doc! { "score": { "$nin": [1, 2] } }
        );
    }

    #[test]
    fn test_and_or() {
        let f1 = Predicate::eq("a", 1);
        let f2 = Predicate::gt("b", 2);

        assert_eq!(
            Predicate::and([f1.clone(), f2.clone()]),
            doc! { "$and": [{ "a": { "$eq": 1 } }, { "b": { "$gt": 2 } }] }
        );
        assert_eq!(
            Predicate::or([f1, f2]),
            doc! { "$or": [{ "a": { "$eq": 1 } }, { "b": { "$gt": 2 } }] }
        );
    }

    #[test]
    fn test_empty_combinators() {
        assert_eq!(Predicate::and([]), doc! {});
        assert_eq!(Predicate::or(Vec::new()), doc! {});
        assert_eq!(Predicate::combine("$nor", []), doc! {});
    }

    #[test]
    fn test_set() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "alice".to_string());
        assert_eq!(Predicate::set(&fields), doc! { "$set": { "name": "alice" } });
    }

    #[test]
    fn test_set_serialized() {
        #[derive(Serialize)]
        struct Update {
            name: String,
            age: i32,
        }

        let update = Update { name: "alice".into(), age: 30 };
        assert_eq!(
            Predicate::set_serialized(&update),
            Ok(doc! { "$set": { "name": "alice", "age": 30 } })
        );
    }

    #[test]
    fn test_soft_delete_helpers() {
        let id = ObjectId::new();

        assert_eq!(Predicate::undeleted(), doc! { "deleted_at": { "$eq": null } });
        assert_eq!(Predicate::by_id(id), doc! { "_id": id });
        assert_eq!(
            Predicate::undeleted_by_id(id),
            doc! { "$and": [{ "deleted_at": { "$eq": null } }, { "_id": id }] }
        );
    }

    #[test]
    fn test_object_id() {
        let id = ObjectId::new();

        assert_eq!(object_id(&Bson::ObjectId(id)), Ok(id));
        assert_eq!(object_id(&Bson::String(id.to_hex())), Ok(id));
        assert!(matches!(
            object_id(&Bson::String("not-hex".into())),
            Err(FilterError::InvalidObjectId(_))
        ));
        assert!(matches!(object_id(&Bson::Int32(1)), Err(FilterError::InvalidObjectId(_))));
    }
}
