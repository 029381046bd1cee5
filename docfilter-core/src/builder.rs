//! Recursive document building.
//!
//! The builder walks a [`Record`] field by field and accumulates a flat predicate
//! document keyed by dotted paths:
//!
//! - nested records are recursed into under `parent.field`, or under `parent` when
//!   the field is inline;
//! - sequences are handed to the sequence builder (see [`crate::sequence`]) under the
//!   field's own name, not its dotted path;
//! - maps contribute one entry per key at `path.key`;
//! - everything else is assigned as a leaf, unless it is default-valued and tagged
//!   `omitempty`.
//!
//! Later writes overwrite earlier ones when two fields resolve to the same path.

use bson::{Bson, Document};

use crate::{
    diagnostic::Diagnostic,
    error::FilterResult,
    options::ConvertOptions,
    record::Record,
    tag::join_path,
    value::ValueKind,
};

/// State threaded through a single conversion.
pub(crate) struct Walk<'o> {
    pub(crate) options: &'o ConvertOptions,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'o> Walk<'o> {
    pub(crate) fn new(options: &'o ConvertOptions) -> Self {
        Self { options, diagnostics: Vec::new() }
    }

    /// Records a diagnostic, or turns it into an error in strict mode.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) -> FilterResult<()> {
        if self.options.is_strict() {
            return Err(diagnostic.into());
        }

        tracing::warn!("Dropped data during filter conversion: {}", diagnostic);
        self.diagnostics.push(diagnostic);

        Ok(())
    }

    /// Builds a nested record at `depth`, honoring the depth guard.
    pub(crate) fn nested(
        &mut self,
        record: &dyn Record,
        parent: &str,
        depth: usize,
    ) -> FilterResult<Document> {
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                self.report(Diagnostic::depth_exceeded(parent, limit))?;
                return Ok(Document::new());
            }
        }

        self.record(record, parent, depth)
    }

    /// Builds the predicate document of `record` below `parent`.
    pub(crate) fn record(
        &mut self,
        record: &dyn Record,
        parent: &str,
        depth: usize,
    ) -> FilterResult<Document> {
        let mut document = Document::new();

        if record.is_default() {
            return Ok(document);
        }

        for field in record.fields() {
            let descriptor = field.descriptor;
            if descriptor.skip {
                continue;
            }

            let path = descriptor.path_under(parent);
            let kind = field.value.kind();
            tracing::trace!("Converting field '{}' as {}", path, kind.name());

            match kind {
                ValueKind::Skip(_) | ValueKind::Absent => {}
                ValueKind::Object(inner) => {
                    merge(&mut document, self.nested(inner, &path, depth + 1)?);
                }
                ValueKind::Sequence(elements) | ValueKind::Array(elements) => {
                    merge(&mut document, self.sequence(&elements, &descriptor.name, depth)?);
                }
                ValueKind::Map(entries) => {
                    for (key, value) in entries {
                        document.insert(join_path(&path, &key), value);
                    }
                }
                ValueKind::Scalar(value) | ValueKind::DateTime(value) => {
                    if descriptor.omit_if_default && field.value.is_default() {
                        continue;
                    }
                    document.insert(path, value);
                }
            }
        }

        Ok(document)
    }
}

fn merge(target: &mut Document, source: Document) {
    for (key, value) in source {
        target.insert(key, value);
    }
}

/// Builds the predicate document of `record` below `parent`, using the default
/// (lenient) options.
///
/// # Example
///
/// ```ignore
/// let filter = build(&UserFilter { name: "alice".into(), ..Default::default() }, "");
/// assert_eq!(filter, doc! { "name": "alice" });
/// ```
pub fn build(record: &dyn Record, parent: &str) -> Document {
    let options = ConvertOptions::default();
    Walk::new(&options)
        .record(record, parent, 0)
        .unwrap_or_default()
}

/// Renders `record` as a plain nested document, the way it would be stored.
///
/// Tags are honored (renames, `omitempty`, `inline`, `-`) but paths are not
/// flattened and sequences stay literal arrays. Used for `$set` payloads and for
/// records held as map values.
pub fn record_literal(record: &dyn Record) -> Document {
    let mut document = Document::new();

    for field in record.fields() {
        let descriptor = field.descriptor;
        if descriptor.skip
            || matches!(field.value.kind(), ValueKind::Skip(_))
            || (descriptor.omit_if_default && field.value.is_default())
        {
            continue;
        }

        match (descriptor.inline, field.value.literal()) {
            (true, Bson::Document(inner)) => merge(&mut document, inner),
            (true, _) => {}
            (false, value) => {
                document.insert(descriptor.name.clone(), value);
            }
        }
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use std::{
        collections::BTreeMap,
        rc::Rc,
        sync::{Arc, OnceLock},
    };

    use crate::{
        record::Field,
        tag::FieldDescriptor,
        value::{FilterValue, Shape},
    };

    macro_rules! test_record {
        ($name:ident { $($field:ident : $ty:ty = $tag:literal),* $(,)? }) => {
            #[derive(Default)]
            struct $name {
                $($field: $ty),*
            }

            impl Record for $name {
                fn fields(&self) -> Vec<Field<'_>> {
                    static DESCRIPTORS: OnceLock<Vec<FieldDescriptor>> = OnceLock::new();
                    let descriptors = DESCRIPTORS.get_or_init(|| {
                        vec![$(FieldDescriptor::parse(stringify!($field), $tag)),*]
                    });
                    descriptors
                        .iter()
                        .zip([$(&self.$field as &dyn FilterValue),*])
                        .map(|(descriptor, value)| Field::new(descriptor, value))
                        .collect()
                }

                fn is_default(&self) -> bool {
                    true $(&& FilterValue::is_default(&self.$field))*
                }
            }

            impl FilterValue for $name {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Object(self)
                }

                fn is_default(&self) -> bool {
                    Record::is_default(self)
                }

                fn literal(&self) -> Bson {
                    Bson::Document(record_literal(self))
                }

                fn shape() -> Shape {
                    Shape::Record
                }
            }
        };
    }

    test_record!(Leaf { c: i32 = "" });
    test_record!(Middle { b: Leaf = "" });
    test_record!(Outer { a: Middle = "" });

    test_record!(Audit {
        created_by: String = "created_by,omitempty",
        version: i32 = "",
    });

    test_record!(User {
        name: String = "name,omitempty",
        age: i32 = "age",
        nickname: String = "nick,omitempty",
        secret: String = "-",
        audit: Audit = ",inline",
        address: Option<Leaf> = "address",
        attrs: BTreeMap<String, i32> = "attrs",
        scores: Vec<i32> = "score",
    });

    test_record!(Clash {
        first: i32 = "x",
        second: i32 = "x",
    });

    test_record!(Shadow {
        version: i32 = "version",
        audit: Audit = ",inline",
    });

    test_record!(Holder {
        name: String = "name",
        boxed: Option<Box<Leaf>> = "boxed",
        shared: Option<Arc<Leaf>> = "shared",
        counted: Option<Rc<Leaf>> = "counted",
    });

    test_record!(Tagged { tags: Vec<String> = "tags", items: Vec<Leaf> = "items" });
    test_record!(Container { inner: Tagged = "inner" });

    #[test]
    fn test_default_record_is_empty() {
        assert_eq!(build(&User::default(), ""), doc! {});
    }

    #[test]
    fn test_three_levels_deep() {
        let outer = Outer { a: Middle { b: Leaf { c: 7 } } };
        assert_eq!(build(&outer, ""), doc! { "a.b.c": 7 });
    }

    #[test]
    fn test_parent_path_prefixes_keys() {
        let leaf = Leaf { c: 1 };
        assert_eq!(build(&leaf, "root"), doc! { "root.c": 1 });
    }

    #[test]
    fn test_omitempty_and_zero_values() {
        let user = User { name: "alice".into(), ..Default::default() };
        let filter = build(&user, "");

        assert_eq!(filter.get("name"), Some(&Bson::String("alice".into())));
        assert_eq!(filter.get("age"), Some(&Bson::Int32(0)));
        assert!(!filter.contains_key("nick"));
        assert!(!filter.contains_key("secret"));
    }

    #[test]
    fn test_inline_merges_into_parent() {
        let user = User {
            name: "bob".into(),
            audit: Audit { created_by: "admin".into(), version: 2 },
            ..Default::default()
        };
        let filter = build(&user, "");

        assert_eq!(filter.get("created_by"), Some(&Bson::String("admin".into())));
        assert_eq!(filter.get("version"), Some(&Bson::Int32(2)));
        assert!(!filter.contains_key("audit"));
        assert!(!filter.keys().any(|key| key.starts_with("audit.")));
    }

    #[test]
    fn test_absent_nested_record_contributes_nothing() {
        let user = User { name: "carol".into(), ..Default::default() };
        let filter = build(&user, "");
        assert!(!filter.keys().any(|key| key.starts_with("address")));

        let user = User { address: Some(Leaf { c: 3 }), ..user };
        assert_eq!(build(&user, "").get("address.c"), Some(&Bson::Int32(3)));
    }

    #[test]
    fn test_map_entries_are_dotted_leaves() {
        let mut attrs = BTreeMap::new();
        attrs.insert("x".to_string(), 1);
        attrs.insert("y".to_string(), 2);
        let user = User { age: 30, attrs, ..Default::default() };

        let filter = build(&user, "");
        assert_eq!(filter.get("attrs.x"), Some(&Bson::Int32(1)));
        assert_eq!(filter.get("attrs.y"), Some(&Bson::Int32(2)));
    }

    #[test]
    fn test_empty_map_and_sequence_contribute_nothing() {
        let user = User { age: 30, ..Default::default() };
        let filter = build(&user, "");
        assert_eq!(filter, doc! { "age": 30 });
    }

    #[test]
    fn test_scalar_sequence_becomes_in() {
        let user = User { scores: vec![1, 2, 3], ..Default::default() };
        let filter = build(&user, "");
        assert_eq!(filter, doc! { "age": 0, "score": { "$in": [1, 2, 3] } });
    }

    #[test]
    fn test_record_literal_is_nested() {
        let user = User {
            name: "dave".into(),
            address: Some(Leaf { c: 4 }),
            audit: Audit { created_by: String::new(), version: 1 },
            ..Default::default()
        };

        assert_eq!(
            record_literal(&user),
            doc! {
                "name": "dave",
                "age": 0,
                "version": 1,
                "address": { "c": 4 },
                "attrs": {},
                "score": [],
            }
        );
    }

    #[test]
    fn test_later_fields_win_on_same_path() {
        assert_eq!(build(&Clash { first: 1, second: 2 }, ""), doc! { "x": 2 });
    }

    #[test]
    fn test_inline_child_overwrites_parent_field() {
        let shadow = Shadow {
            version: 1,
            audit: Audit { created_by: String::new(), version: 5 },
        };
        assert_eq!(build(&shadow, ""), doc! { "version": 5 });
    }

    #[test]
    fn test_unset_pointer_to_record_is_absent() {
        let holder = Holder { name: "n".into(), ..Default::default() };
        assert_eq!(build(&holder, ""), doc! { "name": "n" });

        let holder = Holder {
            boxed: Some(Box::new(Leaf { c: 2 })),
            shared: Some(Arc::new(Leaf { c: 3 })),
            ..holder
        };
        assert_eq!(
            build(&holder, ""),
            doc! { "name": "n", "boxed.c": 2, "shared.c": 3 }
        );
    }

    #[test]
    fn test_nested_sequences_use_local_name() {
        let container = Container {
            inner: Tagged { tags: vec!["a".into(), "b".into()], ..Default::default() },
        };
        assert_eq!(build(&container, ""), doc! { "tags": { "$in": ["a", "b"] } });

        let container = Container {
            inner: Tagged { items: vec![Leaf { c: 1 }, Leaf { c: 2 }], ..Default::default() },
        };
        assert_eq!(
            build(&container, ""),
            doc! { "$or": [{ "items.c": 1 }, { "items.c": 2 }] }
        );
    }

    #[test]
    fn test_depth_guard_drops_deep_records() {
        let outer = Outer { a: Middle { b: Leaf { c: 7 } } };
        let options = ConvertOptions::builder().max_depth(1).build();
        let mut walk = Walk::new(&options);

        let filter = walk.record(&outer, "", 0).unwrap();
        assert_eq!(filter, doc! {});
        assert_eq!(walk.diagnostics, vec![Diagnostic::depth_exceeded("a.b", 1)]);
    }

    #[test]
    fn test_depth_guard_strict_fails() {
        let outer = Outer { a: Middle { b: Leaf { c: 7 } } };
        let options = ConvertOptions::builder().max_depth(1).strict().build();

        let result = Walk::new(&options).record(&outer, "", 0);
        assert_eq!(
            result,
            Err(crate::error::FilterError::DepthExceeded { path: "a.b".into(), limit: 1 })
        );
    }
}
