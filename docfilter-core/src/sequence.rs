//! Sequence predicate building.
//!
//! A sequence turns into one of two predicates, never both:
//!
//! - scalar (and date-time) elements become `{tag: {"$in": [...]}}`;
//! - record elements are built on their own, prefixed with `tag.`, and combined as
//!   `{"$or": [...]}`.
//!
//! Elements of an unsupported kind (maps, fixed arrays, functions, channels,
//! pointers) stop the walk. Whatever was collected before the offending element is
//! kept and a [`Diagnostic`] is reported.

use bson::{Bson, Document, doc};

use crate::{
    builder::Walk,
    diagnostic::Diagnostic,
    error::FilterResult,
    options::ConvertOptions,
    tag::join_path,
    value::{FilterValue, ValueKind},
};

impl Walk<'_> {
    /// Builds the predicate for `elements` found at path `tag`.
    pub(crate) fn sequence(
        &mut self,
        elements: &[&dyn FilterValue],
        tag: &str,
        depth: usize,
    ) -> FilterResult<Document> {
        let mut scalars: Vec<Bson> = Vec::new();
        let mut branches: Vec<Document> = Vec::new();

        for (index, element) in elements.iter().enumerate() {
            match element.kind() {
                ValueKind::Scalar(value) | ValueKind::DateTime(value) => scalars.push(value),
                ValueKind::Sequence(_) => scalars.push(element.literal()),
                ValueKind::Object(record) => {
                    let branch = self.nested(record, "", depth + 1)?;
                    if !branch.is_empty() {
                        branches.push(branch);
                    }
                }
                ValueKind::Absent => {}
                kind @ (ValueKind::Skip(_) | ValueKind::Array(_) | ValueKind::Map(_)) => {
                    self.report(Diagnostic::truncated(tag, index, kind.name()))?;
                    break;
                }
            }
        }

        if !scalars.is_empty() {
            return Ok(doc! { tag: { "$in": scalars } });
        }

        if !branches.is_empty() {
            let branches = branches
                .into_iter()
                .map(|branch| {
                    branch
                        .into_iter()
                        .map(|(key, value)| (join_path(tag, &key), value))
                        .collect::<Document>()
                })
                .collect::<Vec<_>>();

            return Ok(doc! { "$or": branches });
        }

        Ok(Document::new())
    }
}

/// Builds the predicate of a sequence found at path `tag`, using the default
/// (lenient) options.
///
/// ```ignore
/// assert_eq!(build_sequence(&[1, 2, 3], "score"), doc! { "score": { "$in": [1, 2, 3] } });
/// ```
pub fn build_sequence<T: FilterValue>(elements: &[T], tag: &str) -> Document {
    let elements = elements
        .iter()
        .map(|element| element as &dyn FilterValue)
        .collect::<Vec<_>>();
    let options = ConvertOptions::default();

    Walk::new(&options)
        .sequence(&elements, tag, 0)
        .unwrap_or_default()
}
