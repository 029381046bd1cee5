//! Field tag resolution.
//!
//! Every record field may carry a tag string (given through `#[filter("...")]` when
//! deriving [`Record`](crate::record::Record)). The tag follows the familiar
//! `name,option,option` layout of document serialization tags:
//!
//! | Tag                 | Effect                                                   |
//! |---------------------|----------------------------------------------------------|
//! | *(empty)*           | the declared field name is used                          |
//! | `-`                 | the field is skipped                                     |
//! | `name`              | `name` replaces the declared field name                  |
//! | `name,omitempty`    | renamed, and dropped when the value is the default       |
//! | `,omitempty`        | declared name, dropped when the value is the default     |
//! | `,inline`           | children are merged into the parent path                 |

/// Option marker that suppresses default-valued fields.
const OMIT_EMPTY: &str = "omitempty";

/// Option marker that merges a nested record into its parent path.
const INLINE: &str = "inline";

/// Tag value that removes a field from conversion.
const SKIP: &str = "-";

/// How a single field participates in a conversion, derived from its tag.
///
/// Options are detected by substring, so an option such as `noinlinecache` also
/// enables inlining. Descriptors are resolved once per field and cached alongside
/// the record type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDescriptor {
    /// Path segment contributed by the field. Empty for inline fields.
    pub name: String,
    /// Drop the field when its value is the type's default.
    pub omit_if_default: bool,
    /// Merge the field's children into the parent path.
    pub inline: bool,
    /// Ignore the field entirely.
    pub skip: bool,
}

impl FieldDescriptor {
    /// Resolves the descriptor of a field declared as `declared` with the given tag.
    pub fn parse(declared: &str, tag: &str) -> Self {
        if tag.is_empty() {
            return Self::named(declared);
        }

        if tag == SKIP {
            return FieldDescriptor {
                skip: true,
                ..Self::named(declared)
            };
        }

        let (head, options) = match tag.split_once(',') {
            Some((head, options)) => (head, options),
            None => (tag, ""),
        };

        if tag.contains(INLINE) {
            return FieldDescriptor {
                name: String::new(),
                omit_if_default: options.contains(OMIT_EMPTY),
                inline: true,
                skip: false,
            };
        }

        FieldDescriptor {
            name: if head.is_empty() { declared } else { head }.to_string(),
            omit_if_default: options.contains(OMIT_EMPTY),
            inline: false,
            skip: false,
        }
    }

    fn named(name: &str) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Computes the path of this field below `parent`.
    ///
    /// Inline fields stay at `parent`; other fields append their name, without a
    /// leading separator at the root.
    pub fn path_under(&self, parent: &str) -> String {
        if self.inline {
            parent.to_string()
        } else {
            join_path(parent, &self.name)
        }
    }
}

/// Joins two path segments with a dot, omitting the dot when either side is empty.
pub fn join_path(parent: &str, segment: &str) -> String {
    match (parent.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (_, true) => parent.to_string(),
        _ => format!("{parent}.{segment}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tag_uses_declared_name() {
        let descriptor = FieldDescriptor::parse("user_name", "");
        assert_eq!(descriptor.name, "user_name");
        assert!(!descriptor.omit_if_default);
        assert!(!descriptor.inline);
        assert!(!descriptor.skip);
    }

    #[test]
    fn test_dash_skips_field() {
        let descriptor = FieldDescriptor::parse("secret", "-");
        assert!(descriptor.skip);
    }

    #[test]
    fn test_plain_rename() {
        let descriptor = FieldDescriptor::parse("id", "_id");
        assert_eq!(descriptor.name, "_id");
        assert!(!descriptor.omit_if_default);
    }

    #[test]
    fn test_rename_with_omitempty() {
        let descriptor = FieldDescriptor::parse("id", "_id,omitempty");
        assert_eq!(descriptor.name, "_id");
        assert!(descriptor.omit_if_default);
        assert!(!descriptor.inline);
    }

    #[test]
    fn test_leading_comma_keeps_declared_name() {
        let descriptor = FieldDescriptor::parse("age", ",omitempty");
        assert_eq!(descriptor.name, "age");
        assert!(descriptor.omit_if_default);
    }

    #[test]
    fn test_inline_clears_name() {
        let descriptor = FieldDescriptor::parse("base", ",inline");
        assert_eq!(descriptor.name, "");
        assert!(descriptor.inline);
        assert_eq!(descriptor.path_under("meta"), "meta");
    }

    #[test]
    fn test_options_match_by_substring() {
        let descriptor = FieldDescriptor::parse("cache", "cache,noomitemptyplease");
        assert!(descriptor.omit_if_default);

        let descriptor = FieldDescriptor::parse("base", "base,noinlinecache");
        assert!(descriptor.inline);
    }

    #[test]
    fn test_path_under() {
        let descriptor = FieldDescriptor::parse("city", "");
        assert_eq!(descriptor.path_under(""), "city");
        assert_eq!(descriptor.path_under("address"), "address.city");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a", "b"), "a.b");
        assert_eq!(join_path("a", ""), "a");
    }
}
