//! Procedural macros for the docfilter project.
//!
//! This crate provides the `#[derive(Record)]` macro, which makes a struct usable as
//! a filter argument. It should be used through the `docfilter` crate, which
//! re-exports it next to the traits the generated code refers to.

#[allow(unused_extern_crates)]
extern crate self as docfilter_macros;

mod attrs;
mod derive;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `Record`, `FilterValue` and, optionally, `Document` for a struct.
///
/// # Field Attributes
///
/// Each field may carry a tag string that controls how it is converted:
///
/// | Tag                         | Effect                                             |
/// |-----------------------------|----------------------------------------------------|
/// | *(none)*                    | the field name is used as the path segment         |
/// | `#[filter("-")]`            | the field is ignored                               |
/// | `#[filter("name")]`         | `name` replaces the field name                     |
/// | `#[filter("name,omitempty")]` | renamed, and dropped when default-valued         |
/// | `#[filter(",inline")]`      | children of a nested record merge into the parent  |
///
/// # Container Attributes
///
/// `#[filter(collection = "users")]` names the collection the record targets and
/// implements the `Document` capability.
///
/// # Example
///
/// ```ignore
/// use docfilter::{Record, parse_filter};
///
/// #[derive(Record, Default)]
/// pub struct Audit {
///     #[filter("created_by,omitempty")]
///     pub created_by: String,
/// }
///
/// #[derive(Record, Default)]
/// #[filter(collection = "users")]
/// pub struct UserFilter {
///     #[filter("name,omitempty")]
///     pub name: String,
///     #[filter(",inline")]
///     pub audit: Audit,
///     #[filter("-")]
///     pub cursor: String,
/// }
///
/// let filter = parse_filter(&UserFilter {
///     name: "alice".into(),
///     audit: Audit { created_by: "admin".into() },
///     ..Default::default()
/// });
/// // { "name": "alice", "created_by": "admin" }
/// ```
///
/// Generic type parameters receive a `FilterValue` bound.
#[proc_macro_derive(Record, attributes(filter))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
