//! Conversion of typed records into MongoDB query predicate documents.
//!
//! This crate is the core of the docfilter project and provides:
//!
//! - **Tag resolution** ([`tag`]) - Parsing of `name,omitempty` / `,inline` / `-` field tags
//! - **Value classification** ([`value`]) - How each field type contributes to a predicate
//! - **Record traits** ([`record`]) - The walkable record abstraction and the collection capability
//! - **Document building** ([`builder`]) - Flattening of records into dotted-path predicates
//! - **Sequence building** ([`sequence`]) - `$in` and `$or` predicates for collections
//! - **Filter entry point** ([`parse`]) - Pass-through of native documents, conversion of records
//! - **Predicate helpers** ([`predicate`]) - Hand-written comparison, logical and update documents
//! - **Options and diagnostics** ([`options`], [`diagnostic`]) - Strictness, depth limits and dropped-data reports
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docfilter::{Record, parse_filter};
//! use bson::doc;
//!
//! #[derive(Record, Default)]
//! #[filter(collection = "users")]
//! pub struct UserFilter {
//!     #[filter("name,omitempty")]
//!     pub name: String,
//!     #[filter("age,omitempty")]
//!     pub age: i32,
//!     #[filter("tag")]
//!     pub tags: Vec<String>,
//! }
//!
//! let filter = parse_filter(&UserFilter {
//!     name: "alice".into(),
//!     tags: vec!["admin".into(), "ops".into()],
//!     ..Default::default()
//! });
//!
//! assert_eq!(filter, doc! { "name": "alice", "tag": { "$in": ["admin", "ops"] } });
//! ```

#[allow(unused_extern_crates)]
extern crate self as docfilter_core;

pub mod builder;
pub mod diagnostic;
pub mod error;
pub mod options;
pub mod parse;
pub mod predicate;
pub mod record;
pub mod sequence;
pub mod tag;
pub mod value;
