//! Main docfilter crate: typed records in, MongoDB predicate documents out.
//!
//! This crate is the primary entry point for users of docfilter. It re-exports the
//! core types and functionality from `docfilter-core` together with the
//! `#[derive(Record)]` macro.
//!
//! # Features
//!
//! - **Tag-driven conversion** - Field tags rename, omit, skip or inline fields
//! - **Flattened paths** - Nested records become dotted keys such as `address.city`
//! - **Collections** - Scalar sequences become `$in`, record sequences become `$or`
//! - **Pass-through** - Hand-written documents are never touched
//! - **Diagnostics** - Dropped data can be reported, or turned into errors
//!
//! # Quick Start
//!
//! ```ignore
//! use docfilter::prelude::*;
//! use docfilter::bson::{doc, oid::ObjectId};
//!
//! #[derive(Record, Default)]
//! pub struct Address {
//!     #[filter("city,omitempty")]
//!     pub city: String,
//! }
//!
//! #[derive(Record, Default)]
//! #[filter(collection = "users")]
//! pub struct UserFilter {
//!     #[filter("_id,omitempty")]
//!     pub id: Option<ObjectId>,
//!     #[filter("name,omitempty")]
//!     pub name: String,
//!     #[filter("address")]
//!     pub address: Option<Address>,
//!     #[filter("role")]
//!     pub roles: Vec<String>,
//! }
//!
//! let filter = parse_filter(&UserFilter {
//!     name: "alice".into(),
//!     address: Some(Address { city: "Oslo".into() }),
//!     roles: vec!["admin".into(), "ops".into()],
//!     ..Default::default()
//! });
//!
//! assert_eq!(
//!     filter,
//!     doc! { "name": "alice", "address.city": "Oslo", "role": { "$in": ["admin", "ops"] } }
//! );
//!
//! // Native documents pass through unchanged.
//! let native = doc! { "age": { "$gt": 18 } };
//! assert_eq!(parse_filter(&native), native);
//! ```
//!
//! # Strict Conversion
//!
//! [`parse_filter`] never fails. Use a [`Converter`] to see what was dropped, or to
//! reject inputs that cannot be represented:
//!
//! ```ignore
//! use docfilter::{Converter, ConvertOptions};
//!
//! let converter = Converter::new(ConvertOptions::builder().strict().build());
//! let conversion = converter.convert(&filter)?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docfilter;

pub mod prelude;

pub use docfilter_core::{
    builder, diagnostic, error, options, parse, predicate, record, sequence, tag, value,
};

pub use docfilter_core::{
    error::{FilterError, FilterResult},
    options::{ConvertOptions, TruncationPolicy},
    parse::{Conversion, Converter, parse_filter},
    predicate::Predicate,
    record::Record,
};

pub use docfilter_macros::Record;

// Re-export BSON types for convenience
pub use bson;
