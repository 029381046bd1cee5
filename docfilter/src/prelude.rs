//! Convenient re-exports of commonly used types from docfilter.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docfilter::prelude::*;
//! ```
//!
//! `record::Document` is not exported here since it clashes with `bson::Document`.

pub use docfilter_core::{
    builder::{build, record_literal},
    diagnostic::{Diagnostic, DiagnosticKind},
    error::{FilterError, FilterResult},
    options::{ConvertOptions, ConvertOptionsBuilder, TruncationPolicy},
    parse::{AsFilter, Conversion, Converter, parse_filter},
    predicate::{Predicate, object_id},
    record::{Field, Record, require_document, target_collection},
    sequence::build_sequence,
    tag::FieldDescriptor,
    value::{FilterValue, Shape, ValueKind},
};

pub use docfilter_macros::Record;
