//! Filter entry point.
//!
//! [`parse_filter`] is what store facades call before handing a filter or update
//! argument to the driver. Native documents pass through untouched, so callers can
//! always hand-write a predicate and bypass conversion. Records are converted with
//! an empty parent path.
//!
//! [`Converter`] is the configurable form: it reports dropped data as diagnostics
//! and can be made strict.

use bson::Document;

use crate::{
    builder::Walk,
    diagnostic::Diagnostic,
    error::FilterResult,
    options::ConvertOptions,
    record::Record,
};

/// How an input reaches the converter.
pub enum FilterSource<'a> {
    /// Already a predicate document.
    Native(&'a Document),
    /// A record to convert.
    Record(&'a dyn Record),
}

/// Anything that can be used as a filter.
pub trait AsFilter {
    /// Exposes this value to the converter.
    fn as_filter(&self) -> FilterSource<'_>;
}

impl AsFilter for Document {
    fn as_filter(&self) -> FilterSource<'_> {
        FilterSource::Native(self)
    }
}

impl<R: Record> AsFilter for R {
    fn as_filter(&self) -> FilterSource<'_> {
        FilterSource::Record(self)
    }
}

/// The outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conversion {
    /// The predicate document.
    pub document: Document,
    /// Reports of data that could not be represented.
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Returns `true` when nothing was dropped.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Converts filters according to a set of [`ConvertOptions`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Creates a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this converter.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts `input` into a predicate document.
    ///
    /// # Errors
    ///
    /// Only fails under [`TruncationPolicy::Strict`](crate::options::TruncationPolicy::Strict),
    /// with the first dropped-data report turned into a
    /// [`FilterError`](crate::error::FilterError).
    pub fn convert<F: AsFilter + ?Sized>(&self, input: &F) -> FilterResult<Conversion> {
        match input.as_filter() {
            FilterSource::Native(document) => {
                tracing::trace!("Passing native filter through with {} keys", document.len());
                Ok(Conversion {
                    document: document.clone(),
                    diagnostics: Vec::new(),
                })
            }
            FilterSource::Record(record) => self.convert_record(record, ""),
        }
    }

    /// Converts `record` with all keys placed below `parent`.
    ///
    /// # Errors
    ///
    /// See [`Converter::convert`].
    pub fn convert_record(&self, record: &dyn Record, parent: &str) -> FilterResult<Conversion> {
        let mut walk = Walk::new(&self.options);
        let document = walk.record(record, parent, 0)?;

        tracing::debug!(
            "Converted {} into a filter with {} keys ({} diagnostics)",
            record.type_name(),
            document.len(),
            walk.diagnostics.len()
        );

        Ok(Conversion {
            document,
            diagnostics: walk.diagnostics,
        })
    }
}

/// Turns a filter argument into its wire-level predicate document.
///
/// Native documents are returned unchanged; records are converted leniently. This
/// never fails: unsupported shapes degrade to partial or empty output.
///
/// # Example
///
/// ```ignore
/// let native = doc! { "age": { "$gt": 18 } };
/// assert_eq!(parse_filter(&native), native);
///
/// let converted = parse_filter(&UserFilter { name: "alice".into(), ..Default::default() });
/// assert_eq!(converted, doc! { "name": "alice" });
/// ```
pub fn parse_filter<F: AsFilter + ?Sized>(input: &F) -> Document {
    Converter::default()
        .convert(input)
        .map(|conversion| conversion.document)
        .unwrap_or_default()
}
