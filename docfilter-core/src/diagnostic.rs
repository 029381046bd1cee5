//! Diagnostics for data dropped during a conversion.
//!
//! The converter never fails on unsupported shapes by default. Instead, whenever it
//! has to discard part of the input it records a [`Diagnostic`], so callers can tell
//! an intentionally absent field from one that could not be represented.

use std::fmt;

use crate::error::FilterError;

/// Why part of the input was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A sequence walk stopped at an element of an unsupported kind. Elements before
    /// `index` were kept; the element at `index` and everything after it were not.
    TruncatedSequence {
        /// Position of the offending element.
        index: usize,
        /// Kind name of the offending element.
        element: &'static str,
    },
    /// A nested record sat deeper than the configured limit and was dropped.
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

/// A single dropped-data report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Dotted path where data was dropped.
    pub path: String,
    /// What was dropped and why.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub(crate) fn truncated(path: &str, index: usize, element: &'static str) -> Self {
        Diagnostic {
            path: path.to_string(),
            kind: DiagnosticKind::TruncatedSequence { index, element },
        }
    }

    pub(crate) fn depth_exceeded(path: &str, limit: usize) -> Self {
        Diagnostic {
            path: path.to_string(),
            kind: DiagnosticKind::DepthExceeded { limit },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::TruncatedSequence { index, element } => write!(
                f,
                "sequence at '{}' truncated at index {} by unsupported {} element",
                self.path, index, element
            ),
            DiagnosticKind::DepthExceeded { limit } => write!(
                f,
                "record at '{}' dropped: nesting deeper than {}",
                self.path, limit
            ),
        }
    }
}

impl From<Diagnostic> for FilterError {
    fn from(diagnostic: Diagnostic) -> Self {
        match diagnostic.kind {
            DiagnosticKind::TruncatedSequence { element, .. } => FilterError::UnsupportedElement {
                path: diagnostic.path,
                kind: element,
            },
            DiagnosticKind::DepthExceeded { limit } => FilterError::DepthExceeded {
                path: diagnostic.path,
                limit,
            },
        }
    }
}
