//! Conversion options.
//!
//! Options can be built fluently or loaded from configuration:
//!
//! ```ignore
//! use docfilter::options::{ConvertOptions, TruncationPolicy};
//!
//! let options = ConvertOptions::builder()
//!     .policy(TruncationPolicy::Strict)
//!     .max_depth(16)
//!     .build();
//!
//! let options: ConvertOptions = serde_json::from_str(r#"{ "policy": "strict" }"#)?;
//! ```

use serde::{Deserialize, Serialize};

/// Default limit on nested-record recursion.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What happens when a conversion has to drop data it cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Keep the partial output, record a diagnostic and log a warning.
    #[default]
    Lenient,
    /// Fail the conversion on the first diagnostic.
    Strict,
}

/// Options controlling a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Handling of truncated sequences and depth cut-offs.
    pub policy: TruncationPolicy,
    /// Maximum nesting of records below the root. `None` disables the guard.
    pub max_depth: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            policy: TruncationPolicy::Lenient,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ConvertOptions {
    /// Creates a new options builder starting from the defaults.
    pub fn builder() -> ConvertOptionsBuilder {
        ConvertOptionsBuilder::new()
    }

    /// Returns `true` when diagnostics must fail the conversion.
    pub fn is_strict(&self) -> bool {
        self.policy == TruncationPolicy::Strict
    }
}

/// Fluent builder for [`ConvertOptions`], starting from the defaults.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptionsBuilder {
    options: ConvertOptions,
}

impl ConvertOptionsBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        ConvertOptionsBuilder { options: ConvertOptions::default() }
    }

    /// Sets the truncation policy.
    pub fn policy(mut self, policy: TruncationPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    /// Shorthand for [`TruncationPolicy::Strict`].
    pub fn strict(self) -> Self {
        self.policy(TruncationPolicy::Strict)
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }

    /// Removes the nesting depth guard.
    pub fn unbounded(mut self) -> Self {
        self.options.max_depth = None;
        self
    }

    /// Builds and returns the options.
    pub fn build(self) -> ConvertOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.policy, TruncationPolicy::Lenient);
        assert_eq!(options.max_depth, Some(DEFAULT_MAX_DEPTH));
        assert!(!options.is_strict());
    }

    #[test]
    fn test_builder_chaining() {
        let options = ConvertOptions::builder().strict().max_depth(8).build();
        assert!(options.is_strict());
        assert_eq!(options.max_depth, Some(8));

        let options = ConvertOptions::builder().unbounded().build();
        assert_eq!(options.max_depth, None);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let options: ConvertOptions = serde_json::from_str(r#"{ "policy": "strict" }"#).unwrap();
        assert!(options.is_strict());
        assert_eq!(options.max_depth, Some(DEFAULT_MAX_DEPTH));

        let options: ConvertOptions = serde_json::from_str(r#"{ "max_depth": null }"#).unwrap();
        assert_eq!(options.policy, TruncationPolicy::Lenient);
        assert_eq!(options.max_depth, None);
    }
}
