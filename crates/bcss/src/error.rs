//! Error types for the CSS object model and selector rewriting.

use thiserror::Error;

/// Errors raised while parsing or rewriting selectors and related strings.
///
/// # Examples
///
/// ```rust
/// use bcss::selector::build_selector_variant;
/// use bcss::BcssError;
///
/// let result = build_selector_variant("div", "sm", ":");
/// assert!(matches!(result, Err(BcssError::NoClassInSelector { .. })));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BcssError {
    /// The selector could not be tokenized.
    ///
    /// The string contains the offending selector and what was left unparsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// A variant was requested for a selector that has no class to prefix.
    #[error("Variant cannot be generated because selector contains no classes.")]
    NoClassInSelector { selector: String },

    /// A brace was opened and never closed, or closed without being opened.
    #[error("The pattern `{input}` is not balanced.")]
    UnbalancedBrackets { input: String },

    /// A brace sequence like `{0..10..0}` can never terminate.
    #[error("Step cannot be zero in sequence expansion: {0}")]
    InvalidSequence(String),
}
