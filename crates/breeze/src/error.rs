//! Error types for config resolution and the at-rule passes.

use bcss::{BcssError, SourceLocation};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a compilation.
///
/// Every variant is fatal: passes propagate with `?` and leave no partially
/// transformed output behind for the caller to use.
///
/// # Examples
///
/// ```rust
/// use breeze::BreezeError;
///
/// let err = BreezeError::UnknownVariant {
///     name: "wiggle".into(),
///     location: None,
/// };
/// assert!(err.to_string().contains(r#""wiggle" variant"#));
/// ```
#[derive(Error, Debug)]
pub enum BreezeError {
    #[error(transparent)]
    Css(#[from] BcssError),

    /// A CSS construct could not be transformed, attached to the originating node.
    #[error("{message}{}", at(.location))]
    Syntax {
        message: String,
        location: Option<SourceLocation>,
    },

    /// A `@variants` list names a variant nobody registered.
    #[error(
        "Your config mentions the \"{name}\" variant, but \"{name}\" doesn't appear to be a variant. Did you forget or misconfigure a plugin that supplies that variant?{}",
        at(.location)
    )]
    UnknownVariant {
        name: String,
        location: Option<SourceLocation>,
    },

    /// `@screen <name>` refers to a breakpoint missing from `theme.screens`.
    #[error("No `{0}` screen found.")]
    UnknownScreen(String),

    /// `theme('path')` without a default points at nothing.
    #[error("'{path}' does not exist in your theme config.")]
    MissingThemeValue { path: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Raised by a plugin handler.
    #[error("Plugin error: {0}")]
    Plugin(String),
}

impl BreezeError {
    pub fn syntax(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        BreezeError::Syntax {
            message: message.into(),
            location,
        }
    }

    /// Attaches a selector error to the node it was raised for.
    pub fn at_node(err: BcssError, location: Option<SourceLocation>) -> Self {
        Self::syntax(err.to_string(), location)
    }
}

fn at(location: &Option<SourceLocation>) -> String {
    match location {
        Some(location) => format!(" (at {location})"),
        None => String::new(),
    }
}
