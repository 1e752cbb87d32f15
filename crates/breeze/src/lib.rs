//! # Breeze - configuration and variant engine for utility-class CSS
//!
//! Breeze turns a stack of configuration fragments into one resolved theme and uses
//! it to expand the at-rules of a utility stylesheet:
//!
//! - **Config**: [`resolve_config`](config::resolve_config) merges user, preset and
//!   plugin fragments, deep-merges `theme.extend` and evaluates lazy theme values
//! - **Variants**: a registry of named selector rewrites (`hover`, `group-focus`,
//!   `motion-safe`, `dark`, ...) open to plugins
//! - **Passes**: `@tailwind`, `theme()`, `@variants`, `@responsive` and `@screen`
//!   substitution over a [`bcss`] tree
//!
//! ## Quick Start
//!
//! ```rust
//! use bcss::{AtRule, Declaration, Root, Rule};
//! use breeze::config::ConfigFragment;
//!
//! let rule = Rule::from_selector(".banana", vec![Declaration::new("color", "yellow").into()]);
//! let mut root = Root::new(vec![AtRule::block("variants", "hover", vec![rule.into()]).into()]);
//!
//! breeze::compile(&mut root, &[ConfigFragment::new()]).unwrap();
//! assert_eq!(
//!     root.to_string(),
//!     ".banana {\n  color: yellow;\n}\n.hover\\:banana:hover {\n  color: yellow;\n}\n"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`config`]: fragments, resolution, theme helpers
//! - [`variants`]: variant registry and built-ins
//! - [`passes`]: the at-rule substitution passes
//! - [`plugin`]: the plugin capability set
//! - [`screens`]: breakpoints and media queries
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod passes;
pub mod plugin;
pub mod processor;
pub mod screens;
pub mod variants;

pub use config::{ConfigFragment, ConfigValue, ResolvedConfig, resolve_config};
pub use error::BreezeError;
pub use plugin::{Plugin, PluginContext, UtilityOptions};
pub use processor::Processor;
pub use variants::{VariantContext, VariantOptions, VariantRegistry};

use bcss::Root;

/// Resolves `fragments` and runs every pass over `root`.
///
/// Hosts compiling many stylesheets against one configuration should build a
/// [`Processor`] once instead.
pub fn compile(root: &mut Root, fragments: &[ConfigFragment]) -> Result<(), BreezeError> {
    let config = resolve_config(fragments)?;
    Processor::new(config)?.process(root)
}
