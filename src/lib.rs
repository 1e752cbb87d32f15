//! Utility-class CSS compilation: resolve a configuration, then expand
//! `@tailwind`, `@variants`, `@responsive` and `@screen` over a CSS tree.
//!
//! This crate re-exports the two halves of the engine:
//!
//! - [`bcss`]: the CSS tree, selector rewriting and string segmentation
//! - [`breeze`]: configuration resolution, variants, plugins and passes
//!
//! ```rust
//! use breeze_rs::{AtRule, ConfigFragment, Declaration, Root, Rule};
//! use serde_json::json;
//!
//! let rule = Rule::from_selector(".foo, .bar", vec![Declaration::new("color", "yellow").into()]);
//! let mut root = Root::new(vec![
//!     AtRule::block("responsive", "", vec![rule.into()]).into(),
//!     AtRule::statement("tailwind", "screens").into(),
//! ]);
//! let config = ConfigFragment::new().theme("screens", json!({"sm": "500px"}));
//!
//! breeze_rs::compile(&mut root, &[config]).unwrap();
//! assert!(root.to_string().contains(r".sm\:foo, .sm\:bar {"));
//! ```

pub mod error;

pub use bcss;
pub use breeze;

pub use bcss::{AtRule, Declaration, Node, Root, Rule, SourceLocation};
pub use breeze::config::{ConfigFragment, ConfigValue, ResolvedConfig, default_config, resolve_config};
pub use breeze::{Plugin, PluginContext, Processor, UtilityOptions, compile};
pub use error::{Error, Result};
