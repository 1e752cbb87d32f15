//! # BCSS - CSS object model for the breeze engine
//!
//! The low-level half of breeze: everything that operates on CSS structure without
//! knowing about configuration. This crate provides:
//!
//! - **AST**: [`Root`], [`AtRule`], [`Rule`], [`Declaration`] with deep-clone semantics
//!   and a canonical printer
//! - **Segmenter**: [`segment`] splits on a separator outside of brackets and quotes,
//!   [`expand_braces`] expands `{a,b}` / `{1..3}` patterns
//! - **Selectors**: a token tree for selectors and the rewrites variants need
//!   ([`build_selector_variant`](selector::build_selector_variant) and friends)
//!
//! ## Quick Start
//!
//! ```rust
//! use bcss::selector::build_selector_variant;
//! use bcss::segment;
//!
//! assert_eq!(segment("hover:(a:b)", ':'), vec!["hover", "(a:b)"]);
//! assert_eq!(
//!     build_selector_variant(".group .item", "md", ":").unwrap(),
//!     r".group .md\:item"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`ast`]: CSS node types, walkers and printer
//! - [`selector`]: selector parsing, escaping and variant rewrites
//! - [`error`]: Error types

pub mod ast;
pub mod error;
pub mod segment;
pub mod selector;

pub use ast::{AtRule, Declaration, Node, Root, Rule, SourceLocation};
pub use error::BcssError;
pub use segment::{expand_braces, segment};
pub use selector::{SelectorCache, escape_class_name};
