//! Variant generators: named transformations of a `@variants` block.
//!
//! A handler receives a [`VariantContext`] holding a deep copy of the block's
//! children and returns the nodes to emit for that variant. Most handlers rewrite
//! selectors with [`VariantContext::modify_selectors`]; stackable ones also wrap
//! the result in an at-rule.
//!
//! ```rust
//! use breeze::variants::{VariantContext, VariantOptions, VariantRegistry, variant_handler};
//!
//! let mut registry = VariantRegistry::with_builtins();
//! registry.register(
//!     "print",
//!     variant_handler(|ctx| {
//!         let nodes = ctx.modify_selectors(|args| ctx.build_selector_variant(args.selector))?;
//!         Ok(VariantContext::wrap(nodes, "media", "print"))
//!     }),
//!     VariantOptions::STACKABLE,
//! );
//! assert!(registry.is_stackable("print"));
//! ```

mod builtin;

use std::fmt;
use std::sync::Arc;

use bcss::ast::walk_style_rules_mut;
use bcss::selector::{class_name_of, prefix_selector};
use bcss::{AtRule, BcssError, Node, SelectorCache, SourceLocation};
use bitflags::bitflags;
use indexmap::IndexMap;

use crate::BreezeError;
use crate::config::ResolvedConfig;

pub type VariantHandler =
    Arc<dyn Fn(VariantContext<'_>) -> Result<Vec<Node>, BreezeError> + Send + Sync>;

/// Boxes a closure as a [`VariantHandler`].
pub fn variant_handler<F>(handler: F) -> VariantHandler
where
    F: Fn(VariantContext<'_>) -> Result<Vec<Node>, BreezeError> + Send + Sync + 'static,
{
    Arc::new(handler)
}

bitflags! {
    /// Flags describing how a variant composes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct VariantOptions: u8 {
        /// The variant wraps its output in an at-rule and is expanded outside
        /// selector-only variants.
        const STACKABLE = 1 << 0;
    }
}

/// A registered variant.
#[derive(Clone)]
pub struct VariantDescriptor {
    pub name: String,
    pub handler: VariantHandler,
    pub options: VariantOptions,
}

impl fmt::Debug for VariantDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantDescriptor")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Variant name → descriptor, in registration order.
#[derive(Clone, Default)]
pub struct VariantRegistry {
    variants: IndexMap<String, VariantDescriptor>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in variant.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_builtins(&mut registry);
        registry
    }

    /// Registers `name`, replacing any variant already registered under it.
    pub fn register(&mut self, name: &str, handler: VariantHandler, options: VariantOptions) {
        let descriptor = VariantDescriptor {
            name: name.to_string(),
            handler,
            options,
        };
        if self.variants.insert(name.to_string(), descriptor).is_some() {
            log::debug!("variant `{name}` replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<&VariantDescriptor> {
        self.variants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    pub fn is_stackable(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|v| v.options.contains(VariantOptions::STACKABLE))
    }

    /// Names of every stackable variant.
    pub fn stackable(&self) -> Vec<&str> {
        self.variants
            .values()
            .filter(|v| v.options.contains(VariantOptions::STACKABLE))
            .map(|v| v.name.as_str())
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.variants.keys()).finish()
    }
}

/// What [`VariantContext::modify_selectors`] passes to its callback.
#[derive(Clone, Copy, Debug)]
pub struct SelectorArgs<'a> {
    pub selector: &'a str,
}

impl SelectorArgs<'_> {
    /// Unescaped name of the class a variant would target. Parses the selector, so
    /// only handlers that need the name should ask for it.
    pub fn class_name(&self) -> Option<String> {
        class_name_of(self.selector)
    }
}

/// Input to a variant handler.
pub struct VariantContext<'a> {
    /// Deep copy of the `@variants` block's children.
    pub container: Vec<Node>,
    pub config: &'a ResolvedConfig,
    /// Where the `@variants` at-rule came from.
    pub location: Option<SourceLocation>,
    variant: &'a str,
    cache: &'a SelectorCache,
}

impl<'a> VariantContext<'a> {
    pub fn new(
        variant: &'a str,
        container: Vec<Node>,
        config: &'a ResolvedConfig,
        cache: &'a SelectorCache,
        location: Option<SourceLocation>,
    ) -> Self {
        Self {
            container,
            config,
            location,
            variant,
            cache,
        }
    }

    /// The name this variant is being applied under.
    pub fn variant(&self) -> &str {
        self.variant
    }

    pub fn separator(&self) -> &str {
        &self.config.separator
    }

    /// Copies the container with every style-rule selector replaced by `f`.
    ///
    /// Rules inside `@keyframes` are left alone.
    pub fn modify_selectors<F>(&self, mut f: F) -> Result<Vec<Node>, BreezeError>
    where
        F: FnMut(SelectorArgs<'_>) -> Result<String, BreezeError>,
    {
        let mut nodes = self.container.clone();
        walk_style_rules_mut(&mut nodes, &mut |rule| {
            for selector in &mut rule.selectors {
                *selector = f(SelectorArgs {
                    selector: selector.as_str(),
                })?;
            }
            Ok::<(), BreezeError>(())
        })?;
        Ok(nodes)
    }

    /// Prefixes the target class of `selector` with this variant's name.
    pub fn build_selector_variant(&self, selector: &str) -> Result<String, BreezeError> {
        self.cache
            .build_selector_variant(selector, self.variant, self.separator())
            .map_err(|err| self.error(err))
    }

    /// Applies the configured class prefix.
    pub fn prefix(&self, selector: &str) -> Result<String, BreezeError> {
        prefix_selector(&self.config.prefix, selector).map_err(|err| self.error(err))
    }

    /// A selector error attributed to the `@variants` at-rule.
    pub fn error(&self, err: BcssError) -> BreezeError {
        BreezeError::at_node(err, self.location)
    }

    /// `nodes` wrapped in `@name params { ... }`.
    pub fn wrap(nodes: Vec<Node>, name: &str, params: &str) -> Vec<Node> {
        vec![AtRule::block(name, params, nodes).into()]
    }
}
