//! The capability set handed to plugins.
//!
//! A plugin is a function over `&mut dyn PluginContext` plus an optional config
//! fragment. The [`Processor`](crate::Processor) runs every plugin once, letting it
//! register variants and contribute base styles, components and utilities that the
//! `@tailwind` directives later insert.
//!
//! ```rust
//! use bcss::{Declaration, Rule};
//! use breeze::config::{ConfigFragment, resolve_config};
//! use breeze::plugin::{Plugin, UtilityOptions};
//!
//! let plugin = Plugin::new(|ctx| {
//!     let rule = Rule::from_selector(".skew-10", vec![Declaration::new("transform", "skewY(-10deg)").into()]);
//!     ctx.add_utilities(vec![rule.into()], UtilityOptions::default().with_variants(["hover"]))
//! });
//! let config = resolve_config(&[ConfigFragment::new().plugin(plugin)]).unwrap();
//! assert_eq!(config.plugins.len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use bcss::ast::{walk_declarations_mut, walk_style_rules_mut};
use bcss::selector::prefix_selector;
use bcss::{AtRule, Node, escape_class_name};

use crate::BreezeError;
use crate::config::{ConfigFragment, ConfigValue, Important, ResolvedConfig};
use crate::variants::{VariantHandler, VariantOptions, VariantRegistry};

pub type PluginHandler = Arc<dyn Fn(&mut dyn PluginContext) -> Result<(), BreezeError> + Send + Sync>;

/// A plugin function and the config it ships with.
#[derive(Clone)]
pub struct Plugin {
    handler: PluginHandler,
    config: Option<ConfigFragment>,
}

impl Plugin {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut dyn PluginContext) -> Result<(), BreezeError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            config: None,
        }
    }

    /// A plugin whose config is merged below every user fragment.
    pub fn with_config<F>(handler: F, config: ConfigFragment) -> Self
    where
        F: Fn(&mut dyn PluginContext) -> Result<(), BreezeError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            config: Some(config),
        }
    }

    pub fn config(&self) -> Option<&ConfigFragment> {
        self.config.as_ref()
    }

    pub fn run(&self, ctx: &mut dyn PluginContext) -> Result<(), BreezeError> {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// How contributed rules are post-processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtilityOptions {
    /// Wrap the rules in `@variants <list>`.
    pub variants: Vec<String>,
    /// Apply the configured class prefix to every selector.
    pub respect_prefix: bool,
    /// Apply the `important` option.
    pub respect_important: bool,
}

impl Default for UtilityOptions {
    fn default() -> Self {
        Self {
            variants: Vec::new(),
            respect_prefix: true,
            respect_important: true,
        }
    }
}

impl UtilityOptions {
    /// Defaults for components, which ignore `important`.
    pub fn components() -> Self {
        Self {
            respect_important: false,
            ..Self::default()
        }
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }
}

/// Everything a plugin may do.
pub trait PluginContext {
    fn add_variant(&mut self, name: &str, handler: VariantHandler, options: VariantOptions);

    fn add_utilities(&mut self, nodes: Vec<Node>, options: UtilityOptions) -> Result<(), BreezeError>;

    fn add_components(&mut self, nodes: Vec<Node>, options: UtilityOptions) -> Result<(), BreezeError>;

    fn add_base(&mut self, nodes: Vec<Node>);

    /// A resolved theme value.
    fn theme(&self, path: &str) -> Option<ConfigValue>;

    /// Any resolved config value, see [`ResolvedConfig::get`].
    fn config(&self, path: &str) -> Option<ConfigValue>;

    /// The variants configured for a utility family.
    fn variants(&self, key: &str) -> Vec<String>;

    /// Escapes a class name.
    fn e(&self, class_name: &str) -> String;

    /// Applies the configured class prefix to a selector.
    fn prefix(&self, selector: &str) -> Result<String, BreezeError>;

    fn core_plugin_enabled(&self, name: &str) -> bool;
}

/// Rules contributed by plugins, by `@tailwind` layer.
#[derive(Clone, Debug, Default)]
pub struct PluginOutput {
    pub base: Vec<Node>,
    pub components: Vec<Node>,
    pub utilities: Vec<Node>,
}

/// The [`PluginContext`] used by the processor.
pub struct PluginApi<'a> {
    config: &'a ResolvedConfig,
    registry: &'a mut VariantRegistry,
    output: &'a mut PluginOutput,
}

impl<'a> PluginApi<'a> {
    pub fn new(
        config: &'a ResolvedConfig,
        registry: &'a mut VariantRegistry,
        output: &'a mut PluginOutput,
    ) -> Self {
        Self {
            config,
            registry,
            output,
        }
    }

    fn prepare(&self, mut nodes: Vec<Node>, options: &UtilityOptions) -> Result<Vec<Node>, BreezeError> {
        let prefix = &self.config.prefix;
        let important = if options.respect_important {
            &self.config.important
        } else {
            &Important::Off
        };

        walk_style_rules_mut(&mut nodes, &mut |rule| {
            if options.respect_prefix && !prefix.is_empty() {
                for selector in &mut rule.selectors {
                    *selector = prefix_selector(prefix, selector)
                        .map_err(|err| BreezeError::at_node(err, rule.location))?;
                }
            }
            match important {
                Important::Off => {}
                Important::On => walk_declarations_mut(&mut rule.nodes, &mut |decl| {
                    decl.important = true;
                    Ok::<(), BreezeError>(())
                })?,
                Important::Selector(scope) => {
                    for selector in &mut rule.selectors {
                        *selector = format!("{scope} {selector}");
                    }
                }
            }
            Ok::<(), BreezeError>(())
        })?;

        if options.variants.is_empty() {
            return Ok(nodes);
        }
        Ok(vec![
            AtRule::block("variants", options.variants.join(", "), nodes).into(),
        ])
    }
}

impl PluginContext for PluginApi<'_> {
    fn add_variant(&mut self, name: &str, handler: VariantHandler, options: VariantOptions) {
        log::debug!("plugin registered variant `{name}`");
        self.registry.register(name, handler, options);
    }

    fn add_utilities(&mut self, nodes: Vec<Node>, options: UtilityOptions) -> Result<(), BreezeError> {
        let nodes = self.prepare(nodes, &options)?;
        self.output.utilities.extend(nodes);
        Ok(())
    }

    fn add_components(&mut self, nodes: Vec<Node>, options: UtilityOptions) -> Result<(), BreezeError> {
        let nodes = self.prepare(nodes, &options)?;
        self.output.components.extend(nodes);
        Ok(())
    }

    fn add_base(&mut self, nodes: Vec<Node>) {
        self.output.base.extend(nodes);
    }

    fn theme(&self, path: &str) -> Option<ConfigValue> {
        self.config.theme(path).cloned()
    }

    fn config(&self, path: &str) -> Option<ConfigValue> {
        self.config.get(path)
    }

    fn variants(&self, key: &str) -> Vec<String> {
        self.config.variants_for(key)
    }

    fn e(&self, class_name: &str) -> String {
        escape_class_name(class_name)
    }

    fn prefix(&self, selector: &str) -> Result<String, BreezeError> {
        prefix_selector(&self.config.prefix, selector).map_err(BreezeError::from)
    }

    fn core_plugin_enabled(&self, name: &str) -> bool {
        self.config.core_plugin_enabled(name)
    }
}
