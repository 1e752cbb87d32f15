use bcss::Node;
use bcss::selector::{escape_class_name, group_variant, pseudo_class_variant};
use phf::phf_ordered_map;

use super::{VariantContext, VariantHandler, VariantOptions, VariantRegistry, variant_handler};
use crate::BreezeError;
use crate::config::DarkMode;

/// Variant name → the pseudo-class it appends.
static PSEUDO_CLASS_VARIANTS: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "first" => "first-child",
    "last" => "last-child",
    "odd" => "nth-child(odd)",
    "even" => "nth-child(even)",
    "visited" => "visited",
    "checked" => "checked",
    "focus-within" => "focus-within",
    "hover" => "hover",
    "focus" => "focus",
    "focus-visible" => "focus-visible",
    "active" => "active",
    "disabled" => "disabled",
};

pub(super) fn register_builtins(registry: &mut VariantRegistry) {
    registry.register(
        "default",
        variant_handler(|ctx| Ok(ctx.container)),
        VariantOptions::empty(),
    );

    for (&name, &pseudo) in PSEUDO_CLASS_VARIANTS.entries() {
        registry.register(name, pseudo_class(pseudo), VariantOptions::empty());
    }
    registry.register("group-hover", group("hover"), VariantOptions::empty());
    registry.register("group-focus", group("focus"), VariantOptions::empty());

    registry.register(
        "motion-safe",
        media("(prefers-reduced-motion: no-preference)"),
        VariantOptions::STACKABLE,
    );
    registry.register(
        "motion-reduce",
        media("(prefers-reduced-motion: reduce)"),
        VariantOptions::STACKABLE,
    );
    registry.register("dark", variant_handler(dark), VariantOptions::STACKABLE);

    log::trace!("registered {} built-in variants", registry.len());
}

/// `.hover\:a:hover` for every target class.
fn pseudo_class(pseudo: &'static str) -> VariantHandler {
    variant_handler(move |ctx| {
        ctx.modify_selectors(|args| {
            pseudo_class_variant(args.selector, ctx.variant(), ctx.separator(), pseudo)
                .map_err(|err| ctx.error(err))
        })
    })
}

/// `.group:hover .group-hover\:a`, with the group class prefixed like any utility.
fn group(pseudo: &'static str) -> VariantHandler {
    variant_handler(move |ctx| {
        let group_class = escape_class_name(&format!("{}group", ctx.config.prefix));
        ctx.modify_selectors(|args| {
            group_variant(
                args.selector,
                ctx.variant(),
                ctx.separator(),
                &group_class,
                pseudo,
            )
            .map_err(|err| ctx.error(err))
        })
    })
}

/// Prefixes the target class and wraps the block in `@media <query>`.
fn media(query: &'static str) -> VariantHandler {
    variant_handler(move |ctx| {
        let nodes = ctx.modify_selectors(|args| ctx.build_selector_variant(args.selector))?;
        Ok(VariantContext::wrap(nodes, "media", query))
    })
}

fn dark(ctx: VariantContext<'_>) -> Result<Vec<Node>, BreezeError> {
    match &ctx.config.dark_mode {
        DarkMode::Disabled => Ok(Vec::new()),
        DarkMode::Media => {
            let nodes = ctx.modify_selectors(|args| ctx.build_selector_variant(args.selector))?;
            Ok(VariantContext::wrap(
                nodes,
                "media",
                "(prefers-color-scheme: dark)",
            ))
        }
        DarkMode::Class(selector) => {
            let scope = ctx.prefix(selector)?;
            ctx.modify_selectors(|args| {
                Ok(format!(
                    "{scope} {}",
                    ctx.build_selector_variant(args.selector)?
                ))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = VariantRegistry::with_builtins();
        for name in ["default", "hover", "odd", "group-hover", "group-focus", "dark"] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert_eq!(
            registry.stackable(),
            vec!["motion-safe", "motion-reduce", "dark"]
        );
    }
}
