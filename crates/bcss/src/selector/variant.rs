use std::cell::RefCell;
use std::collections::HashMap;

use super::{
    Combinator, CompoundSelector, Selector, SelectorPart, escape_class_name, parse_selector_list,
    unescape_ident,
};
use crate::BcssError;

fn variant_prefix(variant: &str, separator: &str) -> String {
    format!(
        "{}{}",
        escape_class_name(variant),
        escape_class_name(separator)
    )
}

fn prefix_target(selector: &mut Selector, prefix: &str) {
    if let Selector::Class(name) | Selector::Anchor(name) = selector {
        name.insert_str(0, prefix);
    }
}

fn no_class(selector: &str) -> BcssError {
    BcssError::NoClassInSelector {
        selector: selector.to_string(),
    }
}

/// Prefixes the targeted class of `selector` with `variant` and `separator`.
///
/// The target is the first anchor marker (`[.name]`) when present, otherwise the
/// last class of the first selector in the list. Other selectors in the list are
/// left untouched.
///
/// ```rust
/// use bcss::selector::build_selector_variant;
///
/// assert_eq!(
///     build_selector_variant(".banana .peel", "hover", ":").unwrap(),
///     r".banana .hover\:peel"
/// );
/// assert_eq!(
///     build_selector_variant("[.banana] .peel", "hover", ":").unwrap(),
///     r"[.hover\:banana] .peel"
/// );
/// ```
///
/// # Errors
///
/// [`BcssError::NoClassInSelector`] when there is nothing to prefix.
pub fn build_selector_variant(
    selector: &str,
    variant: &str,
    separator: &str,
) -> Result<String, BcssError> {
    let mut list = parse_selector_list(selector)?;
    let first = list
        .selectors
        .first_mut()
        .ok_or_else(|| no_class(selector))?;
    let target = first.variant_target().ok_or_else(|| no_class(selector))?;

    prefix_target(
        first.selector_at_mut(target),
        &variant_prefix(variant, separator),
    );
    Ok(list.to_string())
}

/// Rewrites every targeted class as `variant<sep>class` followed by `:pseudo`.
///
/// `.a .b` with `hover` becomes `.hover\:a:hover .hover\:b:hover`; when anchors are
/// present only the anchors are rewritten.
pub fn pseudo_class_variant(
    selector: &str,
    variant: &str,
    separator: &str,
    pseudo: &str,
) -> Result<String, BcssError> {
    let mut list = parse_selector_list(selector)?;
    let prefix = variant_prefix(variant, separator);

    for complex in &mut list.selectors {
        let targets = complex.variant_targets();
        if targets.is_empty() {
            return Err(no_class(selector));
        }
        for (part, index) in targets.into_iter().rev() {
            let compound = &mut complex.parts[part].compound.selectors;
            prefix_target(&mut compound[index], &prefix);
            compound.insert(index + 1, Selector::PseudoClass(pseudo.to_string()));
        }
    }
    Ok(list.to_string())
}

/// Rewrites every targeted class as `variant<sep>class` and puts a single
/// `.group_class:pseudo ` ancestor in front of each selector.
///
/// ```rust
/// use bcss::selector::group_variant;
///
/// assert_eq!(
///     group_variant(".a .b", "group-hover", ":", "group", "hover").unwrap(),
///     r".group:hover .group-hover\:a .group-hover\:b"
/// );
/// ```
pub fn group_variant(
    selector: &str,
    variant: &str,
    separator: &str,
    group_class: &str,
    pseudo: &str,
) -> Result<String, BcssError> {
    let mut list = parse_selector_list(selector)?;
    let prefix = variant_prefix(variant, separator);

    for complex in &mut list.selectors {
        let targets = complex.variant_targets();
        if targets.is_empty() {
            return Err(no_class(selector));
        }
        // Positions stay valid only until the group part is inserted.
        for target in targets {
            prefix_target(complex.selector_at_mut(target), &prefix);
        }
        let group = CompoundSelector::new(vec![
            Selector::Class(group_class.to_string()),
            Selector::PseudoClass(pseudo.to_string()),
        ]);
        complex
            .parts
            .insert(0, SelectorPart::new(group, Combinator::Descendant));
    }
    Ok(list.to_string())
}

/// Prepends `prefix` to every class in the selector (`.p-4` → `.tw-p-4`).
pub fn prefix_selector(prefix: &str, selector: &str) -> Result<String, BcssError> {
    if prefix.is_empty() {
        return Ok(selector.to_string());
    }
    let mut list = parse_selector_list(selector)?;
    let escaped = escape_class_name(prefix);
    for complex in &mut list.selectors {
        complex.for_each_target(&mut |s| prefix_target(s, &escaped));
    }
    Ok(list.to_string())
}

/// Turns anchor markers back into plain classes: `[.a] .b` → `.a .b`.
pub fn unwrap_variant_targets(selector: &str) -> Result<String, BcssError> {
    if !selector.contains("[.") {
        return Ok(selector.to_string());
    }
    let mut list = parse_selector_list(selector)?;
    for complex in &mut list.selectors {
        complex.for_each_target(&mut |s| {
            if let Selector::Anchor(name) = s {
                *s = Selector::Class(std::mem::take(name));
            }
        });
    }
    Ok(list.to_string())
}

/// The unescaped name of the class a variant would target, if any.
pub fn class_name_of(selector: &str) -> Option<String> {
    let list = parse_selector_list(selector).ok()?;
    let first = list.selectors.first()?;
    let (part, index) = first.variant_target()?;
    match &first.parts[part].compound.selectors[index] {
        Selector::Class(name) | Selector::Anchor(name) => Some(unescape_ident(name)),
        _ => None,
    }
}

/// Memoizes [`build_selector_variant`] for one compilation.
///
/// Responsive expansion rebuilds the same selectors for every breakpoint, so results
/// are cached under `selector||variant||separator`. The cache belongs to whoever drives
/// the compilation and must be [`reset`](SelectorCache::reset) between unrelated
/// documents.
#[derive(Debug, Default)]
pub struct SelectorCache {
    entries: RefCell<HashMap<String, String>>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_selector_variant(
        &self,
        selector: &str,
        variant: &str,
        separator: &str,
    ) -> Result<String, BcssError> {
        let key = format!("{selector}||{variant}||{separator}");
        if let Some(hit) = self.entries.borrow().get(&key) {
            return Ok(hit.clone());
        }

        let built = build_selector_variant(selector, variant, separator)?;
        self.entries.borrow_mut().insert(key, built.clone());
        Ok(built)
    }

    pub fn reset(&self) {
        let mut entries = self.entries.borrow_mut();
        log::trace!("selector cache reset ({} entries)", entries.len());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
