//! Selector token trees and the rewrites variants apply to them.
//!
//! A selector string is parsed into the same shape a browser would see:
//!
//! ```text
//! SelectorList      .a:hover > .b, .c
//! └─ ComplexSelector      .a:hover > .b
//!    ├─ SelectorPart      .a:hover   (combinator: Child)
//!    └─ SelectorPart      .b         (combinator: None)
//! ```
//!
//! Class names keep their raw, escaped spelling (`sm\:p-4`), so printing a parsed
//! selector gives back an equivalent string.
//!
//! ## Anchor classes
//!
//! By default a variant targets the *last* class of a selector. The marker
//! `[.banana] .peel` pins the target to `banana` instead. Markers survive every
//! rewrite here and are turned back into plain classes by [`unwrap_variant_targets`].

mod escape;
mod parser;
mod variant;

use std::fmt::{self, Display};

pub use escape::{escape_class_name, unescape_ident};
pub use parser::{parse_complex_selector, parse_selector_list};
pub use variant::{
    SelectorCache, build_selector_variant, class_name_of, group_variant, prefix_selector,
    pseudo_class_variant, unwrap_variant_targets,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    /// Raw class name, escapes preserved.
    Class(String),
    Id(String),
    Universal,
    /// Name plus raw arguments, e.g. `hover` or `nth-child(odd)`.
    PseudoClass(String),
    PseudoElement(String),
    Nesting,
    /// Raw contents between the brackets.
    Attribute(String),
    /// `[.class]`: the class a variant must target.
    Anchor(String),
}

impl Selector {
    fn is_variant_target(&self) -> bool {
        matches!(self, Selector::Class(_) | Selector::Anchor(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    None,
    Descendant,
    Child,
    AdjacentSibling, // +
    GeneralSibling,  // ~
}

/// A compound selector and the combinator that links it to the next part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    /// Every `(part, index)` position holding a class or anchor, in source order.
    fn positions(&self, keep: impl Fn(&Selector) -> bool) -> Vec<(usize, usize)> {
        self.parts
            .iter()
            .enumerate()
            .flat_map(|(p, part)| {
                part.compound
                    .selectors
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| keep(s))
                    .map(move |(i, _)| (p, i))
            })
            .collect()
    }

    pub fn has_anchor(&self) -> bool {
        !self
            .positions(|s| matches!(s, Selector::Anchor(_)))
            .is_empty()
    }

    /// The single class a stacked variant prefixes: the first anchor, else the last class.
    pub fn variant_target(&self) -> Option<(usize, usize)> {
        let anchors = self.positions(|s| matches!(s, Selector::Anchor(_)));
        if let Some(first) = anchors.first() {
            return Some(*first);
        }
        self.positions(|s| matches!(s, Selector::Class(_)))
            .last()
            .copied()
    }

    /// Every class a pseudo-class variant rewrites: all anchors when any exist,
    /// otherwise all classes.
    pub fn variant_targets(&self) -> Vec<(usize, usize)> {
        let anchors = self.positions(|s| matches!(s, Selector::Anchor(_)));
        if anchors.is_empty() {
            self.positions(|s| matches!(s, Selector::Class(_)))
        } else {
            anchors
        }
    }

    pub fn selector_at_mut(&mut self, (part, index): (usize, usize)) -> &mut Selector {
        &mut self.parts[part].compound.selectors[index]
    }

    fn for_each_target(&mut self, f: &mut impl FnMut(&mut Selector)) {
        for part in &mut self.parts {
            for selector in &mut part.compound.selectors {
                if selector.is_variant_target() {
                    f(selector);
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<ComplexSelector>) -> Self {
        Self { selectors }
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => f.write_str(name),
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Id(name) => write!(f, "#{name}"),
            Selector::Universal => f.write_str("*"),
            Selector::PseudoClass(name) => write!(f, ":{name}"),
            Selector::PseudoElement(name) => write!(f, "::{name}"),
            Selector::Nesting => f.write_str("&"),
            Selector::Attribute(raw) => write!(f, "[{raw}]"),
            Selector::Anchor(name) => write!(f, "[.{name}]"),
        }
    }
}

impl Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for selector in &self.selectors {
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Combinator::None => "",
            Combinator::Descendant => " ",
            Combinator::Child => " > ",
            Combinator::AdjacentSibling => " + ",
            Combinator::GeneralSibling => " ~ ",
        })
    }
}

impl Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{}{}", part.compound, part.combinator)?;
        }
        Ok(())
    }
}

impl Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
