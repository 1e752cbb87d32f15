//! `@variants <list> { ... }` substitution.
//!
//! Each `@variants` at-rule is replaced by the output of its variants, in the order
//! listed:
//!
//! ```text
//! @variants focus, hover { .a { ... } }
//!
//! .a { ... }                      (implicit `default`, first unless listed)
//! .focus\:a:focus { ... }
//! .hover\:a:hover { ... }
//! ```
//!
//! Siblings are processed as a work queue. A rewrite that produces new `@variants`
//! at-rules (the `responsive` and stackable rewraps below) puts its output back at
//! the front of the queue, so the pass reaches a fixed point in one sweep.

use std::collections::VecDeque;

use bcss::{AtRule, Node, Root, SelectorCache, segment};

use crate::BreezeError;
use crate::config::ResolvedConfig;
use crate::variants::{VariantContext, VariantRegistry};

pub fn substitute_variants_at_rules(
    root: &mut Root,
    registry: &VariantRegistry,
    config: &ResolvedConfig,
    cache: &SelectorCache,
) -> Result<(), BreezeError> {
    let mut pass = VariantsPass {
        registry,
        config,
        cache,
        expanded: 0,
    };
    pass.process(&mut root.nodes)?;
    log::debug!("expanded {} @variants at-rules", pass.expanded);
    Ok(())
}

struct VariantsPass<'a> {
    registry: &'a VariantRegistry,
    config: &'a ResolvedConfig,
    cache: &'a SelectorCache,
    expanded: usize,
}

impl VariantsPass<'_> {
    fn process(&mut self, nodes: &mut Vec<Node>) -> Result<(), BreezeError> {
        let mut queue: VecDeque<Node> = std::mem::take(nodes).into();
        let mut output = Vec::with_capacity(queue.len());

        while let Some(node) = queue.pop_front() {
            match node {
                Node::AtRule(at_rule) if at_rule.is_named("variants") => {
                    let replacement = self.expand(at_rule)?;
                    for node in replacement.into_iter().rev() {
                        queue.push_front(node);
                    }
                }
                mut node => {
                    if let Some(children) = node.children_mut() {
                        self.process(children)?;
                    }
                    output.push(node);
                }
            }
        }

        *nodes = output;
        Ok(())
    }

    fn expand(&mut self, mut at_rule: AtRule) -> Result<Vec<Node>, BreezeError> {
        let mut variants: Vec<String> = segment(&at_rule.params, ',')
            .into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        log::trace!("@variants {}", variants.join(", "));

        if variants.iter().any(|v| v == "responsive") {
            variants.retain(|v| v != "responsive");
            at_rule.params = variants.join(", ");
            let location = at_rule.location;
            return Ok(vec![Node::AtRule(AtRule {
                name: "responsive".into(),
                params: String::new(),
                nodes: Some(vec![at_rule.into()]),
                location,
            })]);
        }

        let (stackable, plain): (Vec<String>, Vec<String>) = variants
            .iter()
            .cloned()
            .partition(|v| self.registry.is_stackable(v));

        if !stackable.is_empty() && !plain.is_empty() {
            let location = at_rule.location;
            at_rule.params = plain.join(", ");
            return Ok(vec![Node::AtRule(AtRule {
                name: "variants".into(),
                params: stackable.join(", "),
                nodes: Some(vec![at_rule.into()]),
                location,
            })]);
        }

        // Nested @variants are expanded before the outer list is applied to them.
        let mut body = at_rule.take_nodes();
        self.process(&mut body)?;

        if !variants.iter().any(|v| v == "default") {
            variants.insert(0, "default".to_string());
        }

        let mut output = Vec::new();
        for name in &variants {
            let descriptor = self
                .registry
                .get(name)
                .ok_or_else(|| BreezeError::UnknownVariant {
                    name: name.clone(),
                    location: at_rule.location,
                })?;
            let ctx = VariantContext::new(
                name,
                body.clone(),
                self.config,
                self.cache,
                at_rule.location,
            );
            output.extend((descriptor.handler)(ctx)?);
        }

        self.expanded += 1;
        Ok(output)
    }
}
