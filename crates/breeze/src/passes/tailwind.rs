//! `@tailwind base|components|utilities` expansion.
//!
//! `@tailwind screens` is left in place for the responsive pass.

use bcss::{Node, Root};

use crate::plugin::PluginOutput;

pub fn substitute_tailwind_at_rules(root: &mut Root, output: &PluginOutput) {
    substitute(&mut root.nodes, output);
}

fn substitute(nodes: &mut Vec<Node>, output: &PluginOutput) {
    let mut index = 0;
    while index < nodes.len() {
        let layer = match &nodes[index] {
            Node::AtRule(at_rule) if at_rule.is_named("tailwind") => {
                match at_rule.params.trim() {
                    "base" => Some(&output.base),
                    "components" => Some(&output.components),
                    "utilities" => Some(&output.utilities),
                    "screens" => None,
                    other => {
                        log::warn!("ignoring unknown directive `@tailwind {other}`");
                        None
                    }
                }
            }
            _ => None,
        };

        match layer {
            Some(layer) => {
                log::debug!("@tailwind inserted {} nodes", layer.len());
                nodes.splice(index..=index, layer.iter().cloned());
                index += layer.len();
            }
            None => {
                if let Some(children) = nodes[index].children_mut() {
                    substitute(children, output);
                }
                index += 1;
            }
        }
    }
}
