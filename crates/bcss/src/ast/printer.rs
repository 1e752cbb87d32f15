use std::fmt::{self, Display, Write};

use super::{AtRule, Declaration, Node, Root, Rule};

const INDENT: &str = "  ";

impl Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes, 0)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rule(f, self, 0)
    }
}

impl Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_at_rule(f, self, 0)
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

fn write_nodes(f: &mut impl Write, nodes: &[Node], depth: usize) -> fmt::Result {
    for node in nodes {
        write_node(f, node, depth)?;
    }
    Ok(())
}

fn write_node(f: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    match node {
        Node::Rule(rule) => write_rule(f, rule, depth),
        Node::AtRule(at_rule) => write_at_rule(f, at_rule, depth),
        Node::Declaration(decl) => {
            indent(f, depth)?;
            writeln!(f, "{decl};")
        }
        Node::Comment(text) => {
            indent(f, depth)?;
            writeln!(f, "/* {text} */")
        }
    }
}

fn write_rule(f: &mut impl Write, rule: &Rule, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "{} {{", rule.selector())?;
    write_nodes(f, &rule.nodes, depth + 1)?;
    indent(f, depth)?;
    f.write_str("}\n")
}

fn write_at_rule(f: &mut impl Write, at_rule: &AtRule, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    write!(f, "@{}", at_rule.name)?;
    if !at_rule.params.is_empty() {
        write!(f, " {}", at_rule.params)?;
    }
    match &at_rule.nodes {
        None => f.write_str(";\n"),
        Some(children) => {
            f.write_str(" {\n")?;
            write_nodes(f, children, depth + 1)?;
            indent(f, depth)?;
            f.write_str("}\n")
        }
    }
}

fn indent(f: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::{AtRule, Declaration, Node, Root, Rule};

    #[test]
    fn prints_nested_blocks_with_two_space_indent() {
        let root = Root::new(vec![
            AtRule::statement("tailwind", "screens").into(),
            AtRule::block(
                "media",
                "(min-width: 500px)",
                vec![Rule::from_selector(
                    ".a, .b",
                    vec![Declaration::new("color", "red").important().into()],
                )
                .into()],
            )
            .into(),
            Node::Comment("done".into()),
        ]);

        assert_eq!(
            root.to_string(),
            "@tailwind screens;\n@media (min-width: 500px) {\n  .a, .b {\n    color: red !important;\n  }\n}\n/* done */\n"
        );
    }

    #[test]
    fn empty_block_keeps_braces() {
        let at_rule = AtRule::block("responsive", "", vec![]);
        assert_eq!(at_rule.to_string(), "@responsive {\n}\n");
    }
}
