//! CSS object model consumed and produced by the breeze passes.
//!
//! The tree mirrors the generic shape every CSS parser produces:
//!
//! - [`Root`]: the ordered top-level nodes of a stylesheet
//! - [`AtRule`]: `@name params { ... }` or a statement like `@tailwind screens;`
//! - [`Rule`]: a selector list with a block of declarations and nested nodes
//! - [`Declaration`]: `property: value` with an optional `!important`
//!
//! Cloning is deep: a cloned subtree shares nothing with the original, so a pass
//! can move a copy into a new position (for example inside a media query) and keep
//! mutating the source independently.
//!
//! Parsing CSS text into this tree is left to the host; [`Display`](std::fmt::Display)
//! is implemented for every node as a canonical printer.

mod printer;

/// Position of a node in the original source, when the parser recorded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Selectors split on top-level commas.
    pub selectors: Vec<String>,
    pub nodes: Vec<Node>,
    pub location: Option<SourceLocation>,
}

impl Rule {
    pub fn new(selectors: Vec<String>, nodes: Vec<Node>) -> Self {
        Self {
            selectors,
            nodes,
            location: None,
        }
    }

    /// Builds a rule from a raw selector string, splitting it on top-level commas.
    pub fn from_selector(selector: &str, nodes: Vec<Node>) -> Self {
        let selectors = crate::segment(selector, ',')
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self::new(selectors, nodes)
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// The selector list joined back into a single string.
    pub fn selector(&self) -> String {
        self.selectors.join(", ")
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `None` for statement at-rules such as `@tailwind screens;`.
    pub nodes: Option<Vec<Node>>,
    pub location: Option<SourceLocation>,
}

impl AtRule {
    /// An at-rule with a (possibly empty) block.
    pub fn block(name: impl Into<String>, params: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes: Some(nodes),
            location: None,
        }
    }

    /// An at-rule terminated by `;` with no block.
    pub fn statement(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes: None,
            location: None,
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }

    /// `@keyframes` and vendor-prefixed variants (`@-webkit-keyframes`).
    pub fn is_keyframes(&self) -> bool {
        self.name.ends_with("keyframes")
    }

    pub fn children(&self) -> &[Node] {
        self.nodes.as_deref().unwrap_or(&[])
    }

    /// Takes the block contents, leaving an empty block (or no block) behind.
    pub fn take_nodes(&mut self) -> Vec<Node> {
        self.nodes.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    AtRule(AtRule),
    Rule(Rule),
    Declaration(Declaration),
    Comment(String),
}

impl Node {
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Node::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    /// Returns true when this node is an at-rule with the given name.
    pub fn is_at_rule(&self, name: &str) -> bool {
        matches!(self, Node::AtRule(at_rule) if at_rule.name == name)
    }

    /// Mutable access to the child list, for containers.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Rule(rule) => Some(&mut rule.nodes),
            Node::AtRule(at_rule) => at_rule.nodes.as_mut(),
            _ => None,
        }
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<AtRule> for Node {
    fn from(at_rule: AtRule) -> Self {
        Node::AtRule(at_rule)
    }
}

impl From<Declaration> for Node {
    fn from(decl: Declaration) -> Self {
        Node::Declaration(decl)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Root {
    pub nodes: Vec<Node>,
}

impl Root {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// All rules in document order, at any depth.
    pub fn rules(&self) -> Vec<&Rule> {
        let mut found = Vec::new();
        collect_rules(&self.nodes, &mut found);
        found
    }
}

fn collect_rules<'a>(nodes: &'a [Node], found: &mut Vec<&'a Rule>) {
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                found.push(rule);
                collect_rules(&rule.nodes, found);
            }
            Node::AtRule(at_rule) => collect_rules(at_rule.children(), found),
            _ => {}
        }
    }
}

/// Visits every rule at any depth, parents before children.
pub fn walk_rules_mut<E>(
    nodes: &mut [Node],
    f: &mut impl FnMut(&mut Rule) -> Result<(), E>,
) -> Result<(), E> {
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                f(rule)?;
                walk_rules_mut(&mut rule.nodes, f)?;
            }
            Node::AtRule(at_rule) => {
                if let Some(children) = at_rule.nodes.as_mut() {
                    walk_rules_mut(children, f)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Like [`walk_rules_mut`], but skips keyframe steps (`from`, `to`, `50%`), whose
/// "selectors" must never be rewritten.
pub fn walk_style_rules_mut<E>(
    nodes: &mut [Node],
    f: &mut impl FnMut(&mut Rule) -> Result<(), E>,
) -> Result<(), E> {
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                f(rule)?;
                walk_style_rules_mut(&mut rule.nodes, f)?;
            }
            Node::AtRule(at_rule) if at_rule.is_keyframes() => {}
            Node::AtRule(at_rule) => {
                if let Some(children) = at_rule.nodes.as_mut() {
                    walk_style_rules_mut(children, f)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Visits every declaration at any depth.
pub fn walk_declarations_mut<E>(
    nodes: &mut [Node],
    f: &mut impl FnMut(&mut Declaration) -> Result<(), E>,
) -> Result<(), E> {
    for node in nodes {
        match node {
            Node::Declaration(decl) => f(decl)?,
            other => {
                if let Some(children) = other.children_mut() {
                    walk_declarations_mut(children, f)?;
                }
            }
        }
    }
    Ok(())
}

/// Visits every at-rule at any depth, parents before children.
pub fn walk_at_rules_mut<E>(
    nodes: &mut [Node],
    f: &mut impl FnMut(&mut AtRule) -> Result<(), E>,
) -> Result<(), E> {
    for node in nodes {
        if let Node::AtRule(at_rule) = node {
            f(at_rule)?;
        }
        if let Some(children) = node.children_mut() {
            walk_at_rules_mut(children, f)?;
        }
    }
    Ok(())
}
