//! CSS AST node types and the text printer.
//!
//! The tree is a value type: rewrites such as important-propagation rebuild
//! nodes instead of mutating shared state, so a node handed to two branches
//! can never observe the other's changes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Declaration {
        property: String,
        value: String,
        important: bool,
    },
    StyleRule {
        selector: String,
        children: Vec<AstNode>,
    },
    AtRule {
        name: String,
        params: String,
        children: Vec<AstNode>,
    },
    NestedRule {
        selector: String,
        children: Vec<AstNode>,
    },
    Comment {
        text: String,
    },
}

/// At-rule wrapper accumulated while applying variants; `name` is the rule
/// name without the `@` (`media`, `container`, `supports`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRuleWrapper {
    pub name: String,
    pub params: String,
}

impl AtRuleWrapper {
    pub fn new(name: &str, params: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            params: params.into(),
        }
    }
}

pub fn decl(property: impl Into<String>, value: impl Into<String>) -> AstNode {
    AstNode::Declaration {
        property: property.into(),
        value: value.into(),
        important: false,
    }
}

pub fn style_rule(selector: impl Into<String>, children: Vec<AstNode>) -> AstNode {
    AstNode::StyleRule {
        selector: selector.into(),
        children,
    }
}

pub fn at_rule(name: &str, params: impl Into<String>, children: Vec<AstNode>) -> AstNode {
    AstNode::AtRule {
        name: name.to_string(),
        params: params.into(),
        children,
    }
}

pub fn nested_rule(selector: impl Into<String>, children: Vec<AstNode>) -> AstNode {
    AstNode::NestedRule {
        selector: selector.into(),
        children,
    }
}

/// Rebuilds the tree with every declaration (including inside nested rules)
/// marked `!important`.
pub fn mark_important(node: AstNode) -> AstNode {
    match node {
        AstNode::Declaration {
            property, value, ..
        } => AstNode::Declaration {
            property,
            value,
            important: true,
        },
        AstNode::StyleRule { selector, children } => AstNode::StyleRule {
            selector,
            children: children.into_iter().map(mark_important).collect(),
        },
        AstNode::AtRule {
            name,
            params,
            children,
        } => AstNode::AtRule {
            name,
            params,
            children: children.into_iter().map(mark_important).collect(),
        },
        AstNode::NestedRule { selector, children } => AstNode::NestedRule {
            selector,
            children: children.into_iter().map(mark_important).collect(),
        },
        comment @ AstNode::Comment { .. } => comment,
    }
}

/// Wraps `node` in the accumulated at-rule wrappers. The first wrapper in
/// `wrappers` ends up outermost: `sm:motion-safe:hidden` pushes the `sm`
/// media query first and it must enclose the reduced-motion query.
pub fn wrap_in_at_rules(node: AstNode, wrappers: &[AtRuleWrapper]) -> AstNode {
    let mut wrapped = node;
    for wrapper in wrappers.iter().rev() {
        wrapped = at_rule(&wrapper.name, wrapper.params.clone(), vec![wrapped]);
    }
    wrapped
}

/// Walks `nodes` and records every `var(--name)` custom-property reference
/// into `used`.
pub fn collect_variable_references(nodes: &[AstNode], used: &mut std::collections::BTreeSet<String>) {
    for node in nodes {
        match node {
            AstNode::Declaration { value, .. } => collect_from_value(value, used),
            AstNode::StyleRule { children, .. }
            | AstNode::AtRule { children, .. }
            | AstNode::NestedRule { children, .. } => collect_variable_references(children, used),
            AstNode::Comment { .. } => {}
        }
    }
}

fn collect_from_value(value: &str, used: &mut std::collections::BTreeSet<String>) {
    let mut cursor = 0;
    while let Some(rel_idx) = value[cursor..].find("var(") {
        let start = cursor + rel_idx + "var(".len();
        let rest = &value[start..];
        let end = rest
            .find(|ch: char| ch == ')' || ch == ',')
            .unwrap_or(rest.len());
        let name = rest[..end].trim();
        if name.starts_with("--") {
            used.insert(name.to_string());
        }
        cursor = start + end;
    }
}

/// Prints a list of nodes at the given indent depth, 2 spaces per level.
pub fn print_nodes(nodes: &[AstNode], depth: usize) -> String {
    let mut out = String::new();
    for node in nodes {
        print_node(node, depth, &mut out);
    }
    out
}

fn print_node(node: &AstNode, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match node {
        AstNode::Declaration {
            property,
            value,
            important,
        } => {
            out.push_str(&pad);
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            if *important {
                out.push_str(" !important");
            }
            out.push_str(";\n");
        }
        AstNode::StyleRule { selector, children } | AstNode::NestedRule { selector, children } => {
            out.push_str(&pad);
            out.push_str(selector);
            out.push_str(" {\n");
            out.push_str(&print_nodes(children, depth + 1));
            out.push_str(&pad);
            out.push_str("}\n");
        }
        AstNode::AtRule {
            name,
            params,
            children,
        } => {
            out.push_str(&pad);
            out.push('@');
            out.push_str(name);
            if !params.is_empty() {
                out.push(' ');
                out.push_str(params);
            }
            if children.is_empty() {
                out.push_str(";\n");
            } else {
                out.push_str(" {\n");
                out.push_str(&print_nodes(children, depth + 1));
                out.push_str(&pad);
                out.push_str("}\n");
            }
        }
        AstNode::Comment { text } => {
            out.push_str(&pad);
            out.push_str("/* ");
            out.push_str(text);
            out.push_str(" */\n");
        }
    }
}

/// Assembles the final stylesheet text: the fixed layer preamble, then each
/// populated layer in cascade order. Relative order within a layer is the
/// caller's order.
pub fn print_stylesheet(
    theme: &[AstNode],
    base: &[AstNode],
    components: &[AstNode],
    utilities: &[AstNode],
) -> String {
    let mut out = String::from("@layer theme, base, components, utilities;\n");
    for (layer, nodes) in [
        ("theme", theme),
        ("base", base),
        ("components", components),
        ("utilities", utilities),
    ] {
        if nodes.is_empty() {
            continue;
        }
        out.push_str(&format!("@layer {} {{\n", layer));
        out.push_str(&print_nodes(nodes, 1));
        out.push_str("}\n");
    }
    out
}
