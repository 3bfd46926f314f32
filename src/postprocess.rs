//! Post-compilation rewrites that run between utility resolution and
//! variant application: negative-value normalization and color opacity
//! modifiers. Both stages rebuild the node list; nothing is mutated in
//! place.

use crate::ast::AstNode;

/// Folds a recorded negative sign into every declaration value. The
/// spacing-scale shape keeps its `calc` form with a negated multiplier so
/// `-mx-4` prints as `calc(var(--spacing) * -4)` rather than a wrapper
/// around the positive value.
pub fn apply_negative(nodes: Vec<AstNode>) -> Vec<AstNode> {
    nodes
        .into_iter()
        .map(|node| match node {
            AstNode::Declaration {
                property,
                value,
                important,
            } => AstNode::Declaration {
                property,
                value: negate_value(&value),
                important,
            },
            AstNode::StyleRule { selector, children } => AstNode::StyleRule {
                selector,
                children: apply_negative(children),
            },
            AstNode::AtRule {
                name,
                params,
                children,
            } => AstNode::AtRule {
                name,
                params,
                children: apply_negative(children),
            },
            AstNode::NestedRule { selector, children } => AstNode::NestedRule {
                selector,
                children: apply_negative(children),
            },
            comment @ AstNode::Comment { .. } => comment,
        })
        .collect()
}

fn negate_value(value: &str) -> String {
    if let Some(rest) = value.strip_prefix("calc(var(--spacing) * ") {
        if let Some(multiplier) = rest.strip_suffix(')') {
            return format!("calc(var(--spacing) * -{})", multiplier);
        }
    }
    if value == "0" || value == "auto" || value == "none" {
        return value.to_string();
    }
    if value.starts_with(|ch: char| ch.is_ascii_digit()) || value.starts_with('.') {
        return format!("-{}", value);
    }
    if value.starts_with("calc(") || value.starts_with("var(") {
        return format!("calc(-1 * {})", value);
    }
    value.to_string()
}

/// Expands a `/N` opacity modifier into the color declarations of a rule.
/// Returns `None` when the modifier is unusable: either it does not parse
/// as a percentage or no color declaration was rewritten, in which case the
/// whole candidate is dropped rather than emitting a half-applied rule.
pub fn apply_color_modifier(nodes: Vec<AstNode>, modifier: &str) -> Option<Vec<AstNode>> {
    let percentage = modifier_percentage(modifier)?;
    let mut rewrote = false;
    let nodes = rewrite_colors(nodes, &percentage, &mut rewrote);
    if rewrote {
        Some(nodes)
    } else {
        None
    }
}

fn rewrite_colors(nodes: Vec<AstNode>, percentage: &str, rewrote: &mut bool) -> Vec<AstNode> {
    nodes
        .into_iter()
        .map(|node| match node {
            AstNode::Declaration {
                property,
                value,
                important,
            } => {
                let value = if is_color_property(&property) {
                    *rewrote = true;
                    with_opacity(&value, percentage)
                } else {
                    value
                };
                AstNode::Declaration {
                    property,
                    value,
                    important,
                }
            }
            AstNode::StyleRule { selector, children } => AstNode::StyleRule {
                selector,
                children: rewrite_colors(children, percentage, rewrote),
            },
            AstNode::AtRule {
                name,
                params,
                children,
            } => AstNode::AtRule {
                name,
                params,
                children: rewrite_colors(children, percentage, rewrote),
            },
            AstNode::NestedRule { selector, children } => AstNode::NestedRule {
                selector,
                children: rewrite_colors(children, percentage, rewrote),
            },
            comment @ AstNode::Comment { .. } => comment,
        })
        .collect()
}

fn is_color_property(property: &str) -> bool {
    property == "color"
        || property == "fill"
        || property == "stroke"
        || property.ends_with("-color")
}

/// Accepts a bare 0..=100 integer or an explicit percentage.
fn modifier_percentage(modifier: &str) -> Option<String> {
    if let Some(number) = modifier.strip_suffix('%') {
        number.parse::<f64>().ok()?;
        return Some(modifier.to_string());
    }
    let value = modifier.parse::<u32>().ok().filter(|value| *value <= 100)?;
    Some(format!("{}%", value))
}

/// A raw hex literal can be expanded directly; everything else, including
/// `var()` theme references, goes through `color-mix` so the opacity applies
/// at paint time.
fn with_opacity(color: &str, percentage: &str) -> String {
    if let Some((r, g, b)) = parse_hex_color(color) {
        return format!("rgb({} {} {} / {})", r, g, b, percentage);
    }
    format!("color-mix(in oklab, {} {}, transparent)", color, percentage)
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    match digits.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (slot, ch) in channels.iter_mut().zip(digits.chars()) {
                let nibble = ch.to_digit(16)? as u8;
                *slot = nibble << 4 | nibble;
            }
            Some((channels[0], channels[1], channels[2]))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_color_modifier, apply_negative};
    use crate::ast::{decl, AstNode};

    fn value_of(node: &AstNode) -> &str {
        match node {
            AstNode::Declaration { value, .. } => value,
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn negative_folds_into_spacing_multiplier() {
        let nodes = apply_negative(vec![decl("margin-left", "calc(var(--spacing) * 4)")]);
        assert_eq!(value_of(&nodes[0]), "calc(var(--spacing) * -4)");
    }

    #[test]
    fn negative_prefixes_plain_lengths() {
        let nodes = apply_negative(vec![decl("top", "1px")]);
        assert_eq!(value_of(&nodes[0]), "-1px");
        let nodes = apply_negative(vec![decl("left", "100%")]);
        assert_eq!(value_of(&nodes[0]), "-100%");
    }

    #[test]
    fn negative_leaves_keywords_and_zero() {
        let nodes = apply_negative(vec![decl("margin", "auto"), decl("top", "0")]);
        assert_eq!(value_of(&nodes[0]), "auto");
        assert_eq!(value_of(&nodes[1]), "0");
    }

    #[test]
    fn negative_wraps_var_references() {
        let nodes = apply_negative(vec![decl("top", "var(--header-height)")]);
        assert_eq!(value_of(&nodes[0]), "calc(-1 * var(--header-height))");
    }

    #[test]
    fn opacity_modifier_uses_color_mix_for_theme_references() {
        let nodes = apply_color_modifier(
            vec![decl("background-color", "var(--color-red-500)")],
            "50",
        )
        .expect("applies");
        assert_eq!(
            value_of(&nodes[0]),
            "color-mix(in oklab, var(--color-red-500) 50%, transparent)"
        );
    }

    #[test]
    fn opacity_modifier_expands_hex_literals() {
        let nodes =
            apply_color_modifier(vec![decl("color", "#336699")], "50").expect("applies");
        assert_eq!(value_of(&nodes[0]), "rgb(51 102 153 / 50%)");
        let nodes = apply_color_modifier(vec![decl("color", "#fff")], "25").expect("applies");
        assert_eq!(value_of(&nodes[0]), "rgb(255 255 255 / 25%)");
    }

    #[test]
    fn opacity_modifier_without_color_declaration_drops_candidate() {
        assert!(apply_color_modifier(vec![decl("display", "flex")], "50").is_none());
    }

    #[test]
    fn opacity_modifier_must_be_a_percentage() {
        assert!(apply_color_modifier(vec![decl("color", "#fff")], "150").is_none());
        assert!(apply_color_modifier(vec![decl("color", "#fff")], "bogus").is_none());
        assert!(apply_color_modifier(vec![decl("color", "#fff")], "75%").is_some());
    }

    #[test]
    fn opacity_modifier_skips_non_color_declarations() {
        let nodes = apply_color_modifier(
            vec![
                decl("border-color", "var(--color-sky-400)"),
                decl("border-width", "1px"),
            ],
            "40",
        )
        .expect("applies");
        assert_eq!(
            value_of(&nodes[0]),
            "color-mix(in oklab, var(--color-sky-400) 40%, transparent)"
        );
        assert_eq!(value_of(&nodes[1]), "1px");
    }
}
