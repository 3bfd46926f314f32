//! Variant registry and selector algebra.
//!
//! Variants apply strictly in user order, left to right; each one either
//! transforms the selector or pushes an at-rule wrapper. Every variant kind
//! carries a fixed weight used only to order the generated rules in the
//! final stylesheet, never to reorder application.

use crate::ast::AtRuleWrapper;
use crate::candidate::VariantToken;
use crate::escape::escape_class;
use crate::RegistryError;
use std::collections::BTreeMap;

// Output-ordering weight bands, ascending cascade priority.
const WEIGHT_DIRECTION: u16 = 10;
const WEIGHT_STRUCTURAL: u16 = 20;
const WEIGHT_PSEUDO: u16 = 30;
const WEIGHT_ATTRIBUTE: u16 = 40;
const WEIGHT_ARBITRARY: u16 = 45;
const WEIGHT_CONTAINER: u16 = 50;
const WEIGHT_SUPPORTS: u16 = 55;
const WEIGHT_BREAKPOINT: u16 = 60;
const WEIGHT_DARK: u16 = 90;

/// A selector plus the at-rule wrappers accumulated while applying
/// variants, and the maximum variant weight seen (for output ordering).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSelector {
    pub selector: String,
    pub wrappers: Vec<AtRuleWrapper>,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRegistry {
    breakpoints: Vec<(String, String)>,
    containers: Vec<(String, String)>,
    dark_selector: Option<String>,
    custom: BTreeMap<String, String>,
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl VariantRegistry {
    pub fn with_defaults() -> Self {
        Self {
            breakpoints: default_breakpoints(),
            containers: default_containers(),
            dark_selector: None,
            custom: BTreeMap::new(),
        }
    }

    /// Registers a custom variant. The template is a selector fragment
    /// containing `&` (`&:hover > *`) or an at-rule prelude (`@media print`).
    /// Re-registering a name without `overwrite` is a configuration error.
    pub fn register(
        &mut self,
        name: &str,
        template: &str,
        overwrite: bool,
    ) -> Result<(), RegistryError> {
        if self.custom.contains_key(name) && !overwrite {
            return Err(RegistryError::DuplicateVariant {
                name: name.to_string(),
            });
        }
        self.custom.insert(name.to_string(), template.to_string());
        Ok(())
    }

    /// Replaces a responsive breakpoint (or adds a new one).
    pub fn set_breakpoint(&mut self, name: &str, width: &str) {
        if let Some(entry) = self.breakpoints.iter_mut().find(|(n, _)| n == name) {
            entry.1 = width.to_string();
        } else {
            self.breakpoints.push((name.to_string(), width.to_string()));
        }
    }

    /// Overrides the `dark:` variant to a selector strategy (`.dark &`)
    /// instead of the default `prefers-color-scheme` media query.
    pub fn set_dark_selector(&mut self, template: &str) {
        self.dark_selector = Some(template.to_string());
    }

    /// Applies `tokens` left to right. Unknown named variants contribute
    /// nothing: a typo'd variant must not abort an otherwise valid utility.
    pub fn apply(&self, selector: &str, tokens: &[VariantToken]) -> AppliedSelector {
        let mut applied = AppliedSelector {
            selector: selector.to_string(),
            wrappers: Vec::new(),
            weight: 0,
        };
        for token in tokens {
            match self.apply_one(&applied.selector, token, &mut applied.wrappers) {
                Some((selector, weight)) => {
                    applied.selector = selector;
                    applied.weight = applied.weight.max(weight);
                }
                None => {
                    log::debug!("skipping unknown variant '{}'", token.raw);
                }
            }
        }
        applied
    }

    fn apply_one(
        &self,
        selector: &str,
        token: &VariantToken,
        wrappers: &mut Vec<AtRuleWrapper>,
    ) -> Option<(String, u16)> {
        if token.arbitrary {
            return apply_arbitrary_variant(selector, &token.raw, wrappers);
        }

        if let Some(value) = &token.value {
            let combinator = if token.name == "peer" { " ~ " } else { " " };
            return apply_group_or_peer(selector, &token.name, value, token.modifier.as_deref(), combinator);
        }

        let name = token.name.as_str();

        if name == "dark" {
            if let Some(template) = &self.dark_selector {
                let composed = compose_template(template, selector)?;
                return Some((composed, WEIGHT_DARK));
            }
            wrappers.push(AtRuleWrapper::new("media", "(prefers-color-scheme: dark)"));
            return Some((selector.to_string(), WEIGHT_DARK));
        }

        if let Some(params) = media_feature_params(name) {
            wrappers.push(AtRuleWrapper::new("media", params));
            return Some((selector.to_string(), WEIGHT_PSEUDO));
        }

        if let Some((idx, width)) = self.breakpoint(name) {
            wrappers.push(AtRuleWrapper::new(
                "media",
                format!("(min-width: {})", width),
            ));
            return Some((selector.to_string(), WEIGHT_BREAKPOINT + idx));
        }
        if let Some(key) = name.strip_prefix("max-") {
            if let Some((idx, width)) = self.breakpoint(key) {
                wrappers.push(AtRuleWrapper::new(
                    "media",
                    format!("(max-width: {})", width),
                ));
                return Some((selector.to_string(), WEIGHT_BREAKPOINT + idx));
            }
        }
        if let Some(value) = bracket_argument(name, "min-") {
            wrappers.push(AtRuleWrapper::new(
                "media",
                format!("(min-width: {})", value),
            ));
            return Some((selector.to_string(), WEIGHT_BREAKPOINT));
        }
        if let Some(value) = bracket_argument(name, "max-") {
            wrappers.push(AtRuleWrapper::new(
                "media",
                format!("(max-width: {})", value),
            ));
            return Some((selector.to_string(), WEIGHT_BREAKPOINT));
        }

        if name.starts_with('@') {
            let (params, weight) = self.container_params(name, token.modifier.as_deref())?;
            wrappers.push(AtRuleWrapper::new("container", params));
            return Some((selector.to_string(), weight));
        }

        if let Some(query) = supports_params(name) {
            wrappers.push(AtRuleWrapper::new("supports", query));
            return Some((selector.to_string(), WEIGHT_SUPPORTS));
        }

        if name == "starting" {
            wrappers.push(AtRuleWrapper::new("starting-style", ""));
            return Some((selector.to_string(), WEIGHT_PSEUDO));
        }

        if let Some(template) = self.custom.get(name) {
            if let Some(prelude) = template.strip_prefix('@') {
                let (rule_name, params) = split_at_rule_prelude(prelude)?;
                wrappers.push(AtRuleWrapper::new(rule_name, params));
                return Some((selector.to_string(), WEIGHT_ARBITRARY));
            }
            let composed = compose_template(template, selector)?;
            return Some((composed, WEIGHT_ARBITRARY));
        }

        if let Some(key) = name.strip_prefix("data-") {
            let suffix = attribute_suffix("data", key)?;
            return Some((format!("{}{}", selector, suffix), WEIGHT_ATTRIBUTE));
        }
        if let Some(key) = name.strip_prefix("aria-") {
            let suffix = aria_suffix(key)?;
            return Some((format!("{}{}", selector, suffix), WEIGHT_ATTRIBUTE));
        }

        if name != "not-only" {
            if let Some(rest) = name.strip_prefix("not-") {
                if let Some(inner) = rest.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
                    if inner.is_empty() {
                        return None;
                    }
                    let inner = crate::candidate::normalize_arbitrary_value(inner);
                    return Some((format!("{}:not({})", selector, inner), WEIGHT_ARBITRARY));
                }
                let (suffix, weight) = pseudo_suffix(rest)?;
                return Some((format!("{}:not({})", selector, suffix), weight));
            }
        }

        if let Some(rest) = name.strip_prefix("has-") {
            let argument = pseudo_argument(rest)?;
            return Some((format!("{}:has({})", selector, argument), WEIGHT_PSEUDO));
        }

        if name != "in-range" {
            if let Some(rest) = name.strip_prefix("in-") {
                let parent = pseudo_argument(rest)?;
                return Some((
                    format!(":where({}) {}", parent, selector),
                    WEIGHT_PSEUDO,
                ));
            }
        }

        let (suffix, weight) = pseudo_suffix(name)?;
        if name == "hover" {
            wrappers.push(AtRuleWrapper::new("media", "(hover: hover)"));
        }
        Some((format!("{}{}", selector, suffix), weight))
    }

    fn breakpoint(&self, name: &str) -> Option<(u16, &str)> {
        self.breakpoints
            .iter()
            .position(|(key, _)| key == name)
            .map(|idx| (idx as u16, self.breakpoints[idx].1.as_str()))
    }

    fn container_params(&self, name: &str, modifier: Option<&str>) -> Option<(String, u16)> {
        let raw = name.strip_prefix('@')?;
        let query = if let Some(value) = bracket_argument(raw, "min-") {
            format!("(min-width: {})", value)
        } else if let Some(value) = bracket_argument(raw, "max-") {
            format!("(max-width: {})", value)
        } else if let Some(key) = raw.strip_prefix("max-") {
            let width = self
                .containers
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, width)| width)?;
            format!("(max-width: {})", width)
        } else {
            let width = self
                .containers
                .iter()
                .find(|(key, _)| key == raw)
                .map(|(_, width)| width)?;
            format!("(min-width: {})", width)
        };
        let params = match modifier {
            Some(name) if !name.is_empty() => format!("{} {}", name, query),
            _ => query,
        };
        Some((params, WEIGHT_CONTAINER))
    }
}

fn default_breakpoints() -> Vec<(String, String)> {
    [
        ("sm", "640px"),
        ("md", "768px"),
        ("lg", "1024px"),
        ("xl", "1280px"),
        ("2xl", "1536px"),
    ]
    .into_iter()
    .map(|(name, width)| (name.to_string(), width.to_string()))
    .collect()
}

fn default_containers() -> Vec<(String, String)> {
    [
        ("3xs", "16rem"),
        ("2xs", "18rem"),
        ("xs", "20rem"),
        ("sm", "24rem"),
        ("md", "28rem"),
        ("lg", "32rem"),
        ("xl", "36rem"),
        ("2xl", "42rem"),
        ("3xl", "48rem"),
        ("4xl", "56rem"),
        ("5xl", "64rem"),
        ("6xl", "72rem"),
        ("7xl", "80rem"),
    ]
    .into_iter()
    .map(|(name, width)| (name.to_string(), width.to_string()))
    .collect()
}

/// `[&>*]` relativizes the selector; `[@media(...)]` becomes an ad-hoc
/// at-rule wrapper. Both fall in the arbitrary weight band.
fn apply_arbitrary_variant(
    selector: &str,
    raw: &str,
    wrappers: &mut Vec<AtRuleWrapper>,
) -> Option<(String, u16)> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    let inner = crate::candidate::normalize_arbitrary_value(inner);

    if let Some(prelude) = inner.strip_prefix('@') {
        let (name, params) = split_at_rule_prelude(prelude)?;
        wrappers.push(AtRuleWrapper::new(name, params));
        return Some((selector.to_string(), WEIGHT_ARBITRARY));
    }

    if inner.contains('&') {
        return Some((inner.replace('&', selector), WEIGHT_ARBITRARY));
    }
    Some((format!("{} {}", inner, selector), WEIGHT_ARBITRARY))
}

/// Bracketed argument of an arbitrary breakpoint or container variant:
/// `bracket_argument("min-[600px]", "min-")` yields `600px`.
fn bracket_argument(name: &str, prefix: &str) -> Option<String> {
    let inner = name
        .strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(crate::candidate::normalize_arbitrary_value(inner))
}

fn split_at_rule_prelude(prelude: &str) -> Option<(&str, String)> {
    let end = prelude
        .find(|ch: char| ch == ' ' || ch == '(')
        .unwrap_or(prelude.len());
    let name = &prelude[..end];
    if name.is_empty() {
        return None;
    }
    let params = prelude[end..].trim().to_string();
    Some((name, params))
}

/// `group-hover` / `peer-focus` scoping. The `:where()` wrap keeps marker
/// specificity at zero so stylesheet order, not selector weight, decides.
fn apply_group_or_peer(
    selector: &str,
    marker_class: &str,
    value: &str,
    modifier: Option<&str>,
    combinator: &str,
) -> Option<(String, u16)> {
    let marker = match modifier {
        Some(name) => format!(".{}", escape_class(&format!("{}/{}", marker_class, name))),
        None => format!(".{}", marker_class),
    };

    let marker_expr = if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']'))
    {
        if inner.is_empty() {
            return None;
        }
        let inner = crate::candidate::normalize_arbitrary_value(inner);
        if inner.contains('&') {
            inner.replace('&', &marker)
        } else {
            format!(":where({}){}", marker, inner)
        }
    } else if let Some(rest) = value.strip_prefix("has-") {
        format!(":where({}):has({})", marker, pseudo_argument(rest)?)
    } else if let Some(key) = value.strip_prefix("data-") {
        format!(":where({}{})", marker, attribute_suffix("data", key)?)
    } else if let Some(key) = value.strip_prefix("aria-") {
        format!(":where({}{})", marker, aria_suffix(key)?)
    } else {
        let (suffix, _) = pseudo_suffix(value)?;
        format!(":where({}){}", marker, suffix)
    };

    let composed = if combinator.contains('~') {
        format!("{}:is({} ~ *)", selector, marker_expr)
    } else {
        format!("{}:is({} *)", selector, marker_expr)
    };
    Some((composed, WEIGHT_PSEUDO))
}

fn compose_template(template: &str, selector: &str) -> Option<String> {
    let template = template.trim();
    if template.is_empty() {
        return None;
    }
    if template.contains('&') {
        return Some(template.replace('&', selector));
    }
    Some(format!("{} {}", template, selector))
}

fn media_feature_params(name: &str) -> Option<&'static str> {
    let params = match name {
        "motion-safe" => "(prefers-reduced-motion: no-preference)",
        "motion-reduce" => "(prefers-reduced-motion: reduce)",
        "contrast-more" => "(prefers-contrast: more)",
        "contrast-less" => "(prefers-contrast: less)",
        "forced-colors" => "(forced-colors: active)",
        "portrait" => "(orientation: portrait)",
        "landscape" => "(orientation: landscape)",
        "pointer-fine" => "(pointer: fine)",
        "pointer-coarse" => "(pointer: coarse)",
        "print" => "print",
        _ => return None,
    };
    Some(params)
}

fn supports_params(name: &str) -> Option<String> {
    if let Some(inner) = name
        .strip_prefix("supports-[")
        .and_then(|v| v.strip_suffix(']'))
    {
        if inner.is_empty() {
            return None;
        }
        let value = crate::candidate::normalize_arbitrary_value(inner);
        if value.starts_with('(') || value.starts_with("not ") {
            return Some(value);
        }
        return Some(format!("({})", value));
    }
    if let Some(inner) = name
        .strip_prefix("not-supports-[")
        .and_then(|v| v.strip_suffix(']'))
    {
        if inner.is_empty() {
            return None;
        }
        let value = crate::candidate::normalize_arbitrary_value(inner);
        return Some(format!("not ({})", value));
    }
    if let Some(property) = name.strip_prefix("supports-") {
        if property.is_empty() || property.contains('[') {
            return None;
        }
        return Some(format!("({}: var(--iw))", property));
    }
    None
}

fn attribute_suffix(prefix: &str, key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    if let Some(inner) = key.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        if inner.is_empty() {
            return None;
        }
        return Some(format!(
            "[{}-{}]",
            prefix,
            crate::candidate::normalize_arbitrary_value(inner)
        ));
    }
    Some(format!("[{}-{}]", prefix, key))
}

fn aria_suffix(key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    if key.starts_with('[') {
        return attribute_suffix("aria", key);
    }
    match key {
        "busy" | "checked" | "disabled" | "expanded" | "hidden" | "pressed" | "readonly"
        | "required" | "selected" => Some(format!("[aria-{}=\"true\"]", key)),
        _ => Some(format!("[aria-{}]", key)),
    }
}

/// Argument of `has-*` / `in-*`: bracketed text is a literal selector, a
/// bare name is a pseudo-class.
fn pseudo_argument(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if let Some(inner) = raw.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        if inner.is_empty() {
            return None;
        }
        return Some(crate::candidate::normalize_arbitrary_value(inner));
    }
    Some(format!(":{}", raw))
}

/// Selector suffix and ordering weight for a simple named variant.
fn pseudo_suffix(name: &str) -> Option<(String, u16)> {
    let (suffix, weight) = match name {
        "rtl" => (
            ":where(:dir(rtl), [dir=\"rtl\"], [dir=\"rtl\"] *)",
            WEIGHT_DIRECTION,
        ),
        "ltr" => (
            ":where(:dir(ltr), [dir=\"ltr\"], [dir=\"ltr\"] *)",
            WEIGHT_DIRECTION,
        ),
        "first" => (":first-child", WEIGHT_STRUCTURAL),
        "last" => (":last-child", WEIGHT_STRUCTURAL),
        "only" => (":only-child", WEIGHT_STRUCTURAL),
        "odd" => (":nth-child(odd)", WEIGHT_STRUCTURAL),
        "even" => (":nth-child(even)", WEIGHT_STRUCTURAL),
        "first-of-type" => (":first-of-type", WEIGHT_STRUCTURAL),
        "last-of-type" => (":last-of-type", WEIGHT_STRUCTURAL),
        "only-of-type" => (":only-of-type", WEIGHT_STRUCTURAL),
        "empty" => (":empty", WEIGHT_STRUCTURAL),
        "hover" => (":hover", WEIGHT_PSEUDO),
        "focus" => (":focus", WEIGHT_PSEUDO),
        "focus-within" => (":focus-within", WEIGHT_PSEUDO),
        "focus-visible" => (":focus-visible", WEIGHT_PSEUDO),
        "active" => (":active", WEIGHT_PSEUDO),
        "visited" => (":visited", WEIGHT_PSEUDO),
        "target" => (":target", WEIGHT_PSEUDO),
        "disabled" => (":disabled", WEIGHT_PSEUDO),
        "enabled" => (":enabled", WEIGHT_PSEUDO),
        "checked" => (":checked", WEIGHT_PSEUDO),
        "indeterminate" => (":indeterminate", WEIGHT_PSEUDO),
        "default" => (":default", WEIGHT_PSEUDO),
        "optional" => (":optional", WEIGHT_PSEUDO),
        "required" => (":required", WEIGHT_PSEUDO),
        "valid" => (":valid", WEIGHT_PSEUDO),
        "invalid" => (":invalid", WEIGHT_PSEUDO),
        "in-range" => (":in-range", WEIGHT_PSEUDO),
        "out-of-range" => (":out-of-range", WEIGHT_PSEUDO),
        "placeholder-shown" => (":placeholder-shown", WEIGHT_PSEUDO),
        "autofill" => (":autofill", WEIGHT_PSEUDO),
        "read-only" => (":read-only", WEIGHT_PSEUDO),
        "open" => (":is([open], :popover-open, :open)", WEIGHT_PSEUDO),
        "before" => ("::before", WEIGHT_PSEUDO),
        "after" => ("::after", WEIGHT_PSEUDO),
        "first-letter" => ("::first-letter", WEIGHT_PSEUDO),
        "first-line" => ("::first-line", WEIGHT_PSEUDO),
        "marker" => ("::marker", WEIGHT_PSEUDO),
        "selection" => ("::selection", WEIGHT_PSEUDO),
        "file" => ("::file-selector-button", WEIGHT_PSEUDO),
        "backdrop" => ("::backdrop", WEIGHT_PSEUDO),
        "placeholder" => ("::placeholder", WEIGHT_PSEUDO),
        _ => {
            if let Some(expr) = nth_suffix(name) {
                return Some((expr, WEIGHT_STRUCTURAL));
            }
            return None;
        }
    };
    Some((suffix.to_string(), weight))
}

fn nth_suffix(name: &str) -> Option<String> {
    if let Some(raw) = name.strip_prefix("nth-last-of-type-") {
        return Some(format!(":nth-last-of-type({})", nth_argument(raw)?));
    }
    if let Some(raw) = name.strip_prefix("nth-last-") {
        return Some(format!(":nth-last-child({})", nth_argument(raw)?));
    }
    if let Some(raw) = name.strip_prefix("nth-of-type-") {
        return Some(format!(":nth-of-type({})", nth_argument(raw)?));
    }
    if let Some(raw) = name.strip_prefix("nth-") {
        return Some(format!(":nth-child({})", nth_argument(raw)?));
    }
    None
}

fn nth_argument(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if let Some(inner) = raw.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        if inner.is_empty() {
            return None;
        }
        return Some(crate::candidate::normalize_arbitrary_value(inner));
    }
    Some(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::VariantRegistry;
    use crate::candidate;

    fn tokens_of(class: &str) -> Vec<crate::candidate::VariantToken> {
        candidate::parse(class).expect("parses").variants
    }

    #[test]
    fn applies_pseudo_classes_in_user_order() {
        let registry = VariantRegistry::with_defaults();
        let first = registry.apply(".x", &tokens_of("hover:focus:p-4"));
        let second = registry.apply(".x", &tokens_of("focus:hover:p-4"));
        assert_eq!(first.selector, ".x:hover:focus");
        assert_eq!(second.selector, ".x:focus:hover");
    }

    #[test]
    fn breakpoint_pushes_media_wrapper_without_touching_selector() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("sm:p-4"));
        assert_eq!(applied.selector, ".x");
        assert_eq!(applied.wrappers.len(), 1);
        assert_eq!(applied.wrappers[0].name, "media");
        assert_eq!(applied.wrappers[0].params, "(min-width: 640px)");
    }

    #[test]
    fn wrappers_accumulate_in_application_order() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("sm:motion-safe:hidden"));
        assert_eq!(applied.wrappers[0].params, "(min-width: 640px)");
        assert_eq!(
            applied.wrappers[1].params,
            "(prefers-reduced-motion: no-preference)"
        );
    }

    #[test]
    fn group_hover_keeps_specificity_at_zero() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("group-hover:underline"));
        assert_eq!(applied.selector, ".x:is(:where(.group):hover *)");
    }

    #[test]
    fn named_group_uses_escaped_marker() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("group-hover/sidebar:underline"));
        assert_eq!(
            applied.selector,
            ".x:is(:where(.group\\/sidebar):hover *)"
        );
    }

    #[test]
    fn peer_uses_sibling_combinator() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("peer-focus:underline"));
        assert_eq!(applied.selector, ".x:is(:where(.peer):focus ~ *)");
    }

    #[test]
    fn arbitrary_variant_relativizes_with_ampersand() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("[&>*]:underline"));
        assert_eq!(applied.selector, ".x>*");
    }

    #[test]
    fn arbitrary_at_rule_variant_becomes_wrapper() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("[@media(prefers-reduced-motion)]:block"));
        assert_eq!(applied.selector, ".x");
        assert_eq!(applied.wrappers[0].name, "media");
        assert_eq!(applied.wrappers[0].params, "(prefers-reduced-motion)");
    }

    #[test]
    fn container_variant_uses_container_scale() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("@sm:p-4"));
        assert_eq!(applied.wrappers[0].name, "container");
        assert_eq!(applied.wrappers[0].params, "(min-width: 24rem)");
    }

    #[test]
    fn arbitrary_breakpoint_variants_use_literal_widths() {
        let registry = VariantRegistry::with_defaults();
        let min = registry.apply(".x", &tokens_of("min-[600px]:p-4"));
        assert_eq!(min.selector, ".x");
        assert_eq!(min.wrappers[0].name, "media");
        assert_eq!(min.wrappers[0].params, "(min-width: 600px)");
        let max = registry.apply(".x", &tokens_of("max-[900px]:p-4"));
        assert_eq!(max.wrappers[0].params, "(max-width: 900px)");
    }

    #[test]
    fn arbitrary_container_variants_use_literal_widths() {
        let registry = VariantRegistry::with_defaults();
        let min = registry.apply(".x", &tokens_of("@min-[400px]:p-4"));
        assert_eq!(min.wrappers[0].name, "container");
        assert_eq!(min.wrappers[0].params, "(min-width: 400px)");
        let max = registry.apply(".x", &tokens_of("@max-[400px]:p-4"));
        assert_eq!(max.wrappers[0].name, "container");
        assert_eq!(max.wrappers[0].params, "(max-width: 400px)");
    }

    #[test]
    fn empty_bracket_arguments_are_skipped() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("min-[]:p-4"));
        assert_eq!(applied.selector, ".x");
        assert!(applied.wrappers.is_empty());
    }

    #[test]
    fn supports_variant_wraps_query() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("supports-[display:flex]:p-4"));
        assert_eq!(applied.wrappers[0].name, "supports");
        assert_eq!(applied.wrappers[0].params, "(display:flex)");
    }

    #[test]
    fn unknown_named_variant_is_skipped() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("bogus-variant:block"));
        assert_eq!(applied.selector, ".x");
        assert!(applied.wrappers.is_empty());
    }

    #[test]
    fn dark_defaults_to_media_query() {
        let registry = VariantRegistry::with_defaults();
        let applied = registry.apply(".x", &tokens_of("dark:p-4"));
        assert_eq!(applied.wrappers[0].params, "(prefers-color-scheme: dark)");
    }

    #[test]
    fn dark_selector_strategy_overrides_media() {
        let mut registry = VariantRegistry::with_defaults();
        registry.set_dark_selector(".dark &");
        let applied = registry.apply(".x", &tokens_of("dark:p-4"));
        assert_eq!(applied.selector, ".dark .x");
        assert!(applied.wrappers.is_empty());
    }

    #[test]
    fn custom_variant_registration_rejects_duplicates() {
        let mut registry = VariantRegistry::with_defaults();
        registry
            .register("hocus", "&:hover, &:focus", false)
            .expect("first registration");
        assert!(registry.register("hocus", "&:hover", false).is_err());
        registry
            .register("hocus", "&:hover", true)
            .expect("overwrite allowed");
    }

    #[test]
    fn weight_bands_order_breakpoints_above_pseudos() {
        let registry = VariantRegistry::with_defaults();
        let hover = registry.apply(".x", &tokens_of("hover:p-4"));
        let sm = registry.apply(".x", &tokens_of("sm:p-4"));
        let md = registry.apply(".x", &tokens_of("md:p-4"));
        let dark = registry.apply(".x", &tokens_of("dark:p-4"));
        assert!(hover.weight < sm.weight);
        assert!(sm.weight < md.weight);
        assert!(md.weight < dark.weight);
    }
}
