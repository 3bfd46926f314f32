//! Utility implementations and the three-tier dispatch registry.
//!
//! Resolution order is deterministic: tiers run `ExactStatic` ->
//! `ConstrainedFunctional` -> `NamespaceHandler`, registration order within
//! a tier, first success wins. The tiers exist because some roots are
//! ambiguous: `bg-*` is claimed by background-position and background-size
//! before the background-color namespace handler gets a look.

use crate::ast::{decl, AstNode};
use crate::candidate::{parse_fraction, Candidate, CandidateKind, CandidateValue};
use crate::theme::Theme;
use crate::RegistryError;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityTier {
    ExactStatic,
    ConstrainedFunctional,
    NamespaceHandler,
}

impl UtilityTier {
    fn index(self) -> usize {
        match self {
            Self::ExactStatic => 0,
            Self::ConstrainedFunctional => 1,
            Self::NamespaceHandler => 2,
        }
    }
}

/// Output of a successful utility compilation. `modifier_consumed` marks a
/// candidate `/suffix` already folded into the value (fraction widths), so
/// the color-modifier stage knows not to expect a color declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub nodes: Vec<AstNode>,
    pub modifier_consumed: bool,
}

impl Compiled {
    pub fn nodes(nodes: Vec<AstNode>) -> Self {
        Self {
            nodes,
            modifier_consumed: false,
        }
    }
}

pub trait Utility: Send + Sync {
    fn try_compile(&self, candidate: &Candidate, theme: &Theme) -> Option<Compiled>;

    /// Whether a leading `-` on the candidate root is meaningful for this
    /// utility. The sign is recorded for the post-processing stage, never
    /// applied during resolution.
    fn supports_negative(&self) -> bool {
        false
    }
}

struct Registered {
    name: String,
    utility: Box<dyn Utility>,
}

#[derive(Default)]
pub struct UtilityRegistry {
    tiers: [Vec<Registered>; 3],
    names: BTreeSet<String>,
}

impl UtilityRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        register_builtins(&mut registry);
        registry
    }

    /// Registers a utility under `name`. A duplicate name without
    /// `overwrite` is a misconfigured build and fails loudly at startup.
    pub fn register(
        &mut self,
        name: &str,
        tier: UtilityTier,
        utility: Box<dyn Utility>,
        overwrite: bool,
    ) -> Result<(), RegistryError> {
        if self.names.contains(name) {
            if !overwrite {
                return Err(RegistryError::DuplicateUtility {
                    name: name.to_string(),
                });
            }
            for tier_entries in &mut self.tiers {
                tier_entries.retain(|entry| entry.name != name);
            }
        }
        self.names.insert(name.to_string());
        self.tiers[tier.index()].push(Registered {
            name: name.to_string(),
            utility,
        });
        Ok(())
    }

    fn register_builtin(&mut self, name: &str, tier: UtilityTier, utility: Box<dyn Utility>) {
        // Built-in names are distinct literals; a clash here is a bug in
        // this file.
        debug_assert!(!self.names.contains(name), "duplicate builtin {}", name);
        self.names.insert(name.to_string());
        self.tiers[tier.index()].push(Registered {
            name: name.to_string(),
            utility,
        });
    }

    /// Dispatches a candidate: tier order, then registration order, first
    /// success wins. Negative candidates only reach utilities that declare
    /// negative support.
    pub fn compile(&self, candidate: &Candidate, theme: &Theme) -> Option<Compiled> {
        if let CandidateKind::ArbitraryProperty { property, value } = &candidate.kind {
            if candidate.negative || candidate.modifier.is_some() {
                return None;
            }
            return Some(Compiled::nodes(vec![decl(property.clone(), value.clone())]));
        }

        for tier_entries in &self.tiers {
            for entry in tier_entries {
                if candidate.negative && !entry.utility.supports_negative() {
                    continue;
                }
                if let Some(compiled) = entry.utility.try_compile(candidate, theme) {
                    log::trace!("candidate '{}' matched utility '{}'", candidate.raw, entry.name);
                    return Some(compiled);
                }
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Value-kind predicates for arbitrary values. These reject nonsensical
// bracket values at compile time instead of emitting invalid CSS.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Length,
    Number,
    Color,
    Integer,
}

pub fn accepts_value(kind: ValueKind, raw: &str) -> bool {
    match kind {
        ValueKind::Length => is_length_like(raw),
        ValueKind::Number => is_number_like(raw),
        ValueKind::Color => is_color_like(raw),
        ValueKind::Integer => raw.parse::<i64>().is_ok(),
    }
}

fn is_length_like(raw: &str) -> bool {
    if raw == "0" {
        return true;
    }
    for function in ["calc(", "var(", "min(", "max(", "clamp("] {
        if raw.starts_with(function) {
            return true;
        }
    }
    if raw.ends_with('%') {
        return raw[..raw.len() - 1].parse::<f64>().is_ok();
    }
    let unit_start = raw
        .char_indices()
        .find(|(_, ch)| ch.is_ascii_alphabetic())
        .map(|(idx, _)| idx);
    match unit_start {
        Some(idx) if idx > 0 => {
            let unit = &raw[idx..];
            let number = &raw[..idx];
            number.parse::<f64>().is_ok()
                && matches!(
                    unit,
                    "px" | "em" | "rem" | "vh" | "vw" | "vmin" | "vmax" | "ch" | "ex" | "pt"
                        | "pc" | "cm" | "mm" | "in" | "svh" | "svw" | "lvh" | "lvw" | "dvh"
                        | "dvw" | "cqw" | "cqh" | "fr"
                )
        }
        _ => false,
    }
}

fn is_number_like(raw: &str) -> bool {
    raw.parse::<f64>().is_ok()
}

fn is_color_like(raw: &str) -> bool {
    if raw == "transparent" || raw == "currentColor" || raw == "inherit" {
        return true;
    }
    if raw.starts_with('#') {
        let digits = &raw[1..];
        return matches!(digits.len(), 3 | 4 | 6 | 8)
            && digits.chars().all(|ch| ch.is_ascii_hexdigit());
    }
    for function in [
        "rgb(", "rgba(", "hsl(", "hsla(", "oklch(", "oklab(", "lab(", "lch(", "color(",
        "color-mix(", "var(",
    ] {
        if raw.starts_with(function) {
            return true;
        }
    }
    false
}

/// A bare spacing multiplier: digits with at most one decimal point.
fn is_spacing_multiplier(token: &str) -> bool {
    if token.is_empty() || token.starts_with('.') || token.ends_with('.') {
        return false;
    }
    let mut seen_dot = false;
    for ch in token.chars() {
        if ch == '.' {
            if seen_dot {
                return false;
            }
            seen_dot = true;
            continue;
        }
        if !ch.is_ascii_digit() {
            return false;
        }
    }
    true
}

fn spacing_value(token: &str) -> Option<String> {
    if token == "px" {
        return Some("1px".to_string());
    }
    if is_spacing_multiplier(token) {
        return Some(format!("calc(var(--spacing) * {})", token));
    }
    None
}

// ---------------------------------------------------------------------------
// Built-in implementations.

/// An exact-name utility mapping to a fixed declaration list.
struct StaticUtility {
    root: &'static str,
    declarations: &'static [(&'static str, &'static str)],
}

impl Utility for StaticUtility {
    fn try_compile(&self, candidate: &Candidate, _theme: &Theme) -> Option<Compiled> {
        if candidate.modifier.is_some() || candidate.base() != self.root {
            return None;
        }
        if matches!(&candidate.kind, CandidateKind::Functional { value: Some(_), .. }) {
            return None;
        }
        Some(Compiled::nodes(
            self.declarations
                .iter()
                .map(|(property, value)| decl(*property, *value))
                .collect(),
        ))
    }
}

/// Spacing-scale utility: `p-4` -> `padding: calc(var(--spacing) * 4)`.
/// Also covers gap and inset roots; margins and insets support negatives.
struct SpacingUtility {
    root: &'static str,
    properties: &'static [&'static str],
    keywords: &'static [(&'static str, &'static str)],
    negative: bool,
}

impl Utility for SpacingUtility {
    fn try_compile(&self, candidate: &Candidate, theme: &Theme) -> Option<Compiled> {
        if candidate.modifier.is_some() {
            return None;
        }
        let value = if let Some(explicit) = candidate.explicit_value(self.root) {
            match explicit {
                CandidateValue::Arbitrary(raw) => {
                    if !accepts_value(ValueKind::Length, raw) {
                        return None;
                    }
                    raw.clone()
                }
                CandidateValue::PropertyReference(name) => format!("var({})", name),
                _ => return None,
            }
        } else {
            let token = candidate.value_after(self.root)?;
            if let Some((_, keyword_value)) =
                self.keywords.iter().find(|(keyword, _)| *keyword == token)
            {
                (*keyword_value).to_string()
            } else if let Some(value) = spacing_value(token) {
                value
            } else {
                theme.resolve(token, &["--spacing"])?
            }
        };
        Some(Compiled::nodes(
            self.properties
                .iter()
                .map(|property| decl(*property, value.clone()))
                .collect(),
        ))
    }

    fn supports_negative(&self) -> bool {
        self.negative
    }
}

/// Sizing utility: keywords, fractions (`w-1/2`), the spacing scale, the
/// container scale, and arbitrary lengths.
struct SizingUtility {
    root: &'static str,
    properties: &'static [&'static str],
    keywords: &'static [(&'static str, &'static str)],
    namespaces: &'static [&'static str],
}

impl Utility for SizingUtility {
    fn try_compile(&self, candidate: &Candidate, theme: &Theme) -> Option<Compiled> {
        if let Some(explicit) = candidate.explicit_value(self.root) {
            if candidate.modifier.is_some() {
                return None;
            }
            let value = match explicit {
                CandidateValue::Arbitrary(raw) => {
                    if !accepts_value(ValueKind::Length, raw) {
                        return None;
                    }
                    raw.clone()
                }
                CandidateValue::PropertyReference(name) => format!("var({})", name),
                _ => return None,
            };
            return Some(Compiled::nodes(self.declarations(&value)));
        }

        let token = candidate.value_after(self.root)?;

        // `w-1/2` parses as value `1` with modifier `2`.
        if let Some(denominator) = candidate.modifier.as_deref() {
            let fraction = parse_fraction(token, denominator)?;
            if let CandidateValue::Fraction {
                numerator,
                denominator,
            } = fraction
            {
                let value = format!("calc({}/{} * 100%)", numerator, denominator);
                return Some(Compiled {
                    nodes: self.declarations(&value),
                    modifier_consumed: true,
                });
            }
            return None;
        }

        let value = if let Some((_, keyword_value)) =
            self.keywords.iter().find(|(keyword, _)| *keyword == token)
        {
            (*keyword_value).to_string()
        } else if let Some(value) = spacing_value(token) {
            value
        } else {
            theme.resolve(token, self.namespaces)?
        };
        Some(Compiled::nodes(self.declarations(&value)))
    }
}

impl SizingUtility {
    fn declarations(&self, value: &str) -> Vec<AstNode> {
        self.properties
            .iter()
            .map(|property| decl(*property, value.to_string()))
            .collect()
    }
}

/// Namespace-handler color utility. Resolution returns `var()` references;
/// the `/50` opacity modifier is expanded by the post-processing pipeline,
/// not here.
struct ColorUtility {
    root: &'static str,
    properties: &'static [&'static str],
    namespaces: &'static [&'static str],
}

impl Utility for ColorUtility {
    fn try_compile(&self, candidate: &Candidate, theme: &Theme) -> Option<Compiled> {
        let value = if let Some(explicit) = candidate.explicit_value(self.root) {
            match explicit {
                CandidateValue::Arbitrary(raw) => {
                    if !accepts_value(ValueKind::Color, raw) {
                        return None;
                    }
                    raw.clone()
                }
                CandidateValue::PropertyReference(name) => format!("var({})", name),
                _ => return None,
            }
        } else {
            let token = candidate.value_after(self.root)?;
            match token {
                "transparent" => "transparent".to_string(),
                "current" => "currentColor".to_string(),
                "inherit" => "inherit".to_string(),
                _ => theme.resolve(token, self.namespaces)?,
            }
        };
        Some(Compiled::nodes(
            self.properties
                .iter()
                .map(|property| decl(*property, value.clone()))
                .collect(),
        ))
    }
}

/// Constrained-functional utility over a fixed token table: claims its root
/// only for listed tokens, leaving the rest to later tiers (`bg-top` vs
/// `bg-red-500`).
struct KeywordUtility {
    root: &'static str,
    property: &'static str,
    values: &'static [(&'static str, &'static str)],
}

impl Utility for KeywordUtility {
    fn try_compile(&self, candidate: &Candidate, _theme: &Theme) -> Option<Compiled> {
        if candidate.modifier.is_some() {
            return None;
        }
        let token = candidate.value_after(self.root)?;
        let (_, value) = self.values.iter().find(|(keyword, _)| *keyword == token)?;
        Some(Compiled::nodes(vec![decl(self.property, *value)]))
    }
}

/// Constrained-functional font-size utility: `text-sm` resolves against the
/// `--text` namespace; `text-[14px]` takes length-kind arbitrary values.
/// Color tokens fall through to the text color namespace handler.
struct TextSizeUtility;

impl Utility for TextSizeUtility {
    fn try_compile(&self, candidate: &Candidate, theme: &Theme) -> Option<Compiled> {
        if candidate.modifier.is_some() {
            return None;
        }
        if let Some(explicit) = candidate.explicit_value("text") {
            if let CandidateValue::Arbitrary(raw) = explicit {
                if accepts_value(ValueKind::Length, raw) {
                    return Some(Compiled::nodes(vec![decl("font-size", raw.clone())]));
                }
            }
            return None;
        }
        let token = candidate.value_after("text")?;
        let value = theme.resolve(token, &["--text"])?;
        Some(Compiled::nodes(vec![decl("font-size", value)]))
    }
}

/// Font-family via the `--font` namespace (`font-sans`).
struct FontFamilyUtility;

impl Utility for FontFamilyUtility {
    fn try_compile(&self, candidate: &Candidate, theme: &Theme) -> Option<Compiled> {
        if candidate.modifier.is_some() {
            return None;
        }
        let token = candidate.value_after("font")?;
        let value = theme.resolve(token, &["--font"])?;
        Some(Compiled::nodes(vec![decl("font-family", value)]))
    }
}

struct OpacityUtility;

impl Utility for OpacityUtility {
    fn try_compile(&self, candidate: &Candidate, _theme: &Theme) -> Option<Compiled> {
        if candidate.modifier.is_some() {
            return None;
        }
        if let Some(CandidateValue::Arbitrary(raw)) = candidate.explicit_value("opacity") {
            let percent_like = raw
                .strip_suffix('%')
                .is_some_and(|digits| digits.parse::<f64>().is_ok());
            if !accepts_value(ValueKind::Number, raw) && !percent_like {
                return None;
            }
            return Some(Compiled::nodes(vec![decl("opacity", raw.clone())]));
        }
        let token = candidate.value_after("opacity")?;
        let percent = token.parse::<u32>().ok().filter(|value| *value <= 100)?;
        let value = format!("{}", percent as f64 / 100.0);
        Some(Compiled::nodes(vec![decl("opacity", value)]))
    }
}

struct ZIndexUtility;

impl Utility for ZIndexUtility {
    fn try_compile(&self, candidate: &Candidate, _theme: &Theme) -> Option<Compiled> {
        if candidate.modifier.is_some() {
            return None;
        }
        if let Some(CandidateValue::Arbitrary(raw)) = candidate.explicit_value("z") {
            if !accepts_value(ValueKind::Integer, raw) {
                return None;
            }
            return Some(Compiled::nodes(vec![decl("z-index", raw.clone())]));
        }
        let token = candidate.value_after("z")?;
        if token == "auto" {
            return Some(Compiled::nodes(vec![decl("z-index", "auto")]));
        }
        let value = token.parse::<i64>().ok()?;
        Some(Compiled::nodes(vec![decl("z-index", value.to_string())]))
    }

    fn supports_negative(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Catalog registration.

fn register_builtins(registry: &mut UtilityRegistry) {
    for (name, declarations) in STATIC_UTILITIES {
        registry.register_builtin(
            name,
            UtilityTier::ExactStatic,
            Box::new(StaticUtility {
                root: name,
                declarations,
            }),
        );
    }

    // Constrained-functional tier: fixed token tables and scale lookups
    // that must win their roots before the namespace handlers run.
    registry.register_builtin(
        "bg-position",
        UtilityTier::ConstrainedFunctional,
        Box::new(KeywordUtility {
            root: "bg",
            property: "background-position",
            values: &[
                ("top", "top"),
                ("bottom", "bottom"),
                ("center", "center"),
                ("left", "left"),
                ("right", "right"),
                ("left-top", "left top"),
                ("left-bottom", "left bottom"),
                ("right-top", "right top"),
                ("right-bottom", "right bottom"),
            ],
        }),
    );
    registry.register_builtin(
        "bg-size",
        UtilityTier::ConstrainedFunctional,
        Box::new(KeywordUtility {
            root: "bg",
            property: "background-size",
            values: &[("auto", "auto"), ("cover", "cover"), ("contain", "contain")],
        }),
    );
    registry.register_builtin(
        "text-size",
        UtilityTier::ConstrainedFunctional,
        Box::new(TextSizeUtility),
    );
    registry.register_builtin(
        "font-family",
        UtilityTier::ConstrainedFunctional,
        Box::new(FontFamilyUtility),
    );
    registry.register_builtin(
        "opacity",
        UtilityTier::ConstrainedFunctional,
        Box::new(OpacityUtility),
    );
    registry.register_builtin("z-index", UtilityTier::ConstrainedFunctional, Box::new(ZIndexUtility));

    for (name, root, properties, keywords, negative) in SPACING_UTILITIES {
        registry.register_builtin(
            name,
            UtilityTier::ConstrainedFunctional,
            Box::new(SpacingUtility {
                root,
                properties,
                keywords,
                negative: *negative,
            }),
        );
    }

    for (name, root, properties, keywords, namespaces) in SIZING_UTILITIES {
        registry.register_builtin(
            name,
            UtilityTier::ConstrainedFunctional,
            Box::new(SizingUtility {
                root,
                properties,
                keywords,
                namespaces,
            }),
        );
    }

    // Namespace-handler tier: open-ended theme lookups go last.
    for (name, root, properties, namespaces) in COLOR_UTILITIES {
        registry.register_builtin(
            name,
            UtilityTier::NamespaceHandler,
            Box::new(ColorUtility {
                root,
                properties,
                namespaces,
            }),
        );
    }
}

type StaticEntry = (&'static str, &'static [(&'static str, &'static str)]);

#[rustfmt::skip]
const STATIC_UTILITIES: &[StaticEntry] = &[
    ("block", &[("display", "block")]),
    ("inline-block", &[("display", "inline-block")]),
    ("inline", &[("display", "inline")]),
    ("flex", &[("display", "flex")]),
    ("inline-flex", &[("display", "inline-flex")]),
    ("grid", &[("display", "grid")]),
    ("inline-grid", &[("display", "inline-grid")]),
    ("contents", &[("display", "contents")]),
    ("flow-root", &[("display", "flow-root")]),
    ("table", &[("display", "table")]),
    ("hidden", &[("display", "none")]),
    ("static", &[("position", "static")]),
    ("fixed", &[("position", "fixed")]),
    ("absolute", &[("position", "absolute")]),
    ("relative", &[("position", "relative")]),
    ("sticky", &[("position", "sticky")]),
    ("float-left", &[("float", "left")]),
    ("float-right", &[("float", "right")]),
    ("float-none", &[("float", "none")]),
    ("clear-left", &[("clear", "left")]),
    ("clear-right", &[("clear", "right")]),
    ("clear-both", &[("clear", "both")]),
    ("clear-none", &[("clear", "none")]),
    ("overflow-auto", &[("overflow", "auto")]),
    ("overflow-hidden", &[("overflow", "hidden")]),
    ("overflow-visible", &[("overflow", "visible")]),
    ("overflow-scroll", &[("overflow", "scroll")]),
    ("visible", &[("visibility", "visible")]),
    ("invisible", &[("visibility", "hidden")]),
    ("collapse", &[("visibility", "collapse")]),
    ("isolate", &[("isolation", "isolate")]),
    ("isolation-auto", &[("isolation", "auto")]),
    ("box-border", &[("box-sizing", "border-box")]),
    ("box-content", &[("box-sizing", "content-box")]),
    ("text-left", &[("text-align", "left")]),
    ("text-center", &[("text-align", "center")]),
    ("text-right", &[("text-align", "right")]),
    ("text-justify", &[("text-align", "justify")]),
    ("uppercase", &[("text-transform", "uppercase")]),
    ("lowercase", &[("text-transform", "lowercase")]),
    ("capitalize", &[("text-transform", "capitalize")]),
    ("normal-case", &[("text-transform", "none")]),
    ("italic", &[("font-style", "italic")]),
    ("not-italic", &[("font-style", "normal")]),
    ("underline", &[("text-decoration-line", "underline")]),
    ("overline", &[("text-decoration-line", "overline")]),
    ("line-through", &[("text-decoration-line", "line-through")]),
    ("no-underline", &[("text-decoration-line", "none")]),
    ("truncate", &[
        ("overflow", "hidden"),
        ("text-overflow", "ellipsis"),
        ("white-space", "nowrap"),
    ]),
    ("sr-only", &[
        ("position", "absolute"),
        ("width", "1px"),
        ("height", "1px"),
        ("padding", "0"),
        ("margin", "-1px"),
        ("overflow", "hidden"),
        ("clip-path", "inset(50%)"),
        ("white-space", "nowrap"),
        ("border-width", "0"),
    ]),
];

type SpacingEntry = (
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static [(&'static str, &'static str)],
    bool,
);

const MARGIN_KEYWORDS: &[(&str, &str)] = &[("auto", "auto")];
const NO_KEYWORDS: &[(&str, &str)] = &[];
const INSET_KEYWORDS: &[(&str, &str)] = &[("auto", "auto"), ("full", "100%")];

#[rustfmt::skip]
const SPACING_UTILITIES: &[SpacingEntry] = &[
    ("padding", "p", &["padding"], NO_KEYWORDS, false),
    ("padding-x", "px", &["padding-left", "padding-right"], NO_KEYWORDS, false),
    ("padding-y", "py", &["padding-top", "padding-bottom"], NO_KEYWORDS, false),
    ("padding-top", "pt", &["padding-top"], NO_KEYWORDS, false),
    ("padding-right", "pr", &["padding-right"], NO_KEYWORDS, false),
    ("padding-bottom", "pb", &["padding-bottom"], NO_KEYWORDS, false),
    ("padding-left", "pl", &["padding-left"], NO_KEYWORDS, false),
    ("margin", "m", &["margin"], MARGIN_KEYWORDS, true),
    ("margin-x", "mx", &["margin-left", "margin-right"], MARGIN_KEYWORDS, true),
    ("margin-y", "my", &["margin-top", "margin-bottom"], MARGIN_KEYWORDS, true),
    ("margin-top", "mt", &["margin-top"], MARGIN_KEYWORDS, true),
    ("margin-right", "mr", &["margin-right"], MARGIN_KEYWORDS, true),
    ("margin-bottom", "mb", &["margin-bottom"], MARGIN_KEYWORDS, true),
    ("margin-left", "ml", &["margin-left"], MARGIN_KEYWORDS, true),
    ("gap", "gap", &["gap"], NO_KEYWORDS, false),
    ("gap-x", "gap-x", &["column-gap"], NO_KEYWORDS, false),
    ("gap-y", "gap-y", &["row-gap"], NO_KEYWORDS, false),
    ("inset", "inset", &["inset"], INSET_KEYWORDS, true),
    ("inset-x", "inset-x", &["left", "right"], INSET_KEYWORDS, true),
    ("inset-y", "inset-y", &["top", "bottom"], INSET_KEYWORDS, true),
    ("top", "top", &["top"], INSET_KEYWORDS, true),
    ("right", "right", &["right"], INSET_KEYWORDS, true),
    ("bottom", "bottom", &["bottom"], INSET_KEYWORDS, true),
    ("left", "left", &["left"], INSET_KEYWORDS, true),
];

type SizingEntry = (
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static [(&'static str, &'static str)],
    &'static [&'static str],
);

const WIDTH_KEYWORDS: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("full", "100%"),
    ("screen", "100vw"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
    ("px", "1px"),
];
const HEIGHT_KEYWORDS: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("full", "100%"),
    ("screen", "100vh"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
    ("px", "1px"),
];
const MAX_WIDTH_KEYWORDS: &[(&str, &str)] = &[
    ("none", "none"),
    ("full", "100%"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
];

#[rustfmt::skip]
const SIZING_UTILITIES: &[SizingEntry] = &[
    ("width", "w", &["width"], WIDTH_KEYWORDS, &["--container"]),
    ("height", "h", &["height"], HEIGHT_KEYWORDS, &[]),
    ("size", "size", &["width", "height"], WIDTH_KEYWORDS, &[]),
    ("min-width", "min-w", &["min-width"], WIDTH_KEYWORDS, &["--container"]),
    ("max-width", "max-w", &["max-width"], MAX_WIDTH_KEYWORDS, &["--container"]),
    ("min-height", "min-h", &["min-height"], HEIGHT_KEYWORDS, &[]),
    ("max-height", "max-h", &["max-height"], HEIGHT_KEYWORDS, &[]),
];

type ColorEntry = (
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static [&'static str],
);

#[rustfmt::skip]
const COLOR_UTILITIES: &[ColorEntry] = &[
    ("background-color", "bg", &["background-color"], &["--background-color", "--color"]),
    ("text-color", "text", &["color"], &["--text-color", "--color"]),
    ("border-color", "border", &["border-color"], &["--border-color", "--color"]),
    ("outline-color", "outline", &["outline-color"], &["--outline-color", "--color"]),
    ("fill", "fill", &["fill"], &["--fill", "--color"]),
    ("stroke", "stroke", &["stroke"], &["--stroke", "--color"]),
];

#[cfg(test)]
mod tests {
    use super::{accepts_value, UtilityRegistry, UtilityTier, ValueKind};
    use crate::ast::AstNode;
    use crate::candidate::parse;
    use crate::theme::Theme;

    fn compile(registry: &UtilityRegistry, theme: &Theme, class: &str) -> Option<Vec<AstNode>> {
        let candidate = parse(class)?;
        registry.compile(&candidate, theme).map(|compiled| compiled.nodes)
    }

    fn declaration(node: &AstNode) -> (&str, &str) {
        match node {
            AstNode::Declaration {
                property, value, ..
            } => (property.as_str(), value.as_str()),
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn static_tier_wins_exact_names() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let nodes = compile(&registry, &theme, "hidden").expect("compiles");
        assert_eq!(declaration(&nodes[0]), ("display", "none"));
    }

    #[test]
    fn spacing_uses_the_spacing_scale() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let nodes = compile(&registry, &theme, "p-4").expect("compiles");
        assert_eq!(
            declaration(&nodes[0]),
            ("padding", "calc(var(--spacing) * 4)")
        );
    }

    #[test]
    fn axis_spacing_emits_both_sides() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let nodes = compile(&registry, &theme, "mx-2").expect("compiles");
        assert_eq!(
            declaration(&nodes[0]),
            ("margin-left", "calc(var(--spacing) * 2)")
        );
        assert_eq!(
            declaration(&nodes[1]),
            ("margin-right", "calc(var(--spacing) * 2)")
        );
    }

    #[test]
    fn negative_candidate_only_matches_negative_capable_utilities() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        assert!(compile(&registry, &theme, "-mx-4").is_some());
        assert!(compile(&registry, &theme, "-p-4").is_none());
    }

    #[test]
    fn fraction_widths_use_percentage_calc() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let nodes = compile(&registry, &theme, "w-1/2").expect("compiles");
        assert_eq!(declaration(&nodes[0]), ("width", "calc(1/2 * 100%)"));
        let nodes = compile(&registry, &theme, "w-1/3").expect("compiles");
        assert_eq!(declaration(&nodes[0]), ("width", "calc(1/3 * 100%)"));
    }

    #[test]
    fn bg_root_is_shared_across_tiers() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let position = compile(&registry, &theme, "bg-center").expect("compiles");
        assert_eq!(declaration(&position[0]), ("background-position", "center"));
        let size = compile(&registry, &theme, "bg-cover").expect("compiles");
        assert_eq!(declaration(&size[0]), ("background-size", "cover"));
        let color = compile(&registry, &theme, "bg-red-500").expect("compiles");
        assert_eq!(
            declaration(&color[0]),
            ("background-color", "var(--color-red-500)")
        );
    }

    #[test]
    fn text_root_splits_size_and_color() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let size = compile(&registry, &theme, "text-sm").expect("compiles");
        assert_eq!(declaration(&size[0]), ("font-size", "var(--text-sm)"));
        let color = compile(&registry, &theme, "text-red-500").expect("compiles");
        assert_eq!(declaration(&color[0]), ("color", "var(--color-red-500)"));
        let arbitrary = compile(&registry, &theme, "text-[14px]").expect("compiles");
        assert_eq!(declaration(&arbitrary[0]), ("font-size", "14px"));
    }

    #[test]
    fn theme_resolution_miss_is_no_match() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::empty();
        assert!(compile(&registry, &theme, "bg-red-500").is_none());
    }

    #[test]
    fn arbitrary_values_are_kind_checked() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let nodes = compile(&registry, &theme, "w-[32px]").expect("compiles");
        assert_eq!(declaration(&nodes[0]), ("width", "32px"));
        assert!(compile(&registry, &theme, "w-[#fff]").is_none());
        assert!(compile(&registry, &theme, "bg-[#336699]").is_some());
        assert!(compile(&registry, &theme, "bg-[32px]").is_none());
    }

    #[test]
    fn property_reference_values_become_vars() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::with_defaults();
        let nodes = compile(&registry, &theme, "bg-(--brand)").expect("compiles");
        assert_eq!(declaration(&nodes[0]), ("background-color", "var(--brand)"));
    }

    #[test]
    fn arbitrary_property_compiles_directly() {
        let registry = UtilityRegistry::with_defaults();
        let theme = Theme::empty();
        let nodes = compile(&registry, &theme, "[padding-block:2rem]").expect("compiles");
        assert_eq!(declaration(&nodes[0]), ("padding-block", "2rem"));
    }

    #[test]
    fn duplicate_registration_without_overwrite_fails() {
        let mut registry = UtilityRegistry::with_defaults();
        let result = registry.register(
            "padding",
            UtilityTier::ExactStatic,
            Box::new(super::StaticUtility {
                root: "padding",
                declarations: &[("padding", "0")],
            }),
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn value_kind_predicates() {
        assert!(accepts_value(ValueKind::Length, "32px"));
        assert!(accepts_value(ValueKind::Length, "50%"));
        assert!(accepts_value(ValueKind::Length, "calc(100% - 2rem)"));
        assert!(!accepts_value(ValueKind::Length, "#fff"));
        assert!(accepts_value(ValueKind::Color, "#336699"));
        assert!(accepts_value(ValueKind::Color, "oklch(0.7 0.1 250)"));
        assert!(!accepts_value(ValueKind::Color, "12px"));
    }
}
