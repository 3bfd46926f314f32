//! Candidate parsing: one raw class token into a structured `Candidate`.
//!
//! Splitting respects bracket and paren nesting so `[&:hover]:` and
//! `supports-[display:flex]:` survive intact. Malformed input yields `None`,
//! never a panic: in a batch of hundreds of scanned tokens most strings are
//! legitimately "not a utility class".

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateKind {
    /// A bare keyword utility (`block`, `hidden`, `flex`).
    Static { root: String },
    /// A dashed utility whose value part is resolved by the matching
    /// utility. `value` is filled only for bracket/paren values; utilities
    /// strip their own root prefix from `root` for named values.
    Functional {
        root: String,
        value: Option<CandidateValue>,
    },
    /// `[property:value]`: a literal declaration.
    ArbitraryProperty { property: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateValue {
    Named(String),
    Arbitrary(String),
    Fraction { numerator: u32, denominator: u32 },
    PropertyReference(String),
}

/// One variant segment, in user order. `value` carries the sub-variant of a
/// compound (`group-hover` -> name `group`, value `hover`); `modifier`
/// carries a `/name` suffix (`group/sidebar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantToken {
    pub name: String,
    pub modifier: Option<String>,
    pub value: Option<String>,
    pub raw: String,
    pub arbitrary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub raw: String,
    pub variants: Vec<VariantToken>,
    pub important: bool,
    pub negative: bool,
    /// Trailing `/suffix` outside brackets; an opacity for color utilities,
    /// a fraction denominator for sizing utilities.
    pub modifier: Option<String>,
}

impl Candidate {
    /// The utility root text used for static-tier lookup and for functional
    /// prefix matching.
    pub fn base(&self) -> &str {
        match &self.kind {
            CandidateKind::Static { root } | CandidateKind::Functional { root, .. } => root,
            CandidateKind::ArbitraryProperty { property, .. } => property,
        }
    }

    /// For a functional candidate, the named value after `{prefix}-`.
    /// `value_after("mx")` on `mx-4` yields `4`.
    pub fn value_after(&self, prefix: &str) -> Option<&str> {
        match &self.kind {
            CandidateKind::Functional { root, value: None } => {
                let rest = root.strip_prefix(prefix)?.strip_prefix('-')?;
                if rest.is_empty() {
                    None
                } else {
                    Some(rest)
                }
            }
            _ => None,
        }
    }

    /// The parsed bracket/paren value, if the candidate carries one and its
    /// root matches `prefix` exactly.
    pub fn explicit_value(&self, prefix: &str) -> Option<&CandidateValue> {
        match &self.kind {
            CandidateKind::Functional {
                root,
                value: Some(value),
            } if root == prefix => Some(value),
            _ => None,
        }
    }
}

pub fn parse(raw: &str) -> Option<Candidate> {
    if raw.is_empty() || !is_balanced(raw) {
        return None;
    }

    let (variant_segments, base_segment) = split_variants(raw);
    if base_segment.is_empty() {
        return None;
    }

    let mut variants = Vec::with_capacity(variant_segments.len());
    for segment in variant_segments {
        variants.push(parse_variant_token(segment)?);
    }

    let (base, important) = strip_important(base_segment);
    if base.is_empty() {
        return None;
    }

    if base.starts_with('[') && base.ends_with(']') {
        let (property, value) = parse_arbitrary_property(base)?;
        return Some(Candidate {
            kind: CandidateKind::ArbitraryProperty { property, value },
            raw: raw.to_string(),
            variants,
            important,
            negative: false,
            modifier: None,
        });
    }

    let (base, negative) = strip_negative(base);
    let (base, modifier) = split_trailing_modifier(base);
    if base.is_empty() {
        return None;
    }

    let kind = parse_functional_base(base)?;
    Some(Candidate {
        kind,
        raw: raw.to_string(),
        variants,
        important,
        negative,
        modifier,
    })
}

fn parse_functional_base(base: &str) -> Option<CandidateKind> {
    if let Some(open) = base.find('[') {
        if !base.ends_with(']') || open == 0 {
            return None;
        }
        let root = base[..open].trim_end_matches('-');
        let inner = &base[open + 1..base.len() - 1];
        if root.is_empty() || inner.is_empty() {
            return None;
        }
        return Some(CandidateKind::Functional {
            root: root.to_string(),
            value: Some(CandidateValue::Arbitrary(normalize_arbitrary_value(inner))),
        });
    }

    if let Some(open) = base.find('(') {
        if !base.ends_with(')') || open == 0 {
            return None;
        }
        let root = base[..open].trim_end_matches('-');
        let inner = &base[open + 1..base.len() - 1];
        if root.is_empty() || !inner.starts_with("--") {
            return None;
        }
        return Some(CandidateKind::Functional {
            root: root.to_string(),
            value: Some(CandidateValue::PropertyReference(inner.to_string())),
        });
    }

    if base.contains('-') {
        return Some(CandidateKind::Functional {
            root: base.to_string(),
            value: None,
        });
    }

    Some(CandidateKind::Static {
        root: base.to_string(),
    })
}

fn parse_arbitrary_property(base: &str) -> Option<(String, String)> {
    let inner = &base[1..base.len() - 1];
    let (property, value) = inner.split_once(':')?;
    let property = property.trim();
    let value = value.trim();
    if property.is_empty() || value.is_empty() {
        return None;
    }
    let valid_property = property.starts_with("--")
        || property
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch == '-');
    if !valid_property {
        return None;
    }
    Some((property.to_string(), normalize_arbitrary_value(value)))
}

fn parse_variant_token(segment: &str) -> Option<VariantToken> {
    if segment.is_empty() {
        return None;
    }

    if segment.starts_with('[') && segment.ends_with(']') {
        if segment.len() <= 2 {
            return None;
        }
        return Some(VariantToken {
            name: segment.to_string(),
            modifier: None,
            value: None,
            raw: segment.to_string(),
            arbitrary: true,
        });
    }

    let (core, modifier) = split_named_modifier(segment);
    for compound in ["group", "peer"] {
        if let Some(rest) = core.strip_prefix(compound) {
            if let Some(value) = rest.strip_prefix('-') {
                if value.is_empty() {
                    return None;
                }
                return Some(VariantToken {
                    name: compound.to_string(),
                    modifier: modifier.map(str::to_string),
                    value: Some(value.to_string()),
                    raw: segment.to_string(),
                    arbitrary: false,
                });
            }
        }
    }

    Some(VariantToken {
        name: core.to_string(),
        modifier: modifier.map(str::to_string),
        value: None,
        raw: segment.to_string(),
        arbitrary: false,
    })
}

/// Splits a variant segment's `/name` suffix at nesting depth zero:
/// `group-hover/sidebar` -> (`group-hover`, `sidebar`).
fn split_named_modifier(segment: &str) -> (&str, Option<&str>) {
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    for (idx, ch) in segment.char_indices() {
        match ch {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '/' if paren_depth == 0 && bracket_depth == 0 => {
                let name = &segment[idx + 1..];
                if name.is_empty() {
                    return (&segment[..idx], None);
                }
                return (&segment[..idx], Some(name));
            }
            _ => {}
        }
    }
    (segment, None)
}

/// Splits `raw` on `:` at nesting depth zero. Returns the variant segments
/// and the final utility segment.
fn split_variants(raw: &str) -> (Vec<&str>, &str) {
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut segments = Vec::new();
    let mut start = 0usize;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            ':' if paren_depth == 0 && bracket_depth == 0 => {
                segments.push(&raw[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    (segments, &raw[start..])
}

fn strip_important(base: &str) -> (&str, bool) {
    if base.len() > 1 {
        if let Some(stripped) = base.strip_suffix('!') {
            return (stripped, true);
        }
        if let Some(stripped) = base.strip_prefix('!') {
            return (stripped, true);
        }
    }
    (base, false)
}

fn strip_negative(base: &str) -> (&str, bool) {
    if base.len() > 1 && !base.starts_with("--") {
        if let Some(stripped) = base.strip_prefix('-') {
            return (stripped, true);
        }
    }
    (base, false)
}

/// Splits a trailing `/suffix` at nesting depth zero; `bg-red-500/50` keeps
/// the slash inside `w-[calc(1/2)]` alone.
fn split_trailing_modifier(base: &str) -> (&str, Option<String>) {
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut split_at = None;

    for (idx, ch) in base.char_indices() {
        match ch {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '/' if paren_depth == 0 && bracket_depth == 0 => split_at = Some(idx),
            _ => {}
        }
    }

    match split_at {
        Some(idx) if idx + 1 < base.len() => {
            let suffix = &base[idx + 1..];
            let modifier = suffix
                .strip_prefix('[')
                .and_then(|inner| inner.strip_suffix(']'))
                .unwrap_or(suffix);
            (&base[..idx], Some(modifier.to_string()))
        }
        Some(_) => ("", None),
        None => (base, None),
    }
}

fn is_balanced(raw: &str) -> bool {
    let mut paren_depth = 0i32;
    let mut bracket_depth = 0i32;
    for ch in raw.chars() {
        match ch {
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            '[' => bracket_depth += 1,
            ']' => bracket_depth -= 1,
            _ => {}
        }
        if paren_depth < 0 || bracket_depth < 0 {
            return false;
        }
    }
    paren_depth == 0 && bracket_depth == 0
}

/// Arbitrary-value normalization: underscores become spaces unless escaped.
pub fn normalize_arbitrary_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if chars.peek() == Some(&'_') {
                out.push('_');
                chars.next();
                continue;
            }
            out.push(ch);
            continue;
        }
        if ch == '_' {
            out.push(' ');
            continue;
        }
        out.push(ch);
    }
    out
}

/// Parses `n/d` into a fraction; both parts must be positive integers.
pub fn parse_fraction(numerator: &str, denominator: &str) -> Option<CandidateValue> {
    let numerator = numerator.parse::<u32>().ok()?;
    let denominator = denominator.parse::<u32>().ok()?;
    if denominator == 0 {
        return None;
    }
    Some(CandidateValue::Fraction {
        numerator,
        denominator,
    })
}
