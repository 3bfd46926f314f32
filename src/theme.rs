//! Themed value space: an immutable namespaced `--key` -> value store.
//!
//! Lookups never mutate; every `add_*` returns a new `Theme` and the old
//! value stays valid. Utilities resolve bare tokens through an ordered
//! namespace chain and always receive `var(--ns-key)` references so the
//! generated CSS stays themeable.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Theme {
    values: BTreeMap<String, String>,
}

impl Theme {
    /// A theme with no entries at all; `resolve` misses everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in theme: color palette, spacing unit, breakpoints,
    /// container widths, text sizes, and font families.
    pub fn with_defaults() -> Self {
        let mut values = BTreeMap::new();
        values.insert("--spacing".to_string(), "0.25rem".to_string());

        for (name, value) in DEFAULT_BREAKPOINTS {
            values.insert(format!("--breakpoint-{}", name), (*value).to_string());
        }
        for (name, value) in DEFAULT_CONTAINERS {
            values.insert(format!("--container-{}", name), (*value).to_string());
        }
        for (name, value) in DEFAULT_TEXT_SIZES {
            values.insert(format!("--text-{}", name), (*value).to_string());
        }
        for (name, value) in DEFAULT_FONT_FAMILIES {
            values.insert(format!("--font-{}", name), (*value).to_string());
        }
        values.insert("--color-black".to_string(), "#000000".to_string());
        values.insert("--color-white".to_string(), "#ffffff".to_string());
        for (family, shades) in DEFAULT_PALETTE {
            for (shade, value) in *shades {
                values.insert(format!("--color-{}-{}", family, shade), (*value).to_string());
            }
        }

        Self { values }
    }

    /// Returns a new theme with `key` set; the receiver is unchanged.
    pub fn add(&self, key: &str, value: &str) -> Self {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }

    /// Returns a new theme with a whole `--color-{name}-{shade}` palette.
    pub fn add_color_palette(&self, name: &str, shades: &[(&str, &str)]) -> Self {
        let mut values = self.values.clone();
        for (shade, value) in shades {
            values.insert(format!("--color-{}-{}", name, shade), (*value).to_string());
        }
        Self { values }
    }

    pub fn add_font_family(&self, name: &str, value: &str) -> Self {
        self.add(&format!("--font-{}", name), value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves a bare token against a namespace chain, trying
    /// `{ns}-{key}` then `{ns}{key}` for each namespace in order. Returns a
    /// `var()` reference to the first hit, never the raw value.
    pub fn resolve(&self, key: &str, namespaces: &[&str]) -> Option<String> {
        self.resolve_key(key, namespaces)
            .map(|full| format!("var({})", full))
    }

    /// Like [`resolve`](Self::resolve) but returns the full custom-property
    /// name instead of a `var()` reference.
    pub fn resolve_key(&self, key: &str, namespaces: &[&str]) -> Option<String> {
        for namespace in namespaces {
            let dashed = format!("{}-{}", namespace, key);
            if self.values.contains_key(&dashed) {
                return Some(dashed);
            }
            let joined = format!("{}{}", namespace, key);
            if self.values.contains_key(&joined) {
                return Some(joined);
            }
        }
        None
    }
}

const DEFAULT_BREAKPOINTS: &[(&str, &str)] = &[
    ("sm", "640px"),
    ("md", "768px"),
    ("lg", "1024px"),
    ("xl", "1280px"),
    ("2xl", "1536px"),
];

const DEFAULT_CONTAINERS: &[(&str, &str)] = &[
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
];

const DEFAULT_TEXT_SIZES: &[(&str, &str)] = &[
    ("xs", "0.75rem"),
    ("sm", "0.875rem"),
    ("base", "1rem"),
    ("lg", "1.125rem"),
    ("xl", "1.25rem"),
    ("2xl", "1.5rem"),
    ("3xl", "1.875rem"),
    ("4xl", "2.25rem"),
    ("5xl", "3rem"),
    ("6xl", "3.75rem"),
];

const DEFAULT_FONT_FAMILIES: &[(&str, &str)] = &[
    (
        "sans",
        "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\"",
    ),
    (
        "serif",
        "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif",
    ),
    (
        "mono",
        "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", monospace",
    ),
];

const DEFAULT_PALETTE: &[(&str, &[(&str, &str)])] = &[
    (
        "slate",
        &[
            ("50", "#f8fafc"),
            ("100", "#f1f5f9"),
            ("200", "#e2e8f0"),
            ("300", "#cbd5e1"),
            ("400", "#94a3b8"),
            ("500", "#64748b"),
            ("600", "#475569"),
            ("700", "#334155"),
            ("800", "#1e293b"),
            ("900", "#0f172a"),
        ],
    ),
    (
        "gray",
        &[
            ("50", "#f9fafb"),
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
        ],
    ),
    (
        "zinc",
        &[
            ("50", "#fafafa"),
            ("100", "#f4f4f5"),
            ("200", "#e4e4e7"),
            ("300", "#d4d4d8"),
            ("400", "#a1a1aa"),
            ("500", "#71717a"),
            ("600", "#52525b"),
            ("700", "#3f3f46"),
            ("800", "#27272a"),
            ("900", "#18181b"),
        ],
    ),
    (
        "red",
        &[
            ("50", "#fef2f2"),
            ("100", "#fee2e2"),
            ("200", "#fecaca"),
            ("300", "#fca5a5"),
            ("400", "#f87171"),
            ("500", "#ef4444"),
            ("600", "#dc2626"),
            ("700", "#b91c1c"),
            ("800", "#991b1b"),
            ("900", "#7f1d1d"),
        ],
    ),
    (
        "orange",
        &[
            ("50", "#fff7ed"),
            ("100", "#ffedd5"),
            ("200", "#fed7aa"),
            ("300", "#fdba74"),
            ("400", "#fb923c"),
            ("500", "#f97316"),
            ("600", "#ea580c"),
            ("700", "#c2410c"),
            ("800", "#9a3412"),
            ("900", "#7c2d12"),
        ],
    ),
    (
        "amber",
        &[
            ("50", "#fffbeb"),
            ("100", "#fef3c7"),
            ("200", "#fde68a"),
            ("300", "#fcd34d"),
            ("400", "#fbbf24"),
            ("500", "#f59e0b"),
            ("600", "#d97706"),
            ("700", "#b45309"),
            ("800", "#92400e"),
            ("900", "#78350f"),
        ],
    ),
    (
        "yellow",
        &[
            ("50", "#fefce8"),
            ("100", "#fef9c3"),
            ("200", "#fef08a"),
            ("300", "#fde047"),
            ("400", "#facc15"),
            ("500", "#eab308"),
            ("600", "#ca8a04"),
            ("700", "#a16207"),
            ("800", "#854d0e"),
            ("900", "#713f12"),
        ],
    ),
    (
        "green",
        &[
            ("50", "#f0fdf4"),
            ("100", "#dcfce7"),
            ("200", "#bbf7d0"),
            ("300", "#86efac"),
            ("400", "#4ade80"),
            ("500", "#22c55e"),
            ("600", "#16a34a"),
            ("700", "#15803d"),
            ("800", "#166534"),
            ("900", "#14532d"),
        ],
    ),
    (
        "emerald",
        &[
            ("50", "#ecfdf5"),
            ("100", "#d1fae5"),
            ("200", "#a7f3d0"),
            ("300", "#6ee7b7"),
            ("400", "#34d399"),
            ("500", "#10b981"),
            ("600", "#059669"),
            ("700", "#047857"),
            ("800", "#065f46"),
            ("900", "#064e3b"),
        ],
    ),
    (
        "teal",
        &[
            ("50", "#f0fdfa"),
            ("100", "#ccfbf1"),
            ("200", "#99f6e4"),
            ("300", "#5eead4"),
            ("400", "#2dd4bf"),
            ("500", "#14b8a6"),
            ("600", "#0d9488"),
            ("700", "#0f766e"),
            ("800", "#115e59"),
            ("900", "#134e4a"),
        ],
    ),
    (
        "sky",
        &[
            ("50", "#f0f9ff"),
            ("100", "#e0f2fe"),
            ("200", "#bae6fd"),
            ("300", "#7dd3fc"),
            ("400", "#38bdf8"),
            ("500", "#0ea5e9"),
            ("600", "#0284c7"),
            ("700", "#0369a1"),
            ("800", "#075985"),
            ("900", "#0c4a6e"),
        ],
    ),
    (
        "blue",
        &[
            ("50", "#eff6ff"),
            ("100", "#dbeafe"),
            ("200", "#bfdbfe"),
            ("300", "#93c5fd"),
            ("400", "#60a5fa"),
            ("500", "#3b82f6"),
            ("600", "#2563eb"),
            ("700", "#1d4ed8"),
            ("800", "#1e40af"),
            ("900", "#1e3a8a"),
        ],
    ),
    (
        "indigo",
        &[
            ("50", "#eef2ff"),
            ("100", "#e0e7ff"),
            ("200", "#c7d2fe"),
            ("300", "#a5b4fc"),
            ("400", "#818cf8"),
            ("500", "#6366f1"),
            ("600", "#4f46e5"),
            ("700", "#4338ca"),
            ("800", "#3730a3"),
            ("900", "#312e81"),
        ],
    ),
    (
        "violet",
        &[
            ("50", "#f5f3ff"),
            ("100", "#ede9fe"),
            ("200", "#ddd6fe"),
            ("300", "#c4b5fd"),
            ("400", "#a78bfa"),
            ("500", "#8b5cf6"),
            ("600", "#7c3aed"),
            ("700", "#6d28d9"),
            ("800", "#5b21b6"),
            ("900", "#4c1d95"),
        ],
    ),
    (
        "purple",
        &[
            ("50", "#faf5ff"),
            ("100", "#f3e8ff"),
            ("200", "#e9d5ff"),
            ("300", "#d8b4fe"),
            ("400", "#c084fc"),
            ("500", "#a855f7"),
            ("600", "#9333ea"),
            ("700", "#7e22ce"),
            ("800", "#6b21a8"),
            ("900", "#581c87"),
        ],
    ),
    (
        "pink",
        &[
            ("50", "#fdf2f8"),
            ("100", "#fce7f3"),
            ("200", "#fbcfe8"),
            ("300", "#f9a8d4"),
            ("400", "#f472b6"),
            ("500", "#ec4899"),
            ("600", "#db2777"),
            ("700", "#be185d"),
            ("800", "#9d174d"),
            ("900", "#831843"),
        ],
    ),
];
