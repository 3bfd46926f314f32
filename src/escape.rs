//! Class-name to CSS-identifier escaping.
//!
//! A utility class like `sm:bg-red-500/50` is not a valid CSS identifier;
//! every character outside `[A-Za-z0-9_-]` must be backslash-escaped, and a
//! selector that begins with a digit needs the CSS hex-escape form (`\3N `).
//! Escaping runs for every candidate in a batch, so results are memoized
//! behind an explicit cache owned by the compilation session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Memoization cache for [`escape_class`]. One cache lives on each compiler
/// session; `clear` resets it deterministically for tests.
#[derive(Debug, Default)]
pub struct EscapeCache {
    entries: Mutex<HashMap<String, Arc<str>>>,
}

impl EscapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escapes `raw`, returning the cached value when one exists. Repeated
    /// calls for the same input return the same allocation.
    pub fn escape(&self, raw: &str) -> Arc<str> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(cached) = entries.get(raw) {
            return Arc::clone(cached);
        }
        let escaped: Arc<str> = Arc::from(escape_class(raw).as_str());
        entries.insert(raw.to_string(), Arc::clone(&escaped));
        escaped
    }

    pub fn clear(&self) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.clear();
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Escapes a raw class name into a valid CSS identifier. Not idempotent:
/// escaping already-escaped text doubles the backslashes, so callers go
/// through [`EscapeCache::escape`] with the raw class only.
pub fn escape_class(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() * 2);
    let mut chars = raw.chars().peekable();
    let mut first = true;

    while let Some(ch) = chars.next() {
        if first {
            first = false;
            if ch.is_ascii_digit() {
                push_hex_escape(&mut escaped, ch);
                continue;
            }
            if ch == '-' {
                if let Some(next) = chars.peek().copied() {
                    if next.is_ascii_digit() {
                        escaped.push('-');
                        push_hex_escape(&mut escaped, next);
                        chars.next();
                        continue;
                    }
                }
            }
        }
        if is_identifier_char(ch) {
            escaped.push(ch);
        } else {
            escaped.push('\\');
            escaped.push(ch);
        }
    }

    escaped
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn push_hex_escape(out: &mut String, ch: char) {
    out.push('\\');
    out.push_str(&format!("{:x}", ch as u32));
    out.push(' ');
}
