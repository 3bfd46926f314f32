//! Source scanning: walks content files and extracts candidate class
//! tokens. Extraction is deliberately permissive; the candidate parser is
//! the real gatekeeper, so the only job here is to find plausible tokens
//! and keep bracketed values intact.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Unique candidate tokens in first-seen order.
    pub classes: Vec<String>,
    pub files_scanned: usize,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan requires at least one content pattern")]
    NoPatterns,
    #[error("invalid glob pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("failed to build glob set: {0}")]
    GlobSet(#[source] globset::Error),
}

/// Walks `base` with gitignore rules applied and collects class tokens
/// from every file matching `patterns` and none of `ignore`. Unreadable
/// files are skipped, not fatal: a content glob routinely matches binaries.
pub fn scan(base: &Path, patterns: &[String], ignore: &[String]) -> Result<ScanResult, ScanError> {
    if patterns.is_empty() {
        return Err(ScanError::NoPatterns);
    }
    let globset = build_globset(patterns)?;
    let ignore_set = build_globset(ignore)?;

    let mut classes = Vec::new();
    let mut seen = HashSet::new();
    let mut files_scanned = 0usize;

    let walker = WalkBuilder::new(base).hidden(false).build();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("skipping walk entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(base).unwrap_or(path);
        if !globset.is_match(relative) && !globset.is_match(path) {
            continue;
        }
        if ignore_set.is_match(relative) || ignore_set.is_match(path) {
            continue;
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::debug!("skipping unreadable file {}: {}", path.display(), err);
                continue;
            }
        };
        files_scanned += 1;
        for token in extract_classes(&text) {
            if seen.insert(token.clone()) {
                classes.push(token);
            }
        }
    }

    log::info!(
        "scanned {} files, found {} unique candidates",
        files_scanned,
        classes.len()
    );
    Ok(ScanResult {
        classes,
        files_scanned,
    })
}

/// Extracts candidate tokens from one source text: `class`/`className`
/// attribute values plus quoted string and template literals.
pub fn extract_classes(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    let mut lists = extract_class_attributes(text);
    lists.extend(extract_string_literals(text));

    for list in lists {
        for token in split_class_list(&list) {
            if looks_like_candidate(&token) && seen.insert(token.clone()) {
                out.push(token);
            }
        }
    }
    out
}

const CLASS_ATTRIBUTES: [&str; 3] = ["class", "className", ":class"];

fn extract_class_attributes(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for attr in CLASS_ATTRIBUTES {
        for (idx, _) in text.match_indices(attr) {
            if !at_word_boundary(text, idx, attr.len()) {
                continue;
            }
            let rest = &text[idx + attr.len()..];
            let rest = rest.trim_start();
            let Some(rest) = rest.strip_prefix('=') else {
                continue;
            };
            let rest = rest.trim_start();
            let mut chars = rest.chars();
            match chars.next() {
                Some(quote @ ('"' | '\'')) => {
                    if let Some(end) = chars.as_str().find(quote) {
                        out.push(chars.as_str()[..end].to_string());
                    }
                }
                _ => {}
            }
        }
    }
    out
}

fn extract_string_literals(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch != '"' && ch != '\'' && ch != '`' {
            continue;
        }
        let rest = &text[idx + ch.len_utf8()..];
        let Some(end) = find_unescaped(rest, ch) else {
            continue;
        };
        out.push(rest[..end].to_string());
        // Advance past the closing quote.
        let skip_to = idx + ch.len_utf8() + end;
        while let Some((next_idx, _)) = chars.peek() {
            if *next_idx > skip_to {
                break;
            }
            chars.next();
        }
    }
    out
}

fn find_unescaped(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (idx, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if ch == quote {
            return Some(idx);
        }
    }
    None
}

fn at_word_boundary(text: &str, idx: usize, len: usize) -> bool {
    let before_ok = text[..idx]
        .chars()
        .last()
        .map(|ch| !ch.is_ascii_alphanumeric() && ch != '_' && ch != '-')
        .unwrap_or(true);
    let after_ok = text[idx + len..]
        .chars()
        .next()
        .map(|ch| ch.is_whitespace() || ch == '=')
        .unwrap_or(false);
    before_ok && after_ok
}

/// Splits a whitespace-separated class list, keeping whitespace inside
/// brackets and parens with the token (`bg-[url('/a b.png')]`).
fn split_class_list(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in input.chars() {
        match ch {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ => {}
        }
        if ch.is_whitespace() && bracket_depth == 0 && paren_depth == 0 {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Cheap pre-filter before the real parser sees the token. Rejects tokens
/// with characters no utility class uses and unbalanced brackets.
fn looks_like_candidate(token: &str) -> bool {
    if token.is_empty() || token.len() > 256 {
        return false;
    }
    if token.starts_with('/') || token.starts_with('.') || token.ends_with(':') {
        return false;
    }
    let mut bracket_depth = 0i32;
    let mut paren_depth = 0i32;
    let mut has_letter = false;
    for ch in token.chars() {
        if ch.is_ascii_alphabetic() {
            has_letter = true;
        }
        let allowed = ch.is_ascii_alphanumeric()
            || matches!(
                ch,
                '-' | '_' | '/' | ':' | '.' | '%' | '#' | '[' | ']' | '(' | ')' | '!' | '&'
                    | '>' | '~' | '+' | '*' | ',' | '@' | '=' | '\'' | '"' | '\\' | ' '
            );
        if !allowed {
            return false;
        }
        match ch {
            '[' => bracket_depth += 1,
            ']' => bracket_depth -= 1,
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            ' ' | '>' | '&' | ',' if bracket_depth == 0 && paren_depth == 0 => return false,
            _ => {}
        }
        if bracket_depth < 0 || paren_depth < 0 {
            return false;
        }
    }
    has_letter && bracket_depth == 0 && paren_depth == 0
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| ScanError::BadPattern {
            pattern: pattern.clone(),
            source: err,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(ScanError::GlobSet)
}
