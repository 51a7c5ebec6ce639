// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// A browser URL path plus query string, as seen by the router.
///
/// Routes are transient: one is built per navigation event, handed to the
/// matched action and the routed subscribers, and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    search: String,
}

impl Route {
    /// Builds a route from a pathname and a raw search string.
    ///
    /// The pathname is normalized to start with `/`; a leading `?` on the
    /// search string is stripped so `search()` is always the bare key/value
    /// text.
    pub fn new(path: impl Into<String>, search: impl Into<String>) -> Self {
        let raw_path = path.into();
        let path = if raw_path.starts_with('/') {
            raw_path
        } else {
            format!("/{raw_path}")
        };
        let raw_search = search.into();
        let search = raw_search
            .strip_prefix('?')
            .map(str::to_owned)
            .unwrap_or(raw_search);
        Self { path, search }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn query(&self) -> Query {
        Query::parse(&self.search)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.search.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.search)
        }
    }
}

/// An ordered multimap view of a query string.
///
/// Order is preserved so that re-serializing after a `remove` keeps the
/// remaining keys exactly as the browser sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Parses a search string (with or without a leading `?`).
    ///
    /// Values are percent-decoded and `+` is treated as a space, matching
    /// `URLSearchParams` semantics. Empty segments are skipped.
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        let mut pairs = Vec::new();
        for segment in search.split('&') {
            if segment.is_empty() {
                continue;
            }
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key, value),
                None => (segment, ""),
            };
            pairs.push((decode_component(key), decode_component(value)));
        }
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes every occurrence of `key`, returning the first value seen.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let first = self
            .pairs
            .iter()
            .position(|(k, _)| k == key)
            .map(|idx| self.pairs[idx].1.clone());
        self.pairs.retain(|(k, _)| k != key);
        first
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Serializes back to a search string, `""` when empty.
    pub fn to_search(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let body = self
            .pairs
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    encode_component(k)
                } else {
                    format!("{}={}", encode_component(k), encode_component(v))
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("?{body}")
    }
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'%' => {
                let hex = bytes
                    .get(idx + 1..idx + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        idx += 3;
                    }
                    // Malformed escape: keep the literal '%'.
                    None => {
                        out.push(b'%');
                        idx += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                idx += 1;
            }
            byte => {
                out.push(byte);
                idx += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Percent-encodes a URL path, leaving `/` separators intact.
pub fn encode_path(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if is_unreserved(byte) || byte == b'/' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Percent-decodes a URL path.
pub fn decode_path(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let hex = bytes.get(idx + 1..idx + 3);
            if let Some(h) = hex.and_then(|h| std::str::from_utf8(h).ok()) {
                if let Ok(byte) = u8::from_str_radix(h, 16) {
                    out.push(byte);
                    idx += 3;
                    continue;
                }
            }
        }
        out.push(bytes[idx]);
        idx += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Joins URL fragments with single `/` separators.
///
/// The leading slash of the first fragment is preserved; empty fragments
/// are skipped. No encoding is applied.
pub fn url_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts {
        let trimmed = part.trim_matches('/');
        if out.is_empty() {
            if part.starts_with('/') {
                out.push('/');
            }
            out.push_str(trimmed);
        } else if !trimmed.is_empty() {
            if !out.ends_with('/') {
                out.push('/');
            }
            out.push_str(trimmed);
        }
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}
