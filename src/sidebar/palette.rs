// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Searchable command-palette mirror of the sidebar panels.
//!
//! Entries are keyed by `(widget, side)`: the same widget id on the other
//! side is a distinct entry, and removal must match both fields.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::{Side, WidgetId};

/// One palette entry, one per registered panel widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    widget: WidgetId,
    side: Side,
    title: String,
}

impl PaletteEntry {
    pub fn new(widget: WidgetId, side: Side, title: impl Into<String>) -> Self {
        Self {
            widget,
            side,
            title: title.into(),
        }
    }

    pub fn widget(&self) -> &WidgetId {
        &self.widget
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A cheaply-cloneable handle to the palette entry list.
#[derive(Debug, Clone, Default)]
pub struct CommandPalette {
    entries: Rc<RefCell<Vec<PaletteEntry>>>,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&self, entry: PaletteEntry) {
        self.entries.borrow_mut().push(entry);
    }

    /// Removes the entry matching both `widget` and `side`; returns whether
    /// an entry was removed.
    pub fn remove_entry(&self, widget: &WidgetId, side: Side) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| !(entry.widget == *widget && entry.side == side));
        entries.len() != before
    }

    pub fn entries(&self) -> Vec<PaletteEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Ranks entries against `query`; an empty query returns everything in
    /// insertion order. Entries that match the query as a plain substring
    /// rank above subsequence-only matches.
    pub fn search(&self, query: &str) -> Vec<PaletteEntry> {
        let entries = self.entries.borrow();
        if query.trim().is_empty() {
            return entries.clone();
        }

        let needle = query.trim().to_lowercase();
        let mut scored = entries
            .iter()
            .filter_map(|entry| {
                let haystack = entry.title.to_lowercase();
                let score =
                    regular_score(&needle, &haystack).or_else(|| fuzzy_score(&needle, &haystack));
                score.map(|score| (score, entry.clone()))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|(a, _), (b, _)| b.cmp(a));
        scored.into_iter().map(|(_, entry)| entry).collect()
    }
}

fn is_boundary_char(ch: char) -> bool {
    !ch.is_alphanumeric()
}

/// Substring tier: offset, boundary, and exactness dominate.
fn regular_score(needle: &str, haystack: &str) -> Option<i64> {
    let first = haystack.find(needle)?;
    let starts = first == 0;
    let start_boundary =
        starts || haystack[..first].chars().last().is_some_and(is_boundary_char);

    let mut score = 1_200_000i64.saturating_sub((first as i64) * 1000);
    score -= haystack.chars().count() as i64;
    if starts {
        score += 50_000;
    }
    if start_boundary {
        score += 20_000;
    }
    if haystack == needle {
        score += 100_000;
    }
    Some(score)
}

/// Fuzzy tier: rapidfuzz ratio blended with subsequence tightness. Only
/// reached when the substring tier declined the entry, so every gap in the
/// match is penalized rather than rewarding runs.
fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let fit = subsequence_fit(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (ratio * 1000.0).round() as i64;
    score -= fit.span as i64;
    score -= (fit.start as i64) / 4;
    score -= (fit.gaps as i64) * 40;
    if fit.word_start {
        score += 150;
    }
    Some(score)
}

/// How a needle sits inside a haystack when matched greedily left to right.
struct SubsequenceFit {
    /// Index of the first matched character.
    start: usize,
    /// Distance covered from first to last matched character.
    span: usize,
    /// Transitions between matched characters that are not adjacent.
    gaps: usize,
    /// The match begins at a word boundary.
    word_start: bool,
}

fn subsequence_fit(needle: &str, haystack: &str) -> Option<SubsequenceFit> {
    let hay: Vec<char> = haystack.chars().collect();
    let mut positions = Vec::new();
    let mut cursor = 0usize;
    for want in needle.chars() {
        let offset = hay[cursor..].iter().position(|&ch| ch == want)?;
        positions.push(cursor + offset);
        cursor += offset + 1;
    }

    let start = *positions.first()?;
    let end = *positions.last()?;
    let gaps = positions
        .windows(2)
        .filter(|pair| pair[1] != pair[0] + 1)
        .count();
    let word_start = start == 0 || is_boundary_char(hay[start - 1]);
    Some(SubsequenceFit {
        start,
        span: end - start + 1,
        gaps,
        word_start,
    })
}
