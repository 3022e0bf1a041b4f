// src/gateway/page.rs
//! Extraction for the word-progress page of one level.
//!
//! Layout (rendered):
//! ```text
//! <h3 id="All Characters">…</h3>
//! <div class="MuiGrid-container …">
//!   <div class="MuiGrid-item …"> … <span class="text-red-600">你</span> … </div>
//! </div>
//! <h3 id="All Words">…</h3>
//! …
//! ```
//! New entries of the level are the red-highlighted elements inside the grid
//! that directly follows a category heading. Everything else on the page
//! (already-known entries, navigation) is ignored.

use crate::core::html::{find_close_ci, inner_text, next_open_tag, to_lower};
use super::{Category, LevelCategories};

pub const HEADING_TAG: &str = "h3";
pub const GRID_CLASS: &str = "MuiGrid-container";
pub const ENTRY_CLASS: &str = "text-red-600";

/// All categories of a rendered level page. Missing headings yield empty lists.
pub fn extract_level(doc: &str) -> LevelCategories {
    let mut cats = LevelCategories::new();
    for category in Category::ALL {
        cats.insert(category, extract_category(doc, category).unwrap_or_default());
    }
    cats
}

/// A page is ready once the "All Characters" grid shows at least one new entry.
pub fn is_ready(doc: &str) -> bool {
    extract_category(doc, Category::AllCharacters).is_some_and(|v| !v.is_empty())
}

/// New entries under one heading, `None` if the heading is not on the page.
pub fn extract_category(doc: &str, category: Category) -> Option<Vec<String>> {
    let grid = grid_after_heading(doc, category.label())?;

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(tag) = next_open_tag(grid, pos) {
        pos = tag.end;
        if !tag.has_class(ENTRY_CLASS) { continue; }

        let text = inner_text(grid, &tag);
        if !text.is_empty() {
            out.push(text);
        }
    }
    Some(out)
}

/// Slice covering the grid sibling of `<h3 id="{id}">`, up to the next heading.
/// Empty when the heading is not followed by a grid.
fn grid_after_heading<'a>(doc: &'a str, id: &str) -> Option<&'a str> {
    let heading = find_heading(doc, id)?;
    let after = find_close_ci(doc, HEADING_TAG, heading)
        .and_then(|close| doc[close..].find('>').map(|gt| close + gt + 1))?;

    let sibling = next_open_tag(doc, after)?;
    let between = &doc[after..sibling.start];
    if !sibling.has_class(GRID_CLASS) || contains_close_tag(between) {
        return Some("");
    }

    let end = to_lower(&doc[sibling.end..])
        .find(&join!("<", HEADING_TAG))
        .map_or(doc.len(), |p| sibling.end + p);
    Some(&doc[sibling.start..end])
}

// Offset just past the opening `<h3 id="…">` tag.
fn find_heading(doc: &str, id: &str) -> Option<usize> {
    let mut pos = 0usize;
    while let Some(tag) = next_open_tag(doc, pos) {
        pos = tag.end;
        if tag.name == HEADING_TAG && tag.attr("id") == Some(id) {
            return Some(tag.end);
        }
    }
    None
}

// Adjacent-sibling check: only whitespace/text may sit between heading and grid.
fn contains_close_tag(s: &str) -> bool {
    s.contains("</")
}
