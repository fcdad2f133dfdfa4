//! Finds template sections: a heading block plus every block up to the next
//! top-level heading (or the end of the document).
//!
//! # Match policy
//! A label matches a block when both are equal after [`fold_label`] (trim,
//! lower-case, accents removed). Substring containment is never used. Blocks
//! styled as top-level headings win; only if none carries the label does the
//! first plain paragraph with exactly that text count as the heading.

use std::ops::Range;

use crate::docx::Block;

use super::normalize::fold_label;

/// Style names and ids recognised as top-level headings.
pub const DEFAULT_HEADING_STYLES: &[&str] = &[
    "heading 1",
    "heading1",
    "título 1",
    "titulo1",
    "ttulo1",
];

/// The set of style identifiers that mark section boundaries.
#[derive(Debug, Clone)]
pub struct HeadingStyles {
    folded: Vec<String>,
}

impl HeadingStyles {
    pub fn new<I, S>(styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded: Vec<String> = styles
            .into_iter()
            .map(|s| fold_label(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        folded.sort();
        folded.dedup();
        Self { folded }
    }

    /// True when the block's style name or id is in the set.
    pub fn is_top_level(&self, block: &Block) -> bool {
        if !block.is_paragraph() {
            return false;
        }
        [block.style_name(), block.style_id()]
            .into_iter()
            .flatten()
            .any(|style| self.folded.contains(&fold_label(style)))
    }
}

impl Default for HeadingStyles {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_STYLES)
    }
}

/// A located section: the heading index and the range of blocks it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: usize,
    pub body: Range<usize>,
}

pub fn find_heading_index(blocks: &[Block], label: &str, headings: &HeadingStyles) -> Option<usize> {
    let target = fold_label(label);
    let matches = |block: &Block| block.is_paragraph() && fold_label(block.text()) == target;

    blocks
        .iter()
        .position(|b| headings.is_top_level(b) && matches(b))
        .or_else(|| blocks.iter().position(matches))
}

pub fn find_section_end(blocks: &[Block], start: usize, headings: &HeadingStyles) -> usize {
    blocks
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, b)| headings.is_top_level(b))
        .map(|(i, _)| i)
        .unwrap_or(blocks.len())
}

pub fn locate_section(blocks: &[Block], label: &str, headings: &HeadingStyles) -> Option<Section> {
    let heading = find_heading_index(blocks, label, headings)?;
    let end = find_section_end(blocks, heading, headings);
    Some(Section {
        heading,
        body: heading + 1..end,
    })
}
