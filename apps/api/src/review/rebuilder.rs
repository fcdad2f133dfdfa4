use tracing::debug;

use crate::docx::{Block, Document};

use super::locator::{locate_section, HeadingStyles};
use super::normalize::PLACEHOLDER;

/// Replaces the body of the section headed by `label` with `content`.
///
/// The heading block and everything outside the section are left alone.
/// Returns `false` (and changes nothing) when the template has no such section.
pub fn rebuild_section(
    doc: &mut Document,
    label: &str,
    content: Vec<Block>,
    headings: &HeadingStyles,
) -> bool {
    let Some(section) = locate_section(doc.blocks(), label, headings) else {
        debug!("Section '{label}' not in template; skipping");
        return false;
    };

    debug!(
        "Rebuilding section '{label}': {} blocks out, {} in",
        section.body.len(),
        content.len()
    );
    doc.splice(section.body, content);
    true
}

/// Rewrites the first paragraph starting with `label` as `"<label> <value>"`.
pub fn set_labeled_line(doc: &mut Document, label: &str, value: &str) -> bool {
    let label = label.trim();
    let value = if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value.trim()
    };

    match doc
        .blocks_mut()
        .iter_mut()
        .find(|b| b.is_paragraph() && b.text().trim().starts_with(label))
    {
        Some(block) => {
            block.set_text(&format!("{label} {value}"));
            true
        }
        None => {
            debug!("Labeled line '{label}' not in template; skipping");
            false
        }
    }
}
