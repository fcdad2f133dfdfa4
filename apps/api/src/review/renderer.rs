use std::path::Path;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::docx::{DocxError, Document};

use super::locator::HeadingStyles;
use super::payload::ReviewInput;
use super::rebuilder::{rebuild_section, set_labeled_line};
use super::sections::{
    peer_feedback_blocks, self_assessment_blocks, summary_blocks, FEEDBACK_HEADING, NAME_LABEL,
    PERIOD_LABEL, SELF_ASSESSMENT_HEADING, SUMMARY_HEADING,
};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Applies the review to an already loaded template, in the fixed order:
/// labeled lines, self-assessment, peer feedback, summary.
pub fn apply_review(doc: &mut Document, input: &ReviewInput, headings: &HeadingStyles) {
    set_labeled_line(doc, NAME_LABEL, &input.evaluado);
    set_labeled_line(doc, PERIOD_LABEL, &input.period);

    rebuild_section(
        doc,
        SELF_ASSESSMENT_HEADING,
        self_assessment_blocks(input.self_assessment.as_ref()),
        headings,
    );
    rebuild_section(
        doc,
        FEEDBACK_HEADING,
        peer_feedback_blocks(&input.evaluations),
        headings,
    );
    rebuild_section(doc, SUMMARY_HEADING, summary_blocks(&input.summary), headings);
}

/// Loads the template at `template`, fills it in and returns the `.docx` bytes.
pub fn render_review(
    template: &Path,
    input: &ReviewInput,
    headings: &HeadingStyles,
) -> Result<Vec<u8>, DocxError> {
    let mut doc = Document::open(template)?;
    apply_review(&mut doc, input, headings);
    doc.to_bytes()
}

pub fn download_filename(evaluado: &str, period: &str) -> String {
    format!("Performance Review – {evaluado} – {period}.docx")
}

/// `Content-Disposition` value carrying an ASCII fallback name plus the exact
/// UTF-8 name as an RFC 5987 `filename*` parameter.
pub fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(filename),
        urlencoding::encode(filename)
    )
}

fn ascii_fallback(filename: &str) -> String {
    filename
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            '–' | '—' => '-',
            '"' | '\\' | '/' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect()
}
