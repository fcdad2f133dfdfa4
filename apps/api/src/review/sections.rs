//! Content generated for each rebuilt section of the review template.

use crate::docx::{Block, Run};

use super::normalize::{format_name_from_email, safe_text, PLACEHOLDER};
use super::payload::{EvaluationRecord, SelfAssessmentRecord};

pub const SELF_ASSESSMENT_HEADING: &str = "Autoevaluación";
pub const FEEDBACK_HEADING: &str = "Feedback recibido";
pub const SUMMARY_HEADING: &str = "Resumen";

pub const NAME_LABEL: &str = "Nombre:";
pub const PERIOD_LABEL: &str = "Periodo evaluado:";

pub const NO_SELF_ASSESSMENT: &str = "No se registró autoevaluación.";

pub const POSITIVES_LABEL: &str = "1. Aspectos positivos";
pub const IMPROVEMENTS_LABEL: &str = "2. Aspectos a mejorar";
pub const ADDITIONAL_LABEL: &str = "3. Algo más que quieras compartir.";

const BODY_STYLE: &str = "Normal";
const EVALUATOR_STYLE: &str = "Heading 2";
const BODY_SIZE_PT: u16 = 11;

fn body_line(text: &str) -> Block {
    Block::paragraph(BODY_STYLE).with_run(Run::text(text).sized(BODY_SIZE_PT))
}

fn question_label(label: &str) -> Block {
    Block::paragraph(BODY_STYLE).with_run(Run::text(label).bold())
}

/// Bold label followed by its answer, for each of the three questions.
fn question_pairs(positives: &str, improvements: &str, additional: &str) -> Vec<Block> {
    [
        (POSITIVES_LABEL, positives),
        (IMPROVEMENTS_LABEL, improvements),
        (ADDITIONAL_LABEL, additional),
    ]
    .into_iter()
    .flat_map(|(label, answer)| [question_label(label), body_line(&safe_text(answer))])
    .collect()
}

/// Self-assessment answers, or a single notice when none were given.
/// The last paragraph ends with a page break so the next section starts on a
/// new page.
pub fn self_assessment_blocks(record: Option<&SelfAssessmentRecord>) -> Vec<Block> {
    let mut blocks = match record.filter(|r| !r.is_blank()) {
        Some(r) => question_pairs(&r.positives, &r.improvements, &r.additional),
        None => vec![body_line(NO_SELF_ASSESSMENT)],
    };
    if let Some(last) = blocks.last_mut() {
        last.push_run(Run::page_break());
    }
    blocks
}

/// One block group per evaluator, in input order, separated by page breaks.
pub fn peer_feedback_blocks(evaluations: &[EvaluationRecord]) -> Vec<Block> {
    if evaluations.is_empty() {
        return vec![body_line(PLACEHOLDER)];
    }

    let mut blocks = Vec::with_capacity(evaluations.len() * 8);
    for (i, evaluation) in evaluations.iter().enumerate() {
        if i > 0 {
            blocks.push(Block::page_break());
        }
        let name = format_name_from_email(&evaluation.evaluator);
        let name = if name.is_empty() { PLACEHOLDER } else { name.as_str() };
        blocks.push(Block::paragraph(EVALUATOR_STYLE).with_run(Run::text(name)));
        blocks.extend(question_pairs(
            &evaluation.positives,
            &evaluation.improvements,
            &evaluation.additional,
        ));
    }
    blocks
}

/// One line per non-blank line of the summary; the placeholder if there are none.
pub fn summary_blocks(summary: &str) -> Vec<Block> {
    let lines: Vec<Block> = summary
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(body_line)
        .collect();

    if lines.is_empty() {
        vec![body_line(PLACEHOLDER)]
    } else {
        lines
    }
}
