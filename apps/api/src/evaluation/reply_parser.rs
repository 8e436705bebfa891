//! Reply Parser — recovers score, comment and proposal from the model's text.
//!
//! The model is asked to start lines with the labels in [`LABELS`]. Lines that
//! don't are ignored, so a reply that ignores the format yields a partial
//! result instead of an error.

use crate::evaluation::prompts::{ReplyField, LABELS};
use crate::models::evaluation::EvaluationResult;

/// Line boundaries recognised when splitting a reply. `\r\n` produces an
/// extra empty segment, which is dropped with the other blank lines.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Returns the field a line belongs to and the trimmed text after its label.
fn classify(line: &str) -> Option<(ReplyField, &str)> {
    LABELS.iter().find_map(|(field, label)| {
        line.strip_prefix(label)
            .map(|rest| (*field, rest.trim()))
    })
}

/// Parses a raw reply. Never fails.
///
/// - a repeated score line overwrites the previous one (last wins)
/// - repeated comment/proposal lines are joined with `\n` in reply order
pub fn parse_response(reply: &str) -> EvaluationResult {
    let mut score: Option<String> = None;
    let mut comment: Vec<&str> = Vec::new();
    let mut proposal: Vec<&str> = Vec::new();

    let lines = reply
        .split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty());

    for line in lines {
        match classify(line) {
            Some((ReplyField::Score, value)) => score = Some(value.to_string()),
            Some((ReplyField::Comment, value)) => comment.push(value),
            Some((ReplyField::Proposal, value)) => proposal.push(value),
            None => {}
        }
    }

    EvaluationResult {
        score,
        comment: comment.join("\n"),
        proposal: proposal.join("\n"),
    }
}
