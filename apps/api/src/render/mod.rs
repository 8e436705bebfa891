//! HTML rendering for the single form-and-result page.
//!
//! Labels are fixed Japanese strings. Every value that came from the user or
//! from the model goes through [`escape_html`].

use std::fmt::Write;

use crate::models::evaluation::{CaseInput, EvaluationReport};

const PAGE_TITLE: &str = "SES提案評価ツール v0";
/// Shown for a score the model never labelled.
const ABSENT_SCORE: &str = "None";

/// Text values echoed back into the form after a submission.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub case_id: String,
    pub client: String,
    pub project: String,
    pub partner: String,
    pub candidate_info: String,
}

impl From<&CaseInput> for FormValues {
    fn from(input: &CaseInput) -> Self {
        Self {
            case_id: input.case_id.clone(),
            client: input.client.clone(),
            project: input.project.clone(),
            partner: input.partner.clone(),
            candidate_info: input.candidate_info.clone(),
        }
    }
}

/// What to show under the form.
#[derive(Debug)]
pub enum Outcome {
    Success(EvaluationReport),
    Failure(String),
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn text_input(out: &mut String, name: &str, label: &str, value: &str) {
    let _ = write!(
        out,
        r#"<label for="{name}">{label}</label>
<input type="text" id="{name}" name="{name}" value="{value}">
"#,
        value = escape_html(value)
    );
}

fn render_form(out: &mut String, form: &FormValues) {
    out.push_str(r#"<form method="post" action="/evaluate" enctype="multipart/form-data" onsubmit="document.getElementById('busy').hidden = false;">
"#);
    text_input(out, "case_id", "案件No.", &form.case_id);
    text_input(out, "client", "クライアント名", &form.client);
    text_input(out, "project", "案件名", &form.project);
    text_input(out, "partner", "BP", &form.partner);
    let _ = write!(
        out,
        r#"<label for="candidate_info">候補者情報 (スキル・経験など)</label>
<textarea id="candidate_info" name="candidate_info" rows="6">{}</textarea>
<label for="document">書類アップロード (PDF/DOCX/TXT)</label>
<input type="file" id="document" name="document" accept=".pdf,.docx,.txt">
<button type="submit">評価実行</button>
</form>
<p id="busy" class="busy" hidden>評価中... この処理には数秒かかります</p>
"#,
        escape_html(&form.candidate_info)
    );
}

fn render_result(out: &mut String, report: &EvaluationReport) {
    let result = &report.result;
    let score = result.score.as_deref().unwrap_or(ABSENT_SCORE);
    let _ = write!(
        out,
        r#"<section class="result">
<p class="success">評価結果 (案件No: {case_id})</p>
<p><strong>点数:</strong> {score}</p>
<p><strong>評価コメント:</strong></p>
<div class="block">{comment}</div>
<p><strong>提案文:</strong></p>
<div class="block">{proposal}</div>
</section>
"#,
        case_id = escape_html(&report.case_id),
        score = escape_html(score),
        comment = escape_html(&result.comment),
        proposal = escape_html(&result.proposal),
    );
}

fn render_error(out: &mut String, message: &str) {
    let _ = writeln!(out, r#"<p class="error">{}</p>"#, escape_html(message));
}

/// Renders the full page: the form, then the result panel or an error.
pub fn render_page(form: &FormValues, outcome: Option<&Outcome>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
label {{ display: block; margin-top: 0.75rem; }}
input[type=text], textarea {{ width: 100%; }}
button {{ margin-top: 1rem; }}
.block {{ white-space: pre-wrap; }}
.success {{ background: #e6f4ea; padding: 0.5rem; }}
.error {{ background: #fdecea; padding: 0.5rem; }}
</style>
</head>
<body>
<h1>{PAGE_TITLE}</h1>
"#
    );
    render_form(&mut out, form);
    match outcome {
        Some(Outcome::Success(report)) => render_result(&mut out, report),
        Some(Outcome::Failure(message)) => render_error(&mut out, message),
        None => {}
    }
    out.push_str("</body>\n</html>\n");
    out
}
