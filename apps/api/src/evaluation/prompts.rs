// Evaluation prompt template and the reply labels shared with the parser.

/// Which result field a reply line feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyField {
    Score,
    Comment,
    Proposal,
}

/// Line-leading labels the model is told to use, in the order it is told to
/// emit them. The parser matches against this same table.
pub const LABELS: [(ReplyField, &str); 3] = [
    (ReplyField::Score, "点数:"),
    (ReplyField::Comment, "評価コメント:"),
    (ReplyField::Proposal, "提案文:"),
];

/// Placeholder shown after each label in the output-format instruction.
fn label_placeholder(field: ReplyField) -> &'static str {
    match field {
        ReplyField::Score => "◯◯点",
        ReplyField::Comment => "●●●",
        ReplyField::Proposal => "○○○",
    }
}

/// Renders the evaluation request. Every argument is embedded verbatim and in
/// full; nothing is truncated.
pub fn build_prompt(
    case_id: &str,
    client: &str,
    project: &str,
    partner: &str,
    candidate_info: &str,
    extracted_text: &str,
) -> String {
    let output_format = LABELS
        .iter()
        .map(|(field, label)| format!("{label} {}", label_placeholder(*field)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "以下のSES案件({case_id})に対して、人材候補を100点満点で評価してください。\
         \n要件: {project}\nクライアント: {client}\nBP: {partner}\n\
         候補者情報: {candidate_info}\n\
         経歴書内容: {extracted_text}\n\
         \n出力形式を以下にしてください:\n\
         {output_format}"
    )
}
