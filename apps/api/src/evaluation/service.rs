//! Evaluation pipeline — one submission, start to finish.
//!
//! Flow: validate input → extract document text → build prompt →
//!       one chat-completion call → parse reply → report.
//!
//! Nothing is retried, cached or stored. Any failure ends the submission.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::prompts::build_prompt;
use crate::evaluation::reply_parser::parse_response;
use crate::extraction::TextExtractor;
use crate::llm_client::ChatModel;
use crate::models::evaluation::{CaseInput, EvaluationReport};

/// Runs evaluations against an injected extractor and chat model.
#[derive(Clone)]
pub struct Evaluator {
    extractor: Arc<dyn TextExtractor>,
    llm: Arc<dyn ChatModel>,
}

impl Evaluator {
    pub fn new(extractor: Arc<dyn TextExtractor>, llm: Arc<dyn ChatModel>) -> Self {
        Self { extractor, llm }
    }

    #[tracing::instrument(skip(self, input), fields(evaluation_id = tracing::field::Empty, case_id = %input.case_id))]
    pub async fn evaluate(&self, input: CaseInput) -> Result<EvaluationReport, AppError> {
        let evaluation_id = Uuid::new_v4();
        tracing::Span::current().record("evaluation_id", tracing::field::display(evaluation_id));

        // Step 1: every field and the document must be present
        let missing = input.missing_fields();
        if !missing.is_empty() {
            info!("Rejected incomplete submission: missing {:?}", missing);
            return Err(AppError::IncompleteInput(missing));
        }
        let CaseInput {
            case_id,
            client,
            project,
            partner,
            candidate_info,
            document,
        } = input;
        let document = document.ok_or(AppError::IncompleteInput(vec!["document"]))?;

        // Step 2: document text (CPU-bound, off the async workers)
        info!(
            "Extracting text from '{}' ({} bytes)",
            document.name,
            document.bytes.len()
        );
        let extractor = Arc::clone(&self.extractor);
        let extracted_text = tokio::task::spawn_blocking(move || extractor.extract(&document))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;
        debug!("Extracted {} characters", extracted_text.chars().count());

        // Step 3: prompt
        let prompt = build_prompt(
            &case_id,
            &client,
            &project,
            &partner,
            &candidate_info,
            &extracted_text,
        );
        debug!("Built prompt of {} characters", prompt.chars().count());

        // Step 4: single model call
        let reply = self.llm.complete(&prompt).await?;
        debug!("Received reply of {} characters", reply.chars().count());

        // Step 5: parse
        let result = parse_response(&reply);
        info!(
            "Evaluation complete: score_present={}, comment_lines={}, proposal_lines={}",
            result.score.is_some(),
            line_count(&result.comment),
            line_count(&result.proposal)
        );

        Ok(EvaluationReport {
            evaluation_id,
            case_id,
            evaluated_at: Utc::now(),
            result,
        })
    }
}

fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}
