use crate::models::{Document, QuestionType, QuizOutput, SaveFormat};
use crate::services::chunker::{CHUNK_SIZE, chunk_text};
use crate::services::extractor::extract_text;
use crate::services::llm::{ChatCompletion, generate_question};
use crate::services::persister::save_questions;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

pub const EXTRACTION_FAILED: &str = "Could not extract text from the document.";

pub async fn generate_quiz<C: ChatCompletion>(
    document: Document,
    question_type: QuestionType,
    save_format: SaveFormat,
    client: &C,
    output_dir: &Path,
) -> Result<QuizOutput> {
    // Step 1: Pull the text out of the upload
    let text = tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        .context("Text extraction task failed")??;

    if text.is_empty() {
        info!("No text extracted, skipping generation");
        return Ok(QuizOutput {
            display: EXTRACTION_FAILED.to_string(),
            question_count: 0,
            file: None,
        });
    }

    // Step 2: One question per chunk, strictly in order
    let questions = generate_questions(&text, question_type, client).await?;

    // Step 3: Format and optionally persist
    let display = questions.join("\n\n");
    let file = save_questions(&questions, save_format, output_dir)?;
    if let Some(path) = &file {
        info!("Saved {} questions to {}", questions.len(), path.display());
    }

    Ok(QuizOutput {
        display,
        question_count: questions.len(),
        file,
    })
}

/// Any failed chunk aborts the whole run; earlier replies are dropped.
async fn generate_questions<C: ChatCompletion>(
    text: &str,
    question_type: QuestionType,
    client: &C,
) -> Result<Vec<String>> {
    let total = chunk_text(text, CHUNK_SIZE).count();
    info!("Generating {} {} questions", total, question_type.label());

    let mut questions = Vec::with_capacity(total);
    for (idx, chunk) in chunk_text(text, CHUNK_SIZE).enumerate() {
        debug!("Chunk {}/{} ({} chars)", idx + 1, total, chunk.chars().count());
        let question = generate_question(client, chunk, question_type)
            .await
            .with_context(|| format!("Question generation failed for chunk {}", idx + 1))?;
        questions.push(question);
    }

    Ok(questions)
}
