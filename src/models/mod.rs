use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An uploaded file. Only the filename suffix decides how it is parsed.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionType {
    #[default]
    Mcq,
    FillInTheBlank,
    ShortAnswer,
    ConceptExplanation,
    Numerical,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::Mcq,
        QuestionType::FillInTheBlank,
        QuestionType::ShortAnswer,
        QuestionType::ConceptExplanation,
        QuestionType::Numerical,
    ];

    /// Parses a form label. Anything unrecognized is treated as MCQ.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::FillInTheBlank => "Fill-in-the-Blank",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::ConceptExplanation => "Concept Explanation",
            QuestionType::Numerical => "Numerical",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            QuestionType::Mcq => {
                "generate a multiple-choice question (MCQ) with four answer options. Specify the correct answer."
            }
            QuestionType::FillInTheBlank => {
                "create a fill-in-the-blank question by leaving out an important word or concept."
            }
            QuestionType::ShortAnswer => "generate a short answer question.",
            QuestionType::ConceptExplanation => {
                "create a question that requires explaining the concept in detail."
            }
            QuestionType::Numerical => {
                "create a numerical question. Provide the correct answer if possible."
            }
        }
    }

    /// Renders the prompt for one chunk. The chunk is embedded verbatim.
    pub fn prompt(self, chunk: &str) -> String {
        format!(
            "Based on the following content, {}\n\nText:\n{}\n\nResponse:",
            self.instruction(),
            chunk
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    None,
    TextFile,
    CsvFile,
}

impl SaveFormat {
    pub const ALL: [SaveFormat; 3] = [SaveFormat::None, SaveFormat::TextFile, SaveFormat::CsvFile];

    /// Parses a form label. Anything unrecognized disables saving.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|format| format.label() == label)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            SaveFormat::None => "None",
            SaveFormat::TextFile => "Text File",
            SaveFormat::CsvFile => "CSV File",
        }
    }

    pub fn file_name(self) -> Option<&'static str> {
        match self {
            SaveFormat::None => None,
            SaveFormat::TextFile => Some(TEXT_FILE_NAME),
            SaveFormat::CsvFile => Some(CSV_FILE_NAME),
        }
    }
}

pub const TEXT_FILE_NAME: &str = "generated_questions.txt";
pub const CSV_FILE_NAME: &str = "generated_questions.csv";

/// What a single pipeline run hands back to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutput {
    pub display: String,
    pub question_count: usize,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub questions: String,
    pub question_count: usize,
    pub download_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_labels_round_trip() {
        for kind in QuestionType::ALL {
            assert_eq!(QuestionType::from_label(kind.label()), kind);
        }
    }

    #[test]
    fn unknown_question_type_renders_mcq_prompt() {
        let chunk = "Ohm's law relates voltage, current and resistance.";
        let fallback = QuestionType::from_label("Essay");
        assert_eq!(fallback, QuestionType::Mcq);
        assert_eq!(fallback.prompt(chunk), QuestionType::Mcq.prompt(chunk));
        assert_eq!(
            QuestionType::from_label("").prompt(chunk),
            QuestionType::Mcq.prompt(chunk)
        );
    }

    #[test]
    fn mcq_prompt_asks_for_options_and_answer() {
        let prompt = QuestionType::Mcq.prompt("chunk body");
        assert_eq!(
            prompt,
            "Based on the following content, generate a multiple-choice question (MCQ) with four answer options. Specify the correct answer.\n\nText:\nchunk body\n\nResponse:"
        );
    }

    #[test]
    fn each_template_is_distinct_and_embeds_chunk() {
        let prompts: Vec<String> = QuestionType::ALL
            .into_iter()
            .map(|kind| kind.prompt("  raw chunk  "))
            .collect();
        for (i, prompt) in prompts.iter().enumerate() {
            assert!(prompt.contains("\n\nText:\n  raw chunk  \n\nResponse:"));
            for other in &prompts[i + 1..] {
                assert_ne!(prompt, other);
            }
        }
    }

    #[test]
    fn save_format_parsing_and_file_names() {
        assert_eq!(SaveFormat::from_label("Text File"), SaveFormat::TextFile);
        assert_eq!(SaveFormat::from_label("CSV File"), SaveFormat::CsvFile);
        assert_eq!(SaveFormat::from_label("None"), SaveFormat::None);
        assert_eq!(SaveFormat::from_label("PDF"), SaveFormat::None);
        assert_eq!(SaveFormat::None.file_name(), None);
        assert_eq!(SaveFormat::TextFile.file_name(), Some("generated_questions.txt"));
        assert_eq!(SaveFormat::CsvFile.file_name(), Some("generated_questions.csv"));
    }
}
