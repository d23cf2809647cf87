//! Test-only fixtures: a scripted chat backend and an in-memory DOCX builder.

use crate::services::llm::ChatCompletion;
use anyhow::{Result, bail};
use std::io::{Cursor, Write};
use std::sync::Mutex;

/// Records every prompt and answers with `reply-<n>`, or fails on call `fail_on`.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    prompts: Mutex<Vec<String>>,
    pub fail_on: Option<usize>,
}

impl ScriptedClient {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ChatCompletion for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        let call = prompts.len();
        prompts.push(prompt.to_string());
        if self.fail_on == Some(call) {
            bail!("scripted failure on call {call}");
        }
        Ok(format!("reply-{}", call + 1))
    }
}

/// Builds a minimal `.docx` whose body holds one paragraph per entry.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    docx_with_body(&body)
}

/// Builds a minimal `.docx` around raw `w:body` markup.
pub fn docx_with_body(body: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{WORDML}"><w:body>{body}</w:body></w:document>"#
    );
    docx_with_parts(&[("word/document.xml", xml.as_str())])
}

pub const WORDML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Builds an archive holding the given `(path, xml)` parts, in order.
pub fn docx_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, xml) in parts {
        zip.start_file(*name, zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}
