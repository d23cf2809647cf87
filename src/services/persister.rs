use crate::models::SaveFormat;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `questions` to the fixed file for `format` inside `output_dir`,
/// replacing whatever was there. Returns `None` when `format` is `None`.
pub fn save_questions(
    questions: &[String],
    format: SaveFormat,
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(file_name) = format.file_name() else {
        return Ok(None);
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let path = output_dir.join(file_name);

    if format == SaveFormat::CsvFile {
        write_csv(questions, &path)?;
    } else {
        write_text(questions, &path)?;
    }

    Ok(Some(path))
}

fn write_text(questions: &[String], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for question in questions {
        writer.write_all(question.as_bytes())?;
        writer.write_all(b"\n\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn write_csv(questions: &[String], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(["Question"])?;
    for question in questions {
        writer.write_record([question])?;
    }
    writer.flush()?;
    Ok(())
}
