#[cfg(test)]
#[path = "syllabus_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;
use tokio::task;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum ContentType {
    #[strum(serialize = "application/pdf")]
    Pdf,
    #[strum(serialize = "text/plain")]
    Text,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<ContentType> {
        match mime.trim().to_lowercase().as_str() {
            "application/pdf" => return Some(ContentType::Pdf),
            "text/plain" | "text/markdown" => return Some(ContentType::Text),
            _ => return None,
        }
    }

    /// PDFs are recognised by extension or by their `%PDF-` header, anything
    /// with a text extension is read as text.
    pub fn detect(file_path: &path::Path, bytes: &[u8]) -> Option<ContentType> {
        let extension = file_path
            .extension()
            .map(|e| return e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if extension == "pdf" || bytes.starts_with(b"%PDF-") {
            return Some(ContentType::Pdf);
        }
        if ["txt", "md", "markdown", "text"].contains(&extension.as_str()) {
            return Some(ContentType::Text);
        }

        return None;
    }
}

pub struct SyllabusTextExtractor {}

impl SyllabusTextExtractor {
    /// Extracts text from an uploaded document. A document that cannot be
    /// parsed yields an empty string, callers are expected to reject empty
    /// syllabus text.
    pub async fn extract(bytes: Vec<u8>, content_type: &str) -> Result<String> {
        match ContentType::from_mime(content_type) {
            Some(ContentType::Pdf) => return Ok(SyllabusTextExtractor::extract_pdf(bytes).await),
            Some(ContentType::Text) => return Ok(String::from_utf8_lossy(&bytes).to_string()),
            None => bail!(format!("Unsupported syllabus content type {content_type}")),
        }
    }

    pub async fn extract_file(file_path: &path::Path) -> Result<String> {
        let bytes = fs::read(file_path).await?;
        let content_type = match ContentType::detect(file_path, &bytes) {
            Some(content_type) => content_type,
            None => bail!(format!(
                "Unsupported syllabus file {}. Upload a PDF or a text file.",
                file_path.display()
            )),
        };

        return SyllabusTextExtractor::extract(bytes, &content_type.to_string()).await;
    }

    async fn extract_pdf(bytes: Vec<u8>) -> String {
        // The PDF parser is synchronous and may panic on malformed input.
        let res = task::spawn_blocking(move || {
            return pdf_extract::extract_text_from_mem(&bytes);
        })
        .await;

        match res {
            Ok(Ok(text)) => {
                tracing::debug!(len = text.len(), "Extracted syllabus text from PDF");
                return text;
            }
            Ok(Err(err)) => {
                tracing::warn!(error = ?err, "Failed to extract text from PDF");
            }
            Err(err) => {
                tracing::warn!(error = ?err, "PDF text extraction panicked");
            }
        }

        return "".to_string();
    }
}
