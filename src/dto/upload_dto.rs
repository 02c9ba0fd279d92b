use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryUploadResponse {
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub error: Option<CloudinaryErrorBody>,
}

/// A file read from disk (or built in memory) ready for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Guesses the MIME type from the file extension.
    pub fn content_type_for(filename: &str) -> &'static str {
        let extension = filename
            .rsplit('.')
            .next()
            .filter(|ext| *ext != filename)
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => "application/pdf",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(UploadFile::content_type_for("degree.PDF"), "application/pdf");
        assert_eq!(UploadFile::content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(UploadFile::content_type_for("README"), "application/octet-stream");
    }
}
