use crate::model::enquiry::{DocFile, DocKind, EnquiryRecord};
use serde::Serialize;

/// Overlay listing the files of one record. Opening it never touches the
/// network; the files already travel with the record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttachmentViewer {
    #[default]
    Closed,
    Open {
        record_id: String,
        files: Vec<DocFile>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentEntry {
    pub icon: &'static str,
    pub name: String,
    pub kind: DocKind,
    pub size: Option<String>,
    pub url: String,
    pub download_url: String,
}

impl AttachmentViewer {
    pub fn open(&mut self, record: &EnquiryRecord) {
        *self = AttachmentViewer::Open {
            record_id: record.id.clone(),
            files: record.files.clone(),
        };
    }

    pub fn close(&mut self) {
        *self = AttachmentViewer::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, AttachmentViewer::Open { .. })
    }

    pub fn record_id(&self) -> Option<&str> {
        match self {
            AttachmentViewer::Open { record_id, .. } => Some(record_id),
            AttachmentViewer::Closed => None,
        }
    }

    pub fn files(&self) -> &[DocFile] {
        match self {
            AttachmentViewer::Open { files, .. } => files,
            AttachmentViewer::Closed => &[],
        }
    }

    pub fn entries(&self) -> Vec<AttachmentEntry> {
        self.files()
            .iter()
            .map(|file| AttachmentEntry {
                icon: file.kind.icon(),
                name: file.name.clone(),
                kind: file.kind,
                size: file.size.map(format_size),
                url: file.url.clone(),
                download_url: download_url(&file.url),
            })
            .collect()
    }
}

/// Cloudinary serves a file as an attachment when `fl_attachment` follows
/// `/upload/`. Other hosts get the URL unchanged.
pub fn download_url(url: &str) -> String {
    const MARKER: &str = "/upload/";
    match url.find(MARKER) {
        Some(pos) if url.contains("cloudinary.com") && !url.contains("/upload/fl_attachment") => {
            let split = pos + MARKER.len();
            format!("{}fl_attachment/{}", &url[..split], &url[split..])
        }
        _ => url.to_string(),
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} B")
    } else if value < KB * KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{:.1} MB", value / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EnquiryRecord {
        EnquiryRecord::new("r1", "a@b.com", "1")
            .with_file(DocFile::new(
                "scan.pdf",
                "https://res.cloudinary.com/demo/image/upload/v1/scan.pdf",
                None,
                Some(2048),
            ))
            .with_file(DocFile::new("photo", "https://files.example.com/photo.png", None, None))
    }

    #[test]
    fn test_open_then_close() {
        let mut viewer = AttachmentViewer::default();
        assert!(!viewer.is_open());
        assert!(viewer.entries().is_empty());

        viewer.open(&record());
        assert_eq!(viewer.record_id(), Some("r1"));
        assert_eq!(viewer.files().len(), 2);

        viewer.close();
        assert_eq!(viewer, AttachmentViewer::Closed);
    }

    #[test]
    fn test_entries_carry_icons_and_links() {
        let mut viewer = AttachmentViewer::default();
        viewer.open(&record());
        let entries = viewer.entries();
        assert_eq!(entries[0].icon, "[PDF]");
        assert_eq!(entries[0].size.as_deref(), Some("2.0 KB"));
        assert_eq!(
            entries[0].download_url,
            "https://res.cloudinary.com/demo/image/upload/fl_attachment/v1/scan.pdf"
        );
        assert_eq!(entries[1].icon, "[IMG]");
        assert_eq!(entries[1].download_url, entries[1].url);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
