//! Local source files selected on the command line.

use std::path::{Path, PathBuf};

use qgen_core::FileSource;

use crate::error::{CliError, CliResult};

/// A file on disk, read lazily when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl LocalFile {
    /// Stat `path` and guess its MIME type from the extension.
    pub fn open(path: &Path) -> CliResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime: mime_for(path).to_string(),
        })
    }
}

impl FileSource for LocalFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn size_bytes(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }
}

/// MIME type for the document formats the paper server accepts.
pub fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        Some("txt") | Some("md") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("notes.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("a/b/syllabus.txt")), "text/plain");
        assert_eq!(mime_for(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn test_open_reads_size_and_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chapter1.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[b'x'; 1536]).unwrap();

        let local = LocalFile::open(&path).unwrap();
        assert_eq!(local.name, "chapter1.txt");
        assert_eq!(local.size, 1536);
        assert_eq!(local.mime, "text/plain");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let err = LocalFile::open(&dir.path().join("missing.pdf")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
