// src/storage/mod.rs
use crate::utils::error::StorageError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage name of the generated document; every generation overwrites it.
pub const DOCUMENT_FILE: &str = "report.docx";
/// Name offered to the browser when the document is downloaded.
pub const DOWNLOAD_NAME: &str = "GeneratedDocument.docx";
const METADATA_FILE: &str = "report_meta.json";
const RAW_CONTENT_FILE: &str = "raw_content.txt";

/// The single output location shared by CLI runs and the web surface.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    base_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a new ArtifactStore with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn document_path(&self) -> PathBuf {
        self.base_dir.join(DOCUMENT_FILE)
    }

    pub fn has_document(&self) -> bool {
        self.document_path().is_file()
    }

    /// Writes the rendered document, replacing any previous one.
    pub fn save_document(&self, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let file_path = self.document_path();
        fs::write(&file_path, bytes).map_err(StorageError::IoError)?;

        tracing::info!("Saved document to {}", file_path.display());
        Ok(file_path)
    }

    pub fn load_document(&self) -> Result<Vec<u8>, StorageError> {
        fs::read(self.document_path()).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotGenerated,
            _ => StorageError::IoError(e),
        })
    }

    /// Saves metadata about the last generation in JSON format
    pub fn save_metadata(
        &self,
        subject: &str,
        sections: &[String],
        document_bytes: usize,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(METADATA_FILE);

        let metadata = serde_json::json!({
            "subject": subject,
            "sections": sections,
            "section_count": sections.len(),
            "document_file": DOCUMENT_FILE,
            "document_bytes": document_bytes,
            "generated_at": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Keeps the raw generated text next to the document for debugging.
    pub fn save_raw(&self, raw: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(RAW_CONTENT_FILE);
        fs::write(&file_path, raw).map_err(StorageError::IoError)?;

        tracing::info!("Saved raw generated content to {}", file_path.display());
        Ok(file_path)
    }
}
