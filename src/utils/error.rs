// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 model not pulled, 500 runner crashed

    #[error("Failed to parse generation response: {0}")]
    Parse(String),

    #[error("Generation service returned no content")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Invalid header vocabulary: {0}")]
    Vocabulary(String),

    #[error("Could not read vocabulary file: {0}")]
    VocabularyIo(#[from] std::io::Error),

    #[error("Could not parse vocabulary file: {0}")]
    VocabularyFormat(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("Could not read front matter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse front matter file: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RevisionError {
    #[error("Could not open revision source: {0}")]
    Open(String),

    #[error("Revision source has no worksheet")]
    NoWorksheet,

    #[error("Revision source is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Could not read logo image {path}: {source}")]
    Logo {
        path: String,
        source: std::io::Error,
    },

    #[error("Could not pack document: {0}")]
    Pack(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("No document has been generated yet")]
    NotGenerated,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Front matter could not be loaded: {0}")]
    FrontMatter(#[from] FrontMatterError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Revision history could not be loaded: {0}")]
    Revisions(#[from] RevisionError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
