use sitecfg_document::DocumentError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Template error: {0}")]
    Template(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}

impl From<handlebars::TemplateError> for CompileError {
    fn from(e: handlebars::TemplateError) -> Self {
        CompileError::Template(e.to_string())
    }
}

impl From<handlebars::RenderError> for CompileError {
    fn from(e: handlebars::RenderError) -> Self {
        CompileError::Template(e.to_string())
    }
}
