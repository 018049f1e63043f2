use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl From<(usize, usize)> for Location {
    fn from((line, col): (usize, usize)) -> Self {
        Location { line, col }
    }
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("XML syntax error: {message} at {location}")]
    Syntax { message: String, location: Location },

    #[error("Failed to write document: {0}")]
    Write(String),
}

impl From<roxmltree::Error> for DocumentError {
    fn from(e: roxmltree::Error) -> Self {
        let pos = e.pos();
        DocumentError::Syntax {
            message: e.to_string(),
            location: (pos.row as usize, pos.col as usize).into(),
        }
    }
}
