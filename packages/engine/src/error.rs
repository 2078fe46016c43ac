use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IseriesError {
    pub code: ErrorCode,
    pub title: String,
    pub description: String,
    /// Byte offset into the statement text the error points at, when one applies.
    pub offset: Option<usize>,
}

impl IseriesError {
    pub fn new(code: ErrorCode, title: &str, description: &str) -> Self {
        Self {
            code,
            title: title.to_string(),
            description: description.to_string(),
            offset: None,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl std::fmt::Display for IseriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(
                f,
                "{}: {} (at byte {offset})",
                self.code.as_str(),
                self.description
            ),
            None => write!(f, "{}: {}", self.code.as_str(), self.description),
        }
    }
}

impl std::error::Error for IseriesError {}
