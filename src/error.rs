use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaintsError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("'{sub_category}' is not a valid subcategory of '{category}'")]
    InvalidSubcategory {
        category: String,
        sub_category: String,
    },

    #[error("Attachment exceeds the maximum size of {limit} bytes")]
    FileTooLarge { limit: u64 },

    #[error("Unsupported attachment type: {0}")]
    UnsupportedFileType(String),

    #[error("Invalid complaint status: {0}")]
    InvalidStatus(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Complaint not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Complaint store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Project not initialized. Run 'plaints init' first.")]
    NotInitialized,

    #[error("Project already initialized at {0}")]
    AlreadyInitialized(String),
}

/// Coarse classification used at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    StoreUnavailable,
    Internal,
}

impl PlaintsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::UnknownCategory(_)
            | Self::InvalidSubcategory { .. }
            | Self::FileTooLarge { .. }
            | Self::UnsupportedFileType(_)
            | Self::InvalidStatus(_)
            | Self::MalformedRequest(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::StoreUnavailable(_)
            | Self::Storage(_)
            | Self::Io(_)
            | Self::Yaml(_)
            | Self::Json(_)
            | Self::NotInitialized => ErrorKind::StoreUnavailable,
            Self::Config(_) | Self::Parse(_) | Self::Toml(_) | Self::AlreadyInitialized(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Collapses infrastructure failures into `StoreUnavailable`, leaving
    /// domain errors such as `NotFound` untouched.
    pub fn into_store_unavailable(self) -> Self {
        match self.kind() {
            ErrorKind::StoreUnavailable | ErrorKind::Internal => match self {
                Self::StoreUnavailable(_) => self,
                other => Self::StoreUnavailable(other.to_string()),
            },
            _ => self,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaintsError>;
