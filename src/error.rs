use thiserror::Error;

/// Result type alias for uniscout operations
pub type Result<T> = std::result::Result<T, UniscoutError>;

/// Errors that can occur during uniscout operations
#[derive(Error, Debug)]
pub enum UniscoutError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote API error with HTTP status
    #[error("Remote API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Course not found
    #[error("Course not found: {0}")]
    CourseNotFound(String),

    /// Event not found
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// Login or registration rejected
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl UniscoutError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Toml(_) | Self::InvalidArgument(_) => 2,
            Self::Auth(_) => 3,
            _ => 1,
        }
    }
}

/// Rejections from the session store.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Student ID already registered")]
    StudentIdTaken,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("{0}")]
    Failed(String),
}
