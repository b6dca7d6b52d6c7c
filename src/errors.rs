use std::fmt;

/// Errors that can occur while loading a schema or generating GraphQL output.
#[derive(Debug)]
pub enum BridgeError
{
    /// The schema document could not be found at the specified path
    MissingSchemaFile,

    /// Failed to parse or serialize JSON
    SerializationFailed(serde_json::Error),

    /// An IO error occurred while reading or writing files
    IOError
    {
        /// Path to the file where the error occurred
        file: String,
        /// The underlying IO error
        error: std::io::Error,
    },

    /// The schema document has invalid structure or content
    InvalidSchema
    {
        /// Key where the invalid definition was found
        context: String,
        /// Details about why the schema is invalid
        details: String,
    },

    /// A field declares a validation pattern that is not a valid regular expression
    InvalidPattern
    {
        /// The field key carrying the pattern
        key: String,
        /// The regex compiler's message
        details: String,
    },

    /// The schema source listed a key but has no descriptor for it
    MissingField(String),

    /// The schema source reported an object key but has no child list for it
    MissingObjectKeys(String),
}

impl fmt::Display for BridgeError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::MissingSchemaFile => write!(f, "Schema file not found"),
            Self::SerializationFailed(err) => {
                write!(f, "Failed to (de)serialize: {}", err)
            }
            Self::IOError { file, error } => {
                write!(f, "IO error on '{}': {}", file, error)
            }
            Self::InvalidSchema { context, details } => {
                write!(f, "Invalid schema at {}: {}", context, details)
            }
            Self::InvalidPattern { key, details } => {
                write!(f, "Invalid pattern on '{}': {}", key, details)
            }
            Self::MissingField(key) => {
                write!(f, "Schema source has no descriptor for '{}'", key)
            }
            Self::MissingObjectKeys(key) => {
                write!(f, "Schema source reported '{}' as an object but lists no children for it", key)
            }
        }
    }
}

impl From<std::io::Error> for BridgeError
{
    fn from(error: std::io::Error) -> Self
    {
        BridgeError::IOError {
            file: String::new(),
            error,
        }
    }
}

impl From<serde_json::Error> for BridgeError
{
    fn from(error: serde_json::Error) -> Self
    {
        BridgeError::SerializationFailed(error)
    }
}

impl std::error::Error for BridgeError {}

impl BridgeError
{
    /// Adds file context to an IO error
    pub fn with_file_context(self, file: impl Into<String>) -> Self
    {
        match self {
            Self::IOError { error, .. } => Self::IOError {
                file: file.into(),
                error,
            },
            other => other,
        }
    }
}
