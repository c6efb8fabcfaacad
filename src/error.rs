//! Error types and JSON-RPC error mapping for the weather MCP server

use thiserror::Error;

/// Machine-readable error kind carried in tool-invocation error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed JSON-RPC message
    ParseError,
    /// Caller supplied invalid arguments
    InvalidParams,
    /// Unknown method or tool
    MethodNotFound,
    /// Upstream or server-side failure
    InternalError,
}

impl ErrorKind {
    /// JSON-RPC 2.0 error code for this kind
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::ParseError => -32700,
            ErrorKind::InvalidParams => -32602,
            ErrorKind::MethodNotFound => -32601,
            ErrorKind::InternalError => -32603,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ParseError => "ParseError",
            ErrorKind::InvalidParams => "InvalidParams",
            ErrorKind::MethodNotFound => "MethodNotFound",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

/// Main error type for the weather MCP server
#[derive(Error, Debug)]
pub enum WeatherMcpError {
    /// Caller input rejected before any network call
    #[error("{message}")]
    Validation { message: String },

    /// City not found, or the geocoding request failed
    #[error("{message}")]
    Geocoding { message: String },

    /// Weather request failed or returned an unusable payload
    #[error("{message}")]
    WeatherFetch { message: String },

    /// Tool name not in the catalogue
    #[error("Outil inconnu: {name}")]
    UnknownTool { name: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON (de)serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl WeatherMcpError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocoding<S: Into<String>>(message: S) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    /// Create a new weather fetch error
    pub fn weather_fetch<S: Into<String>>(message: S) -> Self {
        Self::WeatherFetch {
            message: message.into(),
        }
    }

    /// Create a new unknown tool error
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Error kind reported to the MCP caller
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherMcpError::Validation { .. } => ErrorKind::InvalidParams,
            WeatherMcpError::UnknownTool { .. } => ErrorKind::MethodNotFound,
            WeatherMcpError::Json { .. } => ErrorKind::ParseError,
            WeatherMcpError::Geocoding { .. }
            | WeatherMcpError::WeatherFetch { .. }
            | WeatherMcpError::Config { .. }
            | WeatherMcpError::Io { .. } => ErrorKind::InternalError,
        }
    }

    /// Message shown to the caller of `tool`
    #[must_use]
    pub fn user_message(&self, tool: &str) -> String {
        match self {
            WeatherMcpError::Validation { message } => message.clone(),
            WeatherMcpError::UnknownTool { .. } => self.to_string(),
            other => format!("Erreur lors de l'exécution de l'outil {tool}: {other}"),
        }
    }
}
