/// Error classification and reporting for line98_service
///
/// This module provides:
/// - A serializable error payload shared by every caller-facing error
/// - Severity classes that pick the log level
/// - The `IntoErrorResponse` trait tying the two together
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard error payload handed to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "session_not_found")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (structured data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// The caller can correct the request and retry
    Client,
    /// Unexpected failure inside the service
    Server,
    /// Shared state is no longer trustworthy
    Critical,
}

impl ErrorSeverity {
    pub fn is_client(self) -> bool {
        self == ErrorSeverity::Client
    }
}

/// Trait for converting errors to payloads with proper logging
pub trait IntoErrorResponse {
    /// Get the error code string (machine-readable)
    fn error_code(&self) -> &'static str;

    /// Get the error message (human-readable)
    fn error_message(&self) -> String;

    /// Get optional error details
    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity;

    fn to_error_response(&self) -> ErrorResponse {
        if let Some(details) = self.error_details() {
            ErrorResponse::with_details(self.error_code(), self.error_message(), details)
        } else {
            ErrorResponse::new(self.error_code(), self.error_message())
        }
    }

    /// Convert to an [`ErrorResponse`], logging at the level the severity calls for
    fn report(&self) -> ErrorResponse {
        let response = self.to_error_response();
        match self.severity() {
            ErrorSeverity::Client => {
                tracing::info!(code = %response.error, "client error: {}", response.message)
            }
            ErrorSeverity::Server => {
                tracing::error!(code = %response.error, "server error: {}", response.message)
            }
            ErrorSeverity::Critical => {
                tracing::error!(
                    code = %response.error,
                    critical = true,
                    "critical error: {}",
                    response.message
                )
            }
        }
        response
    }
}
