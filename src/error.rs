// Failure taxonomy for tool dispatch.

use thiserror::Error;

/// Argument validation failure. Carries field-level detail so callers can
/// correct the request; always distinguishable from remote failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A required field was absent and has no default.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A supplied field did not match its declared type.
    #[error("field `{field}` expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: String,
    },
}

/// Everything that can go wrong while dispatching a tool call.
#[derive(Debug, Error)]
pub enum CallError {
    /// Requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments failed schema validation.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] ArgumentError),

    /// The credential required by this tool was not supplied.
    #[error("{capability} API key not configured")]
    CredentialNotConfigured { capability: &'static str },

    /// A single outbound call failed (non-2xx or network-level).
    #[error("{0}")]
    Remote(String),

    /// Both tiers of the webcam fallback chain failed; both details are
    /// reported since either layer may be the real cause.
    #[error("Webcams API failed. v3: {v3}, v2: {v2}")]
    WebcamsUnavailable { v3: String, v2: String },
}
