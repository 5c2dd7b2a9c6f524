use std::path::PathBuf;
use thiserror::Error;

/// Hard failures of a conversion request.
///
/// Soft problems (a bad transform, an unreadable shape, an unknown unit) never
/// show up here; they are reported as `ConversionWarning`s next to a successful result.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// An I/O error while reading the input or writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input document is not well-formed XML.
    #[error("Failed to parse SVG document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The request is missing required fields.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Another conversion is already writing to this output path.
    #[error("A conversion is already in flight for '{}'", .0.display())]
    OutputBusy(PathBuf),

    /// The DXF library failed to serialize the drawing.
    #[error("DXF generation failed: {0}")]
    Dxf(#[from] dxf::DxfError),

    /// Error originating from the HTTP client talking to the remote converter.
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to deserialize JSON response: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// The remote conversion server answered with a non-2xx status.
    #[error("Remote converter returned an error: Status {status}, Message: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// A type alias for `Result<T, ConversionError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ConversionError>;
