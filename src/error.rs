//! Error types
//!
//! Only three things can go wrong: the microphone, the shared-state token,
//! and the clipboard. Everything in `scene` is total.

/// Microphone acquisition failure. The monitor stays idle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MicError {
    /// No usable capture device: `navigator.mediaDevices` is missing
    /// (insecure context, old browser), no microphone, or it is busy
    #[error("microphone unavailable: {0}")]
    Unavailable(String),

    /// The user or the browser refused access
    #[error("microphone permission denied: {0}")]
    PermissionDenied(String),

    /// Stream acquired but the audio graph could not be built
    #[error("audio graph setup failed: {0}")]
    AudioGraph(String),
}

impl MicError {
    /// Classify a `getUserMedia` rejection by its DOMException name
    pub fn from_rejection(name: &str, detail: String) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" => Self::PermissionDenied(detail),
            _ => Self::Unavailable(detail),
        }
    }
}

/// Malformed shared-state token
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("token is not valid percent-encoded UTF-8: {0}")]
    Percent(#[from] std::string::FromUtf8Error),

    #[error("token is not a candle list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("candle {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Clipboard write failure, reported to the user
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShareError {
    #[error("no browser window")]
    NoWindow,

    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}
