use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardAccessError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read type {type_id}: {message}")]
    Read { type_id: String, message: String },

    #[error("failed to write clipboard: {0}")]
    Write(String),
}
