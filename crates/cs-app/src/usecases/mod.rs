pub mod capture_clipboard;

pub use capture_clipboard::{CaptureClipboardUseCase, CaptureResult};
