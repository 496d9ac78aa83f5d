use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext};
use tracing::{debug, debug_span, trace, warn};

use cs_core::ports::{ClipboardAccessError, SystemClipboardPort};
use cs_core::Representation;

use super::change_count::{native_change_count, ContentFingerprint, FingerprintCounter};
use super::watcher::ChangeWatcher;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

/// System clipboard adapter backed by clipboard-rs.
///
/// Type-identifiers are the platform's own format names (UTIs on macOS, MIME
/// types and X11 targets on Linux, registered format names on Windows).
///
/// The change counter comes from the OS where one exists, otherwise from a
/// background [`ChangeWatcher`]. If the watcher cannot start, a fingerprint of
/// the offered types and the text content stands in.
pub struct RsClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
    watcher: Option<ChangeWatcher>,
    fingerprint: Mutex<FingerprintCounter>,
}

impl RsClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new().map_err(|e| {
            ClipboardAccessError::Unavailable(format!("failed to create clipboard context: {e}"))
        })?;
        let watcher = if native_change_count().is_some() {
            None
        } else {
            match ChangeWatcher::start() {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    warn!(error = %err, "clipboard watch unavailable, falling back to fingerprints");
                    None
                }
            }
        };
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
            watcher,
            fingerprint: Mutex::new(FingerprintCounter::new()),
        })
    }

    fn context(&self) -> Result<MutexGuard<'_, ClipboardContext>> {
        self.inner
            .lock()
            .map_err(|_| ClipboardAccessError::Unavailable("clipboard lock poisoned".into()).into())
    }

    /// Only the type list and the text are read, never image or file buffers.
    fn fingerprint_change_count(&self) -> Result<i64> {
        let ctx = self.context()?;
        let mut fingerprint = ContentFingerprint::new();
        for type_id in map_clipboard_err(ctx.available_formats())? {
            fingerprint.add(&type_id, None);
        }
        let text = ctx.get_text().ok();
        fingerprint.add("text", text.as_deref().map(str::as_bytes));
        drop(ctx);

        let mut counter = self
            .fingerprint
            .lock()
            .map_err(|_| anyhow!("fingerprint lock poisoned"))?;
        Ok(counter.observe(fingerprint.finish()))
    }
}

impl SystemClipboardPort for RsClipboard {
    fn change_count(&self) -> Result<i64> {
        if let Some(count) = native_change_count() {
            return Ok(count);
        }
        match &self.watcher {
            Some(watcher) => Ok(watcher.change_count()),
            None => self.fingerprint_change_count(),
        }
    }

    fn available_types(&self) -> Result<Vec<String>> {
        let ctx = self.context()?;
        let types = map_clipboard_err(ctx.available_formats())?;
        trace!(types = ?types, "available clipboard types");
        Ok(types)
    }

    fn read(&self, type_id: &str) -> Result<Option<Vec<u8>>> {
        let span = debug_span!("platform.clipboard.read", type_id);
        span.in_scope(|| {
            let ctx = self.context()?;
            if !ctx.has(clipboard_rs::ContentFormat::Other(type_id.to_string())) {
                return Ok(None);
            }
            match ctx.get_buffer(type_id) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(err) => Err(ClipboardAccessError::Read {
                    type_id: type_id.to_string(),
                    message: err.to_string(),
                }
                .into()),
            }
        })
    }

    fn write(&self, representations: &[Representation]) -> Result<()> {
        let span = debug_span!(
            "platform.clipboard.write",
            representations = representations.len()
        );
        span.in_scope(|| {
            let contents = representations
                .iter()
                .map(|rep| ClipboardContent::Other(rep.type_id.clone(), rep.bytes.clone()))
                .collect();
            let ctx = self.context()?;
            ctx.set(contents)
                .map_err(|e| ClipboardAccessError::Write(e.to_string()))?;
            debug!("wrote representations to system clipboard");
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        let ctx = self.context()?;
        map_clipboard_err(ctx.clear())
    }
}
