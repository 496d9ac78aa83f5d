//! Clipboard change counters.
//!
//! macOS and Windows expose a counter that the OS bumps on every write; reading
//! it is a cheap integer load. Elsewhere the counter is driven by change
//! notifications (see `watcher`), with a content fingerprint as the last resort.

use std::hash::Hasher;

use twox_hash::XxHash64;

#[cfg(target_os = "macos")]
use objc::{sel, sel_impl};

/// NSPasteboard.generalPasteboard.changeCount
#[cfg(target_os = "macos")]
pub fn native_change_count() -> Option<i64> {
    use cocoa::appkit::NSPasteboard;
    use cocoa::base::nil;
    use objc::runtime::Object;

    unsafe {
        let pasteboard: *mut Object = NSPasteboard::generalPasteboard(nil);
        if pasteboard.is_null() {
            return None;
        }
        let change_count: i64 = objc::msg_send![pasteboard, changeCount];
        Some(change_count)
    }
}

/// GetClipboardSequenceNumber
#[cfg(windows)]
pub fn native_change_count() -> Option<i64> {
    let sequence = unsafe { winapi::um::winuser::GetClipboardSequenceNumber() };
    // Zero means the caller lacks access to the window station.
    (sequence != 0).then_some(i64::from(sequence))
}

#[cfg(not(any(target_os = "macos", windows)))]
pub fn native_change_count() -> Option<i64> {
    None
}

/// Synthesizes a monotonically increasing counter from content fingerprints.
///
/// The counter starts at 0 and is bumped each time an observed fingerprint
/// differs from the previous one.
#[derive(Debug, Default)]
pub struct FingerprintCounter {
    last_fingerprint: Option<u64>,
    count: i64,
}

impl FingerprintCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, fingerprint: u64) -> i64 {
        match self.last_fingerprint {
            Some(last) if last == fingerprint => {}
            Some(_) => self.count += 1,
            None => {}
        }
        self.last_fingerprint = Some(fingerprint);
        self.count
    }
}

/// Streaming fingerprint over `(type_id, bytes)` pairs.
#[derive(Default)]
pub struct ContentFingerprint {
    hasher: XxHash64,
}

impl ContentFingerprint {
    pub fn new() -> Self {
        Self {
            hasher: XxHash64::with_seed(0),
        }
    }

    pub fn add(&mut self, type_id: &str, bytes: Option<&[u8]>) {
        self.hasher.write(type_id.as_bytes());
        self.hasher.write_u8(0xff);
        match bytes {
            Some(bytes) => {
                self.hasher.write_u64(bytes.len() as u64);
                self.hasher.write(bytes);
            }
            None => self.hasher.write_u8(0),
        }
    }

    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }
}
