#![deny(unsafe_code)]

//! Shared test utilities for the sitelog workspace.
//!
//! [`CaptureBuffer`] is a clonable [`std::io::Write`] implementor backed by a
//! shared byte vector. Tests hand one clone to a sink and keep the other to
//! inspect what the facility wrote.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory writer whose clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the captured output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discards the captured output and returns it.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_output() {
        let capture = CaptureBuffer::new();
        let mut writer = capture.clone();
        writer.write_all(b"N: one\nN: two\n").expect("write succeeds");

        assert_eq!(capture.lines(), vec!["N: one", "N: two"]);
        assert_eq!(capture.take(), "N: one\nN: two\n");
        assert!(capture.is_empty());
    }
}
