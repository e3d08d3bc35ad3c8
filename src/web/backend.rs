//! Terminal output that is also mirrored to browsers.

use std::io::{self, Write};
use tokio::sync::broadcast;

/// Writes to an inner writer and broadcasts each flushed frame.
pub struct TeeWriter<W: Write = io::Stdout> {
    inner: W,
    frames: broadcast::Sender<Vec<u8>>,
    /// Bytes written since the last flush
    pending: Vec<u8>,
}

impl TeeWriter<io::Stdout> {
    pub fn stdout(frames: broadcast::Sender<Vec<u8>>) -> Self {
        Self::new(io::stdout(), frames)
    }
}

impl<W: Write> TeeWriter<W> {
    pub fn new(inner: W, frames: broadcast::Sender<Vec<u8>>) -> Self {
        Self {
            inner,
            frames,
            pending: Vec::with_capacity(8192),
        }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.pending.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        if !self.pending.is_empty() {
            // No subscribers is fine
            let _ = self.frames.send(std::mem::take(&mut self.pending));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_broadcasts_pending_bytes() {
        let (tx, mut rx) = broadcast::channel(4);
        let mut tee = TeeWriter::new(Vec::new(), tx);
        tee.write_all(b"\x07quack").unwrap();
        assert!(rx.try_recv().is_err());

        tee.flush().unwrap();
        assert_eq!(rx.try_recv().unwrap(), b"\x07quack".to_vec());
        assert_eq!(tee.inner, b"\x07quack".to_vec());
    }

    #[test]
    fn test_empty_flush_sends_nothing() {
        let (tx, mut rx) = broadcast::channel(4);
        let mut tee = TeeWriter::new(Vec::new(), tx);
        tee.flush().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_no_subscribers_is_ok() {
        let (tx, rx) = broadcast::channel(4);
        drop(rx);
        let mut tee = TeeWriter::new(Vec::new(), tx);
        tee.write_all(b"frame").unwrap();
        assert!(tee.flush().is_ok());
    }
}
