/*!
UTF-8 output to a wide-character console.
*/
use std::io::{self, Write};
use std::mem;
use crate::config::Options;
use crate::encoding::{conv, num_trailing_partial_bytes};
use super::WideWrite;

/**
Accepts UTF-8 bytes and writes them to a console device as UTF-16.

Bytes accumulate until the writer syncs (on `flush`, on a newline if line buffered, or once enough are pending).  A sync converts everything written so far *except* a trailing incomplete multi-byte sequence, which is carried over to the next sync.  The device therefore never sees half a character, no matter how the bytes were chunked on the way in.

Malformed UTF-8 is written as U+FFFD; nothing about the content of the output can make a write fail.  Device failures are not reported either: console output is best-effort, and a failed or short write is dropped rather than retried.
*/
#[derive(Debug)]
pub struct ConsoleWriter<D> where D: WideWrite {
    device: D,
    pending: Vec<u8>,
    carry: Vec<u8>,
    line_buffered: bool,
    max_pending: usize,
}

impl<D> ConsoleWriter<D> where D: WideWrite {
    pub fn new(device: D) -> Self {
        Self::with_options(device, &Options::default())
    }

    pub fn with_options(device: D, opts: &Options) -> Self {
        ConsoleWriter {
            device,
            pending: Vec::new(),
            carry: Vec::new(),
            line_buffered: opts.line_buffered,
            max_pending: opts.max_pending,
        }
    }

    /**
    Bytes written since the last sync.
    */
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /**
    Bytes withheld by the last sync because they did not yet form a complete sequence.
    */
    pub fn carried(&self) -> &[u8] {
        &self.carry
    }

    pub fn get_ref(&self) -> &D {
        &self.device
    }

    pub fn get_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /**
    Writes all complete sequences to the device.
    */
    pub fn sync(&mut self) {
        let mut buffer = mem::take(&mut self.carry);
        buffer.extend_from_slice(&self.pending);
        self.pending.clear();

        let partial = num_trailing_partial_bytes(&buffer);
        self.carry = buffer.split_off(buffer.len() - partial);

        if buffer.is_empty() {
            return;
        }

        let wide = conv::widen_lossy(&buffer);
        tracing::trace!(bytes = buffer.len(), units = wide.len(), carried = partial, "console sync");

        match self.device.write_wide(&wide) {
            Ok(written) if written < wide.len() => {
                tracing::debug!(written, units = wide.len(), "short console write; remainder dropped");
            },
            Ok(_) => (),
            Err(err) => {
                tracing::debug!(error = %err, units = wide.len(), "console write failed; output dropped");
            },
        }
    }
}

impl<D> Write for ConsoleWriter<D> where D: WideWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        if (self.line_buffered && buf.contains(&b'\n')) || self.pending.len() >= self.max_pending {
            self.sync();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync();
        Ok(())
    }
}

impl<D> Drop for ConsoleWriter<D> where D: WideWrite {
    fn drop(&mut self) {
        self.sync();
        if !self.carry.is_empty() {
            tracing::trace!(carried = self.carry.len(), "incomplete sequence discarded");
        }
    }
}
