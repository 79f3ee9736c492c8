/*!
UTF-8 input from a wide-character console.
*/
use std::io::{self, BufRead, Read};
use crate::config::Options;
use crate::encoding::{conv, is_high_surrogate, Strictness};
use super::WideRead;

/**
Reads UTF-16 from a console device and serves it as UTF-8 bytes.

Each refill asks the device for up to `Options::read_batch` units.  If the batch ends with the first half of a surrogate pair, one more unit is read before converting, so a pair is never split between two refills.

A refill that produces no units is end-of-input: `read` returns `Ok(0)` and `fill_buf` an empty slice.  Asking again will try the device again.
*/
#[derive(Debug)]
pub struct ConsoleReader<D> {
    device: D,
    wide: Vec<u16>,
    buf: Vec<u8>,
    pos: usize,
    batch: usize,
    strictness: Strictness,
}

impl<D> ConsoleReader<D> where D: WideRead {
    pub fn new(device: D) -> Self {
        Self::with_options(device, &Options::default())
    }

    pub fn with_options(device: D, opts: &Options) -> Self {
        let batch = opts.read_batch.max(1);
        ConsoleReader {
            device,
            wide: vec![0; batch + 1],
            buf: Vec::new(),
            pos: 0,
            batch,
            strictness: opts.input_strictness,
        }
    }

    pub fn get_ref(&self) -> &D {
        &self.device
    }

    pub fn get_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /**
    Bytes converted but not yet consumed.
    */
    pub fn buffer(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    fn refill(&mut self) -> io::Result<()> {
        let mut len = self.device.read_wide(&mut self.wide[..self.batch])?;

        if len > 0 && is_high_surrogate(self.wide[len - 1]) {
            tracing::trace!("batch ends in a high surrogate; reading one more unit");
            match self.device.read_wide(&mut self.wide[len..len + 1]) {
                Ok(1) => len += 1,
                Ok(_) => (),
                Err(err) => tracing::debug!(error = %err, "surrogate completion read failed"),
            }
        }

        self.buf = conv::narrow_with(&self.wide[..len], self.strictness)?;
        self.pos = 0;
        tracing::trace!(units = len, bytes = self.buf.len(), "console refill");
        Ok(())
    }
}

impl<D> Read for ConsoleReader<D> where D: WideRead {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(out.len());
            out[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl<D> BufRead for ConsoleReader<D> where D: WideRead {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.buf.len() {
            self.refill()?;
        }
        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}
