/*!
Console devices and the UTF-8 adapters that sit in front of them.

A console device speaks UTF-16: `WideWrite` and `WideRead` are the two halves of that interface.  `ConsoleWriter` and `ConsoleReader` turn a device into an ordinary byte stream carrying UTF-8.

Only Windows has such devices.  On other targets `is_console` is always `false`, so nothing in `stdio` ever installs an adapter; the adapters themselves still work over any device you give them.
*/
use std::io;

pub mod input;
pub mod output;

#[cfg(target_os="windows")]
mod windows;

#[cfg(target_os="windows")]
pub use self::windows::Win32Console;

pub use self::input::ConsoleReader;
pub use self::output::ConsoleWriter;

/**
One of the three standard streams.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StdStream {
    Input,
    Output,
    Error,
}

/**
One of the two writable standard streams.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl From<OutputStream> for StdStream {
    fn from(v: OutputStream) -> Self {
        match v {
            OutputStream::Stdout => StdStream::Output,
            OutputStream::Stderr => StdStream::Error,
        }
    }
}

/**
A device that accepts UTF-16.
*/
pub trait WideWrite {
    /**
    Writes some prefix of `units`, returning how many units were written.
    */
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize>;
}

/**
A device that produces UTF-16.
*/
pub trait WideRead {
    /**
    Reads up to `buf.len()` units into `buf`, returning how many were read.  Blocks until at least one unit is available, or the device has nothing more to give (in which case it returns 0).
    */
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize>;
}

impl<'a, D: WideWrite + ?Sized> WideWrite for &'a mut D {
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        (**self).write_wide(units)
    }
}

impl<D: WideWrite + ?Sized> WideWrite for Box<D> {
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        (**self).write_wide(units)
    }
}

impl<'a, D: WideRead + ?Sized> WideRead for &'a mut D {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        (**self).read_wide(buf)
    }
}

impl<D: WideRead + ?Sized> WideRead for Box<D> {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        (**self).read_wide(buf)
    }
}

/**
Returns `true` if `stream` is attached to an interactive console, as opposed to a file, pipe, or nothing at all.

Always `false` on targets without wide-character consoles.
*/
#[cfg(target_os="windows")]
pub fn is_console(stream: StdStream) -> bool {
    windows::is_console(stream)
}

#[cfg(not(target_os="windows"))]
pub fn is_console(_stream: StdStream) -> bool {
    false
}
