/*!
UTF-8 standard streams.

Each standard stream has one *binding*: either nothing, in which case the handles returned by `stdin`, `stdout` and `stderr` pass straight through to their `std::io` counterparts, or an adapter installed by a guard.  The guards in this module install a console adapter only when the stream is attached to an interactive console; a redirected stream is assumed to carry UTF-8 already, and is left alone.

Guards restore the previous binding when dropped, including during unwinding.  They must be dropped in the reverse order of their creation, which is what happens naturally when they are held in local variables; they are neither `Send` nor `Clone` to keep it that way.

`print!`, `println!` and friends write to `std::io::stdout` directly, and never see these bindings.  Write to `pu8::stdout()` instead.
*/
use parking_lot::{const_mutex, Mutex, MutexGuard};
use std::fmt;
use std::io::{self, BufRead, Read, Write};
use std::marker::PhantomData;
use std::mem;
use crate::config::Options;
use crate::console::{self, OutputStream, StdStream};

type OutputBinding = Option<Box<dyn Write + Send>>;
type InputBinding = Option<Box<dyn BufRead + Send>>;

static STDIN: Mutex<InputBinding> = const_mutex(None);
static STDOUT: Mutex<OutputBinding> = const_mutex(None);
static STDERR: Mutex<OutputBinding> = const_mutex(None);

fn output_slot(stream: OutputStream) -> &'static Mutex<OutputBinding> {
    match stream {
        OutputStream::Stdout => &STDOUT,
        OutputStream::Stderr => &STDERR,
    }
}

fn with_output<R, F>(stream: OutputStream, binding: &mut OutputBinding, f: F) -> R
where F: FnOnce(&mut dyn Write) -> R {
    match binding.as_mut() {
        Some(writer) => f(&mut **writer),
        None => match stream {
            OutputStream::Stdout => f(&mut io::stdout()),
            OutputStream::Stderr => f(&mut io::stderr()),
        },
    }
}

/**
Returns `true` if an adapter is currently installed for `stream`.
*/
pub fn is_bound(stream: StdStream) -> bool {
    match stream {
        StdStream::Input => STDIN.lock().is_some(),
        StdStream::Output => STDOUT.lock().is_some(),
        StdStream::Error => STDERR.lock().is_some(),
    }
}

/**
Returns a handle to UTF-8 standard output.
*/
pub fn stdout() -> OutputHandle {
    OutputHandle { stream: OutputStream::Stdout }
}

/**
Returns a handle to UTF-8 standard error.
*/
pub fn stderr() -> OutputHandle {
    OutputHandle { stream: OutputStream::Stderr }
}

/**
Returns a handle to UTF-8 standard input.
*/
pub fn stdin() -> InputHandle {
    InputHandle { _priv: () }
}

/**
A handle to standard output or standard error.  Every call goes to whichever binding is active at the time.
*/
#[derive(Copy, Clone, Debug)]
pub struct OutputHandle {
    stream: OutputStream,
}

impl Write for OutputHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut binding = output_slot(self.stream).lock();
        with_output(self.stream, &mut binding, |w| w.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut binding = output_slot(self.stream).lock();
        with_output(self.stream, &mut binding, |w| w.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut binding = output_slot(self.stream).lock();
        with_output(self.stream, &mut binding, |w| w.flush())
    }
}

/**
A handle to standard input.
*/
#[derive(Copy, Clone, Debug)]
pub struct InputHandle {
    _priv: (),
}

impl InputHandle {
    /**
    Locks standard input for buffered reading.

    While the lock is held, no guard on the same thread can install or restore an input binding; doing so deadlocks.
    */
    pub fn lock(&self) -> StdinLock<'static> {
        let bound = STDIN.lock();
        let native = if bound.is_none() { Some(io::stdin().lock()) } else { None };
        StdinLock { bound, native }
    }

    pub fn read_line(&self, buf: &mut String) -> io::Result<usize> {
        self.lock().read_line(buf)
    }

    pub fn lines(self) -> io::Lines<StdinLock<'static>> {
        self.lock().lines()
    }
}

impl Read for InputHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.lock().read(buf)
    }
}

/**
A locked standard input.  See `InputHandle::lock`.
*/
pub struct StdinLock<'a> {
    bound: MutexGuard<'a, InputBinding>,
    native: Option<io::StdinLock<'static>>,
}

impl<'a> fmt::Debug for StdinLock<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("StdinLock")
            .field("bound", &self.bound.is_some())
            .finish()
    }
}

impl<'a> Read for StdinLock<'a> {
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

impl<'a> BufRead for StdinLock<'a> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match (self.bound.as_mut(), self.native.as_mut()) {
            (Some(reader), _) => reader.fill_buf(),
            (None, Some(native)) => native.fill_buf(),
            (None, None) => Ok(&[]),
        }
    }

    fn consume(&mut self, amt: usize) {
        match (self.bound.as_mut(), self.native.as_mut()) {
            (Some(reader), _) => reader.consume(amt),
            (None, Some(native)) => native.consume(amt),
            (None, None) => (),
        }
    }
}

#[cfg(target_os="windows")]
fn open_console_writer(stream: OutputStream, opts: &Options) -> io::Result<Box<dyn Write + Send>> {
    let device = console::Win32Console::std(stream.into())?;
    Ok(Box::new(console::ConsoleWriter::with_options(device, opts)))
}

#[cfg(not(target_os="windows"))]
fn open_console_writer(_stream: OutputStream, _opts: &Options) -> io::Result<Box<dyn Write + Send>> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "no wide-character console on this platform"))
}

#[cfg(target_os="windows")]
fn open_console_reader(opts: &Options) -> io::Result<Box<dyn BufRead + Send>> {
    let device = console::Win32Console::std(StdStream::Input)?;
    Ok(Box::new(console::ConsoleReader::with_options(device, opts)))
}

#[cfg(not(target_os="windows"))]
fn open_console_reader(_opts: &Options) -> io::Result<Box<dyn BufRead + Send>> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "no wide-character console on this platform"))
}

/**
Binds standard output or standard error to an adapter for as long as it lives.
*/
pub struct OutputGuard {
    stream: OutputStream,
    previous: Option<OutputBinding>,
    _not_send: PhantomData<*const ()>,
}

impl OutputGuard {
    /**
    Installs a console adapter for standard output, if it is attached to a console.
    */
    pub fn stdout() -> Self {
        Self::stdout_with(&Options::default())
    }

    pub fn stdout_with(opts: &Options) -> Self {
        Self::probe(OutputStream::Stdout, opts)
    }

    /**
    Installs a console adapter for standard error, if it is attached to a console.
    */
    pub fn stderr() -> Self {
        Self::stderr_with(&Options::default())
    }

    pub fn stderr_with(opts: &Options) -> Self {
        Self::probe(OutputStream::Stderr, opts)
    }

    fn probe(stream: OutputStream, opts: &Options) -> Self {
        if !console::is_console(stream.into()) {
            tracing::debug!(?stream, "not a console; leaving stream unbound");
            return Self::passthrough(stream);
        }

        match open_console_writer(stream, opts) {
            Ok(writer) => Self::install_boxed(stream, writer),
            Err(err) => {
                tracing::debug!(?stream, error = %err, "could not open console; leaving stream unbound");
                Self::passthrough(stream)
            },
        }
    }

    /**
    Installs `writer` unconditionally.  Whatever was bound before is flushed first, and restored when the guard is dropped.
    */
    pub fn install<W>(stream: OutputStream, writer: W) -> Self where W: Write + Send + 'static {
        Self::install_boxed(stream, Box::new(writer))
    }

    fn install_boxed(stream: OutputStream, writer: Box<dyn Write + Send>) -> Self {
        let previous = {
            let mut binding = output_slot(stream).lock();
            let _ = with_output(stream, &mut binding, |w| w.flush());
            mem::replace(&mut *binding, Some(writer))
        };
        tracing::debug!(?stream, "output adapter installed");
        OutputGuard {
            stream,
            previous: Some(previous),
            _not_send: PhantomData,
        }
    }

    /**
    A guard that installs nothing.
    */
    pub fn passthrough(stream: OutputStream) -> Self {
        OutputGuard {
            stream,
            previous: None,
            _not_send: PhantomData,
        }
    }

    /**
    Returns `true` if this guard installed an adapter.
    */
    pub fn is_installed(&self) -> bool {
        self.previous.is_some()
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        let previous = match self.previous.take() {
            Some(previous) => previous,
            None => return,
        };
        let adapter = {
            let mut binding = output_slot(self.stream).lock();
            let _ = with_output(self.stream, &mut binding, |w| w.flush());
            mem::replace(&mut *binding, previous)
        };
        drop(adapter);
        tracing::debug!(stream = ?self.stream, "output binding restored");
    }
}

impl fmt::Debug for OutputGuard {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("OutputGuard")
            .field("stream", &self.stream)
            .field("installed", &self.is_installed())
            .finish()
    }
}

/**
Binds standard input to an adapter for as long as it lives.
*/
pub struct InputGuard {
    previous: Option<InputBinding>,
    _not_send: PhantomData<*const ()>,
}

impl InputGuard {
    /**
    Installs a console adapter for standard input, if it is attached to a console.
    */
    pub fn stdin() -> Self {
        Self::stdin_with(&Options::default())
    }

    pub fn stdin_with(opts: &Options) -> Self {
        if !console::is_console(StdStream::Input) {
            tracing::debug!("stdin is not a console; leaving stream unbound");
            return Self::passthrough();
        }

        match open_console_reader(opts) {
            Ok(reader) => Self::install_boxed(reader),
            Err(err) => {
                tracing::debug!(error = %err, "could not open console; leaving stdin unbound");
                Self::passthrough()
            },
        }
    }

    /**
    Installs `reader` unconditionally.  Whatever was bound before is restored when the guard is dropped.
    */
    pub fn install<R>(reader: R) -> Self where R: BufRead + Send + 'static {
        Self::install_boxed(Box::new(reader))
    }

    fn install_boxed(reader: Box<dyn BufRead + Send>) -> Self {
        let previous = mem::replace(&mut *STDIN.lock(), Some(reader));
        tracing::debug!("input adapter installed");
        InputGuard {
            previous: Some(previous),
            _not_send: PhantomData,
        }
    }

    /**
    A guard that installs nothing.
    */
    pub fn passthrough() -> Self {
        InputGuard {
            previous: None,
            _not_send: PhantomData,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.previous.is_some()
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let adapter = mem::replace(&mut *STDIN.lock(), previous);
            drop(adapter);
            tracing::debug!("input binding restored");
        }
    }
}

impl fmt::Debug for InputGuard {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("InputGuard")
            .field("installed", &self.is_installed())
            .finish()
    }
}
