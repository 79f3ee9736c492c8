extern crate parking_lot;
extern crate proptest;
extern crate pu8;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use parking_lot::Mutex;
use proptest::prelude::*;
use std::collections::VecDeque;
use std::io::{self, BufRead, Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process::{Command, Stdio};
use std::sync::Arc;
use pu8::{
    is_bound, ConsoleReader, ConsoleWriter, InputGuard, Options, OutputGuard, OutputStream,
    StdStream, WideRead, WideWrite,
};

/// The stream bindings are process-wide; tests that touch them take turns.
static BINDINGS: Mutex<()> = parking_lot::const_mutex(());

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Vec<u16>>>>);

impl Recorder {
    fn writes(&self) -> Vec<Vec<u16>> {
        self.0.lock().clone()
    }

    fn text(&self) -> String {
        String::from_utf16(&self.0.lock().concat()).expect(here!())
    }
}

impl WideWrite for Recorder {
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        self.0.lock().push(units.to_vec());
        Ok(units.len())
    }
}

#[derive(Clone, Default)]
struct Script {
    chunks: Arc<Mutex<VecDeque<Vec<u16>>>>,
    requests: Arc<Mutex<Vec<usize>>>,
}

impl Script {
    fn new(chunks: &[&[u16]]) -> Self {
        let script = Script::default();
        script.chunks.lock().extend(chunks.iter().map(|c| c.to_vec()));
        script
    }

    fn lines(lines: &[&str]) -> Self {
        let script = Script::default();
        script.chunks.lock().extend(lines.iter().map(|l| l.encode_utf16().collect::<Vec<u16>>()));
        script
    }
}

impl WideRead for Script {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        self.requests.lock().push(buf.len());
        let mut chunks = self.chunks.lock();
        let mut chunk = match chunks.pop_front() {
            Some(chunk) => chunk,
            None => return Ok(0),
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            chunks.push_front(chunk.split_off(n));
        }
        Ok(n)
    }
}

fn unbuffered() -> Options {
    Options::default().with_line_buffered(false)
}

#[test]
fn test_partial_sequence_is_carried() {
    let rec = Recorder::default();
    let mut w = ConsoleWriter::with_options(rec.clone(), &unbuffered());

    w.write_all(b"A\xe2\x82").expect(here!());
    w.flush().expect(here!());
    assert_eq!(rec.writes(), vec![vec![0x41]]);
    assert_eq!(w.carried(), b"\xe2\x82");

    w.write_all(b"\xac").expect(here!());
    w.flush().expect(here!());
    assert_eq!(rec.writes(), vec![vec![0x41], vec![0x20ac]]);
    assert_eq!(rec.text(), "A\u{20ac}");
}

#[test]
fn test_astral_output_is_paired() {
    let rec = Recorder::default();
    let mut w = ConsoleWriter::with_options(rec.clone(), &unbuffered());
    for b in "\u{1d11e}".bytes() {
        w.write_all(&[b]).expect(here!());
        w.flush().expect(here!());
    }
    assert_eq!(rec.writes(), vec![vec![0xd834, 0xdd1e]]);
}

#[test]
fn test_surrogate_refill_reads_one_more_unit() {
    let script = Script::new(&[&[0x61, 0x62, 0xd834][..], &[0xdd1e, 0x63][..]]);
    let opts = Options::default().with_read_batch(3);
    let mut r = ConsoleReader::with_options(script.clone(), &opts);

    assert_eq!(r.fill_buf().expect(here!()), "ab\u{1d11e}".as_bytes());
    assert_eq!(*script.requests.lock(), vec![3, 1]);

    let mut rest = String::new();
    r.read_to_string(&mut rest).expect(here!());
    assert_eq!(rest, "ab\u{1d11e}c");
    assert_eq!(*script.requests.lock(), vec![3, 1, 3, 3]);
}

#[test]
fn test_reader_eof() {
    let mut r = ConsoleReader::new(Script::default());
    let mut s = String::new();
    assert_eq!(r.read_to_string(&mut s).expect(here!()), 0);
}

#[test]
fn test_guard_binds_stdout() {
    let _serial = BINDINGS.lock();
    let rec = Recorder::default();
    {
        let guard = OutputGuard::install(OutputStream::Stdout, ConsoleWriter::new(rec.clone()));
        assert!(guard.is_installed());
        assert!(is_bound(StdStream::Output));
        assert!(!is_bound(StdStream::Error));

        writeln!(pu8::stdout(), "gªrçon").expect(here!());
        pu8::stdout().write_all(b"\xe2\x82").expect(here!());
        pu8::stdout().flush().expect(here!());
        pu8::stdout().write_all(b"\xac").expect(here!());
    }
    assert!(!is_bound(StdStream::Output));
    assert_eq!(rec.text(), "gªrçon\n\u{20ac}");
}

#[test]
fn test_guards_nest() {
    let _serial = BINDINGS.lock();
    let outer = Recorder::default();
    let inner = Recorder::default();
    {
        let _outer = OutputGuard::install(OutputStream::Stderr, ConsoleWriter::new(outer.clone()));
        write!(pu8::stderr(), "outer 1,").expect(here!());
        {
            let _inner = OutputGuard::install(OutputStream::Stderr, ConsoleWriter::new(inner.clone()));
            write!(pu8::stderr(), "inner").expect(here!());
        }
        write!(pu8::stderr(), " outer 2").expect(here!());
        assert!(is_bound(StdStream::Error));
    }
    assert!(!is_bound(StdStream::Error));
    assert_eq!(outer.text(), "outer 1, outer 2");
    assert_eq!(inner.text(), "inner");
}

#[test]
fn test_guard_restores_on_panic() {
    let _serial = BINDINGS.lock();
    let rec = Recorder::default();
    let device = rec.clone();
    let result = panic::catch_unwind(AssertUnwindSafe(move || {
        let _guard = OutputGuard::install(OutputStream::Stdout, ConsoleWriter::new(device));
        write!(pu8::stdout(), "before the panic").expect(here!());
        panic!("bail out");
    }));
    assert!(result.is_err());
    assert!(!is_bound(StdStream::Output));
    assert_eq!(rec.text(), "before the panic");
}

#[test]
fn test_passthrough_installs_nothing() {
    let _serial = BINDINGS.lock();
    let out = OutputGuard::passthrough(OutputStream::Stdout);
    let input = InputGuard::passthrough();
    assert!(!out.is_installed());
    assert!(!input.is_installed());
    assert!(!is_bound(StdStream::Output));
    assert!(!is_bound(StdStream::Input));
}

#[test]
#[cfg(not(target_os="windows"))]
fn test_no_console_no_adapter() {
    let _serial = BINDINGS.lock();
    let stdin = InputGuard::stdin();
    let stdout = OutputGuard::stdout();
    let stderr = OutputGuard::stderr();
    assert!(!stdin.is_installed());
    assert!(!stdout.is_installed());
    assert!(!stderr.is_installed());
    assert!(!is_bound(StdStream::Input));
    assert!(!is_bound(StdStream::Output));
    assert!(!is_bound(StdStream::Error));
}

const CHILD_ENV: &str = "PU8_UNBOUND_STREAMS_CHILD";

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Runs in a child process with piped stdio; does nothing otherwise.
#[test]
fn test_unbound_streams_child() {
    if std::env::var_os(CHILD_ENV).is_none() {
        return;
    }

    let stdin = InputGuard::stdin();
    let stdout = OutputGuard::stdout();
    let stderr = OutputGuard::stderr();
    assert!(!stdin.is_installed());
    assert!(!stdout.is_installed());
    assert!(!stderr.is_installed());

    let mut out = pu8::stdout();
    out.write_all(b"<<g\xc2\xaar\xc3\xa7on\xff>>\n").expect(here!());
    out.flush().expect(here!());

    let mut line = vec![];
    pu8::stdin().lock().read_until(b'\n', &mut line).expect(here!());
    out.write_all(b"[[").expect(here!());
    out.write_all(&line).expect(here!());
    out.write_all(b"]]").expect(here!());
    out.flush().expect(here!());

    pu8::stderr().write_all(b"{{\xe2\x82\xac}}").expect(here!());
}

#[test]
fn test_unbound_streams_pass_bytes_through() {
    if std::env::var_os(CHILD_ENV).is_some() {
        return;
    }

    let exe = std::env::current_exe().expect(here!());
    let mut child = Command::new(exe)
        .args(["test_unbound_streams_child", "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect(here!());

    child.stdin.take().expect(here!())
        .write_all(b"w\xc3\xb6rld\xfe\n").expect(here!());
    let output = child.wait_with_output().expect(here!());

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(contains(&output.stdout, b"<<g\xc2\xaar\xc3\xa7on\xff>>\n"), "{:?}", output.stdout);
    assert!(contains(&output.stdout, b"[[w\xc3\xb6rld\xfe\n]]"), "{:?}", output.stdout);
    assert!(contains(&output.stderr, b"{{\xe2\x82\xac}}"), "{:?}", output.stderr);
}

#[test]
fn test_guard_binds_stdin() {
    let _serial = BINDINGS.lock();
    let script = Script::lines(&["héllo\r\n", "wörld\r\n"]);
    {
        let _guard = InputGuard::install(ConsoleReader::new(script));
        assert!(is_bound(StdStream::Input));

        let mut line = String::new();
        pu8::stdin().read_line(&mut line).expect(here!());
        assert_eq!(line, "héllo\r\n");

        let rest: Vec<String> = pu8::stdin().lines().map(|l| l.expect(here!())).collect();
        assert_eq!(rest, vec!["wörld"]);
    }
    assert!(!is_bound(StdStream::Input));
}

proptest! {
    #[test]
    fn prop_writer_never_splits_a_character(
        s in any::<String>(),
        sizes in proptest::collection::vec(1usize..6, 1..12),
    ) {
        let rec = Recorder::default();
        {
            let mut w = ConsoleWriter::with_options(rec.clone(), &unbuffered());
            let mut bytes = s.as_bytes();
            for &size in sizes.iter().cycle() {
                if bytes.is_empty() {
                    break;
                }
                let (chunk, rest) = bytes.split_at(size.min(bytes.len()));
                w.write_all(chunk).expect(here!());
                w.flush().expect(here!());
                bytes = rest;
            }
            prop_assert!(w.carried().is_empty());
        }
        for write in rec.writes() {
            prop_assert!(String::from_utf16(&write).is_ok());
        }
        prop_assert_eq!(rec.text(), s);
    }
}
