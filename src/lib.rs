/*!
This crate makes console programs speak UTF-8 on every platform, including the one whose native text APIs speak UTF-16.

It does three things:

* It converts between UTF-8 and UTF-16 (`widen`, `narrow`, and friends), with a choice between failing on invalid input and replacing it.
* It provides UTF-8 standard streams (`stdin`, `stdout`, `stderr`).  On Windows, while a guard is alive, a stream attached to an interactive console is read and written through an adapter that converts to and from the console's UTF-16.  Redirected streams, and every stream on other platforms, pass through untouched.
* It provides a UTF-8 entry point (`run`), which converts the command line to UTF-8 and installs the three guards around your real `main`.

For more details, see the [additional documentation](doc/index.html).

# Quick Reference

| You have | You want | Use |
| ---: | --- | --- |
| `&[u8]` (UTF-8) | `Vec<u16>`, failing on invalid input | `widen` |
| … | `Vec<u16>`, never failing | `widen_lossy` |
| `*const c_char` (zero-terminated UTF-8) | `Vec<u16>` | `widen_cstr` |
| `&[u16]` (UTF-16) | `Vec<u8>`, failing on unpaired surrogates | `narrow` |
| … | `Vec<u8>`, never failing | `narrow_lossy` |
| … | `String` | `narrow_to_string` |
| `*const u16` (zero-terminated UTF-16) | `Vec<u8>` | `narrow_wstr` |
| `&[u8]` (UTF-8) | whatever the platform's text APIs take | `native::to_native` |
| a console program | UTF-8 arguments and console I/O | `run` |
*/
pub mod config;
#[doc(hidden)] pub mod doc;
pub mod console;
pub mod encoding;
pub mod error;
pub mod stdio;

mod entry;

#[cfg(target_os="windows")]
mod ffi;

pub use config::Options;
pub use console::{ConsoleReader, ConsoleWriter, OutputStream, StdStream, WideRead, WideWrite};
pub use encoding::Strictness;
pub use encoding::conv::{
    narrow, narrow_lossy, narrow_to_string, narrow_until_nul, narrow_with, narrow_wstr,
    widen, widen_cstr, widen_lossy, widen_until_nul, widen_with,
};
pub use encoding::native;
pub use entry::{run, run_with, run_with_args, utf8_args};
pub use error::{ConversionError, Direction, Result};
pub use stdio::{is_bound, stderr, stdin, stdout, InputGuard, OutputGuard};
