/*!
UTF-8 program entry.

On Windows a program's arguments arrive as UTF-16, and its console speaks UTF-16.  `run` hides both: it hands the real entry point its arguments as UTF-8 `String`s, and binds the standard streams to UTF-8 console adapters for as long as the entry point runs.

```no_run
use std::io::{BufRead, Write};

fn real_main(args: Vec<String>) -> i32 {
    let mut line = String::new();
    pu8::stdin().lock().read_line(&mut line).unwrap();
    writeln!(pu8::stdout(), "{} heard: {}", args[0], line.trim_end()).unwrap();
    0
}

fn main() {
    std::process::exit(pu8::run(real_main));
}
```

Elsewhere, arguments are assumed to be UTF-8 already, and no adapters are ever installed.
*/
use std::env;
use crate::config::Options;
use crate::encoding::conv;
use crate::stdio::{InputGuard, OutputGuard};

/**
Converts wide command-line arguments to UTF-8.  Unpaired surrogates become U+FFFD.
*/
pub fn utf8_args<I, A>(wide_args: I) -> Vec<String>
where
    I: IntoIterator<Item=A>,
    A: AsRef<[u16]>,
{
    wide_args.into_iter()
        .map(|arg| {
            let bytes = conv::narrow_lossy(arg.as_ref());
            String::from_utf8(bytes)
                .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
        })
        .collect()
}

/**
Runs `main` with UTF-8 arguments and UTF-8 standard streams, returning its exit code.
*/
pub fn run<F>(main: F) -> i32 where F: FnOnce(Vec<String>) -> i32 {
    run_with(&Options::default(), main)
}

#[cfg(target_os="windows")]
pub fn run_with<F>(opts: &Options, main: F) -> i32 where F: FnOnce(Vec<String>) -> i32 {
    use std::os::windows::ffi::OsStrExt;
    let wide_args = env::args_os().map(|arg| arg.encode_wide().collect::<Vec<u16>>());
    run_with_args(wide_args, opts, main)
}

#[cfg(not(target_os="windows"))]
pub fn run_with<F>(opts: &Options, main: F) -> i32 where F: FnOnce(Vec<String>) -> i32 {
    let args = env::args_os().map(|arg| arg.to_string_lossy().into_owned()).collect();
    enter(args, opts, main)
}

/**
Like `run_with`, but with explicitly supplied wide arguments.
*/
pub fn run_with_args<I, A, F>(wide_args: I, opts: &Options, main: F) -> i32
where
    I: IntoIterator<Item=A>,
    A: AsRef<[u16]>,
    F: FnOnce(Vec<String>) -> i32,
{
    enter(utf8_args(wide_args), opts, main)
}

fn enter<F>(args: Vec<String>, opts: &Options, main: F) -> i32 where F: FnOnce(Vec<String>) -> i32 {
    tracing::debug!(argc = args.len(), "entering utf-8 main");
    let _stdin = InputGuard::stdin_with(opts);
    let _stdout = OutputGuard::stdout_with(opts);
    let _stderr = OutputGuard::stderr_with(opts);
    main(args)
}
