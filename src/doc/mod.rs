/*!
Additional documentation.

# Where conversion happens

| Stream state | Windows | Elsewhere |
| --- | --- | --- |
| Attached to a console | UTF-8 ⇄ UTF-16 adapter, while a guard lives | passthrough |
| Redirected to a file or pipe | passthrough | passthrough |

Redirected streams are assumed to carry UTF-8 already.  Nothing is validated on the way through.

# Output

Console output is buffered until a newline, an explicit `flush`, or 8 KiB (see `Options`).  A multi-byte sequence split across writes is held back until it is complete; if the writer is dropped while still holding part of a sequence, that part is discarded.  The hold-back is conservative on malformed input, so a complete character followed by stray continuation bytes is held too: a write ending in `"€\x80"` loses the euro as well as the stray byte when the writer is dropped before anything else is written.  Malformed UTF-8 is displayed as U+FFFD.

Console output is best-effort.  If the console rejects a write, the bytes are gone; no error reaches the caller.

# Input

Console input is read in batches of 126 UTF-16 units.  A batch never ends between the two halves of a surrogate pair.  By default, an unpaired surrogate from the console is an `InvalidData` error; `Options::with_input_strictness(Strictness::Lossy)` turns it into U+FFFD instead.

# Common Misconceptions and Mistakes

* *"Installing the guards fixes `println!`."*  It doesn't.  `print!` and `println!` write to `std::io::stdout`, which knows nothing of this crate.  Write to `pu8::stdout()` instead.

* *"Rust's `std::io::stdout` already writes UTF-8 to the Windows console."*  It does, as long as the bytes are valid UTF-8; a write containing anything else fails with an error.  The adapter here displays invalid bytes as U+FFFD, and never errors.

* *"Windows command-line arguments are UTF-8."*  They are UTF-16, and need not even be valid UTF-16.  `run` converts them, replacing anything unpaired.

* *"A console handle can be detected with `isatty`."*  On Windows, a standard handle is a console when `GetFileType` says it is a character device.  That also matches `NUL`, which accepts console writes and then fails them; output there is dropped, which is what was asked for.

* *"The guards may be dropped in any order."*  Each restores what *it* replaced.  Dropping an outer guard before an inner one leaves the outer guard's adapter bound after both are gone.  Keep them in local variables.
*/
