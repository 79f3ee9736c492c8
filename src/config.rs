/*!
Adapter options.
*/
use crate::encoding::Strictness;

/**
Units requested from the console per read: a 128-unit buffer, less one unit for completing a surrogate pair and one for a terminator.
*/
pub const DEFAULT_READ_BATCH: usize = 126;

/**
Pending output, in bytes, that forces a flush even without a newline.
*/
pub const DEFAULT_MAX_PENDING: usize = 8 * 1024;

/**
Knobs for the console adapters and the guards that install them.

The defaults match what a console program wants; most code never needs to construct one of these.

```
use pu8::{Options, Strictness};

let opts = Options::default()
    .with_read_batch(512)
    .with_input_strictness(Strictness::Lossy);
assert_eq!(opts.read_batch, 512);
assert!(opts.line_buffered);
```
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of wide units requested per console read.  Never less than 1.
    pub read_batch: usize,
    /// How console input that is not valid UTF-16 is handled.
    pub input_strictness: Strictness,
    /// Flush console output whenever a newline is written.
    pub line_buffered: bool,
    /// Flush console output once this many bytes are pending.
    pub max_pending: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            read_batch: DEFAULT_READ_BATCH,
            input_strictness: Strictness::Strict,
            line_buffered: true,
            max_pending: DEFAULT_MAX_PENDING,
        }
    }
}

impl Options {
    /** Sets how many UTF-16 units each console read requests.  Zero is raised to one. */
    pub fn with_read_batch(mut self, units: usize) -> Self {
        self.read_batch = units.max(1);
        self
    }

    /** Sets how unpaired surrogates read from the console are handled. */
    pub fn with_input_strictness(mut self, strictness: Strictness) -> Self {
        self.input_strictness = strictness;
        self
    }

    /** Sets whether the writer converts and emits at every newline. */
    pub fn with_line_buffered(mut self, line_buffered: bool) -> Self {
        self.line_buffered = line_buffered;
        self
    }

    /** Sets how many bytes the writer accumulates before converting regardless of newlines. */
    pub fn with_max_pending(mut self, bytes: usize) -> Self {
        self.max_pending = bytes;
        self
    }
}
