/*!
Code units and UTF-8 sequence classification.

The stream adapters never decode UTF-8 themselves; they only need to know where a multi-byte sequence starts and how long it claims to be, so that a sequence is never split between two console writes.
*/
pub mod conv;
pub mod native;

macro_rules! naive_unit_impl {
    ($ty_name:ty) => {
        impl Unit for $ty_name {
            #[inline]
            fn is_zero(&self) -> bool {
                *self == 0
            }
        }
    };
}

/**
A code unit of one of the two encodings this crate moves between.
*/
pub trait Unit: Copy {
    fn is_zero(&self) -> bool;
}

naive_unit_impl! { u8 }
naive_unit_impl! { u16 }

/**
Returns the units before the first zero unit, or all of `units` if there is none.
*/
pub fn until_nul<U: Unit>(units: &[U]) -> &[U] {
    match units.iter().position(|u| u.is_zero()) {
        Some(len) => &units[..len],
        None => units,
    }
}

/**
Computes the length of a zero-terminated string, not counting the terminator.

# Safety

`ptr` must be non-null and point to a sequence of units that is terminated by a zero unit.
*/
pub unsafe fn terminated_len<U: Unit>(ptr: *const U) -> usize {
    let mut len = 0;
    while !(*ptr.add(len)).is_zero() {
        len += 1;
    }
    len
}

/**
How a conversion treats input it cannot represent.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Invalid input fails the conversion.
    Strict,
    /// Invalid input is replaced by U+FFFD.
    Lossy,
}

impl Default for Strictness {
    fn default() -> Self {
        Strictness::Strict
    }
}

impl Strictness {
    pub fn is_strict(self) -> bool {
        self == Strictness::Strict
    }
}

/// `10xxxxxx`
#[inline]
pub fn is_utf8_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

/// `11xxxxxx`
#[inline]
pub fn is_utf8_lead(b: u8) -> bool {
    b & 0xc0 == 0xc0
}

#[inline]
pub fn is_high_surrogate(cu: u16) -> bool {
    (0xd800..=0xdbff).contains(&cu)
}

#[inline]
pub fn is_low_surrogate(cu: u16) -> bool {
    (0xdc00..=0xdfff).contains(&cu)
}

/**
Returns the number of continuation bytes that follow the byte `b` in a well-formed UTF-8 sequence.

`b` must be ASCII or a lead byte.  Passing a continuation byte is a logic error: it trips a debug assertion, and returns 0 in release builds.

| Bit pattern | Result |
| --- | --- |
| `0xxxxxxx` | 0 |
| `110xxxxx` | 1 |
| `1110xxxx` | 2 |
| `11110xxx` | 3 |
*/
pub fn num_succeeding_bytes(b: u8) -> usize {
    match b >> 5 {
        0..=3 => 0,
        4 | 5 => {
            debug_assert!(false, "{:#04x} is a continuation byte", b);
            0
        },
        6 => 1,
        _ => if b & 0x10 != 0 { 3 } else { 2 },
    }
}

/**
Returns how many bytes at the end of `s` may belong to an incomplete multi-byte sequence.

This never under-counts, but can over-count on malformed input: a run of orphaned continuation bytes with nothing valid before it is withheld in its entirety, and a run that is too long for the lead byte before it is withheld along with that lead byte.  Over-counted bytes are delayed until more output arrives; a writer dropped before then discards them, including any complete character among them.
*/
pub fn num_trailing_partial_bytes(s: &[u8]) -> usize {
    let last = match s.last() {
        Some(&b) => b,
        None => return 0,
    };

    if is_utf8_lead(last) {
        return 1;
    }

    let mut result = 0;
    while result < s.len() && is_utf8_continuation(s[s.len() - result - 1]) {
        result += 1;
    }

    if result != 0 && result < s.len() {
        let lead = s[s.len() - result - 1];
        if num_succeeding_bytes(lead) == result {
            // Ends with a complete sequence.
            return 0;
        }
        result += 1;
    }

    result
}
