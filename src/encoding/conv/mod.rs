/*!
Encoding conversion support.

Everything here converts between UTF-8 and UTF-16, whatever the target.  On Windows the work is done by `MultiByteToWideChar`/`WideCharToMultiByte`; elsewhere by a pure Rust backend with the same contract.  Use `encoding::native` if you want conversion only where the platform needs it.

Every conversion comes in three flavours: strict (`widen`, `narrow`), lossy (`widen_lossy`, `narrow_lossy`), and parameterised (`widen_with`, `narrow_with`).
*/
use libc::c_char;
use std::slice;
use crate::encoding::{self, is_high_surrogate, num_trailing_partial_bytes, Strictness};
use crate::error::{ConversionError, Direction, Result};

pub mod portable;

#[cfg(target_os="windows")]
pub mod windows;

#[cfg(target_os="windows")]
pub use self::windows as os;

#[cfg(not(target_os="windows"))]
pub use self::portable as os;

/**
Inputs must be strictly shorter than this, in units.  The Win32 conversion routines take `int` lengths.
*/
pub const MAX_LEN: usize = i32::MAX as usize;

fn check_len(len: usize, direction: Direction) -> Result<()> {
    if len < MAX_LEN {
        Ok(())
    } else {
        Err(ConversionError::TooLong { direction, len })
    }
}

/**
Converts UTF-8 to UTF-16, failing on invalid input.
*/
pub fn widen(s: &[u8]) -> Result<Vec<u16>> {
    widen_with(s, Strictness::Strict)
}

/**
Converts UTF-8 to UTF-16, replacing invalid input with U+FFFD.

Inputs of `MAX_LEN` bytes or more are converted piecewise, split between complete sequences.
*/
pub fn widen_lossy(s: &[u8]) -> Vec<u16> {
    widen_lossy_in(s, MAX_LEN)
}

fn widen_lossy_in(s: &[u8], limit: usize) -> Vec<u16> {
    let mut out = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let mut end = rest.len().min(limit - 1);
        if end < rest.len() {
            let partial = num_trailing_partial_bytes(&rest[..end]);
            if partial < end {
                end -= partial;
            }
        }
        match os::widen(&rest[..end], Strictness::Lossy) {
            Ok(units) => out.extend_from_slice(&units),
            Err(err) => tracing::debug!(error = %err, bytes = end, "lossy widen failed; input dropped"),
        }
        rest = &rest[end..];
    }
    out
}

/**
Converts UTF-8 to UTF-16.

An empty input produces an empty result without consulting the backend.
*/
pub fn widen_with(s: &[u8], strictness: Strictness) -> Result<Vec<u16>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    check_len(s.len(), Direction::Widen)?;
    os::widen(s, strictness)
}

/**
Converts the units of `s` before its first zero byte.
*/
pub fn widen_until_nul(s: &[u8], strictness: Strictness) -> Result<Vec<u16>> {
    widen_with(encoding::until_nul(s), strictness)
}

/**
Converts a zero-terminated C string.  A null `ptr` converts as the empty string.

# Safety

If `ptr` is non-null, it must point to a zero-terminated string that remains valid for the duration of the call.
*/
pub unsafe fn widen_cstr(ptr: *const c_char, strictness: Strictness) -> Result<Vec<u16>> {
    if ptr.is_null() {
        return Ok(Vec::new());
    }
    let len = libc::strlen(ptr);
    widen_with(slice::from_raw_parts(ptr as *const u8, len), strictness)
}

/**
Converts UTF-16 to UTF-8, failing on unpaired surrogates.
*/
pub fn narrow(s: &[u16]) -> Result<Vec<u8>> {
    narrow_with(s, Strictness::Strict)
}

/**
Converts UTF-16 to UTF-8, replacing unpaired surrogates with U+FFFD.

Inputs of `MAX_LEN` units or more are converted piecewise, never splitting a surrogate pair.
*/
pub fn narrow_lossy(s: &[u16]) -> Vec<u8> {
    narrow_lossy_in(s, MAX_LEN)
}

fn narrow_lossy_in(s: &[u16], limit: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let mut end = rest.len().min(limit - 1);
        if end < rest.len() && end > 1 && is_high_surrogate(rest[end - 1]) {
            end -= 1;
        }
        match os::narrow(&rest[..end], Strictness::Lossy) {
            Ok(bytes) => out.extend_from_slice(&bytes),
            Err(err) => tracing::debug!(error = %err, units = end, "lossy narrow failed; input dropped"),
        }
        rest = &rest[end..];
    }
    out
}

/**
Converts UTF-16 to UTF-8.

An empty input produces an empty result without consulting the backend.
*/
pub fn narrow_with(s: &[u16], strictness: Strictness) -> Result<Vec<u8>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    check_len(s.len(), Direction::Narrow)?;
    os::narrow(s, strictness)
}

/**
Converts UTF-16 to a Rust string.
*/
pub fn narrow_to_string(s: &[u16], strictness: Strictness) -> Result<String> {
    let bytes = narrow_with(s, strictness)?;
    // Both backends only ever produce valid UTF-8.
    String::from_utf8(bytes)
        .map_err(|err| ConversionError::InvalidUtf16At(err.utf8_error().valid_up_to()))
}

/**
Converts the units of `s` before its first zero unit.
*/
pub fn narrow_until_nul(s: &[u16], strictness: Strictness) -> Result<Vec<u8>> {
    narrow_with(encoding::until_nul(s), strictness)
}

/**
Converts a zero-terminated wide string.  A null `ptr` converts as the empty string.

# Safety

If `ptr` is non-null, it must point to a zero-terminated string of `u16` units that remains valid for the duration of the call.
*/
pub unsafe fn narrow_wstr(ptr: *const u16, strictness: Strictness) -> Result<Vec<u8>> {
    if ptr.is_null() {
        return Ok(Vec::new());
    }
    let len = encoding::terminated_len(ptr);
    narrow_with(slice::from_raw_parts(ptr, len), strictness)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORD: &'static str = "gªrçon";
    const WORD_MB: &'static [u8] = b"g\xc2\xaar\xc3\xa7on\0";
    const WORD_W: &'static [u16] = &[0x67, 0xAA, 0x72, 0xE7, 0x6F, 0x6E, 0x00];

    #[test]
    fn test_garcon() {
        assert_eq!(widen(WORD.as_bytes()).unwrap(), &WORD_W[..6]);
        assert_eq!(narrow(&WORD_W[..6]).unwrap(), WORD.as_bytes());
        assert_eq!(widen_until_nul(WORD_MB, Strictness::Strict).unwrap(), &WORD_W[..6]);
        assert_eq!(narrow_until_nul(WORD_W, Strictness::Strict).unwrap(), &WORD_MB[..8]);
        assert_eq!(narrow_to_string(WORD_W, Strictness::Strict).unwrap(), "gªrçon\0");
    }

    #[test]
    fn test_terminated() {
        unsafe {
            let w = widen_cstr(WORD_MB.as_ptr() as *const c_char, Strictness::Strict).unwrap();
            assert_eq!(w, &WORD_W[..6]);
            let n = narrow_wstr(WORD_W.as_ptr(), Strictness::Strict).unwrap();
            assert_eq!(n, WORD.as_bytes());
            assert!(widen_cstr(::std::ptr::null(), Strictness::Strict).unwrap().is_empty());
            assert!(narrow_wstr(::std::ptr::null(), Strictness::Strict).unwrap().is_empty());
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(widen(b""), Ok(vec![]));
        assert_eq!(narrow(&[]), Ok(vec![]));
        assert!(widen_lossy(b"").is_empty());
        assert!(narrow_lossy(&[]).is_empty());
    }

    #[test]
    fn test_astral() {
        let clef = "\u{1d11e}";
        assert_eq!(widen(clef.as_bytes()).unwrap(), vec![0xd834, 0xdd1e]);
        assert_eq!(narrow(&[0xd834, 0xdd1e]).unwrap(), clef.as_bytes());
    }

    #[test]
    fn test_strictness() {
        let truncated = b"A\xe2\x82";
        assert!(widen(truncated).is_err());
        let w = widen_lossy(truncated);
        assert_eq!(w[0], 0x41);
        assert!(w[1..].iter().all(|&cu| cu == 0xfffd));

        let unpaired = [0x41, 0xd834];
        assert!(narrow(&unpaired).is_err());
        assert_eq!(narrow_lossy(&unpaired), "A\u{fffd}".as_bytes());
    }

    #[test]
    fn test_lossy_splits_between_sequences() {
        let s = "a\u{20ac}\u{1d11e}b";
        assert_eq!(widen_lossy_in(s.as_bytes(), 5), widen(s.as_bytes()).unwrap());
        assert_eq!(widen_lossy_in(b"\xe2\x82\xac\xff", 4), vec![0x20ac, 0xfffd]);

        let w = [0x61, 0xd834, 0xdd1e, 0x62];
        assert_eq!(narrow_lossy_in(&w, 3), s.replace('\u{20ac}', "").into_bytes());
        assert_eq!(narrow_lossy_in(&[0xd834, 0x62], 2), "\u{fffd}b".as_bytes());
    }

    #[test]
    fn test_too_long_is_checked_first() {
        assert_eq!(check_len(MAX_LEN - 1, Direction::Widen), Ok(()));
        assert_eq!(check_len(MAX_LEN, Direction::Narrow),
            Err(ConversionError::TooLong { direction: Direction::Narrow, len: MAX_LEN }));
    }
}
