/*!
Pure Rust conversion backend.

Used on every target without a wide-character native API.  It is always compiled, so that it can be checked against the platform backend where one exists.
*/
use crate::encoding::Strictness;
use crate::error::{ConversionError, Result};
use std::str;

pub fn widen(s: &[u8], strictness: Strictness) -> Result<Vec<u16>> {
    match strictness {
        Strictness::Strict => {
            let s = str::from_utf8(s)
                .map_err(|err| ConversionError::InvalidUtf8At(err.valid_up_to()))?;
            Ok(s.encode_utf16().collect())
        },
        Strictness::Lossy => Ok(String::from_utf8_lossy(s).encode_utf16().collect()),
    }
}

pub fn narrow(s: &[u16], strictness: Strictness) -> Result<Vec<u8>> {
    match strictness {
        Strictness::Strict => {
            let mut out = Vec::with_capacity(s.len());
            let mut at = 0;
            for r in char::decode_utf16(s.iter().cloned()) {
                let c = r.map_err(|_| ConversionError::InvalidUtf16At(at))?;
                at += c.len_utf16();
                let mut buf = [0; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Ok(out)
        },
        Strictness::Lossy => Ok(String::from_utf16_lossy(s).into_bytes()),
    }
}
