/*!
Win32 conversion backend.

Lengths have already been checked against `MAX_LEN`, and empty inputs never get this far.
*/
use libc::c_char;
use std::io;
use std::ptr;
use crate::encoding::Strictness;
use crate::error::{ConversionError, Direction, Result};
use crate::ffi::{self, CP_UTF8, MB_ERR_INVALID_CHARS, WC_ERR_INVALID_CHARS};

fn platform_error(direction: Direction) -> ConversionError {
    ConversionError::Platform {
        direction,
        code: io::Error::last_os_error().raw_os_error().unwrap_or(0),
    }
}

pub fn widen(s: &[u8], strictness: Strictness) -> Result<Vec<u16>> {
    let flags = if strictness.is_strict() { MB_ERR_INVALID_CHARS } else { 0 };
    let src = s.as_ptr() as *const c_char;
    let src_len = s.len() as i32;

    unsafe {
        let len = ffi::MultiByteToWideChar(CP_UTF8, flags, src, src_len, ptr::null_mut(), 0);
        if len <= 0 {
            return Err(platform_error(Direction::Widen));
        }

        let mut out = vec![0u16; len as usize];
        let written = ffi::MultiByteToWideChar(CP_UTF8, flags, src, src_len, out.as_mut_ptr(), len);
        if written <= 0 {
            return Err(platform_error(Direction::Widen));
        }
        out.truncate(written as usize);
        Ok(out)
    }
}

pub fn narrow(s: &[u16], strictness: Strictness) -> Result<Vec<u8>> {
    let flags = if strictness.is_strict() { WC_ERR_INVALID_CHARS } else { 0 };
    let src = s.as_ptr();
    let src_len = s.len() as i32;

    unsafe {
        let len = ffi::WideCharToMultiByte(CP_UTF8, flags, src, src_len,
            ptr::null_mut(), 0, ptr::null(), ptr::null_mut());
        if len <= 0 {
            return Err(platform_error(Direction::Narrow));
        }

        let mut out = vec![0u8; len as usize];
        let written = ffi::WideCharToMultiByte(CP_UTF8, flags, src, src_len,
            out.as_mut_ptr() as *mut c_char, len, ptr::null(), ptr::null_mut());
        if written <= 0 {
            return Err(platform_error(Direction::Narrow));
        }
        out.truncate(written as usize);
        Ok(out)
    }
}
