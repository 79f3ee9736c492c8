use libc::c_void;
use std::io;
use std::ptr;
use super::{StdStream, WideRead, WideWrite};
use crate::ffi::{self, DWORD, HANDLE, FILE_TYPE_CHAR, INVALID_HANDLE_VALUE};

fn handle_id(stream: StdStream) -> DWORD {
    match stream {
        StdStream::Input => ffi::STD_INPUT_HANDLE,
        StdStream::Output => ffi::STD_OUTPUT_HANDLE,
        StdStream::Error => ffi::STD_ERROR_HANDLE,
    }
}

pub fn is_console(stream: StdStream) -> bool {
    unsafe {
        let handle = ffi::GetStdHandle(handle_id(stream));
        if handle.is_null() || handle == INVALID_HANDLE_VALUE {
            return false;
        }
        ffi::GetFileType(handle) == FILE_TYPE_CHAR
    }
}

/**
A standard console handle, read and written as UTF-16.
*/
#[derive(Debug)]
pub struct Win32Console {
    handle: HANDLE,
}

// Standard handles are process-wide and may be used from any thread.
unsafe impl Send for Win32Console {}

impl Win32Console {
    /**
    Opens the standard handle for `stream`.  This does *not* check that the handle is a console; see `is_console`.
    */
    pub fn std(stream: StdStream) -> io::Result<Self> {
        let handle = unsafe { ffi::GetStdHandle(handle_id(stream)) };
        if handle == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }
        if handle.is_null() {
            return Err(io::Error::new(io::ErrorKind::NotFound,
                format!("no standard handle for {:?}", stream)));
        }
        Ok(Win32Console { handle })
    }
}

impl WideWrite for Win32Console {
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        let len = units.len().min(DWORD::MAX as usize) as DWORD;
        let mut written: DWORD = 0;
        let ok = unsafe {
            ffi::WriteConsoleW(self.handle, units.as_ptr() as *const c_void,
                len, &mut written, ptr::null_mut())
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(written as usize)
    }
}

impl WideRead for Win32Console {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let len = buf.len().min(DWORD::MAX as usize) as DWORD;
        let mut read: DWORD = 0;
        let ok = unsafe {
            ffi::ReadConsoleW(self.handle, buf.as_mut_ptr() as *mut c_void,
                len, &mut read, ptr::null_mut())
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(read as usize)
    }
}
