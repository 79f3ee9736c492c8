#![allow(non_camel_case_types, non_snake_case)]
use libc::{c_char, c_int, c_void};

// TODO: replace with windows-sys bindings.

pub type BOOL = c_int;
pub type DWORD = u32;
pub type UINT = u32;
pub type HANDLE = *mut c_void;

pub const CP_UTF8: UINT = 65001;
pub const MB_ERR_INVALID_CHARS: DWORD = 0x0000_0008;
pub const WC_ERR_INVALID_CHARS: DWORD = 0x0000_0080;

pub const STD_INPUT_HANDLE: DWORD = -10i32 as DWORD;
pub const STD_OUTPUT_HANDLE: DWORD = -11i32 as DWORD;
pub const STD_ERROR_HANDLE: DWORD = -12i32 as DWORD;

pub const FILE_TYPE_CHAR: DWORD = 0x0002;

pub const INVALID_HANDLE_VALUE: HANDLE = -1isize as HANDLE;

#[link(name="kernel32")]
extern "system" {
    pub fn MultiByteToWideChar(
        CodePage: UINT,
        dwFlags: DWORD,
        lpMultiByteStr: *const c_char,
        cbMultiByte: c_int,
        lpWideCharStr: *mut u16,
        cchWideChar: c_int,
    ) -> c_int;

    pub fn WideCharToMultiByte(
        CodePage: UINT,
        dwFlags: DWORD,
        lpWideCharStr: *const u16,
        cchWideChar: c_int,
        lpMultiByteStr: *mut c_char,
        cbMultiByte: c_int,
        lpDefaultChar: *const c_char,
        lpUsedDefaultChar: *mut BOOL,
    ) -> c_int;

    pub fn GetStdHandle(nStdHandle: DWORD) -> HANDLE;

    pub fn GetFileType(hFile: HANDLE) -> DWORD;

    pub fn WriteConsoleW(
        hConsoleOutput: HANDLE,
        lpBuffer: *const c_void,
        nNumberOfCharsToWrite: DWORD,
        lpNumberOfCharsWritten: *mut DWORD,
        lpReserved: *mut c_void,
    ) -> BOOL;

    pub fn ReadConsoleW(
        hConsoleInput: HANDLE,
        lpBuffer: *mut c_void,
        nNumberOfCharsToRead: DWORD,
        lpNumberOfCharsRead: *mut DWORD,
        pInputControl: *mut c_void,
    ) -> BOOL;
}
