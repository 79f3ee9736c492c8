/*!
Conversion to and from the platform's native text units.

On Windows, native text is UTF-16 and these functions widen and narrow.  Everywhere else native text is assumed to already be UTF-8, and they hand back their input untouched.  Code written against this module compiles and behaves the same on both, which is the point: call `to_native` right before a platform API, and forget about it.
*/
use std::borrow::Cow;
use crate::encoding::Strictness;
use crate::error::Result;

/**
The code unit of native strings: `u16` on Windows, `u8` elsewhere.
*/
#[cfg(target_os="windows")]
pub type NativeUnit = u16;

#[cfg(not(target_os="windows"))]
pub type NativeUnit = u8;

/**
Converts UTF-8 into native units.  Never allocates (or fails) on UTF-8-native targets.
*/
#[cfg(target_os="windows")]
pub fn to_native(s: &[u8], strictness: Strictness) -> Result<Cow<[NativeUnit]>> {
    super::conv::widen_with(s, strictness).map(Cow::Owned)
}

#[cfg(not(target_os="windows"))]
pub fn to_native(s: &[u8], _strictness: Strictness) -> Result<Cow<[NativeUnit]>> {
    Ok(Cow::Borrowed(s))
}

/**
Converts native units into UTF-8.  Never allocates (or fails) on UTF-8-native targets.
*/
#[cfg(target_os="windows")]
pub fn from_native(s: &[NativeUnit], strictness: Strictness) -> Result<Cow<[u8]>> {
    super::conv::narrow_with(s, strictness).map(Cow::Owned)
}

#[cfg(not(target_os="windows"))]
pub fn from_native(s: &[NativeUnit], _strictness: Strictness) -> Result<Cow<[u8]>> {
    Ok(Cow::Borrowed(s))
}
