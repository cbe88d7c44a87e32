//! Conversion of the host's `argv` and `envp` string arrays

use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::AbiError;
use crate::types::Env;

/// Copy a NULL-terminated array of C strings
///
/// A null `array` yields an empty vector. Invalid UTF-8 is replaced
/// with U+FFFD rather than rejected, since certificate subjects are not
/// guaranteed to be UTF-8.
///
/// # Safety
///
/// `array` must be null or point to a NULL-terminated array of valid,
/// NUL-terminated C strings that outlive this call.
pub unsafe fn c_string_array(array: *const *const c_char) -> Vec<String> {
    let mut strings = Vec::new();
    if array.is_null() {
        return strings;
    }

    let mut cursor = array;
    while !(*cursor).is_null() {
        strings.push(CStr::from_ptr(*cursor).to_string_lossy().into_owned());
        cursor = cursor.add(1);
    }

    strings
}

/// Build an [`Env`] from `key=value` entries
///
/// Each entry is split at its first `=`, so values may contain `=`.
/// A later duplicate key overwrites an earlier one.
///
/// # Errors
///
/// Returns `AbiError::MalformedEnv` for the first entry without `=`.
pub fn parse_env<I, S>(entries: I) -> Result<Env, AbiError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| {
            let entry = entry.as_ref();
            entry
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| AbiError::MalformedEnv {
                    entry: entry.to_string(),
                })
        })
        .collect()
}
