//! SMBIOS string pack measurement and editing
//!
//! Every SMBIOS record carries its strings in a pack of NUL-terminated values ending
//! with a double NUL. Records reference strings by 1-based number, so editing a value
//! means locating the numbered string and rewriting it without renumbering or
//! disturbing the others.
//!
//! [`update_string_pack`] rewrites in place when the replacement has the same length,
//! or when the target is the final string and the replacement fits inside it (the
//! remainder of the old value stays, which is why padded templates pad their final
//! string). Any other replacement shifts the tail of the pack to fit the new length.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use alloc::vec::Vec;

use altra_sdk::smbios::SMBIOS_STRING_MAX_LENGTH;

use crate::error::CpuSmbiosError;

/// Builds a string pack from ordered string values.
///
/// An empty list yields the two-byte terminator of a record with no strings.
pub fn build_string_pack(strings: &[&str]) -> Vec<u8> {
    let mut pack = Vec::new();
    for string in strings {
        pack.extend_from_slice(string.as_bytes());
        pack.push(0);
    }
    pack.push(0);
    if strings.is_empty() {
        pack.push(0);
    }
    pack
}

/// Byte length of a string pack through its double-NUL terminator.
///
/// An empty pack (leading double NUL) reports zero. A pack with no terminator reports
/// its full length.
pub fn string_pack_size(pack: &[u8]) -> usize {
    if pack.len() >= 2 && pack[0] == 0 && pack[1] == 0 {
        return 0;
    }
    match pack.windows(2).position(|pair| pair == [0, 0]) {
        Some(index) => index + 2,
        None => pack.len(),
    }
}

/// Locates the 1-based `string_number` in the pack, returning the byte range of its
/// value (exclusive of the NUL).
fn locate_string(pack: &[u8], string_number: usize) -> Option<(usize, usize)> {
    let mut index = 1;
    let mut start = 0;
    loop {
        if *pack.get(start)? == 0 {
            // A string cannot start on the pack terminator
            return None;
        }
        let end = start + pack[start..].iter().position(|&byte| byte == 0)?;
        if index == string_number {
            return Some((start, end));
        }
        index += 1;
        start = end + 1;
    }
}

/// Replaces string `string_number` (1-based) in the pack with `value`.
///
/// Same-length replacements are written in place. A shorter replacement of the final
/// string overwrites its head and leaves the remainder of the old value as padding.
/// All other replacements shift the tail of the pack, growing or shrinking it.
///
/// # Errors
///
/// - `InvalidString` if `value` is empty or contains a NUL byte
/// - `StringTooLong` if `value` exceeds [`SMBIOS_STRING_MAX_LENGTH`]
/// - `UnterminatedStringPack` if the pack has no double-NUL terminator
/// - `StringNotFound` if `string_number` is zero or lies past the terminator
pub fn update_string_pack(pack: &mut Vec<u8>, string_number: usize, value: &str) -> Result<(), CpuSmbiosError> {
    let input = value.as_bytes();
    if input.is_empty() || input.contains(&0) {
        return Err(CpuSmbiosError::InvalidString);
    }
    if input.len() > SMBIOS_STRING_MAX_LENGTH {
        return Err(CpuSmbiosError::StringTooLong);
    }
    if !pack.windows(2).any(|pair| pair == [0, 0]) {
        return Err(CpuSmbiosError::UnterminatedStringPack);
    }
    if string_number == 0 {
        return Err(CpuSmbiosError::StringNotFound);
    }

    let (start, end) = locate_string(pack, string_number).ok_or(CpuSmbiosError::StringNotFound)?;
    let target_len = end - start;
    let is_last = pack.get(end + 1) == Some(&0);

    if input.len() == target_len {
        pack[start..end].copy_from_slice(input);
    } else if is_last && input.len() < target_len {
        pack[start..start + input.len()].copy_from_slice(input);
    } else {
        pack.splice(start..end, input.iter().copied());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pack_layout() {
        assert_eq!(build_string_pack(&["CPU 0", "Ampere(R)"]), b"CPU 0\0Ampere(R)\0\0");
        assert_eq!(build_string_pack(&[]), [0, 0]);
    }

    #[test]
    fn test_pack_size() {
        assert_eq!(string_pack_size(&[0, 0]), 0);
        assert_eq!(string_pack_size(b"X\0\0"), 3);
        assert_eq!(string_pack_size(b"A\0B\0\0"), 5);
        assert_eq!(string_pack_size(b"never terminated"), 16);
    }

    #[test]
    fn test_equal_length_replaces_in_place() {
        let mut pack = build_string_pack(&["SOCKET 0", "Ampere(R)"]);
        let before_len = pack.len();
        update_string_pack(&mut pack, 1, "SOCKET 9").unwrap();
        assert_eq!(pack, b"SOCKET 9\0Ampere(R)\0\0");
        assert_eq!(pack.len(), before_len);
    }

    #[test]
    fn test_shorter_value_shifts_tail_left() {
        let mut pack = build_string_pack(&["SOCKET 0", "Ampere(R)", "NotSet"]);
        update_string_pack(&mut pack, 1, "CPU 0").unwrap();
        assert_eq!(pack, b"CPU 0\0Ampere(R)\0NotSet\0\0");
    }

    #[test]
    fn test_longer_value_shifts_tail_right() {
        let mut pack = build_string_pack(&["CPU 0", "Ampere(R)", "NotSet"]);
        update_string_pack(&mut pack, 2, "Ampere Computing LLC").unwrap();
        assert_eq!(pack, b"CPU 0\0Ampere Computing LLC\0NotSet\0\0");
    }

    #[test]
    fn test_final_string_keeps_padding_on_shorter_value() {
        let mut pack = build_string_pack(&["CPU 0", "PAD-PAD-PAD"]);
        update_string_pack(&mut pack, 2, "XY").unwrap();
        assert_eq!(pack, b"CPU 0\0XYD-PAD-PAD\0\0");
    }

    #[test]
    fn test_final_string_grows_when_longer() {
        let mut pack = build_string_pack(&["CPU 0", "short"]);
        update_string_pack(&mut pack, 2, "a longer replacement").unwrap();
        assert_eq!(pack, b"CPU 0\0a longer replacement\0\0");
    }

    #[test]
    fn test_middle_string_untouched_by_neighbor_edits() {
        let mut pack = build_string_pack(&["one", "two", "three"]);
        update_string_pack(&mut pack, 1, "first-string").unwrap();
        update_string_pack(&mut pack, 3, "third").unwrap();
        assert_eq!(pack, b"first-string\0two\0third\0\0");
    }

    #[test]
    fn test_number_past_terminator_is_not_found() {
        let mut pack = build_string_pack(&["only"]);
        assert_eq!(update_string_pack(&mut pack, 2, "value"), Err(CpuSmbiosError::StringNotFound));
    }

    #[test]
    fn test_number_zero_is_not_found() {
        let mut pack = build_string_pack(&["only"]);
        assert_eq!(update_string_pack(&mut pack, 0, "value"), Err(CpuSmbiosError::StringNotFound));
    }

    #[test]
    fn test_empty_pack_has_no_strings() {
        let mut pack = build_string_pack(&[]);
        assert_eq!(update_string_pack(&mut pack, 1, "value"), Err(CpuSmbiosError::StringNotFound));
    }

    #[test]
    fn test_rejects_empty_value() {
        let mut pack = build_string_pack(&["only"]);
        assert_eq!(update_string_pack(&mut pack, 1, ""), Err(CpuSmbiosError::InvalidString));
    }

    #[test]
    fn test_rejects_embedded_nul() {
        let mut pack = build_string_pack(&["only"]);
        assert_eq!(update_string_pack(&mut pack, 1, "a\0b"), Err(CpuSmbiosError::InvalidString));
    }

    #[test]
    fn test_rejects_overlong_value() {
        let mut pack = build_string_pack(&["only"]);
        let long = core::str::from_utf8(&[b'x'; SMBIOS_STRING_MAX_LENGTH + 1]).unwrap();
        assert_eq!(update_string_pack(&mut pack, 1, long), Err(CpuSmbiosError::StringTooLong));
    }

    #[test]
    fn test_rejects_unterminated_pack() {
        let mut pack = b"no terminator".to_vec();
        assert_eq!(update_string_pack(&mut pack, 1, "value"), Err(CpuSmbiosError::UnterminatedStringPack));
    }

    #[test]
    fn test_max_length_value_is_accepted() {
        let mut pack = build_string_pack(&["seed"]);
        let max = core::str::from_utf8(&[b'm'; SMBIOS_STRING_MAX_LENGTH]).unwrap();
        update_string_pack(&mut pack, 1, max).unwrap();
        assert_eq!(pack.len(), SMBIOS_STRING_MAX_LENGTH + 2);
    }
}
