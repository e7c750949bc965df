//! IPMI command frames and response parsing
//!
//! The management controller accepts IPMI commands as bracketed ASCII hex over its
//! debug UART: `[netfn lun cmd data]\r\n`. This module builds the frames the platform
//! sends and parses the firmware version response.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use altra_sdk::error::EfiError;

/// Byte length of the firmware version response
pub const VERSION_RESPONSE_LEN: usize = 19 * 3 + 5 + 12;

/// Offset of the version digits inside the response
pub const VERSION_OFFSET: usize = 66;

/// Number of version characters at [`VERSION_OFFSET`]
pub const VERSION_LEN: usize = 5;

/// Builds the OEM post-code frame: `[C0 00 80 <value>]\r\n`.
pub fn post_code_frame(value: u8) -> Vec<u8> {
    format!("[C0 00 80 {value:02X}]\r\n").into_bytes()
}

/// Builds the power-off type frame, which shares the post-code command.
pub fn power_off_type_frame(value: u8) -> Vec<u8> {
    post_code_frame(value)
}

/// The firmware version query frame: `[18 00 01]\r\n`.
pub fn firmware_version_frame() -> &'static [u8] {
    b"[18 00 01]\r\n"
}

/// Extracts the dotted firmware version from a version query response.
///
/// The controller places five version characters at byte 66 of the response; the
/// middle character is a separator and is reported as a dot (for example `02.02`).
/// Responses too short to carry the version field are rejected as `NoResponse`.
pub fn parse_firmware_version(response: &[u8]) -> Result<String, EfiError> {
    let field =
        response.get(VERSION_OFFSET..VERSION_OFFSET + VERSION_LEN).ok_or(EfiError::NoResponse)?;
    let mut version: Vec<u8> = field.to_vec();
    version[2] = b'.';
    String::from_utf8(version).map_err(|_| EfiError::DeviceError)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_post_code_frame_layout() {
        assert_eq!(post_code_frame(0x11), b"[C0 00 80 11]\r\n");
        assert_eq!(post_code_frame(0x05), b"[C0 00 80 05]\r\n");
        assert_eq!(post_code_frame(0xAB), b"[C0 00 80 AB]\r\n");
    }

    #[test]
    fn test_power_off_frame_shares_post_code_command() {
        assert_eq!(power_off_type_frame(0x01), b"[C0 00 80 01]\r\n");
    }

    #[test]
    fn test_version_frame() {
        assert_eq!(firmware_version_frame(), b"[18 00 01]\r\n");
    }

    #[test]
    fn test_parse_version_dots_the_middle() {
        let mut response = [b' '; VERSION_RESPONSE_LEN];
        response[VERSION_OFFSET..VERSION_OFFSET + VERSION_LEN].copy_from_slice(b"02x02");
        assert_eq!(parse_firmware_version(&response).unwrap(), "02.02");
    }

    #[test]
    fn test_parse_version_rejects_short_response() {
        let response = [b' '; VERSION_OFFSET + VERSION_LEN - 1];
        assert_eq!(parse_firmware_version(&response), Err(EfiError::NoResponse));
        assert_eq!(parse_firmware_version(&[]), Err(EfiError::NoResponse));
    }

    #[test]
    fn test_parse_version_rejects_non_utf8() {
        let mut response = [b' '; VERSION_RESPONSE_LEN];
        response[VERSION_OFFSET..VERSION_OFFSET + VERSION_LEN].copy_from_slice(&[0xFF, 0xFE, 0x20, 0xFF, 0xFE]);
        assert_eq!(parse_firmware_version(&response), Err(EfiError::DeviceError));
    }

    #[test]
    fn test_response_length_matches_controller() {
        assert_eq!(VERSION_RESPONSE_LEN, 74);
    }
}
