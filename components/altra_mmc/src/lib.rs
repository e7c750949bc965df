//! Management controller client for Ampere(R) Altra(R) platforms
//!
//! The board management controller (MMC) listens on the platform's debug UART for
//! IPMI commands framed as bracketed ASCII hex. [`MmcClient`] wraps a serial
//! transport and issues the commands the firmware needs during boot:
//!
//! - boot progress post codes,
//! - the power-off type selection (which shares the post-code command),
//! - the controller firmware version query shown on the setup screen.
//!
//! Post codes are fired from progress callbacks, and diagnostic output may itself be
//! routed to the controller's UART, so [`MmcClient::post_code`] refuses to re-enter
//! itself: a nested call returns without touching the port.
//!
//! # Usage
//!
//! ```rust ignore
//! let client = MmcClient::new(UartPl011::new(MMC_UART_BASE));
//! client.post_code(0x11)?;
//! let version = client.firmware_version()?;
//! ```
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod command;

use alloc::string::String;
use core::sync::atomic::{AtomicBool, Ordering};

use altra_sdk::error::EfiError;
use altra_sdk::serial::SerialIo;

use crate::command::{
    VERSION_RESPONSE_LEN, firmware_version_frame, parse_firmware_version, post_code_frame, power_off_type_frame,
};

/// Clears the re-entry flag when the guarded scope ends.
struct ReentryGuard<'a>(&'a AtomicBool);

impl<'a> ReentryGuard<'a> {
    /// Claims the flag, or returns `None` if the scope is already active.
    fn try_enter(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed).ok().map(|_| Self(flag))
    }
}

impl Drop for ReentryGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// IPMI command client for the management controller behind a serial port.
#[derive(Debug)]
pub struct MmcClient<S: SerialIo> {
    serial: S,
    post_code_active: AtomicBool,
}

impl<S: SerialIo> MmcClient<S> {
    /// Creates a client over the given transport.
    pub const fn new(serial: S) -> Self {
        Self { serial, post_code_active: AtomicBool::new(false) }
    }

    /// Sends a boot-progress post code to the controller.
    ///
    /// A call made while a post code is already being sent returns without writing;
    /// a transport that accepts no bytes reports `NoResponse`.
    pub fn post_code(&self, value: u8) -> Result<(), EfiError> {
        let Some(_active) = ReentryGuard::try_enter(&self.post_code_active) else {
            return Ok(());
        };

        if self.serial.write(&post_code_frame(value)) == 0 {
            log::error!(target: "altra_mmc", "failed to write post code {value:#04X}");
            return Err(EfiError::NoResponse);
        }
        Ok(())
    }

    /// Tells the controller which power-off behavior to use.
    pub fn set_power_off_type(&self, value: u8) -> Result<(), EfiError> {
        log::debug!(target: "altra_mmc", "write power off type {value}");
        if self.serial.write(&power_off_type_frame(value)) == 0 {
            log::error!(target: "altra_mmc", "failed to write power off type");
            return Err(EfiError::InvalidParameter);
        }
        Ok(())
    }

    /// Queries the controller's firmware version, returned dotted (for example
    /// `02.02`).
    pub fn firmware_version(&self) -> Result<String, EfiError> {
        if self.serial.write(firmware_version_frame()) == 0 {
            log::error!(target: "altra_mmc", "failed to send version query");
            return Err(EfiError::NoResponse);
        }

        let mut response = [0u8; VERSION_RESPONSE_LEN];
        let read = self.serial.read(&mut response);
        if read == 0 {
            log::error!(target: "altra_mmc", "no version response from controller");
            return Err(EfiError::NoResponse);
        }
        log::trace!(target: "altra_mmc", "version response: {:02X?}", &response[..read]);

        parse_firmware_version(&response[..read])
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::cell::RefCell;
    use std::collections::VecDeque;
    use std::vec::Vec;

    struct ScriptedPort {
        written: RefCell<Vec<u8>>,
        responses: RefCell<VecDeque<Vec<u8>>>,
        refuse_writes: bool,
    }

    impl ScriptedPort {
        fn new() -> Self {
            Self { written: RefCell::new(Vec::new()), responses: RefCell::new(VecDeque::new()), refuse_writes: false }
        }

        fn refusing() -> Self {
            Self { refuse_writes: true, ..Self::new() }
        }

        fn respond_with(self, response: &[u8]) -> Self {
            self.responses.borrow_mut().push_back(response.to_vec());
            self
        }
    }

    impl SerialIo for ScriptedPort {
        fn write(&self, buffer: &[u8]) -> usize {
            if self.refuse_writes {
                return 0;
            }
            self.written.borrow_mut().extend_from_slice(buffer);
            buffer.len()
        }

        fn read(&self, buffer: &mut [u8]) -> usize {
            match self.responses.borrow_mut().pop_front() {
                Some(response) => {
                    let len = response.len().min(buffer.len());
                    buffer[..len].copy_from_slice(&response[..len]);
                    len
                }
                None => 0,
            }
        }
    }

    fn version_response() -> Vec<u8> {
        let mut response = std::vec![b' '; VERSION_RESPONSE_LEN];
        response[command::VERSION_OFFSET..command::VERSION_OFFSET + command::VERSION_LEN].copy_from_slice(b"02 02");
        response
    }

    #[test]
    fn test_post_code_writes_frame() {
        let client = MmcClient::new(ScriptedPort::new());
        client.post_code(0x11).unwrap();
        assert_eq!(client.serial.written.borrow().as_slice(), b"[C0 00 80 11]\r\n");
    }

    #[test]
    fn test_post_code_refused_write_is_no_response() {
        let client = MmcClient::new(ScriptedPort::refusing());
        assert_eq!(client.post_code(0x11), Err(EfiError::NoResponse));
    }

    #[test]
    fn test_post_code_does_not_reenter() {
        let client = MmcClient::new(ScriptedPort::new());

        // Simulate a post code already in flight, as when debug output triggered by
        // the write loops back into the client
        let outer = ReentryGuard::try_enter(&client.post_code_active).unwrap();
        client.post_code(0x22).unwrap();
        assert!(client.serial.written.borrow().is_empty());
        drop(outer);

        client.post_code(0x22).unwrap();
        assert_eq!(client.serial.written.borrow().as_slice(), b"[C0 00 80 22]\r\n");
    }

    #[test]
    fn test_reentry_guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = ReentryGuard::try_enter(&flag).unwrap();
        assert!(ReentryGuard::try_enter(&flag).is_none());
        drop(guard);
        assert!(ReentryGuard::try_enter(&flag).is_some());
    }

    #[test]
    fn test_guard_released_after_transport_failure() {
        let client = MmcClient::new(ScriptedPort::refusing());
        assert_eq!(client.post_code(0x33), Err(EfiError::NoResponse));
        assert!(!client.post_code_active.load(Ordering::Relaxed));
    }

    #[test]
    fn test_power_off_type_frame_and_error() {
        let client = MmcClient::new(ScriptedPort::new());
        client.set_power_off_type(0x01).unwrap();
        assert_eq!(client.serial.written.borrow().as_slice(), b"[C0 00 80 01]\r\n");

        let refusing = MmcClient::new(ScriptedPort::refusing());
        assert_eq!(refusing.set_power_off_type(0x01), Err(EfiError::InvalidParameter));
    }

    #[test]
    fn test_firmware_version_round_trip() {
        let client = MmcClient::new(ScriptedPort::new().respond_with(&version_response()));
        assert_eq!(client.firmware_version().unwrap(), "02.02");
        assert_eq!(client.serial.written.borrow().as_slice(), b"[18 00 01]\r\n");
    }

    #[test]
    fn test_firmware_version_silent_controller() {
        let client = MmcClient::new(ScriptedPort::new());
        assert_eq!(client.firmware_version(), Err(EfiError::NoResponse));
    }

    #[test]
    fn test_firmware_version_truncated_response() {
        let client = MmcClient::new(ScriptedPort::new().respond_with(b"[18 00 01 OK]"));
        assert_eq!(client.firmware_version(), Err(EfiError::NoResponse));
    }

    #[test]
    fn test_firmware_version_query_refused() {
        let client = MmcClient::new(ScriptedPort::refusing());
        assert_eq!(client.firmware_version(), Err(EfiError::NoResponse));
    }
}
