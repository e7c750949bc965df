//! Error types for SMBIOS table production
//!
//! This module defines the error types returned while editing record string packs and
//! installing the processor and cache tables.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use altra_sdk::error::EfiError;

/// SMBIOS table production errors
///
/// This enum represents all possible errors that can occur while building the processor
/// and cache records, including string pack validation, record construction, and
/// registration with the host SMBIOS service.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuSmbiosError {
    // String pack errors
    /// String exceeds maximum allowed length (64 bytes)
    StringTooLong,
    /// String is empty or contains an embedded null byte
    InvalidString,
    /// The requested string number lies past the pack terminator
    StringNotFound,
    /// String pack is missing its double-null termination
    UnterminatedStringPack,

    // Platform data errors
    /// The platform information HOB payload could not be parsed
    MalformedPlatformHob,

    // Host service errors
    /// The host SMBIOS service rejected a record
    RecordRejected(EfiError),
}

impl From<EfiError> for CpuSmbiosError {
    fn from(error: EfiError) -> Self {
        CpuSmbiosError::RecordRejected(error)
    }
}
