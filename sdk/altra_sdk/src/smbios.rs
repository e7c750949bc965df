//! SMBIOS service interface
//!
//! This module defines the record header, handle types, and the service trait that
//! platform components use to publish SMBIOS records. The concrete implementation is
//! provided by the platform's SMBIOS manager; components only depend on the trait so
//! that record production can be tested against a mock table.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use r_efi::efi;
use zerocopy_derive::{FromBytes, Immutable, IntoBytes as DeriveIntoBytes, KnownLayout};

use crate::error::EfiError;

/// SMBIOS record handle type (16-bit identifier)
pub type SmbiosHandle = u16;

/// SMBIOS record type
pub type SmbiosType = u8;

/// Special handle value for automatic assignment
pub const SMBIOS_HANDLE_PI_RESERVED: SmbiosHandle = 0xFFFE;

/// SMBIOS string maximum length per specification
pub const SMBIOS_STRING_MAX_LENGTH: usize = 64;

/// Processor Information record type (Type 4)
pub const SMBIOS_TYPE_PROCESSOR_INFORMATION: SmbiosType = 4;

/// Cache Information record type (Type 7)
pub const SMBIOS_TYPE_CACHE_INFORMATION: SmbiosType = 7;

/// SMBIOS 3.x Configuration Table GUID: F2FD1544-9794-4A2C-992E-E5BBCF20E394
///
/// This GUID identifies the SMBIOS 3.0+ entry point structure in the UEFI Configuration Table.
/// Used for SMBIOS 3.0 and later versions which support 64-bit table addresses and remove
/// the 4GB table size limitation of SMBIOS 2.x.
pub const SMBIOS_3_X_TABLE_GUID: efi::Guid =
    efi::Guid::from_fields(0xF2FD1544, 0x9794, 0x4A2C, 0x99, 0x2E, &[0xE5, 0xBB, 0xCF, 0x20, 0xE3, 0x94]);

/// SMBIOS table header structure
///
/// This is the standard 4-byte header that appears at the start of every SMBIOS record.
/// It contains the record type, length of structured data, and a unique handle.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, DeriveIntoBytes, Immutable, KnownLayout)]
pub struct SmbiosTableHeader {
    /// SMBIOS record type
    pub record_type: SmbiosType,
    /// Length of the structured data (including header)
    pub length: u8,
    /// Unique handle for this record
    pub handle: SmbiosHandle,
}

impl SmbiosTableHeader {
    /// Creates a new SMBIOS table header
    pub fn new(record_type: SmbiosType, length: u8, handle: SmbiosHandle) -> Self {
        Self { record_type, length, handle }
    }
}

/// SMBIOS table service
///
/// Provides the record operations a producer needs: adding complete records from their
/// byte representation, updating strings in records already in the table, removing
/// records, and querying the table version.
pub trait Smbios {
    /// Adds an SMBIOS record to the table from its complete byte representation.
    ///
    /// `record_data` must contain the 4-byte header, the structured data indicated by the
    /// header length field, and the string pool terminated by a double null. Records added
    /// with [`SMBIOS_HANDLE_PI_RESERVED`] in the header are assigned the next free handle.
    ///
    /// # Arguments
    ///
    /// * `producer_handle` - Optional handle of the producer creating this record
    /// * `record_data` - Complete SMBIOS record as a byte slice
    ///
    /// # Returns
    ///
    /// Returns the assigned SMBIOS handle for the newly added record.
    fn add_from_bytes(&self, producer_handle: Option<efi::Handle>, record_data: &[u8]) -> Result<SmbiosHandle, EfiError>;

    /// Updates a string in an existing SMBIOS record.
    ///
    /// # Arguments
    ///
    /// * `smbios_handle` - Handle of the record to update
    /// * `string_number` - 1-based index of the string to update
    /// * `string` - New string value
    fn update_string(&self, smbios_handle: SmbiosHandle, string_number: usize, string: &str) -> Result<(), EfiError>;

    /// Removes an SMBIOS record from the table.
    ///
    /// # Arguments
    ///
    /// * `smbios_handle` - Handle of the record to remove
    fn remove(&self, smbios_handle: SmbiosHandle) -> Result<(), EfiError>;

    /// Gets the SMBIOS version information.
    ///
    /// # Returns
    ///
    /// A tuple of (major_version, minor_version).
    fn version(&self) -> (u8, u8);
}
