//! Default processor and cache table blueprints
//!
//! One Type 4 record and three Type 7 records (L1 instruction, L1 data, L2) are
//! published per socket. The blueprints here carry the template values for an
//! Altra socket: the update pass in [`crate::component`] overwrites the fields
//! and strings that depend on the platform information HOB before installation.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use alloc::vec::Vec;

use altra_cpu::cache::CacheKind;
use altra_sdk::smbios::{
    SMBIOS_HANDLE_PI_RESERVED, SMBIOS_TYPE_CACHE_INFORMATION, SMBIOS_TYPE_PROCESSOR_INFORMATION, SmbiosTableHeader,
};

use crate::record::{
    CacheAssociativity, CacheErrorType, PROCESSOR_FAMILY2_ARM_V8, PROCESSOR_FAMILY_INDICATOR_FAMILY2, ProcessorType,
    ProcessorUpgrade, SmbiosTableType4, SmbiosTableType7, SystemCacheType, populated_enabled_status,
    processor_characteristics, synchronous_sram_type,
};
use crate::string_pack::build_string_pack;

/// Cache records published per socket (L1I, L1D, L2)
pub const CACHES_PER_SOCKET: usize = 3;

/// Processor version string for first-generation Altra parts
pub const PROCESSOR_VERSION_ALTRA: &str = "Ampere(R) Altra(R) Processor";

/// Processor version string for Altra Max parts
pub const PROCESSOR_VERSION_ALTRA_MAX: &str = "Ampere(R) Altra(R) Max Processor";

/// String pack position of the Type 4 socket designation
pub const TYPE4_STR_SOCKET: usize = 1;

/// String pack position of the Type 4 processor version
pub const TYPE4_STR_VERSION: usize = 3;

/// String pack position of the Type 4 part number
pub const TYPE4_STR_PART_NUMBER: usize = 4;

/// String pack position of the Type 4 serial number
pub const TYPE4_STR_SERIAL: usize = 5;

/// A Type 4 record staged for installation: fixed portion plus string pack.
#[derive(Debug, Clone)]
pub struct ProcessorBlueprint {
    /// Fixed portion of the record
    pub fixed: SmbiosTableType4,
    /// String pack, double-NUL terminated
    pub pack: Vec<u8>,
}

/// A Type 7 record staged for installation, tagged with the cache it describes.
#[derive(Debug, Clone)]
pub struct CacheBlueprint {
    /// Fixed portion of the record
    pub fixed: SmbiosTableType7,
    /// String pack, double-NUL terminated
    pub pack: Vec<u8>,
    /// Cache level, 1-based
    pub level: u8,
    /// Cache kind the level selector names
    pub kind: CacheKind,
}

/// The records one socket contributes to the table.
#[derive(Debug, Clone)]
pub struct SocketTables {
    /// Processor Information record
    pub processor: ProcessorBlueprint,
    /// Cache Information records, L1I then L1D then L2
    pub caches: [CacheBlueprint; CACHES_PER_SOCKET],
}

impl SocketTables {
    /// Builds the default blueprints for one socket.
    pub fn new_default() -> Self {
        Self {
            processor: default_type4(),
            caches: [
                default_type7_l1(CacheKind::Instruction, "L1 Instruction Cache"),
                default_type7_l1(CacheKind::Data, "L1 Data Cache"),
                default_type7_l2(),
            ],
        }
    }
}

fn default_type4() -> ProcessorBlueprint {
    ProcessorBlueprint {
        fixed: SmbiosTableType4 {
            hdr: SmbiosTableHeader::new(
                SMBIOS_TYPE_PROCESSOR_INFORMATION,
                core::mem::size_of::<SmbiosTableType4>() as u8,
                SMBIOS_HANDLE_PI_RESERVED,
            ),
            socket: TYPE4_STR_SOCKET as u8,
            processor_type: ProcessorType::CentralProcessor as u8,
            processor_family: PROCESSOR_FAMILY_INDICATOR_FAMILY2,
            processor_manufacturer: 2,
            processor_id: 0,
            processor_version: TYPE4_STR_VERSION as u8,
            voltage: 0x80,
            external_clock: 0,
            max_speed: 3000,
            current_speed: 3000,
            status: populated_enabled_status(),
            processor_upgrade: ProcessorUpgrade::Other as u8,
            l1_cache_handle: 0xFFFF,
            l2_cache_handle: 0xFFFF,
            l3_cache_handle: 0xFFFF,
            serial_number: TYPE4_STR_SERIAL as u8,
            asset_tag: 0,
            part_number: TYPE4_STR_PART_NUMBER as u8,
            core_count: 80,
            enabled_core_count: 80,
            thread_count: 0,
            processor_characteristics: processor_characteristics(),
            processor_family2: PROCESSOR_FAMILY2_ARM_V8,
            core_count2: 0,
            enabled_core_count2: 0,
            thread_count2: 0,
        },
        // The serial template is padded so a 32-hex-digit ECID can land in the final
        // string without shifting the pack
        pack: build_string_pack(&[
            "SOCKET 0",
            "Ampere(R)",
            PROCESSOR_VERSION_ALTRA_MAX,
            "NotSet",
            "Not Specified                     ",
        ]),
    }
}

fn default_type7_l1(kind: CacheKind, designation: &str) -> CacheBlueprint {
    CacheBlueprint {
        fixed: SmbiosTableType7 {
            hdr: SmbiosTableHeader::new(
                SMBIOS_TYPE_CACHE_INFORMATION,
                core::mem::size_of::<SmbiosTableType7>() as u8,
                SMBIOS_HANDLE_PI_RESERVED,
            ),
            socket_designation: 1,
            // L1, enabled, write-back
            cache_configuration: 0x0180,
            // 64K in 64K units
            maximum_cache_size: 0x8001,
            installed_size: 0x8001,
            supported_sram_type: synchronous_sram_type(),
            current_sram_type: synchronous_sram_type(),
            cache_speed: 0,
            error_correction_type: CacheErrorType::Parity as u8,
            system_cache_type: match kind {
                CacheKind::Instruction => SystemCacheType::Instruction as u8,
                _ => SystemCacheType::Data as u8,
            },
            associativity: CacheAssociativity::Way4 as u8,
            maximum_cache_size2: 0x8000_0001,
            installed_size2: 0x8000_0001,
        },
        pack: build_string_pack(&[designation]),
        level: 1,
        kind,
    }
}

fn default_type7_l2() -> CacheBlueprint {
    CacheBlueprint {
        fixed: SmbiosTableType7 {
            hdr: SmbiosTableHeader::new(
                SMBIOS_TYPE_CACHE_INFORMATION,
                core::mem::size_of::<SmbiosTableType7>() as u8,
                SMBIOS_HANDLE_PI_RESERVED,
            ),
            socket_designation: 1,
            // L2, enabled, write-back
            cache_configuration: 0x0181,
            // 1M in 64K units
            maximum_cache_size: 0x8010,
            installed_size: 0x8010,
            supported_sram_type: synchronous_sram_type(),
            current_sram_type: synchronous_sram_type(),
            cache_speed: 0,
            error_correction_type: CacheErrorType::SingleBit as u8,
            system_cache_type: SystemCacheType::Unified as u8,
            associativity: CacheAssociativity::Way8 as u8,
            maximum_cache_size2: 0x8000_0010,
            installed_size2: 0x8000_0010,
        },
        pack: build_string_pack(&["L2 Cache"]),
        level: 2,
        kind: CacheKind::Unified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string_pack::string_pack_size;

    #[test]
    fn test_type4_defaults_match_template() {
        let blueprint = default_type4();
        assert_eq!(blueprint.fixed.hdr.record_type, SMBIOS_TYPE_PROCESSOR_INFORMATION);
        assert_eq!(blueprint.fixed.hdr.length, 0x30);
        assert_eq!({ blueprint.fixed.hdr.handle }, SMBIOS_HANDLE_PI_RESERVED);
        assert_eq!(blueprint.fixed.status, 0x41);
        assert_eq!({ blueprint.fixed.processor_characteristics }, 0xEC);
        assert_eq!({ blueprint.fixed.processor_family2 }, 0x0101);
        assert_eq!({ blueprint.fixed.l1_cache_handle }, 0xFFFF);
        assert_eq!({ blueprint.fixed.l2_cache_handle }, 0xFFFF);
        assert_eq!({ blueprint.fixed.l3_cache_handle }, 0xFFFF);
    }

    #[test]
    fn test_type4_pack_has_five_strings() {
        let blueprint = default_type4();
        assert!(blueprint.pack.starts_with(b"SOCKET 0\0Ampere(R)\0"));
        assert_eq!(blueprint.pack.iter().filter(|&&b| b == 0).count(), 6);
        assert_eq!(string_pack_size(&blueprint.pack), blueprint.pack.len());
    }

    #[test]
    fn test_serial_template_fits_ecid() {
        // Four 8-hex-digit words must replace the final string without growing it
        let blueprint = default_type4();
        let serial_len = "Not Specified                     ".len();
        assert!(serial_len >= 32);
        assert!(blueprint.pack.ends_with(b"Not Specified                     \0\0"));
    }

    #[test]
    fn test_socket_caches_order_and_levels() {
        let tables = SocketTables::new_default();
        assert_eq!(tables.caches[0].kind, CacheKind::Instruction);
        assert_eq!(tables.caches[1].kind, CacheKind::Data);
        assert_eq!(tables.caches[2].kind, CacheKind::Unified);
        assert_eq!(tables.caches[0].level, 1);
        assert_eq!(tables.caches[1].level, 1);
        assert_eq!(tables.caches[2].level, 2);
        assert!(tables.caches[0].pack.starts_with(b"L1 Instruction Cache\0"));
        assert!(tables.caches[2].pack.starts_with(b"L2 Cache\0"));
    }

    #[test]
    fn test_type7_defaults_match_template() {
        let tables = SocketTables::new_default();
        let l1i = &tables.caches[0].fixed;
        assert_eq!({ l1i.cache_configuration }, 0x0180);
        assert_eq!({ l1i.maximum_cache_size }, 0x8001);
        assert_eq!(l1i.error_correction_type, CacheErrorType::Parity as u8);

        let l2 = &tables.caches[2].fixed;
        assert_eq!({ l2.cache_configuration }, 0x0181);
        assert_eq!({ l2.maximum_cache_size }, 0x8010);
        assert_eq!({ l2.maximum_cache_size2 }, 0x8000_0010);
        assert_eq!(l2.error_correction_type, CacheErrorType::SingleBit as u8);
        assert_eq!(l2.associativity, CacheAssociativity::Way8 as u8);
    }
}
