//! SMBIOS Type 4 and Type 7 record structures
//!
//! Fixed-portion layouts and field encodings for the Processor Information and Cache
//! Information records, per SMBIOS 3.x section 7.5 and 7.8. The structures serialize
//! with zerocopy; multi-flag fields are assembled through `bitfield` builders and
//! stored as raw integers so the records stay byte-serializable.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use alloc::vec::Vec;
use bitfield::bitfield;
use zerocopy::{Immutable, IntoBytes};
use zerocopy_derive::{FromBytes as DeriveFromBytes, Immutable as DeriveImmutable, IntoBytes as DeriveIntoBytes, KnownLayout};

use altra_sdk::smbios::SmbiosTableHeader;

/// 1-based reference into a record's string pack; zero means no string
pub type SmbiosTableString = u8;

/// Processor family indicator directing readers to the Processor Family 2 field
pub const PROCESSOR_FAMILY_INDICATOR_FAMILY2: u8 = 0xFE;

/// ARMv8 family code for the Processor Family 2 field
pub const PROCESSOR_FAMILY2_ARM_V8: u16 = 0x0101;

/// Processor Information - Processor Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProcessorType {
    /// Processor of another type
    Other = 0x01,
    /// Processor type is unknown
    Unknown = 0x02,
    /// Central processor
    CentralProcessor = 0x03,
    /// Math processor
    MathProcessor = 0x04,
    /// DSP processor
    DspProcessor = 0x05,
    /// Video processor
    VideoProcessor = 0x06,
}

/// Processor Information - Processor Upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProcessorUpgrade {
    /// Upgrade mechanism of another kind
    Other = 0x01,
    /// Upgrade mechanism is unknown
    Unknown = 0x02,
    /// No upgrade is possible
    None = 0x06,
}

/// Cache Information - Error Correction Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CacheErrorType {
    /// Error correction of another kind
    Other = 0x01,
    /// Error correction is unknown
    Unknown = 0x02,
    /// No error correction
    None = 0x03,
    /// Parity checking
    Parity = 0x04,
    /// Single-bit ECC
    SingleBit = 0x05,
    /// Multi-bit ECC
    MultiBit = 0x06,
}

/// Cache Information - System Cache Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemCacheType {
    /// Cache of another kind
    Other = 0x01,
    /// Cache kind is unknown
    Unknown = 0x02,
    /// Instruction cache
    Instruction = 0x03,
    /// Data cache
    Data = 0x04,
    /// Unified cache
    Unified = 0x05,
}

/// Cache Information - Associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CacheAssociativity {
    /// Associativity of another kind
    Other = 0x01,
    /// Associativity is unknown
    Unknown = 0x02,
    /// Direct mapped
    DirectMapped = 0x03,
    /// 2-way set associative
    Way2 = 0x04,
    /// 4-way set associative
    Way4 = 0x05,
    /// Fully associative
    Fully = 0x06,
    /// 8-way set associative
    Way8 = 0x07,
    /// 16-way set associative
    Way16 = 0x08,
    /// 12-way set associative
    Way12 = 0x09,
    /// 24-way set associative
    Way24 = 0x0A,
    /// 32-way set associative
    Way32 = 0x0B,
    /// 48-way set associative
    Way48 = 0x0C,
    /// 64-way set associative
    Way64 = 0x0D,
    /// 20-way set associative
    Way20 = 0x0E,
}

bitfield! {
    /// Processor Information - Voltage.
    ///
    /// With the legacy indicator set, the low seven bits carry the current voltage
    /// in tenths of a volt; otherwise the capability bits describe socket support.
    pub struct ProcessorVoltage(u8);
    impl Debug;
    pub capability_5v, set_capability_5v: 0;
    pub capability_3_3v, set_capability_3_3v: 1;
    pub capability_2_9v, set_capability_2_9v: 2;
    pub capability_reserved, set_capability_reserved: 3;
    pub reserved, set_reserved: 6, 4;
    pub legacy_mode, set_legacy_mode: 7;
}

bitfield! {
    /// Processor Information - Status.
    pub struct ProcessorStatusBits(u8);
    impl Debug;
    pub cpu_status, set_cpu_status: 2, 0;
    pub reserved1, set_reserved1: 5, 3;
    pub socket_populated, set_socket_populated: 6;
    pub reserved2, set_reserved2: 7;
}

bitfield! {
    /// Processor Information - Characteristics.
    pub struct ProcessorCharacteristicFlags(u16);
    impl Debug;
    pub reserved1, set_reserved1: 0;
    pub unknown, set_unknown: 1;
    pub capable_64bit, set_capable_64bit: 2;
    pub multi_core, set_multi_core: 3;
    pub hardware_thread, set_hardware_thread: 4;
    pub execute_protection, set_execute_protection: 5;
    pub enhanced_virtualization, set_enhanced_virtualization: 6;
    pub power_performance_ctrl, set_power_performance_ctrl: 7;
    pub capable_128bit, set_capable_128bit: 8;
    pub arm64_soc_id, set_arm64_soc_id: 9;
    pub reserved2, set_reserved2: 15, 10;
}

bitfield! {
    /// Cache Information - SRAM type flags.
    pub struct CacheSramTypeData(u16);
    impl Debug;
    pub other, set_other: 0;
    pub unknown, set_unknown: 1;
    pub non_burst, set_non_burst: 2;
    pub burst, set_burst: 3;
    pub pipeline_burst, set_pipeline_burst: 4;
    pub synchronous, set_synchronous: 5;
    pub asynchronous, set_asynchronous: 6;
    pub reserved, set_reserved: 15, 7;
}

/// Processor status byte for an enabled processor in a populated socket.
pub fn populated_enabled_status() -> u8 {
    let mut status = ProcessorStatusBits(0);
    status.set_socket_populated(true);
    status.set_cpu_status(1);
    status.0
}

/// Processor characteristics reported for this processor family: 64-bit capable,
/// multi-core, execute protection, enhanced virtualization, and power/performance
/// control.
pub fn processor_characteristics() -> u16 {
    let mut flags = ProcessorCharacteristicFlags(0);
    flags.set_capable_64bit(true);
    flags.set_multi_core(true);
    flags.set_execute_protection(true);
    flags.set_enhanced_virtualization(true);
    flags.set_power_performance_ctrl(true);
    flags.0
}

/// SRAM type word reporting synchronous SRAM only.
pub fn synchronous_sram_type() -> u16 {
    let mut sram = CacheSramTypeData(0);
    sram.set_synchronous(true);
    sram.0
}

/// Voltage byte in legacy encoding: indicator bit plus the voltage in tenths of a
/// volt, derived from millivolts.
pub fn legacy_voltage(millivolts: u16) -> u8 {
    0x80 | (millivolts / 100) as u8
}

/// Processor Information (Type 4).
///
/// The information in this structure defines the attributes of a single processor;
/// a separate structure instance is provided for each socket.
#[repr(C, packed)]
#[derive(Debug, Clone, PartialEq, DeriveFromBytes, DeriveIntoBytes, DeriveImmutable, KnownLayout)]
pub struct SmbiosTableType4 {
    /// Record header
    pub hdr: SmbiosTableHeader,
    /// Socket designation string
    pub socket: SmbiosTableString,
    /// The enumeration value from [`ProcessorType`]
    pub processor_type: u8,
    /// Processor family, or [`PROCESSOR_FAMILY_INDICATOR_FAMILY2`]
    pub processor_family: u8,
    /// Manufacturer string
    pub processor_manufacturer: SmbiosTableString,
    /// Raw processor identifier
    pub processor_id: u64,
    /// Version string
    pub processor_version: SmbiosTableString,
    /// Voltage in the [`ProcessorVoltage`] encoding
    pub voltage: u8,
    /// External clock in MHz
    pub external_clock: u16,
    /// Maximum speed in MHz
    pub max_speed: u16,
    /// Current speed in MHz
    pub current_speed: u16,
    /// Status in the [`ProcessorStatusBits`] encoding
    pub status: u8,
    /// The enumeration value from [`ProcessorUpgrade`]
    pub processor_upgrade: u8,
    /// Handle of the L1 cache record, or 0xFFFF
    pub l1_cache_handle: u16,
    /// Handle of the L2 cache record, or 0xFFFF
    pub l2_cache_handle: u16,
    /// Handle of the L3 cache record, or 0xFFFF
    pub l3_cache_handle: u16,
    /// Serial number string
    pub serial_number: SmbiosTableString,
    /// Asset tag string
    pub asset_tag: SmbiosTableString,
    /// Part number string
    pub part_number: SmbiosTableString,
    /// Core count, or 0xFF when reported through `core_count2`
    pub core_count: u8,
    /// Enabled core count, or 0xFF when reported through `enabled_core_count2`
    pub enabled_core_count: u8,
    /// Thread count, or 0xFF when reported through `thread_count2`
    pub thread_count: u8,
    /// Characteristics in the [`ProcessorCharacteristicFlags`] encoding
    pub processor_characteristics: u16,
    /// Processor family 2
    pub processor_family2: u16,
    /// Core count 2
    pub core_count2: u16,
    /// Enabled core count 2
    pub enabled_core_count2: u16,
    /// Thread count 2
    pub thread_count2: u16,
}

/// Cache Information (Type 7).
///
/// The information in this structure defines the attributes of one CPU cache device.
/// One structure instance is provided for each device.
#[repr(C, packed)]
#[derive(Debug, Clone, PartialEq, DeriveFromBytes, DeriveIntoBytes, DeriveImmutable, KnownLayout)]
pub struct SmbiosTableType7 {
    /// Record header
    pub hdr: SmbiosTableHeader,
    /// Socket designation string
    pub socket_designation: SmbiosTableString,
    /// Level, socketing, location, enablement, and operational mode bitfield
    pub cache_configuration: u16,
    /// Maximum size in the 16-bit granular encoding
    pub maximum_cache_size: u16,
    /// Installed size in the 16-bit granular encoding
    pub installed_size: u16,
    /// Supported SRAM types in the [`CacheSramTypeData`] encoding
    pub supported_sram_type: u16,
    /// Current SRAM type in the [`CacheSramTypeData`] encoding
    pub current_sram_type: u16,
    /// Cache speed in nanoseconds, zero for unknown
    pub cache_speed: u8,
    /// The enumeration value from [`CacheErrorType`]
    pub error_correction_type: u8,
    /// The enumeration value from [`SystemCacheType`]
    pub system_cache_type: u8,
    /// The enumeration value from [`CacheAssociativity`]
    pub associativity: u8,
    /// Maximum size in the 32-bit granular encoding
    pub maximum_cache_size2: u32,
    /// Installed size in the 32-bit granular encoding
    pub installed_size2: u32,
}

/// Serializes a record as the host SMBIOS service expects it: the fixed portion
/// followed by the string pack.
pub fn record_bytes<T: IntoBytes + Immutable>(fixed: &T, string_pack: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(core::mem::size_of::<T>() + string_pack.len());
    bytes.extend_from_slice(fixed.as_bytes());
    bytes.extend_from_slice(string_pack);
    bytes
}
