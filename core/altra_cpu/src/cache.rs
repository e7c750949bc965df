//! Cache geometry decoding
//!
//! `CCSIDR_EL1` describes one cache at a time: line size, associativity, set count,
//! and the supported write policies. [`CacheInfo`] decodes a raw register value into
//! those fields; [`CacheInfo::read`] combines the decode with the register access for
//! the cache named by level and kind.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use crate::registers;

/// Write-through support flag
const CCSIDR_WT: u64 = 1 << 31;
/// Write-back support flag
const CCSIDR_WB: u64 = 1 << 30;

/// Which cache a level selector refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    /// Instruction cache
    Instruction,
    /// Data cache
    Data,
    /// Unified cache
    Unified,
}

/// Operational write policy of a cache.
///
/// Values follow the SMBIOS cache configuration operational mode encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CacheOperationalMode {
    /// Cache is write-through
    WriteThrough = 0,
    /// Cache is write-back
    WriteBack = 1,
    /// Cache mode varies by address
    VariesWithAddress = 2,
    /// Cache mode is unknown
    Unknown = 3,
}

/// Builds the `CSSELR_EL1` selector for a cache level and kind.
///
/// `level` is 1-based. The instruction/not-data bit is only set for instruction
/// caches; data and unified caches share the data selector.
pub fn cache_selector(level: u8, kind: CacheKind) -> u32 {
    debug_assert!((1..=7).contains(&level));
    let ind = matches!(kind, CacheKind::Instruction) as u32;
    (u32::from(level.saturating_sub(1)) << 1) | ind
}

/// Geometry and write policy of one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheInfo {
    /// Cache line length in bytes
    pub line_size_bytes: u32,
    /// Number of ways
    pub associativity: u32,
    /// Number of sets
    pub number_of_sets: u32,
    /// Supported write policy
    pub operational_mode: CacheOperationalMode,
}

impl CacheInfo {
    /// Decodes a raw `CCSIDR_EL1` value.
    pub fn decode(ccsidr: u64) -> Self {
        let supports_wt = ccsidr & CCSIDR_WT != 0;
        let supports_wb = ccsidr & CCSIDR_WB != 0;
        let operational_mode = if supports_wt && supports_wb {
            CacheOperationalMode::VariesWithAddress
        } else if supports_wt {
            CacheOperationalMode::WriteThrough
        } else {
            CacheOperationalMode::WriteBack
        };

        Self {
            line_size_bytes: 1 << ((ccsidr & 0x7) + 4),
            associativity: (((ccsidr >> 3) & 0x3FF) + 1) as u32,
            number_of_sets: (((ccsidr >> 13) & 0x7FFF) + 1) as u32,
            operational_mode,
        }
    }

    /// Reads and decodes the cache named by `level` (1-based) and `kind` on the
    /// current PE.
    pub fn read(level: u8, kind: CacheKind) -> Self {
        Self::decode(registers::read_ccsidr(cache_selector(level, kind)))
    }

    /// Total cache size in bytes.
    pub fn size_bytes(&self) -> u64 {
        u64::from(self.line_size_bytes) * u64::from(self.associativity) * u64::from(self.number_of_sets)
    }

    /// Total cache size in kilobytes.
    pub fn size_kb(&self) -> u32 {
        (self.size_bytes() / 1024) as u32
    }
}
