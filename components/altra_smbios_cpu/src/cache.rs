//! Cache size and configuration encodings
//!
//! SMBIOS Type 7 reports cache sizes twice: a legacy 16-bit field and a 32-bit
//! extended field, each carrying a granularity flag in its top bit (clear for 1K
//! units, set for 64K units). [`encode_cache_size`] produces both fields from a
//! per-core size and the socket's active core count, applying the granularity and
//! overflow rules from SMBIOS 3.x section 7.8. [`CacheConfiguration`] packs the
//! level/location/enablement/mode word of the same record.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use bitfield::bitfield;

use altra_cpu::cache::CacheOperationalMode;

/// Granularity flag of the 16-bit cache size field
const CACHE_SIZE_GRANULARITY_64K: u16 = 1 << 15;

/// Granularity flag of the 32-bit cache size field
const CACHE_SIZE2_GRANULARITY_64K: u32 = 1 << 31;

/// 16-bit field value directing readers to the 32-bit field
pub const CACHE_SIZE_OVERFLOW: u16 = 0xFFFF;

/// Largest size the 15-bit payload of either field can carry
const CACHE_SIZE_PAYLOAD_MAX: u64 = 0x7FFF;

/// Largest size in MB still representable with 1K granularity in the 32-bit field
const CACHE_SIZE2_1K_LIMIT_MB: u64 = 2047;

bitfield! {
    /// Cache Information - Cache Configuration.
    pub struct CacheConfiguration(u16);
    impl Debug;
    pub level_minus_one, set_level_minus_one: 2, 0;
    pub socketed, set_socketed: 3;
    pub location, set_location: 6, 5;
    pub enabled, set_enabled: 7;
    pub operational_mode, set_operational_mode: 9, 8;
    pub reserved, set_reserved: 15, 10;
}

/// Builds the cache configuration word for an enabled, internal, non-socketed
/// cache at `level` (1-based) with the given write policy.
pub fn cache_configuration(level: u8, mode: CacheOperationalMode) -> u16 {
    let mut config = CacheConfiguration(0);
    config.set_level_minus_one(u16::from(level.saturating_sub(1)));
    config.set_enabled(true);
    config.set_operational_mode(mode as u16);
    config.0
}

/// The dual 16/32-bit SMBIOS encoding of one cache size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSizeEncoding {
    /// 16-bit legacy field value
    pub legacy: u16,
    /// 32-bit extended field value
    pub extended: u32,
}

/// Encodes a socket's total cache size from the per-core size and active core count.
///
/// Sizes that fit the 15-bit payload in 1K units use 1K granularity in both fields;
/// sizes whose 64K-unit count fits use 64K granularity in both. Anything larger sets
/// the 16-bit field to [`CACHE_SIZE_OVERFLOW`] and encodes only the 32-bit field,
/// with 1K granularity while the total stays within 2047 MB.
pub fn encode_cache_size(per_core_bytes: u64, active_cores: u32) -> CacheSizeEncoding {
    let total_kb = (per_core_bytes / 1024) * u64::from(active_cores);

    if total_kb < CACHE_SIZE_PAYLOAD_MAX {
        CacheSizeEncoding { legacy: total_kb as u16, extended: total_kb as u32 }
    } else if total_kb / 64 < CACHE_SIZE_PAYLOAD_MAX {
        CacheSizeEncoding {
            legacy: CACHE_SIZE_GRANULARITY_64K | (total_kb / 64) as u16,
            extended: CACHE_SIZE2_GRANULARITY_64K | (total_kb / 64) as u32,
        }
    } else if total_kb / 1024 <= CACHE_SIZE2_1K_LIMIT_MB {
        CacheSizeEncoding { legacy: CACHE_SIZE_OVERFLOW, extended: total_kb as u32 }
    } else {
        CacheSizeEncoding { legacy: CACHE_SIZE_OVERFLOW, extended: CACHE_SIZE2_GRANULARITY_64K | (total_kb / 64) as u32 }
    }
}

/// Decodes a 32-bit extended cache size field back to KB, honoring the granularity bit.
pub fn decode_cache_size2_kb(extended: u32) -> u64 {
    if extended & CACHE_SIZE2_GRANULARITY_64K != 0 {
        u64::from(extended & !CACHE_SIZE2_GRANULARITY_64K) * 64
    } else {
        u64::from(extended)
    }
}

/// Maps a way count to the SMBIOS associativity enumeration.
pub fn associativity_code(ways: u32) -> u8 {
    match ways {
        1 => 0x03,
        2 => 0x04,
        4 => 0x05,
        8 => 0x07,
        16 => 0x08,
        12 => 0x09,
        24 => 0x0A,
        32 => 0x0B,
        48 => 0x0C,
        64 => 0x0D,
        20 => 0x0E,
        _ => 0x02,
    }
}
