//! Platform information HOB
//!
//! Earlier boot firmware publishes a GUIDed HOB describing the processor configuration:
//! clock frequencies, enabled core masks, voltages, SKU identifiers, and die ECIDs. This
//! module defines the Rust view of that HOB so later-phase components can consume it
//! without re-deriving hardware state.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use r_efi::efi;
use zerocopy::FromBytes;
use zerocopy_derive::{FromBytes as DeriveFromBytes, Immutable, IntoBytes as DeriveIntoBytes, KnownLayout};

use crate::error::EfiError;

/// GUID identifying the platform information HOB: B4C8CDF4-92A2-45F8-BBf5-30E1A1DCF349
pub const PLATFORM_INFO_HOB_GUID: efi::Guid =
    efi::Guid::from_fields(0xB4C8CDF4, 0x92A2, 0x45F8, 0xBB, 0xF5, &[0x30, 0xE1, 0xA1, 0xDC, 0xF3, 0x49]);

/// Maximum number of processor sockets the platform supports
pub const PLATFORM_CPU_MAX_SOCKET: usize = 2;

/// Number of cores in each processor complex module (CPM)
pub const CORES_PER_CPM: u32 = 2;

/// Processor configuration published by early boot firmware.
///
/// All multi-valued fields are indexed by socket. Frequencies are reported in Hz except
/// for `turbo_frequency`, which is already scaled to MHz. Core voltage is in millivolts.
#[repr(C, packed)]
#[derive(Debug, Clone, PartialEq, DeriveFromBytes, DeriveIntoBytes, Immutable, KnownLayout)]
pub struct PlatformInfoHob {
    /// PCP (mesh) clock frequency in Hz
    pub pcp_clk: u64,
    /// CPU core clock frequency in Hz
    pub cpu_clk: u64,
    /// Bitmask of enabled CPMs for each socket
    pub cpm_en: [u64; PLATFORM_CPU_MAX_SOCKET],
    /// Maximum core count the silicon supports, per socket
    pub max_num_of_core: [u16; PLATFORM_CPU_MAX_SOCKET],
    /// Core voltage in millivolts, per socket
    pub core_voltage: [u16; PLATFORM_CPU_MAX_SOCKET],
    /// SCU product identifier, per socket
    pub scu_product_id: [u32; PLATFORM_CPU_MAX_SOCKET],
    /// Non-zero when the socket supports turbo frequencies
    pub turbo_capability: [u8; PLATFORM_CPU_MAX_SOCKET],
    /// Turbo frequency in MHz, per socket
    pub turbo_frequency: [u16; PLATFORM_CPU_MAX_SOCKET],
    /// Maximum core count for the fused SKU, per socket
    pub sku_max_core: [u8; PLATFORM_CPU_MAX_SOCKET],
    /// Maximum turbo multiplier for the fused SKU, per socket
    pub sku_max_turbo: [u8; PLATFORM_CPU_MAX_SOCKET],
    /// Electronic chip identifier, four words per socket
    pub ecid: [[u32; 4]; PLATFORM_CPU_MAX_SOCKET],
}

impl PlatformInfoHob {
    /// Parses a platform information HOB from its GUIDed HOB data payload.
    ///
    /// Returns `EfiError::InvalidParameter` if the payload is not exactly the size of
    /// the HOB structure.
    pub fn parse(data: &[u8]) -> Result<Self, EfiError> {
        Self::read_from_bytes(data).map_err(|_| EfiError::InvalidParameter)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use zerocopy::IntoBytes;

    fn sample_hob() -> PlatformInfoHob {
        PlatformInfoHob {
            pcp_clk: 2_000_000_000,
            cpu_clk: 3_000_000_000,
            cpm_en: [0xFF_FFFF_FFFF, 0],
            max_num_of_core: [80, 80],
            core_voltage: [820, 0],
            scu_product_id: [0x0000_3001, 0],
            turbo_capability: [1, 0],
            turbo_frequency: [3300, 0],
            sku_max_core: [80, 0],
            sku_max_turbo: [0x34, 0],
            ecid: [[0x1234_5678, 0x9ABC_DEF0, 0x0F0F_0F0F, 0xAAAA_5555], [0; 4]],
        }
    }

    #[test]
    fn test_parse_round_trips() {
        let hob = sample_hob();
        let parsed = PlatformInfoHob::parse(hob.as_bytes()).unwrap();
        assert_eq!(parsed, hob);
    }

    #[test]
    fn test_parse_rejects_truncated_payload() {
        let hob = sample_hob();
        let bytes = hob.as_bytes();
        assert_eq!(PlatformInfoHob::parse(&bytes[..bytes.len() - 1]), Err(EfiError::InvalidParameter));
    }

    #[test]
    fn test_parse_rejects_oversized_payload() {
        let hob = sample_hob();
        let mut bytes = hob.as_bytes().to_vec();
        bytes.push(0);
        assert_eq!(PlatformInfoHob::parse(&bytes), Err(EfiError::InvalidParameter));
    }

    #[test]
    fn test_layout_is_packed() {
        assert_eq!(core::mem::size_of::<PlatformInfoHob>(), 90);
    }
}
