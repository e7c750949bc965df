//! Socket and core topology
//!
//! Wraps the platform information HOB with the derivations the reporting components
//! need: per-socket core counts from the CPM enable masks, frequencies scaled to MHz,
//! turbo-aware maximum speed, and the Altra versus Altra Max product distinction.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use altra_sdk::hob::{CORES_PER_CPM, PLATFORM_CPU_MAX_SOCKET, PlatformInfoHob};

use crate::registers;

/// Hz per MHz
pub const MHZ_SCALE_FACTOR: u64 = 1_000_000;

/// SMBIOS processor ID for this platform: `MIDR_EL1` in the low word, high word zero.
pub fn processor_id() -> u64 {
    registers::read_midr() & 0xFFFF_FFFF
}

/// Topology and identity derived from the platform information HOB.
///
/// Accessors that take a socket index return zero values for sockets beyond
/// [`PLATFORM_CPU_MAX_SOCKET`].
#[derive(Debug, Clone, Copy)]
pub struct CpuInfo<'a> {
    hob: &'a PlatformInfoHob,
}

impl<'a> CpuInfo<'a> {
    /// Wraps a parsed platform information HOB.
    pub fn new(hob: &'a PlatformInfoHob) -> Self {
        Self { hob }
    }

    /// Number of sockets the platform supports.
    pub fn supported_sockets(&self) -> usize {
        PLATFORM_CPU_MAX_SOCKET
    }

    /// Number of active cores in a socket, from the CPM enable mask.
    pub fn active_cores(&self, socket: usize) -> u32 {
        // Copying packed fields to local variables to avoid unaligned references
        let cpm_en = self.hob.cpm_en;
        match cpm_en.get(socket) {
            Some(mask) => mask.count_ones() * CORES_PER_CPM,
            None => 0,
        }
    }

    /// Maximum number of cores the silicon supports.
    pub fn max_cores(&self) -> u32 {
        let max_num_of_core = self.hob.max_num_of_core;
        u32::from(max_num_of_core[0])
    }

    /// Whether the second socket has any active cores.
    pub fn is_slave_socket_active(&self) -> bool {
        self.active_cores(1) > 0
    }

    /// Whether a socket is physically present.
    pub fn is_socket_present(&self, socket: usize) -> bool {
        match socket {
            0 => true,
            s if s < PLATFORM_CPU_MAX_SOCKET => self.is_slave_socket_active(),
            _ => false,
        }
    }

    /// Whether this is a first-generation Altra part rather than Altra Max.
    pub fn is_ac01(&self) -> bool {
        self.is_ac01_socket(0)
    }

    /// Whether the part in a socket is first-generation Altra.
    pub fn is_ac01_socket(&self, socket: usize) -> bool {
        let scu_product_id = self.hob.scu_product_id;
        match scu_product_id.get(socket) {
            Some(&id) => (id & 0xFF) == 0x01,
            None => false,
        }
    }

    /// Core clock frequency in MHz.
    pub fn cpu_frequency_mhz(&self) -> u16 {
        let cpu_clk = self.hob.cpu_clk;
        (cpu_clk / MHZ_SCALE_FACTOR) as u16
    }

    /// Mesh (PCP) clock frequency in MHz.
    pub fn pcp_frequency_mhz(&self) -> u16 {
        let pcp_clk = self.hob.pcp_clk;
        (pcp_clk / MHZ_SCALE_FACTOR) as u16
    }

    /// Maximum speed of a socket in MHz, using the turbo frequency when fused on.
    pub fn max_frequency_mhz(&self, socket: usize) -> u16 {
        let turbo_capability = self.hob.turbo_capability;
        let turbo_frequency = self.hob.turbo_frequency;
        match turbo_capability.get(socket) {
            Some(&cap) if cap != 0 => turbo_frequency[socket],
            _ => self.cpu_frequency_mhz(),
        }
    }

    /// Core voltage of a socket in millivolts.
    pub fn core_voltage_mv(&self, socket: usize) -> u16 {
        let core_voltage = self.hob.core_voltage;
        core_voltage.get(socket).copied().unwrap_or(0)
    }

    /// Electronic chip identifier words for a socket.
    pub fn ecid(&self, socket: usize) -> [u32; 4] {
        let ecid = self.hob.ecid;
        ecid.get(socket).copied().unwrap_or([0; 4])
    }

    /// Maximum core count fused for the socket's SKU.
    pub fn sku_max_core(&self, socket: usize) -> u8 {
        let sku_max_core = self.hob.sku_max_core;
        sku_max_core.get(socket).copied().unwrap_or(0)
    }

    /// Maximum turbo multiplier fused for the socket's SKU.
    pub fn sku_max_turbo(&self, socket: usize) -> u8 {
        let sku_max_turbo = self.hob.sku_max_turbo;
        sku_max_turbo.get(socket).copied().unwrap_or(0)
    }
}
