//! Processor and cache table production
//!
//! [`CpuSmbiosComponent`] owns the per-socket blueprints, refreshes them from the
//! platform information HOB and the identification registers, and installs them
//! through the host [`Smbios`] service. Type 7 records go in first so their
//! assigned handles can be threaded into the owning Type 4 record's cache-handle
//! fields; a failed add stops the walk and propagates.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use alloc::format;
use alloc::vec::Vec;

use altra_cpu::cache::CacheInfo;
use altra_cpu::topology::{CpuInfo, processor_id};
use altra_sdk::hob::PlatformInfoHob;
use altra_sdk::smbios::{Smbios, SmbiosHandle};

use crate::cache::{associativity_code, cache_configuration, encode_cache_size};
use crate::error::CpuSmbiosError;
use crate::record::{legacy_voltage, record_bytes};
use crate::string_pack::update_string_pack;
use crate::tables::{
    PROCESSOR_VERSION_ALTRA, PROCESSOR_VERSION_ALTRA_MAX, SocketTables, TYPE4_STR_PART_NUMBER, TYPE4_STR_SERIAL,
    TYPE4_STR_SOCKET, TYPE4_STR_VERSION,
};

/// Index of the L1 instruction cache in a socket's Type 7 set
const CACHE_INDEX_L1I: usize = 0;

/// Index of the L2 cache in a socket's Type 7 set
const CACHE_INDEX_L2: usize = 2;

/// Produces and installs the Type 4 and Type 7 records for every socket.
#[derive(Debug, Clone)]
pub struct CpuSmbiosComponent {
    sockets: Vec<SocketTables>,
}

impl Default for CpuSmbiosComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSmbiosComponent {
    /// Creates the component with default blueprints for two sockets.
    pub fn new() -> Self {
        Self { sockets: alloc::vec![SocketTables::new_default(), SocketTables::new_default()] }
    }

    /// Refreshes every blueprint from the platform information HOB, then installs
    /// the records.
    pub fn run(&mut self, hob: &PlatformInfoHob, smbios: &impl Smbios) -> Result<(), CpuSmbiosError> {
        let info = CpuInfo::new(hob);
        self.update(&info)?;
        self.install(&info, smbios)
    }

    /// Rewrites the blueprint fields and strings that depend on platform state.
    pub fn update(&mut self, info: &CpuInfo) -> Result<(), CpuSmbiosError> {
        for socket in 0..info.supported_sockets() {
            self.update_processor(info, socket)?;
            if socket == 0 || info.is_slave_socket_active() {
                self.update_caches(info, socket);
            }
        }
        Ok(())
    }

    fn update_processor(&mut self, info: &CpuInfo, socket: usize) -> Result<(), CpuSmbiosError> {
        let blueprint = &mut self.sockets[socket].processor;
        let table = &mut blueprint.fixed;

        update_string_pack(&mut blueprint.pack, TYPE4_STR_SOCKET, &format!("CPU {socket}"))?;

        let version = if info.is_ac01() { PROCESSOR_VERSION_ALTRA } else { PROCESSOR_VERSION_ALTRA_MAX };
        update_string_pack(&mut blueprint.pack, TYPE4_STR_VERSION, version)?;

        let active_cores = info.active_cores(socket);
        table.core_count = info.max_cores() as u8;
        table.thread_count = info.max_cores() as u8;
        table.enabled_core_count = active_cores as u8;

        if active_cores > 0 {
            table.current_speed = info.cpu_frequency_mhz();
            table.external_clock = info.pcp_frequency_mhz();
            table.max_speed = info.max_frequency_mhz(socket);
        } else {
            table.current_speed = 0;
            table.external_clock = 0;
            table.max_speed = 0;
            table.status = 0;
        }

        table.processor_id = processor_id();
        table.voltage = legacy_voltage(info.core_voltage_mv(socket));

        if active_cores > 0 {
            let family = if info.is_ac01_socket(socket) { 'Q' } else { 'M' };
            let part = format!("{}{:02}-{:02X}", family, info.sku_max_core(socket), info.sku_max_turbo(socket));
            update_string_pack(&mut blueprint.pack, TYPE4_STR_PART_NUMBER, &part)?;

            let ecid = info.ecid(socket);
            let serial = format!("{:08X}{:08X}{:08X}{:08X}", ecid[0], ecid[1], ecid[2], ecid[3]);
            update_string_pack(&mut blueprint.pack, TYPE4_STR_SERIAL, &serial)?;
        }

        Ok(())
    }

    fn update_caches(&mut self, info: &CpuInfo, socket: usize) {
        let active_cores = info.active_cores(socket);
        for blueprint in &mut self.sockets[socket].caches {
            let cache = CacheInfo::read(blueprint.level, blueprint.kind);
            let table = &mut blueprint.fixed;

            table.associativity = associativity_code(cache.associativity);
            table.cache_configuration = cache_configuration(blueprint.level, cache.operational_mode);

            let size = encode_cache_size(cache.size_bytes(), active_cores);
            table.maximum_cache_size = size.legacy;
            table.installed_size = size.legacy;
            table.maximum_cache_size2 = size.extended;
            table.installed_size2 = size.extended;
        }
    }

    /// Installs the records, Type 7 before Type 4, threading the assigned L1I and L2
    /// handles into each socket's Type 4 record.
    ///
    /// Socket 1 records are only installed when the slave socket is active. The first
    /// rejected record stops the walk.
    pub fn install(&mut self, info: &CpuInfo, smbios: &impl Smbios) -> Result<(), CpuSmbiosError> {
        let installed_sockets =
            (0..info.supported_sockets()).filter(|&s| s == 0 || info.is_slave_socket_active()).collect::<Vec<_>>();

        for &socket in &installed_sockets {
            for index in 0..self.sockets[socket].caches.len() {
                let blueprint = &self.sockets[socket].caches[index];
                let level = blueprint.level;
                let handle = smbios
                    .add_from_bytes(None, &record_bytes(&blueprint.fixed, &blueprint.pack))
                    .map_err(|error| {
                        log::error!(
                            target: "altra_smbios_cpu",
                            "adding Type 7 socket {socket} L{level} cache failed: {error:?}"
                        );
                        error
                    })?;
                log::trace!(target: "altra_smbios_cpu", "Type 7 socket {socket} cache {index} - handle {handle:#06X}");
                self.thread_cache_handle(socket, index, handle);
            }
        }

        for &socket in &installed_sockets {
            let blueprint = &self.sockets[socket].processor;
            let handle =
                smbios.add_from_bytes(None, &record_bytes(&blueprint.fixed, &blueprint.pack)).map_err(|error| {
                    log::error!(target: "altra_smbios_cpu", "adding Type 4 socket {socket} failed: {error:?}");
                    error
                })?;
            log::trace!(target: "altra_smbios_cpu", "Type 4 socket {socket} - handle {handle:#06X}");
        }

        Ok(())
    }

    fn thread_cache_handle(&mut self, socket: usize, cache_index: usize, handle: SmbiosHandle) {
        let table = &mut self.sockets[socket].processor.fixed;
        match cache_index {
            CACHE_INDEX_L1I => table.l1_cache_handle = handle,
            CACHE_INDEX_L2 => table.l2_cache_handle = handle,
            _ => {}
        }
    }

    /// The staged blueprints, exposed for inspection.
    pub fn sockets(&self) -> &[SocketTables] {
        &self.sockets
    }
}
