//! AArch64 identification register access
//!
//! The cache and processor reporting paths need `MIDR_EL1` and `CCSIDR_EL1`. On UEFI
//! targets these are read directly from the current PE. Hosted builds substitute fixed
//! values shaped like a Neoverse N1 core (64KB 4-way L1 caches, 1MB 8-way L2) so the
//! decoding logic above this module can run under test.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

cfg_if::cfg_if! {
    if #[cfg(not(target_os = "uefi"))] {
        const STUB_MIDR: u64 = 0x413F_D0C1;

        const STUB_CCSIDR_L1D: u64 = 0x701F_E01A;
        const STUB_CCSIDR_L1I: u64 = 0x201F_E01A;
        const STUB_CCSIDR_L2: u64 = 0x70FF_E03A;

        /// Reads the main ID register of the current PE.
        pub fn read_midr() -> u64 {
            STUB_MIDR
        }

        /// Reads `CCSIDR_EL1` for the cache named by the `CSSELR_EL1` selector value.
        pub fn read_ccsidr(csselr: u32) -> u64 {
            match csselr {
                0 => STUB_CCSIDR_L1D,
                1 => STUB_CCSIDR_L1I,
                2 => STUB_CCSIDR_L2,
                _ => 0,
            }
        }
    } else if #[cfg(target_arch = "aarch64")] {
        /// Reads the main ID register of the current PE.
        pub fn read_midr() -> u64 {
            let value: u64;
            // SAFETY: MIDR_EL1 is a read-only identification register; reading it has
            // no side effects.
            unsafe {
                core::arch::asm!("mrs {}, midr_el1", out(reg) value, options(nomem, nostack, preserves_flags));
            }
            value
        }

        /// Reads `CCSIDR_EL1` for the cache named by the `CSSELR_EL1` selector value.
        pub fn read_ccsidr(csselr: u32) -> u64 {
            let value: u64;
            // SAFETY: CSSELR_EL1 only selects which cache CCSIDR_EL1 exposes; the isb
            // orders the selection before the read and no memory is touched.
            unsafe {
                core::arch::asm!(
                    "msr csselr_el1, {sel}",
                    "isb",
                    "mrs {val}, ccsidr_el1",
                    sel = in(reg) csselr as u64,
                    val = out(reg) value,
                    options(nostack, preserves_flags),
                );
            }
            value
        }
    }
}
