//! Serial port access
//!
//! This module defines the byte-oriented serial transport used by platform components
//! and a PL011 UART implementation of it. The management-controller client is generic
//! over [`SerialIo`] so that command traffic can be tested without hardware.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

/// Byte-oriented serial transport.
///
/// Implementations report how many bytes were actually transferred; `0` indicates the
/// device refused the transfer entirely.
pub trait SerialIo {
    /// Writes the buffer out the port, returning the number of bytes written.
    fn write(&self, buffer: &[u8]) -> usize;

    /// Reads bytes from the port into the buffer, returning the number of bytes read.
    fn read(&self, buffer: &mut [u8]) -> usize;
}

/// Data register offset
const UARTDR: usize = 0x000;
/// Flag register offset
const UARTFR: usize = 0x018;

/// Flag register: receive FIFO empty
const UARTFR_RX_BUF_EMPTY: u32 = 1 << 4;
/// Flag register: transmit FIFO full
const UARTFR_TX_BUF_FULL: u32 = 1 << 5;

/// A PL011 single-serial-port controller mapped at a fixed MMIO base.
///
/// The port is expected to have been configured (baud rate, FIFOs) by earlier boot
/// firmware; this driver only moves bytes through the data register.
#[derive(Debug)]
pub struct UartPl011 {
    base: usize,
}

impl UartPl011 {
    /// Creates a driver for the PL011 at `base`.
    ///
    /// `base` must be the physical address of a memory-mapped PL011 register block that
    /// remains identity-mapped for the lifetime of the driver.
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    fn read_reg(&self, offset: usize) -> u32 {
        // SAFETY: `base` points to a mapped PL011 register block per the `new` contract,
        // and `offset` is one of the register offsets defined above.
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u32) }
    }

    fn write_reg(&self, offset: usize, value: u32) {
        // SAFETY: `base` points to a mapped PL011 register block per the `new` contract,
        // and `offset` is one of the register offsets defined above.
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, value) }
    }

    /// Returns true if the receive-buffer-empty flag is clear.
    pub fn has_incoming_data(&self) -> bool {
        self.read_reg(UARTFR) & UARTFR_RX_BUF_EMPTY == 0
    }

    /// Reads a single byte from the port.
    ///
    /// Spins until a byte is available in the FIFO.
    pub fn read_byte(&self) -> u8 {
        while !self.has_incoming_data() {
            core::hint::spin_loop();
        }
        self.read_reg(UARTDR) as u8
    }

    /// Returns true if the transmit-buffer-full flag is clear.
    pub fn is_writeable(&self) -> bool {
        self.read_reg(UARTFR) & UARTFR_TX_BUF_FULL == 0
    }

    /// Writes a single byte out the port.
    ///
    /// Spins until space is available in the FIFO.
    pub fn write_byte(&self, data: u8) {
        while !self.is_writeable() {
            core::hint::spin_loop();
        }
        self.write_reg(UARTDR, data as u32);
    }
}

// Register traffic is exercised on hardware; unit coverage comes from SerialIo mocks.
impl SerialIo for UartPl011 {
    fn write(&self, buffer: &[u8]) -> usize {
        for byte in buffer {
            self.write_byte(*byte);
        }
        buffer.len()
    }

    fn read(&self, buffer: &mut [u8]) -> usize {
        for slot in buffer.iter_mut() {
            *slot = self.read_byte();
        }
        buffer.len()
    }
}
