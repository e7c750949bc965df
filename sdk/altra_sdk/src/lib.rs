//! # Altra Platform SDK
//!
//! Shared types and host-interface seams for the Ampere(R) Altra(R) platform firmware
//! components. The firmware core owns protocol dispatch, HOB traversal and the SMBIOS
//! manager; this crate defines the narrow surfaces the platform components consume:
//!
//! - [`smbios`] - SMBIOS primitives (handles, table header, string limits) and the
//!   [`smbios::Smbios`] service trait used to register records with the host table manager.
//! - [`serial`] - byte-oriented serial I/O trait and the PL011 UART driver behind it.
//! - [`hob`] - the platform information HOB produced by the earlier boot phase, parsed
//!   with zerocopy from the GUID-ed HOB payload the core hands to components.
//! - [`error`] - EFI status shaped error type shared by the host seams.
//!
//! All interfaces are `no_std`; unit tests run hosted with `std`.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod hob;
pub mod serial;
pub mod smbios;
